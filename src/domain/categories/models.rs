//! Category models.

use serde::Deserialize;

/// Product category.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name.
    pub name: String,
}
