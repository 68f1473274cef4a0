//! JSON envelopes shared by every storefront endpoint.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Successful response envelope: a human-readable message plus a payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSuccess<T> {
    /// Server-provided status message.
    pub message: String,

    /// Endpoint-specific payload.
    pub data: T,
}

/// Successful response envelope carrying no payload (e.g. logout).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    /// Server-provided status message.
    pub message: String,
}

/// Error response envelope.
///
/// The backend reports failures as `{ message?, data? }` where `data` holds a
/// nested message, a machine-readable error name, and (for validation
/// failures) one entry per offending form field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// Top-level error message.
    pub message: Option<String>,

    /// Nested error details.
    pub data: Option<ErrorData>,
}

/// Nested error details within an [`ErrorBody`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorData {
    /// Error message scoped to the failing operation.
    pub message: Option<String>,

    /// Machine-readable error name (e.g. the expired-token sentinel).
    pub name: Option<String>,

    /// Remaining fields, preserved verbatim. For validation failures these
    /// are per-field messages keyed by form field name.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl ErrorBody {
    /// Parse an error body, falling back to an empty envelope when the
    /// payload is not JSON (e.g. an HTML error page from a proxy).
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    /// Machine-readable error name, when present.
    #[must_use]
    pub fn error_name(&self) -> Option<&str> {
        self.data.as_ref()?.name.as_deref()
    }

    /// Best human-readable message: the nested message wins over the
    /// top-level one.
    #[must_use]
    pub fn display_message(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.message.as_deref())
            .or(self.message.as_deref())
    }

    /// Per-field messages from a validation failure.
    #[must_use]
    pub fn field_messages(&self) -> BTreeMap<String, String> {
        let Some(data) = self.data.as_ref() else {
            return BTreeMap::new();
        };

        data.fields
            .iter()
            .filter_map(|(field, value)| {
                value
                    .as_str()
                    .map(|message| (field.clone(), message.to_owned()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_error_details() {
        let body = ErrorBody::from_slice(
            br#"{"message":"Error","data":{"message":"Token expired","name":"EXPIRED_TOKEN"}}"#,
        );

        assert_eq!(body.error_name(), Some("EXPIRED_TOKEN"));
        assert_eq!(body.display_message(), Some("Token expired"));
    }

    #[test]
    fn nested_message_wins_over_top_level() {
        let body =
            ErrorBody::from_slice(br#"{"message":"outer","data":{"message":"inner"}}"#);

        assert_eq!(body.display_message(), Some("inner"));
    }

    #[test]
    fn falls_back_to_top_level_message() {
        let body = ErrorBody::from_slice(br#"{"message":"outer"}"#);

        assert_eq!(body.display_message(), Some("outer"));
        assert_eq!(body.error_name(), None);
    }

    #[test]
    fn non_json_body_parses_as_empty() {
        let body = ErrorBody::from_slice(b"<html>502 Bad Gateway</html>");

        assert_eq!(body.display_message(), None);
        assert_eq!(body.error_name(), None);
    }

    #[test]
    fn validation_fields_are_preserved() {
        let body = ErrorBody::from_slice(
            br#"{"message":"Invalid","data":{"email":"Email khong hop le","password":"Required"}}"#,
        );

        let fields = body.field_messages();

        assert_eq!(fields.get("email").map(String::as_str), Some("Email khong hop le"));
        assert_eq!(fields.get("password").map(String::as_str), Some("Required"));
    }
}
