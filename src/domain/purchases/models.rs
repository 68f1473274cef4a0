//! Purchase models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::products::Product;

/// Raised when the backend reports a purchase status code this client does
/// not know.
#[derive(Debug, Error)]
#[error("unknown purchase status code {0}")]
pub struct UnknownPurchaseStatus(i8);

/// Lifecycle state of a purchase. The backend encodes these as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
#[repr(i8)]
pub enum PurchaseStatus {
    /// Sitting in the cart, not yet ordered.
    InCart = -1,

    /// Ordered, waiting for the shop to confirm.
    AwaitingConfirmation = 1,

    /// Confirmed, being picked up from the shop.
    BeingCollected = 2,

    /// In transit to the buyer.
    InTransit = 3,

    /// Delivered.
    Delivered = 4,

    /// Cancelled.
    Cancelled = 5,
}

impl From<PurchaseStatus> for i8 {
    fn from(status: PurchaseStatus) -> Self {
        status as Self
    }
}

impl TryFrom<i8> for PurchaseStatus {
    type Error = UnknownPurchaseStatus;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::InCart),
            1 => Ok(Self::AwaitingConfirmation),
            2 => Ok(Self::BeingCollected),
            3 => Ok(Self::InTransit),
            4 => Ok(Self::Delivered),
            5 => Ok(Self::Cancelled),
            other => Err(UnknownPurchaseStatus(other)),
        }
    }
}

/// Status filter for purchase listings: a concrete status, or `All` (encoded
/// as `0` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum PurchaseListStatus {
    /// Every purchase regardless of status.
    All,

    /// Purchases in one specific status.
    Only(PurchaseStatus),
}

impl From<PurchaseListStatus> for i8 {
    fn from(status: PurchaseListStatus) -> Self {
        match status {
            PurchaseListStatus::All => 0,
            PurchaseListStatus::Only(status) => status.into(),
        }
    }
}

impl TryFrom<i8> for PurchaseListStatus {
    type Error = UnknownPurchaseStatus;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        if value == 0 {
            Ok(Self::All)
        } else {
            PurchaseStatus::try_from(value).map(Self::Only)
        }
    }
}

/// One purchased (or carted) product.
#[derive(Debug, Clone, Deserialize)]
pub struct Purchase {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,

    /// Number of units.
    pub buy_count: u32,

    /// Unit price at purchase time.
    pub price: u64,

    /// Unit price before discount at purchase time.
    pub price_before_discount: u64,

    /// Lifecycle state.
    pub status: PurchaseStatus,

    /// Identifier of the owning user.
    pub user: String,

    /// Product snapshot.
    pub product: Product,

    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,

    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,
}

/// Body of an add-to-cart request.
#[derive(Debug, Clone, Serialize)]
pub struct AddToCart {
    /// Product to add.
    pub product_id: String,

    /// Number of units.
    pub buy_count: u32,
}
