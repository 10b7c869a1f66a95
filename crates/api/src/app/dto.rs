//! Response envelopes.
//!
//! Every body carries `success`; successful bodies carry `data`, failures carry
//! a human-readable `message` and, for faults, the underlying `error` text.

use serde::{Deserialize, Serialize};

use coffeeshop_menu::{MenuItem, MenuListing};

/// `GET /menu` success body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEnvelope {
    pub success: bool,
    pub data: Vec<MenuItem>,
    pub count: usize,
}

impl From<MenuListing> for ListEnvelope {
    fn from(listing: MenuListing) -> Self {
        Self {
            success: true,
            data: listing.items,
            count: listing.count,
        }
    }
}

/// `GET /menu/random` success body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEnvelope {
    pub success: bool,
    pub data: MenuItem,
}

impl From<MenuItem> for ItemEnvelope {
    fn from(item: MenuItem) -> Self {
        Self {
            success: true,
            data: item,
        }
    }
}

/// Failure body for every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error,
        }
    }
}
