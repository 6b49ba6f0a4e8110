//! Users

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The shopper a request is evaluated for.
///
/// Constructed per request; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    /// User identifier
    pub user_id: String,

    /// Segmentation label, e.g. `GOLD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_tier: Option<String>,

    /// Country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Total spent across past orders
    #[serde(default)]
    pub lifetime_spend: Decimal,

    /// Number of past orders
    #[serde(default)]
    pub orders_placed: u32,
}

impl UserContext {
    /// Create a user with no tier, no country and no history.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_tier: None,
            country: None,
            lifetime_spend: Decimal::ZERO,
            orders_placed: 0,
        }
    }

    /// Set the user tier.
    #[must_use]
    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.user_tier = Some(tier.into());
        self
    }

    /// Set the country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set the lifetime spend.
    #[must_use]
    pub fn with_lifetime_spend(mut self, lifetime_spend: Decimal) -> Self {
        self.lifetime_spend = lifetime_spend;
        self
    }

    /// Set the number of orders placed.
    #[must_use]
    pub fn with_orders_placed(mut self, orders_placed: u32) -> Self {
        self.orders_placed = orders_placed;
        self
    }
}
