//! Coupons

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::eligibility::Eligibility;

/// How a coupon's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// A fixed currency amount off the cart.
    Flat,

    /// A percentage of the cart total, optionally capped.
    Percent,
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountType::Flat => f.write_str("FLAT"),
            DiscountType::Percent => f.write_str("PERCENT"),
        }
    }
}

/// A coupon in the catalog.
///
/// Codes are not required to be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Code the shopper redeems
    pub code: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// How `discount_value` is applied
    pub discount_type: DiscountType,

    /// Flat amount, or percentage points for [`DiscountType::Percent`]
    pub discount_value: Decimal,

    /// Upper bound on a percentage discount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount_amount: Option<Decimal>,

    /// First instant the coupon is valid
    #[serde(deserialize_with = "crate::timestamps::deserialize")]
    pub start_date: Timestamp,

    /// Last instant the coupon is valid
    #[serde(deserialize_with = "crate::timestamps::deserialize")]
    pub end_date: Timestamp,

    /// Stored for clients; redemptions are not tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit_per_user: Option<u32>,

    /// Who and what may redeem the coupon; `None` means everyone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<Eligibility>,
}

impl Coupon {
    /// Create a coupon with no description, cap, usage limit or eligibility rules.
    pub fn new(
        code: impl Into<String>,
        discount_type: DiscountType,
        discount_value: Decimal,
        start_date: Timestamp,
        end_date: Timestamp,
    ) -> Self {
        Self {
            code: code.into(),
            description: None,
            discount_type,
            discount_value,
            max_discount_amount: None,
            start_date,
            end_date,
            usage_limit_per_user: None,
            eligibility: None,
        }
    }

    /// Create a fixed amount coupon.
    pub fn flat(
        code: impl Into<String>,
        amount: Decimal,
        start_date: Timestamp,
        end_date: Timestamp,
    ) -> Self {
        Self::new(code, DiscountType::Flat, amount, start_date, end_date)
    }

    /// Create a percentage coupon.
    pub fn percent(
        code: impl Into<String>,
        percent: Decimal,
        start_date: Timestamp,
        end_date: Timestamp,
    ) -> Self {
        Self::new(code, DiscountType::Percent, percent, start_date, end_date)
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Cap the discount amount.
    #[must_use]
    pub fn with_max_discount(mut self, cap: Decimal) -> Self {
        self.max_discount_amount = Some(cap);
        self
    }

    /// Set the per-user usage limit.
    #[must_use]
    pub fn with_usage_limit_per_user(mut self, limit: u32) -> Self {
        self.usage_limit_per_user = Some(limit);
        self
    }

    /// Attach an eligibility ruleset.
    #[must_use]
    pub fn with_eligibility(mut self, eligibility: Eligibility) -> Self {
        self.eligibility = Some(eligibility);
        self
    }

    /// Whether `now` falls inside `[start_date, end_date]`.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        self.start_date <= now && now <= self.end_date
    }
}
