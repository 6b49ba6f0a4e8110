//! Eligibility Rules
//!
//! Independently optional predicates restricting who may redeem a coupon and for which carts.
//! An absent or empty rule never rejects.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cart::Cart, coupons::Coupon, users::UserContext};

/// Eligibility ruleset attached to a coupon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    /// Tiers allowed to redeem. Only enforced for users with a tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_user_tiers: Option<Vec<String>>,

    /// Minimum lifetime spend of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_lifetime_spend: Option<Decimal>,

    /// Minimum number of past orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_orders_placed: Option<u32>,

    /// Declared by catalog authors; not enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_order_only: Option<bool>,

    /// Countries allowed to redeem. Only enforced for users with a country.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_countries: Option<Vec<String>>,

    /// Minimum cart total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_cart_value: Option<Decimal>,

    /// The cart must contain at least one of these categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_categories: Option<Vec<String>>,

    /// The cart must contain none of these categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_categories: Option<Vec<String>>,

    /// Minimum number of units across all cart lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items_count: Option<u64>,
}

/// The first check a coupon failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// `now` is before the coupon's start date.
    #[error("not valid until {starts}")]
    NotYetValid {
        /// Coupon start date
        starts: Timestamp,
    },

    /// `now` is after the coupon's end date.
    #[error("expired at {ended}")]
    Expired {
        /// Coupon end date
        ended: Timestamp,
    },

    /// The user's tier is not in the allowed set.
    #[error("user tier {tier} is not allowed")]
    UserTier {
        /// The user's tier
        tier: String,
    },

    /// The user has not spent enough.
    #[error("lifetime spend {actual} is below {required}")]
    LifetimeSpend {
        /// Rule threshold
        required: Decimal,
        /// User value
        actual: Decimal,
    },

    /// The user has not placed enough orders.
    #[error("{actual} orders placed, {required} required")]
    OrdersPlaced {
        /// Rule threshold
        required: u32,
        /// User value
        actual: u32,
    },

    /// The user's country is not in the allowed set.
    #[error("country {country} is not allowed")]
    Country {
        /// The user's country
        country: String,
    },

    /// The cart total is too low.
    #[error("cart value {actual} is below {required}")]
    CartValue {
        /// Rule threshold
        required: Decimal,
        /// Cart total
        actual: Decimal,
    },

    /// The cart has too few units.
    #[error("{actual} items in cart, {required} required")]
    ItemsCount {
        /// Rule threshold
        required: u64,
        /// Cart unit count
        actual: u64,
    },

    /// No cart category is in the applicable set.
    #[error("no applicable category in cart")]
    NoApplicableCategory,

    /// A cart category is excluded.
    #[error("category {category} is excluded")]
    ExcludedCategory {
        /// First excluded category found in the cart
        category: String,
    },
}

impl Eligibility {
    /// Check every configured predicate, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] for the first predicate that does not hold.
    pub fn check(&self, user: &UserContext, cart: &Cart) -> Result<(), Rejection> {
        if let Some(tiers) = non_empty(self.allowed_user_tiers.as_deref())
            && let Some(tier) = present(user.user_tier.as_deref())
            && !contains(tiers, tier)
        {
            return Err(Rejection::UserTier {
                tier: tier.to_string(),
            });
        }

        if let Some(required) = self.min_lifetime_spend
            && user.lifetime_spend < required
        {
            return Err(Rejection::LifetimeSpend {
                required,
                actual: user.lifetime_spend,
            });
        }

        if let Some(required) = self.min_orders_placed
            && user.orders_placed < required
        {
            return Err(Rejection::OrdersPlaced {
                required,
                actual: user.orders_placed,
            });
        }

        if let Some(countries) = non_empty(self.allowed_countries.as_deref())
            && let Some(country) = present(user.country.as_deref())
            && !contains(countries, country)
        {
            return Err(Rejection::Country {
                country: country.to_string(),
            });
        }

        if let Some(required) = self.min_cart_value {
            let actual = cart.total();

            if actual < required {
                return Err(Rejection::CartValue { required, actual });
            }
        }

        if let Some(required) = self.min_items_count {
            let actual = cart.item_count();

            if actual < required {
                return Err(Rejection::ItemsCount { required, actual });
            }
        }

        let applicable = non_empty(self.applicable_categories.as_deref());
        let excluded = non_empty(self.excluded_categories.as_deref());

        if applicable.is_none() && excluded.is_none() {
            return Ok(());
        }

        let categories = cart.categories();

        if let Some(applicable) = applicable
            && !applicable
                .iter()
                .any(|category| categories.contains(category.as_str()))
        {
            return Err(Rejection::NoApplicableCategory);
        }

        if let Some(category) = excluded.and_then(|excluded| {
            excluded
                .iter()
                .find(|category| categories.contains(category.as_str()))
        }) {
            return Err(Rejection::ExcludedCategory {
                category: category.clone(),
            });
        }

        Ok(())
    }
}

/// Check a coupon against a user and cart at `now`.
///
/// The validity window is checked first; a coupon without a ruleset is then eligible.
///
/// # Errors
///
/// Returns the [`Rejection`] describing the first failed check.
pub fn check_eligibility(
    coupon: &Coupon,
    user: &UserContext,
    cart: &Cart,
    now: Timestamp,
) -> Result<(), Rejection> {
    if now < coupon.start_date {
        return Err(Rejection::NotYetValid {
            starts: coupon.start_date,
        });
    }

    if now > coupon.end_date {
        return Err(Rejection::Expired {
            ended: coupon.end_date,
        });
    }

    match &coupon.eligibility {
        Some(rules) => rules.check(user, cart),
        None => Ok(()),
    }
}

/// Whether a coupon may be redeemed by `user` for `cart` at `now`.
pub fn is_eligible(coupon: &Coupon, user: &UserContext, cart: &Cart, now: Timestamp) -> bool {
    check_eligibility(coupon, user, cart, now).is_ok()
}

fn non_empty(values: Option<&[String]>) -> Option<&[String]> {
    values.filter(|values| !values.is_empty())
}

/// Blank user attributes count as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn contains(values: &[String], value: &str) -> bool {
    values.iter().any(|candidate| candidate == value)
}
