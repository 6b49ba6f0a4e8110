//! Coupon Store
//!
//! The in-memory catalog. Appends take the write lock, reads and selections take the read lock.

use std::sync::{PoisonError, RwLock};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{Span, info};

use crate::{
    cart::Cart,
    clock::{Clock, SystemClock},
    coupons::Coupon,
    selection::{NO_APPLICABLE_COUPONS, Selection, select_best},
    users::UserContext,
};

/// Response of [`CouponStore::find_best_coupon`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BestCouponResponse {
    /// A coupon applies.
    Found {
        /// Winning coupon code
        #[serde(rename = "couponCode")]
        coupon_code: String,

        /// Discount the coupon gives on the cart
        #[serde(rename = "discountAmount")]
        discount_amount: Decimal,

        /// Confirmation message
        message: String,
    },

    /// No coupon applies.
    NotFound {
        /// Always [`NO_APPLICABLE_COUPONS`]
        message: String,
    },
}

impl From<Selection> for BestCouponResponse {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Best(best) => Self::Found {
                message: best.message(),
                coupon_code: best.code,
                discount_amount: best.discount_amount,
            },
            Selection::NotFound => Self::NotFound {
                message: NO_APPLICABLE_COUPONS.to_string(),
            },
        }
    }
}

/// Append-only coupon catalog.
#[derive(Debug)]
pub struct CouponStore<C = SystemClock> {
    coupons: RwLock<Vec<Coupon>>,
    clock: C,
}

impl CouponStore<SystemClock> {
    /// Create an empty store reading the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for CouponStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CouponStore<C> {
    /// Create an empty store reading `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            coupons: RwLock::new(Vec::new()),
            clock,
        }
    }

    /// Create a store holding `coupons`, in order.
    pub fn with_coupons(coupons: impl IntoIterator<Item = Coupon>, clock: C) -> Self {
        Self {
            coupons: RwLock::new(coupons.into_iter().collect()),
            clock,
        }
    }

    /// Append a coupon and return its code. Duplicate codes are accepted.
    #[tracing::instrument(
        name = "coupons.store.add_coupon",
        skip(self, coupon),
        fields(code = %coupon.code, catalog_size = tracing::field::Empty)
    )]
    pub fn add_coupon(&self, coupon: Coupon) -> String {
        let code = coupon.code.clone();

        let mut coupons = self
            .coupons
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        coupons.push(coupon);

        Span::current().record("catalog_size", coupons.len());

        info!("coupon added");

        code
    }

    /// Snapshot of the catalog in insertion order.
    pub fn list_coupons(&self) -> Vec<Coupon> {
        self.coupons
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of coupons in the catalog.
    pub fn len(&self) -> usize {
        self.coupons
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Select the best coupon for `user` and `cart` at the clock's current instant.
    #[tracing::instrument(
        name = "coupons.store.select",
        skip(self, user, cart),
        fields(
            user_id = %user.user_id,
            cart_lines = cart.len(),
            catalog_size = tracing::field::Empty,
            coupon_code = tracing::field::Empty
        )
    )]
    pub fn select(&self, user: &UserContext, cart: &Cart) -> Selection {
        let now = self.clock.now();

        let coupons = self.coupons.read().unwrap_or_else(PoisonError::into_inner);

        let span = Span::current();

        span.record("catalog_size", coupons.len());

        let selection = select_best(&coupons, user, cart, now);

        if let Some(best) = selection.best() {
            span.record("coupon_code", tracing::field::display(&best.code));

            info!(discount_amount = %best.discount_amount, "best coupon selected");
        } else {
            info!("no applicable coupons");
        }

        selection
    }

    /// Select the best coupon and shape it as a response record.
    pub fn find_best_coupon(&self, user: &UserContext, cart: &Cart) -> BestCouponResponse {
        self.select(user, cart).into()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use testresult::TestResult;

    use crate::{cart::CartItem, clock::FixedClock};

    use super::*;

    fn clock() -> Result<FixedClock, jiff::Error> {
        Ok(FixedClock::new("2025-03-01T00:00:00Z".parse()?))
    }

    fn coupon(code: &str, amount: i64) -> Result<Coupon, jiff::Error> {
        Ok(Coupon::flat(
            code,
            Decimal::from(amount),
            "2025-01-01T00:00:00Z".parse()?,
            "2025-12-31T00:00:00Z".parse()?,
        ))
    }

    fn cart() -> Cart {
        Cart::with_items([CartItem::new("mug", "kitchen", Decimal::from(12), 2)])
    }

    #[test]
    fn add_returns_code_and_keeps_insertion_order() -> TestResult {
        let store = CouponStore::with_clock(clock()?);

        assert!(store.is_empty());
        assert_eq!(store.add_coupon(coupon("SECOND", 1)?), "SECOND");
        assert_eq!(store.add_coupon(coupon("FIRST", 2)?), "FIRST");
        assert_eq!(store.add_coupon(coupon("SECOND", 3)?), "SECOND");

        let codes: Vec<String> = store
            .list_coupons()
            .into_iter()
            .map(|coupon| coupon.code)
            .collect();

        assert_eq!(codes, ["SECOND", "FIRST", "SECOND"]);
        assert_eq!(store.len(), 3);

        Ok(())
    }

    #[test]
    fn find_best_coupon_uses_store_clock() -> TestResult {
        let expired = Coupon::flat(
            "GONE",
            Decimal::from(50),
            "2024-01-01T00:00:00Z".parse()?,
            "2024-12-31T00:00:00Z".parse()?,
        );
        let store = CouponStore::with_coupons([expired, coupon("LIVE", 5)?], clock()?);

        let response = store.find_best_coupon(&UserContext::new("u1"), &cart());

        assert_eq!(
            response,
            BestCouponResponse::Found {
                coupon_code: "LIVE".to_string(),
                discount_amount: Decimal::from(5),
                message: "Best coupon found: LIVE".to_string(),
            }
        );

        Ok(())
    }

    #[test]
    fn empty_store_returns_sentinel() -> TestResult {
        let store = CouponStore::with_clock(clock()?);

        assert_eq!(
            store.find_best_coupon(&UserContext::new("u1"), &cart()),
            BestCouponResponse::NotFound {
                message: "No applicable coupons found".to_string()
            }
        );

        Ok(())
    }

    #[test]
    fn concurrent_adds_and_selections_lose_nothing() -> TestResult {
        let store = Arc::new(CouponStore::with_clock(clock()?));
        let template = coupon("T", 1)?;

        let writers: Vec<_> = (0..4)
            .map(|writer| {
                let store = Arc::clone(&store);
                let template = template.clone();

                thread::spawn(move || {
                    for n in 0..25 {
                        let mut coupon = template.clone();
                        coupon.code = format!("W{writer}-{n}");
                        store.add_coupon(coupon);
                    }
                })
            })
            .collect();

        let reader = {
            let store = Arc::clone(&store);

            thread::spawn(move || {
                for _ in 0..50 {
                    let _selection = store.select(&UserContext::new("reader"), &cart());
                }
            })
        };

        for writer in writers {
            writer.join().map_err(|_panic| "writer panicked")?;
        }

        reader.join().map_err(|_panic| "reader panicked")?;

        assert_eq!(store.len(), 100);

        Ok(())
    }

    #[test]
    fn response_serializes_with_wire_field_names() -> TestResult {
        let found = serde_json::to_value(BestCouponResponse::Found {
            coupon_code: "SAVE".to_string(),
            discount_amount: Decimal::from(300),
            message: "Best coupon found: SAVE".to_string(),
        })?;
        let missing = serde_json::to_value(BestCouponResponse::from(Selection::NotFound))?;

        assert_eq!(
            found,
            serde_json::json!({
                "couponCode": "SAVE",
                "discountAmount": 300.0,
                "message": "Best coupon found: SAVE"
            })
        );
        assert_eq!(
            missing,
            serde_json::json!({ "message": "No applicable coupons found" })
        );

        Ok(())
    }
}
