//! Coupon Engine
//!
//! Decides which coupons a shopper and cart qualify for, prices them, and picks the single best
//! one: largest discount first, then the coupon expiring soonest, then the smallest code.
//!
//! ```
//! use coupon_engine::prelude::*;
//! use rust_decimal::Decimal;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = CouponStore::with_clock(FixedClock::new("2025-06-01T00:00:00Z".parse()?));
//!
//! store.add_coupon(Coupon::flat(
//!     "TENOFF",
//!     Decimal::TEN,
//!     "2025-01-01T00:00:00Z".parse()?,
//!     "2025-12-31T23:59:59Z".parse()?,
//! ));
//!
//! let cart = Cart::with_items([CartItem::new("p1", "books", Decimal::from(30), 1)]);
//! let response = store.find_best_coupon(&UserContext::new("u1"), &cart);
//!
//! assert!(matches!(response, BestCouponResponse::Found { ref coupon_code, .. } if coupon_code == "TENOFF"));
//! # Ok(())
//! # }
//! ```

pub mod cart;
pub mod clock;
pub mod coupons;
pub mod discounts;
pub mod eligibility;
pub mod fixtures;
pub mod prelude;
pub mod selection;
pub mod store;
pub mod timestamps;
pub mod users;
