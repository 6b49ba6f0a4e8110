//! Discounts
//!
//! Monetary value of an eligible coupon for a given cart total.

use rust_decimal::Decimal;

use crate::coupons::{Coupon, DiscountType};

/// Calculates the discount a coupon gives on `cart_total`.
///
/// - [`DiscountType::Flat`] returns the coupon value, whatever the total.
/// - [`DiscountType::Percent`] returns `value / 100 * cart_total`, clamped to
///   `max_discount_amount` when one is set. A zero cap counts as unset.
///
/// Eligibility is not re-checked here.
pub fn compute_discount(coupon: &Coupon, cart_total: Decimal) -> Decimal {
    match coupon.discount_type {
        DiscountType::Flat => coupon.discount_value,
        DiscountType::Percent => {
            let discount = percent_of(coupon.discount_value, cart_total);

            coupon
                .max_discount_amount
                .filter(|cap| !cap.is_zero())
                .map_or(discount, |cap| discount.min(cap))
        }
    }
}

/// `percent` percent of `amount`, saturating instead of overflowing.
pub fn percent_of(percent: Decimal, amount: Decimal) -> Decimal {
    (percent / Decimal::ONE_HUNDRED).saturating_mul(amount)
}
