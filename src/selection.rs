//! Best Coupon Selection
//!
//! Runs every catalog coupon through the eligibility rules, prices the survivors and picks one.
//!
//! Ranking, highest priority first:
//!
//! 1. larger discount amount
//! 2. earlier end date
//! 3. lexically smaller code
//!
//! Coupons identical on all three keep catalog order, so the earlier entry wins.

use std::cmp::Ordering;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    cart::Cart,
    coupons::Coupon,
    discounts::compute_discount,
    eligibility::{Rejection, check_eligibility},
    users::UserContext,
};

/// Message returned when no coupon applies.
pub const NO_APPLICABLE_COUPONS: &str = "No applicable coupons found";

/// A user and cart to select a coupon for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// The shopper
    pub user: UserContext,

    /// The shopper's cart
    pub cart: Cart,
}

/// The winning coupon.
#[derive(Debug, Clone, PartialEq)]
pub struct BestCoupon {
    /// Coupon code
    pub code: String,

    /// Discount the coupon gives on the cart
    pub discount_amount: Decimal,
}

impl BestCoupon {
    /// Confirmation message for the shopper.
    pub fn message(&self) -> String {
        format!("Best coupon found: {}", self.code)
    }
}

/// Outcome of a selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// At least one coupon applies; this one ranks highest.
    Best(BestCoupon),

    /// No coupon applies.
    NotFound,
}

impl Selection {
    /// The winning coupon, if any.
    pub fn best(&self) -> Option<&BestCoupon> {
        match self {
            Selection::Best(best) => Some(best),
            Selection::NotFound => None,
        }
    }
}

/// The verdict for a single catalog coupon.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<'a> {
    /// The evaluated coupon
    pub coupon: &'a Coupon,

    /// Discount amount when eligible, otherwise the failed check
    pub verdict: Result<Decimal, Rejection>,
}

/// Evaluate every coupon in `catalog`, in catalog order.
pub fn evaluate_catalog<'a>(
    catalog: &'a [Coupon],
    user: &UserContext,
    cart: &Cart,
    now: Timestamp,
) -> Vec<Evaluation<'a>> {
    evaluations(catalog, user, cart, now).collect()
}

/// Select the best eligible coupon in `catalog`.
pub fn select_best(
    catalog: &[Coupon],
    user: &UserContext,
    cart: &Cart,
    now: Timestamp,
) -> Selection {
    pick(
        evaluations(catalog, user, cart, now).filter_map(|evaluation| match evaluation.verdict {
            Ok(discount) => Some((evaluation.coupon, discount)),
            Err(rejection) => {
                debug!(code = %evaluation.coupon.code, %rejection, "coupon rejected");
                None
            }
        }),
    )
}

/// Select the best coupon among already computed evaluations.
pub fn best_of(evaluations: &[Evaluation<'_>]) -> Selection {
    pick(evaluations.iter().filter_map(|evaluation| {
        evaluation
            .verdict
            .as_ref()
            .ok()
            .map(|discount| (evaluation.coupon, *discount))
    }))
}

fn pick<'a>(candidates: impl Iterator<Item = (&'a Coupon, Decimal)>) -> Selection {
    candidates
        .min_by(|left, right| rank(*left, *right))
        .map_or(Selection::NotFound, |(coupon, discount_amount)| {
            Selection::Best(BestCoupon {
                code: coupon.code.clone(),
                discount_amount,
            })
        })
}

fn evaluations<'a>(
    catalog: &'a [Coupon],
    user: &UserContext,
    cart: &Cart,
    now: Timestamp,
) -> impl Iterator<Item = Evaluation<'a>> {
    let cart_total = cart.total();

    catalog.iter().map(move |coupon| Evaluation {
        coupon,
        verdict: check_eligibility(coupon, user, cart, now)
            .map(|()| compute_discount(coupon, cart_total)),
    })
}

/// Orders candidates best first.
fn rank(left: (&Coupon, Decimal), right: (&Coupon, Decimal)) -> Ordering {
    let (left_coupon, left_discount) = left;
    let (right_coupon, right_discount) = right;

    right_discount
        .cmp(&left_discount)
        .then_with(|| left_coupon.end_date.cmp(&right_coupon.end_date))
        .then_with(|| left_coupon.code.cmp(&right_coupon.code))
}
