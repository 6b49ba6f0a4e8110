//! Coupon Engine prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartItem},
    clock::{Clock, FixedClock, SystemClock},
    coupons::{Coupon, DiscountType},
    discounts::compute_discount,
    eligibility::{Eligibility, Rejection, check_eligibility, is_eligible},
    fixtures::{FixtureError, Fixtures, load_catalog, load_request},
    selection::{
        BestCoupon, Evaluation, EvaluationRequest, NO_APPLICABLE_COUPONS, Selection,
        best_of, evaluate_catalog, select_best,
    },
    store::{BestCouponResponse, CouponStore},
    timestamps::{TimestampError, parse_timestamp},
    users::UserContext,
};
