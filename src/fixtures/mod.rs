//! Fixtures
//!
//! YAML coupon catalogs and evaluation requests. Field names match the JSON wire format.
//!
//! ```yaml
//! coupons:
//!   - code: WELCOME10
//!     discountType: PERCENT
//!     discountValue: 10
//!     maxDiscountAmount: 50
//!     startDate: "2025-01-01T00:00:00"
//!     endDate: "2025-12-31T23:59:59"
//!     eligibility:
//!       firstOrderOnly: true
//! ```
//!
//! Everything loaded here is validated before it reaches the evaluator.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{coupons::Coupon, selection::EvaluationRequest};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A coupon has a blank code (catalog index)
    #[error("Coupon {0} has an empty code")]
    EmptyCode(usize),

    /// A coupon money field is negative
    #[error("Coupon {code}: {field} must not be negative")]
    NegativeAmount {
        /// Coupon code
        code: String,

        /// Offending wire field
        field: &'static str,
    },

    /// A cart line has a negative unit price (line index)
    #[error("Cart item {0} has a negative unit price")]
    NegativeUnitPrice(usize),

    /// A cart line has a zero quantity (line index)
    #[error("Cart item {0} has a zero quantity")]
    ZeroQuantity(usize),

    /// The user's lifetime spend is negative
    #[error("User {0} has a negative lifetime spend")]
    NegativeLifetimeSpend(String),
}

/// A coupon catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFixture {
    /// Coupons in catalog order
    #[serde(default)]
    pub coupons: Vec<Coupon>,
}

/// Fixture set rooted at a directory containing `catalogs/` and `requests/`.
#[derive(Debug, Clone)]
pub struct Fixtures {
    base_path: PathBuf,
}

impl Fixtures {
    /// Fixtures under a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load `catalogs/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn catalog(&self, name: &str) -> Result<Vec<Coupon>, FixtureError> {
        load_catalog(self.base_path.join("catalogs").join(format!("{name}.yml")))
    }

    /// Load `requests/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn request(&self, name: &str) -> Result<EvaluationRequest, FixtureError> {
        load_request(self.base_path.join("requests").join(format!("{name}.yml")))
    }
}

/// Load and validate a catalog file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Coupon>, FixtureError> {
    parse_catalog(&fs::read_to_string(path)?)
}

/// Load and validate a request file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load_request(path: impl AsRef<Path>) -> Result<EvaluationRequest, FixtureError> {
    parse_request(&fs::read_to_string(path)?)
}

/// Parse and validate catalog YAML.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or a coupon fails validation.
pub fn parse_catalog(yaml: &str) -> Result<Vec<Coupon>, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

    for (index, coupon) in fixture.coupons.iter().enumerate() {
        validate_coupon(index, coupon)?;
    }

    Ok(fixture.coupons)
}

/// Parse and validate request YAML.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or the request fails validation.
pub fn parse_request(yaml: &str) -> Result<EvaluationRequest, FixtureError> {
    let request: EvaluationRequest = serde_norway::from_str(yaml)?;

    validate_request(&request)?;

    Ok(request)
}

/// Reject coupons the evaluator must never see.
///
/// # Errors
///
/// Returns an error for a blank code or a negative value, cap or threshold.
pub fn validate_coupon(index: usize, coupon: &Coupon) -> Result<(), FixtureError> {
    if coupon.code.trim().is_empty() {
        return Err(FixtureError::EmptyCode(index));
    }

    let negative = |field: &'static str| FixtureError::NegativeAmount {
        code: coupon.code.clone(),
        field,
    };

    if coupon.discount_value < Decimal::ZERO {
        return Err(negative("discountValue"));
    }

    if coupon
        .max_discount_amount
        .is_some_and(|cap| cap < Decimal::ZERO)
    {
        return Err(negative("maxDiscountAmount"));
    }

    if let Some(rules) = &coupon.eligibility {
        if rules
            .min_lifetime_spend
            .is_some_and(|spend| spend < Decimal::ZERO)
        {
            return Err(negative("minLifetimeSpend"));
        }

        if rules
            .min_cart_value
            .is_some_and(|value| value < Decimal::ZERO)
        {
            return Err(negative("minCartValue"));
        }
    }

    Ok(())
}

/// Reject carts and users the evaluator must never see.
///
/// # Errors
///
/// Returns an error for a negative unit price, a zero quantity or a negative lifetime spend.
pub fn validate_request(request: &EvaluationRequest) -> Result<(), FixtureError> {
    if request.user.lifetime_spend < Decimal::ZERO {
        return Err(FixtureError::NegativeLifetimeSpend(
            request.user.user_id.clone(),
        ));
    }

    for (index, item) in request.cart.items().iter().enumerate() {
        if item.unit_price < Decimal::ZERO {
            return Err(FixtureError::NegativeUnitPrice(index));
        }

        if item.quantity == 0 {
            return Err(FixtureError::ZeroQuantity(index));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::coupons::DiscountType;

    use super::*;

    #[test]
    fn parses_catalog_with_wire_field_names() -> TestResult {
        let yaml = r#"
coupons:
  - code: BAGS20
    description: Twenty off bags
    discountType: PERCENT
    discountValue: 20
    maxDiscountAmount: 40
    startDate: "2025-01-01T00:00:00"
    endDate: "2025-06-30T23:59:59+02:00"
    usageLimitPerUser: 1
    eligibility:
      allowedUserTiers: [GOLD]
      applicableCategories: [bags]
      minItemsCount: 2
"#;

        let coupons = parse_catalog(yaml)?;
        let coupon = coupons.first().ok_or("catalog is empty")?;

        assert_eq!(coupons.len(), 1);
        assert_eq!(coupon.code, "BAGS20");
        assert_eq!(coupon.discount_type, DiscountType::Percent);
        assert_eq!(coupon.discount_value, Decimal::from(20));
        assert_eq!(coupon.max_discount_amount, Some(Decimal::from(40)));
        assert_eq!(coupon.usage_limit_per_user, Some(1));
        assert_eq!(coupon.start_date, "2025-01-01T00:00:00Z".parse()?);
        assert_eq!(coupon.end_date, "2025-06-30T21:59:59Z".parse()?);

        let rules = coupon.eligibility.as_ref().ok_or("missing eligibility")?;

        assert_eq!(rules.allowed_user_tiers, Some(vec!["GOLD".to_string()]));
        assert_eq!(rules.min_items_count, Some(2));
        assert_eq!(rules.min_cart_value, None);

        Ok(())
    }

    #[test]
    fn unknown_discount_type_is_rejected_at_parse_time() {
        let yaml = r#"
coupons:
  - code: ODD
    discountType: BOGO
    discountValue: 1
    startDate: "2025-01-01"
    endDate: "2025-12-31"
"#;

        let result = parse_catalog(yaml);

        assert!(
            matches!(result, Err(FixtureError::Yaml(_))),
            "expected YAML error, got {result:?}"
        );
    }

    #[test]
    fn negative_values_are_rejected() {
        let yaml = r#"
coupons:
  - code: NEG
    discountType: FLAT
    discountValue: -5
    startDate: "2025-01-01"
    endDate: "2025-12-31"
"#;

        let result = parse_catalog(yaml);

        assert!(
            matches!(
                result,
                Err(FixtureError::NegativeAmount { ref code, field: "discountValue" }) if code == "NEG"
            ),
            "expected negative amount error, got {result:?}"
        );
    }

    #[test]
    fn blank_codes_are_rejected() {
        let yaml = r#"
coupons:
  - code: OK
    discountType: FLAT
    discountValue: 5
    startDate: "2025-01-01"
    endDate: "2025-12-31"
  - code: "  "
    discountType: FLAT
    discountValue: 5
    startDate: "2025-01-01"
    endDate: "2025-12-31"
"#;

        assert!(matches!(
            parse_catalog(yaml),
            Err(FixtureError::EmptyCode(1))
        ));
    }

    #[test]
    fn parses_request_with_user_defaults() -> TestResult {
        let yaml = r"
user:
  userId: u42
  country: IN
cart:
  items:
    - productId: p1
      category: shoes
      unitPrice: 100
      quantity: 2
";

        let request = parse_request(yaml)?;

        assert_eq!(request.user.user_id, "u42");
        assert_eq!(request.user.user_tier, None);
        assert_eq!(request.user.country.as_deref(), Some("IN"));
        assert_eq!(request.user.lifetime_spend, Decimal::ZERO);
        assert_eq!(request.user.orders_placed, 0);
        assert_eq!(request.cart.total(), Decimal::from(200));

        Ok(())
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let yaml = r"
user:
  userId: u1
cart:
  items:
    - productId: p1
      category: shoes
      unitPrice: 10
      quantity: 1
    - productId: p2
      category: bags
      unitPrice: 10
      quantity: 0
";

        assert!(matches!(
            parse_request(yaml),
            Err(FixtureError::ZeroQuantity(1))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Fixtures::with_base_path("/nonexistent").catalog("nope");

        assert!(
            matches!(result, Err(FixtureError::Io(_))),
            "expected IO error, got {result:?}"
        );
    }
}
