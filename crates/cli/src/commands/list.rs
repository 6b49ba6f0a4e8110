//! `list`: print a catalog as a table.

use std::io;

use coupon_engine::fixtures::load_catalog;
use tabled::builder::Builder;
use tracing::info;

use crate::{commands::write_table, config::CatalogArgs, error::CliError};

#[tracing::instrument(
    name = "cli.list",
    skip_all,
    fields(catalog = %args.catalog.display())
)]
pub(super) fn run(args: &CatalogArgs, out: &mut impl io::Write) -> Result<(), CliError> {
    let coupons = load_catalog(&args.catalog)?;

    info!(coupons = coupons.len(), "catalog loaded");

    if coupons.is_empty() {
        writeln!(out, "Catalog is empty")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Code", "Type", "Value", "Cap", "Starts", "Ends", "Description"]);

    for coupon in &coupons {
        builder.push_record([
            coupon.code.clone(),
            coupon.discount_type.to_string(),
            coupon.discount_value.normalize().to_string(),
            coupon
                .max_discount_amount
                .map(|cap| cap.normalize().to_string())
                .unwrap_or_default(),
            coupon.start_date.to_string(),
            coupon.end_date.to_string(),
            coupon.description.clone().unwrap_or_default(),
        ]);
    }

    write_table(out, builder, 2..4)
}
