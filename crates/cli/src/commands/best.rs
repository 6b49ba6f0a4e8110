//! `best`: print the best coupon response as JSON.

use std::io;

use coupon_engine::{
    fixtures::{load_catalog, load_request},
    store::CouponStore,
};

use crate::{commands::evaluation_clock, config::RequestArgs, error::CliError};

#[tracing::instrument(
    name = "cli.best",
    skip_all,
    fields(
        catalog = %args.catalog.catalog.display(),
        request = %args.request.display()
    )
)]
pub(super) fn run(args: &RequestArgs, out: &mut impl io::Write) -> Result<(), CliError> {
    let coupons = load_catalog(&args.catalog.catalog)?;
    let request = load_request(&args.request)?;

    let store = CouponStore::with_coupons(coupons, evaluation_clock(args));
    let response = store.find_best_coupon(&request.user, &request.cart);

    serde_json::to_writer_pretty(&mut *out, &response)?;
    writeln!(out)?;

    Ok(())
}
