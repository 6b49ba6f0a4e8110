//! `explain`: show why each coupon applies or not.

use std::io;

use coupon_engine::{
    clock::Clock,
    fixtures::{load_catalog, load_request},
    selection::{Evaluation, NO_APPLICABLE_COUPONS, best_of, evaluate_catalog},
};
use tabled::builder::Builder;

use crate::{
    commands::{evaluation_clock, write_table},
    config::RequestArgs,
    error::CliError,
};

#[tracing::instrument(
    name = "cli.explain",
    skip_all,
    fields(
        catalog = %args.catalog.catalog.display(),
        request = %args.request.display()
    )
)]
pub(super) fn run(args: &RequestArgs, out: &mut impl io::Write) -> Result<(), CliError> {
    let coupons = load_catalog(&args.catalog.catalog)?;
    let request = load_request(&args.request)?;
    let now = evaluation_clock(args).now();

    let evaluations = evaluate_catalog(&coupons, &request.user, &request.cart, now);

    writeln!(
        out,
        "User {} | cart total {} | evaluated at {now}",
        request.user.user_id,
        request.cart.total().normalize()
    )?;

    if !evaluations.is_empty() {
        let mut builder = Builder::default();

        builder.push_record(["Code", "Eligible", "Discount", "Reason"]);

        for evaluation in &evaluations {
            builder.push_record(verdict_row(evaluation));
        }

        write_table(out, builder, 2..3)?;
    }

    match best_of(&evaluations).best() {
        Some(best) => writeln!(
            out,
            "Best: {} ({})",
            best.code,
            best.discount_amount.normalize()
        )?,
        None => writeln!(out, "{NO_APPLICABLE_COUPONS}")?,
    }

    Ok(())
}

fn verdict_row(evaluation: &Evaluation<'_>) -> [String; 4] {
    let code = evaluation.coupon.code.clone();

    match &evaluation.verdict {
        Ok(discount) => [
            code,
            "yes".to_string(),
            discount.normalize().to_string(),
            String::new(),
        ],
        Err(rejection) => [code, "no".to_string(), String::new(), rejection.to_string()],
    }
}
