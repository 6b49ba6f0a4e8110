//! Subcommands

use std::{io, ops::Range};

use coupon_engine::clock::{Clock, FixedClock, SystemClock};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

use crate::{
    config::{Command, RequestArgs},
    error::CliError,
};

mod best;
mod explain;
mod list;

/// Run `command`, writing its output to `out`.
pub(crate) fn run(command: &Command, out: &mut impl io::Write) -> Result<(), CliError> {
    match command {
        Command::List(args) => list::run(args, out),
        Command::Best(args) => best::run(args, out),
        Command::Explain(args) => explain::run(args, out),
    }
}

/// Evaluation instant: `--now` when given, otherwise the system clock read once.
fn evaluation_clock(args: &RequestArgs) -> FixedClock {
    FixedClock::new(args.now.unwrap_or_else(|| SystemClock.now()))
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric_columns: Range<usize>,
) -> Result<(), CliError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric_columns), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}
