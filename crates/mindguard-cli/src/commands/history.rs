use clap::Args;
use mindguard_core::{daily_trend, summarize, Clock, DailyStress, StressReport, TrendSummary};
use serde::Serialize;

use crate::context::Context;

#[derive(Args)]
pub struct HistoryArgs {
    /// User to inspect (defaults to checkin.default_user)
    #[arg(long)]
    user: Option<String>,
    /// Maximum number of reports to read
    #[arg(long, default_value = "30")]
    limit: usize,
}

#[derive(Serialize)]
struct TrendOutput {
    days: Vec<DailyStress>,
    summary: Option<TrendSummary>,
}

pub fn run_history(args: HistoryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::load()?;
    let user = ctx.user(args.user);
    let history = ctx.service(ctx.clock).history(&user, args.limit)?;
    println!("{}", serde_json::to_string_pretty(&history)?);
    Ok(())
}

pub fn run_trend(args: HistoryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::load()?;
    let user = ctx.user(args.user);
    let reports: Vec<StressReport> = ctx
        .service(ctx.clock)
        .history(&user, args.limit)?
        .into_iter()
        .map(|stored| stored.report)
        .collect();

    let days = daily_trend(&reports, ctx.clock.offset());
    let summary = summarize(&days);
    println!(
        "{}",
        serde_json::to_string_pretty(&TrendOutput { days, summary })?
    );
    Ok(())
}
