use chrono::NaiveDate;
use clap::Args;
use mindguard_core::{CheckInInput, CheckInReceipt, Clock, CompanionClient, FixedClock};
use serde::Serialize;

use crate::context::Context;

#[derive(Args)]
pub struct CheckinArgs {
    /// Hours slept last night
    #[arg(long, allow_hyphen_values = true)]
    sleep: String,
    /// Workload from 1 to 10
    #[arg(long, allow_hyphen_values = true)]
    workload: String,
    /// Mood from 1 to 10
    #[arg(long, allow_hyphen_values = true)]
    mood: String,
    /// User checking in (defaults to checkin.default_user)
    #[arg(long)]
    user: Option<String>,
    /// Record the check-in for this day (YYYY-MM-DD) instead of today
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Also ask the conversational companion for guidance
    #[arg(long)]
    companion: bool,
}

#[derive(Serialize)]
struct CheckinOutput<'a> {
    #[serde(flatten)]
    receipt: &'a CheckInReceipt,
    #[serde(skip_serializing_if = "Option::is_none")]
    companion_reply: Option<String>,
}

pub fn run(args: CheckinArgs) -> Result<(), Box<dyn std::error::Error>> {
    let input = CheckInInput::parse(&args.sleep, &args.workload, &args.mood)?;
    let ctx = Context::load()?;
    let user = ctx.user(args.user);

    let fixed = args
        .date
        .map(|day| FixedClock::on_local_day(day, ctx.clock.offset()));
    let clock: &dyn Clock = match &fixed {
        Some(clock) => clock,
        None => &ctx.clock,
    };
    let receipt = ctx.service(clock).submit(&user, &input)?;

    // The receipt is already stored; companion trouble only costs the reply.
    let companion_reply = if args.companion {
        ask_companion(&ctx, &input, &receipt)
    } else {
        None
    };

    let output = CheckinOutput {
        receipt: &receipt,
        companion_reply,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn ask_companion(ctx: &Context, input: &CheckInInput, receipt: &CheckInReceipt) -> Option<String> {
    let message = format!(
        "I slept {} hours, my workload is {}/10 and my mood is {}/10. \
         My check-in was assessed as {}. What could help me today?",
        input.sleep_hours, input.workload, input.mood, receipt.report.report.label
    );

    let client = match CompanionClient::from_settings(&ctx.config.companion) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "companion unavailable");
            return None;
        }
    };
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::warn!(error = %e, "failed to start async runtime");
            return None;
        }
    };

    match runtime.block_on(client.ask(&message)) {
        Ok(reply) => Some(reply),
        Err(e) => {
            tracing::warn!(error = %e, "companion unavailable");
            None
        }
    }
}
