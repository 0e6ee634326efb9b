use chrono::NaiveDate;
use clap::Args;
use monday_core::{today_utc, Config};

#[derive(Args)]
pub struct CheckinArgs {
    /// User identifier
    user_id: String,
    /// Check in as of this UTC date (YYYY-MM-DD) instead of today
    #[arg(long)]
    today: Option<NaiveDate>,
}

pub fn run(args: CheckinArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut skill = super::build_skill(config)?;
    let today = args.today.unwrap_or_else(today_utc);
    let reply = skill.check_in(&args.user_id, today)?;
    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}
