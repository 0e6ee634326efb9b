use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use monday_core::{today_utc, Config, ResponseEnvelope};

#[derive(Args)]
pub struct InvokeArgs {
    /// Event JSON file (reads stdin when omitted)
    #[arg(long)]
    event: Option<PathBuf>,
    /// Evaluate as of this UTC date (YYYY-MM-DD) instead of today
    #[arg(long)]
    today: Option<NaiveDate>,
}

pub fn run(args: InvokeArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let raw = match &args.event {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let envelope = match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(event) => match super::build_skill(config) {
            Ok(mut skill) => skill.handle(&event, args.today.unwrap_or_else(today_utc)),
            Err(e) => {
                tracing::error!("[invoke] skill setup failed: {}", e);
                ResponseEnvelope::fallback()
            }
        },
        Err(e) => {
            tracing::error!("[invoke] event is not JSON: {}", e);
            ResponseEnvelope::fallback()
        }
    };

    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
