use clap::Subcommand;
use monday_core::{Config, StreakStore};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Print the stored record as JSON
    Show {
        /// User identifier
        user_id: String,
    },
    /// Delete the stored record
    Reset {
        /// User identifier
        user_id: String,
    },
}

pub fn run(action: StreakAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = config.open_store()?;

    match action {
        StreakAction::Show { user_id } => {
            let record = store.get(&user_id)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        StreakAction::Reset { user_id } => {
            if store.delete(&user_id)? {
                println!("streak reset for {user_id}");
            } else {
                println!("no streak stored for {user_id}");
            }
        }
    }
    Ok(())
}
