pub mod checkin;
pub mod config;
pub mod invoke;
pub mod streak;

use monday_core::{CheckInService, Config, SeededMoodPicker, Skill, StreakStore};

/// Skill wired from the loaded configuration.
pub fn build_skill(
    config: &Config,
) -> Result<Skill<Box<dyn StreakStore>, SeededMoodPicker>, Box<dyn std::error::Error>> {
    let store = config.open_store()?;
    let service =
        CheckInService::new(store).with_conditional_writes(config.store.conditional_writes);
    Ok(Skill::new(service, SeededMoodPicker::new(config.voice.mood_seed))
        .with_voice(config.voice.clone())
        .with_display(config.display.clone()))
}
