//! # Monday Core Library
//!
//! Backend for the Monday voice skill, which keeps a daily check-in streak for
//! each user. Every invocation records that the user showed up today, updates
//! a consecutive-day counter and returns a spoken reply reflecting it.
//!
//! ## Architecture
//!
//! - **Streak**: a pure evaluator that turns (today, previous record) into the
//!   next streak, plus a service that reads and writes through a store
//! - **Storage**: the [`StreakStore`] trait with SQLite and in-memory
//!   implementations, and TOML-based configuration
//! - **Response**: reply category selection and SSML rendering
//! - **Skill**: request/response envelopes around a single check-in
//!
//! ## Key Components
//!
//! - [`evaluate`]: streak transition rules
//! - [`CheckInService`]: read-evaluate-write against an injected store
//! - [`Skill`]: event envelope in, response envelope out
//! - [`Config`]: application configuration management

pub mod error;
pub mod response;
pub mod skill;
pub mod storage;
pub mod streak;

pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use response::{
    render_speech, select_category, Mood, MoodPicker, ResponseCategory, SeededMoodPicker,
    SpokenResponse,
};
pub use skill::{CheckInReply, ResponseEnvelope, Skill, SkillRequest};
pub use storage::{Config, MemoryStore, SqliteStore, StreakStore};
pub use streak::{
    evaluate, parse_date, today_utc, CheckInService, Evaluation, LastCheck, Outcome, StreakRecord,
};
