//! Skill entry point: event envelope in, response envelope out.

mod envelope;

pub use envelope::{
    meter_directive, OutputSpeech, Reprompt, ResponseBody, ResponseEnvelope, SkillRequest,
    ANONYMOUS_USER, DISPLAY_INTERFACE,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::error::Result;
use crate::response::{
    render_speech, select_category, MoodPicker, ResponseCategory, SpokenResponse,
};
use crate::storage::{DisplayConfig, StreakStore, VoiceConfig};
use crate::streak::{CheckInService, Evaluation};

/// Everything produced by one check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInReply {
    pub user_id: String,
    pub evaluation: Evaluation,
    pub category: ResponseCategory,
    pub speech: SpokenResponse,
}

/// Ties the check-in service to reply rendering.
pub struct Skill<S, P> {
    service: CheckInService<S>,
    picker: P,
    voice: VoiceConfig,
    display: DisplayConfig,
}

impl<S: StreakStore, P: MoodPicker> Skill<S, P> {
    pub fn new(service: CheckInService<S>, picker: P) -> Self {
        Self {
            service,
            picker,
            voice: VoiceConfig::default(),
            display: DisplayConfig::default(),
        }
    }

    pub fn with_voice(mut self, voice: VoiceConfig) -> Self {
        self.voice = voice;
        self
    }

    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }

    pub fn service(&self) -> &CheckInService<S> {
        &self.service
    }

    /// Run a check-in for `user_id` and render the reply.
    ///
    /// # Errors
    /// Returns a validation error for an empty `user_id`.
    pub fn check_in(&mut self, user_id: &str, today: NaiveDate) -> Result<CheckInReply> {
        let evaluation = self.service.check_in(user_id, today)?;
        let category = select_category(evaluation.new_streak, evaluation.outcome, &mut self.picker);
        let speech = render_speech(category, evaluation.new_streak, &self.voice);
        Ok(CheckInReply {
            user_id: user_id.to_string(),
            evaluation,
            category,
            speech,
        })
    }

    /// Handle one inbound event. Never fails: anything unexpected becomes the
    /// fixed fallback reply.
    pub fn handle(&mut self, event: &Value, today: NaiveDate) -> ResponseEnvelope {
        match self.try_handle(event, today) {
            Ok(envelope) => envelope,
            Err(e) => {
                error!("[skill] unhandled event err={}", e);
                ResponseEnvelope::fallback()
            }
        }
    }

    fn try_handle(&mut self, event: &Value, today: NaiveDate) -> Result<ResponseEnvelope> {
        let request = SkillRequest::deserialize(event)?;

        if request.is_session_ended() {
            if request.request.reason.as_deref() == Some("ERROR") {
                let cause = request.request.error.clone().unwrap_or(Value::Null);
                error!("[skill] session ended with error: {}", cause);
            } else {
                info!("[skill] session ended");
            }
            return Ok(ResponseEnvelope::empty());
        }

        let user_id = request.user_id();
        let reply = self.check_in(&user_id, today)?;
        info!(
            "[skill] user_id={} streak={} increased={} outcome={:?}",
            user_id,
            reply.evaluation.new_streak,
            reply.evaluation.increased,
            reply.evaluation.outcome
        );

        let mut envelope = ResponseEnvelope::spoken(reply.speech);
        if self.display.enabled && request.supports_display() {
            envelope.push_directive(meter_directive(&self.display, reply.evaluation.new_streak));
        }
        Ok(envelope)
    }
}
