//! Voice-platform request and response envelopes.
//!
//! Only the fields the skill reads or writes are modelled; everything else in
//! an inbound event is ignored.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::response::SpokenResponse;
use crate::storage::DisplayConfig;

/// Key used when the event carries no user identifier.
pub const ANONYMOUS_USER: &str = "anonymous_user";
/// Interface a device declares when it can render the streak meter.
pub const DISPLAY_INTERFACE: &str = "Alexa.Presentation.APL";
const SESSION_ENDED: &str = "SessionEndedRequest";
const ENVELOPE_VERSION: &str = "1.0";
const FALLBACK_TEXT: &str = "Something exploded. Monday is reviewing the damage.";

#[derive(Debug, Clone, Deserialize)]
pub struct SkillRequest {
    pub request: RequestBody,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub context: Option<Context>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestBody {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Context {
    #[serde(rename = "System", default)]
    pub system: Option<System>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct System {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub device: Option<Device>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Device {
    #[serde(rename = "supportedInterfaces", default)]
    pub supported_interfaces: Map<String, Value>,
}

impl SkillRequest {
    pub fn is_session_ended(&self) -> bool {
        self.request.kind == SESSION_ENDED
    }

    /// Session user, then context user, then [`ANONYMOUS_USER`].
    pub fn user_id(&self) -> String {
        let session_user = self
            .session
            .as_ref()
            .and_then(|s| s.user.as_ref())
            .and_then(|u| u.user_id.as_deref());
        let context_user = self
            .system()
            .and_then(|s| s.user.as_ref())
            .and_then(|u| u.user_id.as_deref());

        match session_user
            .filter(|id| !id.trim().is_empty())
            .or(context_user.filter(|id| !id.trim().is_empty()))
        {
            Some(id) => id.to_string(),
            None => {
                warn!("[skill] no user id in request, using {}", ANONYMOUS_USER);
                ANONYMOUS_USER.to_string()
            }
        }
    }

    /// True only when the device advertises a non-empty display interface.
    pub fn supports_display(&self) -> bool {
        self.system()
            .and_then(|s| s.device.as_ref())
            .and_then(|d| d.supported_interfaces.get(DISPLAY_INTERFACE))
            .and_then(Value::as_object)
            .is_some_and(|iface| !iface.is_empty())
    }

    fn system(&self) -> Option<&System> {
        self.context.as_ref().and_then(|c| c.system.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    pub version: String,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directives: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
    PlainText { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl ResponseEnvelope {
    fn new(response: ResponseBody) -> Self {
        Self {
            version: ENVELOPE_VERSION.to_string(),
            response,
        }
    }

    /// Reply to a session-ended notification.
    pub fn empty() -> Self {
        Self::new(ResponseBody::default())
    }

    pub fn spoken(spoken: SpokenResponse) -> Self {
        Self::new(ResponseBody {
            should_end_session: Some(spoken.should_end_session),
            output_speech: Some(OutputSpeech::Ssml { ssml: spoken.ssml }),
            reprompt: spoken.reprompt.map(|ssml| Reprompt {
                output_speech: OutputSpeech::Ssml { ssml },
            }),
            directives: Some(Vec::new()),
        })
    }

    /// Fixed reply for events that could not be handled at all.
    pub fn fallback() -> Self {
        Self::new(ResponseBody {
            should_end_session: Some(true),
            output_speech: Some(OutputSpeech::PlainText {
                text: FALLBACK_TEXT.to_string(),
            }),
            ..ResponseBody::default()
        })
    }

    pub fn push_directive(&mut self, directive: Value) {
        self.response.directives.get_or_insert_with(Vec::new).push(directive);
    }
}

/// Render directive pointing at the hosted streak meter layout.
pub fn meter_directive(display: &DisplayConfig, streak: u32) -> Value {
    json!({
        "type": "Alexa.Presentation.APL.RenderDocument",
        "token": display.token,
        "document": {
            "type": "Link",
            "src": display.document_src,
        },
        "datasources": {
            "payload": {
                "meter": { "level": streak }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: Value) -> SkillRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn session_user_preferred() {
        let req = parse(json!({
            "request": { "type": "LaunchRequest" },
            "session": { "user": { "userId": "session-user" } },
            "context": { "System": { "user": { "userId": "context-user" } } }
        }));
        assert_eq!(req.user_id(), "session-user");
        assert!(!req.is_session_ended());
    }

    #[test]
    fn context_user_when_no_session() {
        let req = parse(json!({
            "request": { "type": "LaunchRequest" },
            "context": { "System": { "user": { "userId": "context-user" } } }
        }));
        assert_eq!(req.user_id(), "context-user");
    }

    #[test]
    fn empty_ids_fall_back_to_anonymous() {
        let req = parse(json!({
            "request": { "type": "LaunchRequest" },
            "session": { "user": { "userId": "" } }
        }));
        assert_eq!(req.user_id(), ANONYMOUS_USER);
    }

    #[test]
    fn display_support_detected() {
        let req = parse(json!({
            "request": { "type": "IntentRequest" },
            "context": { "System": { "device": { "supportedInterfaces": {
                "Alexa.Presentation.APL": { "runtime": { "maxVersion": "1.1" } }
            } } } }
        }));
        assert!(req.supports_display());

        let req = parse(json!({ "request": { "type": "IntentRequest" } }));
        assert!(!req.supports_display());
    }

    #[test]
    fn empty_or_null_display_interface_is_unsupported() {
        for iface in [json!({}), Value::Null, json!(true)] {
            let req = parse(json!({
                "request": { "type": "IntentRequest" },
                "context": { "System": { "device": { "supportedInterfaces": {
                    "Alexa.Presentation.APL": iface
                } } } }
            }));
            assert!(!req.supports_display());
        }
    }

    #[test]
    fn missing_request_type_is_rejected() {
        let result: Result<SkillRequest, _> = serde_json::from_value(json!({ "request": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn empty_envelope_has_empty_response() {
        let json = serde_json::to_value(ResponseEnvelope::empty()).unwrap();
        assert_eq!(json, json!({ "version": "1.0", "response": {} }));
    }

    #[test]
    fn spoken_envelope_shape() {
        let envelope = ResponseEnvelope::spoken(SpokenResponse {
            ssml: "<speak>hi</speak>".into(),
            should_end_session: false,
            reprompt: Some("<speak>more?</speak>".into()),
        });
        let json = serde_json::to_value(envelope).unwrap();
        assert_eq!(
            json,
            json!({
                "version": "1.0",
                "response": {
                    "shouldEndSession": false,
                    "outputSpeech": { "type": "SSML", "ssml": "<speak>hi</speak>" },
                    "reprompt": {
                        "outputSpeech": { "type": "SSML", "ssml": "<speak>more?</speak>" }
                    },
                    "directives": []
                }
            })
        );
    }

    #[test]
    fn fallback_is_plain_text() {
        let json = serde_json::to_value(ResponseEnvelope::fallback()).unwrap();
        assert_eq!(json["response"]["shouldEndSession"], json!(true));
        assert_eq!(json["response"]["outputSpeech"]["type"], json!("PlainText"));
        assert_eq!(json["response"]["outputSpeech"]["text"], json!(FALLBACK_TEXT));
    }

    #[test]
    fn meter_directive_carries_streak() {
        let directive = meter_directive(&DisplayConfig::default(), 4);
        assert_eq!(directive["token"], json!("mondayAvatarToken"));
        assert_eq!(directive["datasources"]["payload"]["meter"]["level"], json!(4));
        assert_eq!(directive["document"]["type"], json!("Link"));
    }
}
