//! SSML rendering for reply categories.

use serde::{Deserialize, Serialize};

use super::{Mood, ResponseCategory};
use crate::storage::VoiceConfig;

const REPROMPT: &str = "Anything else I can wrangle up for ya, or are we all set for now?";
const ERROR_TEXT: &str =
    "Well shoot, somethin' went sideways on my end. Monday's gonna take a look, don't you fret.";

/// A rendered reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpokenResponse {
    pub ssml: String,
    pub should_end_session: bool,
    pub reprompt: Option<String>,
}

/// Render the reply for `category`. `streak` is only spoken for short and
/// long streaks.
pub fn render_speech(
    category: ResponseCategory,
    streak: u32,
    voice: &VoiceConfig,
) -> SpokenResponse {
    let body = match category {
        ResponseCategory::Duplicate(mood) => duplicate_line(mood, &voice.rate),
        ResponseCategory::Error => paced(ERROR_TEXT, &voice.rate),
        ResponseCategory::FirstStreak => paced(
            "Well howdy! That's day one of a brand new streak. Let's see if we can keep this wagon rollin'.",
            &voice.rate,
        ),
        ResponseCategory::ShortStreak => paced(
            &format!("Look at that, a {streak}-day streak! You're doin' just fine, partner. Keep it up!"),
            &voice.rate,
        ),
        ResponseCategory::LongStreak => paced(
            &format!(
                "Hot diggity, a {streak}-day streak! Monday's grinnin' ear to ear. Mighty fine work, y'hear?"
            ),
            &voice.rate,
        ),
        ResponseCategory::Anomalous => paced(
            "Hmm. Monday can't quite make heads or tails of this streak right now, friend.",
            &voice.rate,
        ),
    };

    let should_end_session = category.ends_session();
    let reprompt = (!should_end_session).then(|| speak(&voice.name, &paced(REPROMPT, &voice.rate)));

    SpokenResponse {
        ssml: speak(&voice.name, &body),
        should_end_session,
        reprompt,
    }
}

fn duplicate_line(mood: Mood, rate: &str) -> String {
    match mood {
        Mood::Playful => {
            "Well, look at you! You already moseyed on in today. No need to show off now, we've got ya down!"
                .to_string()
        }
        Mood::Annoyed => prosody(
            rate,
            Some("-2%"),
            "Mm-hmm. You already checked in today. Again. Still only counts the once.",
        ),
        Mood::Tired => prosody(
            rate,
            Some("-4%"),
            "Sugar, you're already on the books for today. Go on and rest those boots a spell.",
        ),
    }
}

fn paced(text: &str, rate: &str) -> String {
    prosody(rate, None, text)
}

fn prosody(rate: &str, pitch: Option<&str>, text: &str) -> String {
    match pitch {
        Some(pitch) => format!(
            "<prosody rate='{}' pitch='{}'>{}</prosody>",
            escape_attr(rate),
            escape_attr(pitch),
            text
        ),
        None => format!("<prosody rate='{}'>{}</prosody>", escape_attr(rate), text),
    }
}

fn speak(voice_name: &str, inner: &str) -> String {
    format!(
        "<speak><voice name='{}'>{}</voice></speak>",
        escape_attr(voice_name),
        inner
    )
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice() -> VoiceConfig {
        VoiceConfig::default()
    }

    #[test]
    fn streaks_are_spoken_and_keep_session_open() {
        let reply = render_speech(ResponseCategory::ShortStreak, 3, &voice());
        assert!(reply.ssml.starts_with("<speak><voice name='Joanna'><prosody rate='medium'>"));
        assert!(reply.ssml.contains("3-day streak"));
        assert!(reply.ssml.ends_with("</prosody></voice></speak>"));
        assert!(!reply.should_end_session);
        assert!(reply.reprompt.as_deref().unwrap().contains("wrangle"));

        let reply = render_speech(ResponseCategory::LongStreak, 12, &voice());
        assert!(reply.ssml.contains("12-day streak"));
    }

    #[test]
    fn error_reply_is_generic_and_ends_session() {
        let reply = render_speech(ResponseCategory::Error, 0, &voice());
        assert!(reply.should_end_session);
        assert!(reply.reprompt.is_none());
        assert!(reply.ssml.contains(ERROR_TEXT));
    }

    #[test]
    fn duplicate_moods_differ() {
        let playful = render_speech(ResponseCategory::Duplicate(Mood::Playful), 3, &voice());
        let annoyed = render_speech(ResponseCategory::Duplicate(Mood::Annoyed), 3, &voice());
        let tired = render_speech(ResponseCategory::Duplicate(Mood::Tired), 3, &voice());

        assert!(!playful.ssml.contains("prosody"));
        assert!(annoyed.ssml.contains("pitch='-2%'"));
        assert!(tired.ssml.contains("pitch='-4%'"));
        assert!(
            playful.should_end_session && annoyed.should_end_session && tired.should_end_session
        );
    }

    #[test]
    fn voice_settings_are_escaped() {
        let voice = VoiceConfig {
            name: "Jo'anna".into(),
            rate: "fast".into(),
            mood_seed: None,
        };
        let reply = render_speech(ResponseCategory::FirstStreak, 1, &voice);
        assert!(reply.ssml.starts_with("<speak><voice name='Jo&apos;anna'><prosody rate='fast'>"));
    }
}
