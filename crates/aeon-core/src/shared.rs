//! Context snapshot, emotion tags, response payloads and feedback signals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message returned when no protocol matches a context.
pub const FALLBACK_MESSAGE: &str = "No immediate adaptation found. Learning...";

/// Environment state stamped on contexts built from interactive input.
pub const DEFAULT_ENVIRONMENT: &str = "neutral";

// ---------------------------------------------------------------------------
// Emotion
// ---------------------------------------------------------------------------

/// Emotion tag attached to every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Soothing,
    Warm,
    Neutral,
}

impl Emotion {
    /// Every tag, in the order mutation draws from.
    pub const ALL: [Emotion; 3] = [Emotion::Soothing, Emotion::Warm, Emotion::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Soothing => "soothing",
            Emotion::Warm => "warm",
            Emotion::Neutral => "neutral",
        }
    }

    /// Presentation colour used when rendering a response
    /// (soothing `#A4C6E1`, warm `#FFD700`, neutral `#D3D3D3`).
    pub fn color_rgb(&self) -> (u8, u8, u8) {
        match self {
            Emotion::Soothing => (0xA4, 0xC6, 0xE1),
            Emotion::Warm => (0xFF, 0xD7, 0x00),
            Emotion::Neutral => (0xD3, 0xD3, 0xD3),
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Immutable snapshot of one interaction's input state.
///
/// Tone and intent are case-normalised (trimmed, lower-cased) on construction, so
/// `Context::new("Happy", "CREATE", ..)` equals `Context::new("happy", "create", ..)`.
/// Fields are only reachable through getters; a context never changes after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Context {
    emotional_tone: String,
    user_intent: String,
    environment_state: String,
}

impl Context {
    pub fn new(
        emotional_tone: impl AsRef<str>,
        user_intent: impl AsRef<str>,
        environment_state: impl Into<String>,
    ) -> Self {
        Self {
            emotional_tone: normalize(emotional_tone.as_ref()),
            user_intent: normalize(user_intent.as_ref()),
            environment_state: environment_state.into(),
        }
    }

    /// Context with the default `"neutral"` environment state.
    pub fn neutral(emotional_tone: impl AsRef<str>, user_intent: impl AsRef<str>) -> Self {
        Self::new(emotional_tone, user_intent, DEFAULT_ENVIRONMENT)
    }

    pub fn emotional_tone(&self) -> &str {
        &self.emotional_tone
    }

    pub fn user_intent(&self) -> &str {
        &self.user_intent
    }

    pub fn environment_state(&self) -> &str {
        &self.environment_state
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Tone: {}, Intent: {}, Env: {}]",
            self.emotional_tone, self.user_intent, self.environment_state
        )
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Response payload
// ---------------------------------------------------------------------------

/// What a responder hands back for one context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePayload {
    pub message: String,
    pub emotion: Emotion,
}

impl ResponsePayload {
    pub fn new(message: impl Into<String>, emotion: Emotion) -> Self {
        Self {
            message: message.into(),
            emotion,
        }
    }

    /// `{"No immediate adaptation found. Learning...", neutral}`.
    pub fn fallback() -> Self {
        Self::new(FALLBACK_MESSAGE, Emotion::Neutral)
    }
}

// ---------------------------------------------------------------------------
// Feedback signal
// ---------------------------------------------------------------------------

/// User verdict on a response.
///
/// Only the literals `"positive"` and `"negative"` carry weight; every other string
/// is kept as [`FeedbackSignal::Unrecognized`] and moves the reward by zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackSignal {
    Positive,
    Negative,
    Unrecognized(String),
}

impl FeedbackSignal {
    pub fn reward_delta(&self) -> i32 {
        match self {
            FeedbackSignal::Positive => 1,
            FeedbackSignal::Negative => -1,
            FeedbackSignal::Unrecognized(_) => 0,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, FeedbackSignal::Unrecognized(_))
    }
}

impl From<&str> for FeedbackSignal {
    fn from(s: &str) -> Self {
        match s {
            "positive" => FeedbackSignal::Positive,
            "negative" => FeedbackSignal::Negative,
            other => FeedbackSignal::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for FeedbackSignal {
    fn from(s: String) -> Self {
        FeedbackSignal::from(s.as_str())
    }
}

impl fmt::Display for FeedbackSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackSignal::Positive => f.write_str("positive"),
            FeedbackSignal::Negative => f.write_str("negative"),
            FeedbackSignal::Unrecognized(s) => write!(f, "unrecognized({})", s),
        }
    }
}

// ---------------------------------------------------------------------------
// Responder boundary
// ---------------------------------------------------------------------------

/// The "Context → message" boundary shared by the rule engine and the classifier.
///
/// Implementations are substitutable; a session runs exactly one of them.
pub trait ContextResponder {
    /// Short label for logs and status output (e.g. "rules", "classifier").
    fn kind(&self) -> &'static str;

    /// Produce a response for the context. Never fails; unknown input degrades
    /// to a neutral payload.
    fn respond(&self, context: &Context) -> ResponsePayload;

    fn respond_message(&self, context: &Context) -> String {
        self.respond(context).message
    }
}
