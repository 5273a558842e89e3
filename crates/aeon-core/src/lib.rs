//! aeon-core: shared types for the AEON context engine.
//!
//! Holds the pieces every responder agrees on: the immutable [`Context`] snapshot,
//! the [`Emotion`] tag, the [`ResponsePayload`] value object, feedback signals, the
//! six-row response table and the env-driven [`AeonConfig`].
//!
//! The rule engine (`aeon-protocols`) and the decision-tree responder
//! (`aeon-classifier`) both read the same [`RESPONSE_TABLE`], so the
//! (tone, intent) → response mapping exists in exactly one place.

mod config;
mod shared;
pub mod table;

pub use config::{AeonConfig, ResponderKind};
pub use shared::{
    Context, ContextResponder, Emotion, FeedbackSignal, ResponsePayload, DEFAULT_ENVIRONMENT,
    FALLBACK_MESSAGE,
};
pub use table::{entry_for, entry_for_label, ResponseEntry, RESPONSE_TABLE};
