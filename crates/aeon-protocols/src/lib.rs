//! aeon-protocols: the AEON rule engine.
//!
//! A [`Responder`] owns an ordered [`ProtocolRegistry`]. Each [`Protocol`] pairs a
//! trigger over a [`Context`](aeon_core::Context) with a response template. User
//! feedback flows through the [`FeedbackLoop`] into a protocol's reward score; at the
//! threshold the protocol evolves.
//!
//! ## Evolution
//!
//! Evolution is data, not code: a protocol's response is its template with a lineage
//! of [`Mutation`]s replayed over it, one layer per generation. Each layer flips its own
//! rewrite coin and redraws the emotion on every response, drawing from the responder's
//! injectable RNG, so a seeded responder answers identically on every run.
//!
//! ## Evolution Journal
//!
//! The [`EvolutionJournal`] keeps an append-only history of evolutions per session,
//! exportable as JSON.

mod feedback;
mod journal;
pub mod mutation;
mod protocol;
mod registry;
mod responder;

pub use feedback::{FeedbackLoop, FeedbackOutcome};
pub use journal::{EvolutionJournal, EvolutionRecord};
pub use mutation::{Mutation, MutationRng, PhraseRewrite, PHRASE_REWRITE, REWRITE_PROBABILITY};
pub use protocol::{Protocol, ProtocolSnapshot, Trigger, EVOLUTION_THRESHOLD};
pub use registry::ProtocolRegistry;
pub use responder::{Responder, SharedResponder};
