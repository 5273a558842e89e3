//! Mutation model for evolving protocols.
//!
//! An evolved protocol is its authored template plus a lineage of [`Mutation`]s, one
//! per generation. A mutation is a rule, not a frozen outcome: every time the protocol
//! answers, each generation in the lineage flips its own rewrite coin and redraws the
//! emotion tag from an injectable RNG. Layers are replayed oldest first, so the newest
//! generation's emotion is the one returned. Given the same seed, the same sequence of
//! calls yields the same responses.
//!
//! Mutation is cosmetic: it may rewrite one phrase and it replaces the emotion tag with
//! a uniformly drawn one, which may no longer match the tone the response was written for.

use aeon_core::{Emotion, ResponsePayload};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Per-response probability that one generation applies the phrase rewrite.
pub const REWRITE_PROBABILITY: f64 = 0.5;

/// Stylistic phrase substitution applied by mutations that carry a rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseRewrite {
    pub from: &'static str,
    pub to: &'static str,
}

pub const PHRASE_REWRITE: PhraseRewrite = PhraseRewrite {
    from: "Let’s",
    to: "We could",
};

impl PhraseRewrite {
    pub fn apply(&self, message: &str) -> String {
        message.replace(self.from, self.to)
    }
}

/// One generation layer of an evolved protocol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    /// Generation this layer produced (first evolution is generation 1).
    pub generation: u32,
    /// Chance per response that [`PHRASE_REWRITE`] is applied by this layer.
    pub rewrite_probability: f64,
}

impl Mutation {
    pub fn new(generation: u32) -> Self {
        Self {
            generation,
            rewrite_probability: REWRITE_PROBABILITY,
        }
    }

    /// Wrap one response: rewrite with `rewrite_probability`, then redraw the emotion
    /// uniformly from [`Emotion::ALL`].
    pub fn apply<R: Rng + ?Sized>(&self, payload: ResponsePayload, rng: &mut R) -> ResponsePayload {
        let message = if rng.gen_bool(self.rewrite_probability) {
            PHRASE_REWRITE.apply(&payload.message)
        } else {
            payload.message
        };
        let emotion = Emotion::ALL[rng.gen_range(0..Emotion::ALL.len())];
        ResponsePayload { message, emotion }
    }
}

/// Replay a lineage over a template, oldest generation first. An empty lineage returns
/// the template and draws nothing.
pub fn render<R: Rng + ?Sized>(
    template: &ResponsePayload,
    lineage: &[Mutation],
    rng: &mut R,
) -> ResponsePayload {
    lineage
        .iter()
        .fold(template.clone(), |payload, mutation| mutation.apply(payload, &mut *rng))
}

/// RNG used for mutation draws.
pub type MutationRng = ChaCha8Rng;

/// Seeded RNG when a seed is given, OS entropy otherwise.
pub fn mutation_rng(seed: Option<u64>) -> MutationRng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
