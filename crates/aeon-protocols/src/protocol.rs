//! Protocol: a named rule pairing a trigger with a response template and reward state.

use aeon_core::{Context, FeedbackSignal, ResponseEntry, ResponsePayload};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::feedback::{FeedbackLoop, FeedbackOutcome};
use crate::mutation::{self, Mutation};

/// Reward at which a protocol evolves.
pub const EVOLUTION_THRESHOLD: i32 = 3;

// ---------------------------------------------------------------------------
// Trigger
// ---------------------------------------------------------------------------

/// Predicate deciding whether a protocol applies to a context.
#[derive(Debug, Clone)]
pub enum Trigger {
    /// Tone and intent must both equal the given (normalised) words.
    ToneIntent { tone: String, intent: String },
    /// Arbitrary predicate.
    Predicate(fn(&Context) -> bool),
}

impl Trigger {
    pub fn tone_intent(tone: &str, intent: &str) -> Self {
        Trigger::ToneIntent {
            tone: tone.trim().to_lowercase(),
            intent: intent.trim().to_lowercase(),
        }
    }

    pub fn matches(&self, context: &Context) -> bool {
        match self {
            Trigger::ToneIntent { tone, intent } => {
                context.emotional_tone() == tone && context.user_intent() == intent
            }
            Trigger::Predicate(f) => f(context),
        }
    }
}

// ---------------------------------------------------------------------------
// Protocol
// ---------------------------------------------------------------------------

/// A context-matching rule that evolves after enough positive feedback.
///
/// Only the [`FeedbackLoop`] changes `reward_score`; once it reaches
/// [`EVOLUTION_THRESHOLD`] the protocol gains one generation and the score returns to 0
/// in the same update, so the score is never observed at or above the threshold.
#[derive(Debug, Clone)]
pub struct Protocol {
    name: String,
    trigger: Trigger,
    template: ResponsePayload,
    reward_score: i32,
    evolution_threshold: i32,
    lineage: Vec<Mutation>,
}

impl Protocol {
    pub fn new(name: impl Into<String>, trigger: Trigger, template: ResponsePayload) -> Self {
        Self {
            name: name.into(),
            trigger,
            template,
            reward_score: 0,
            evolution_threshold: EVOLUTION_THRESHOLD,
            lineage: Vec::new(),
        }
    }

    /// Protocol for one row of the shared response table.
    pub fn from_entry(entry: &ResponseEntry) -> Self {
        Self::new(
            entry.protocol,
            Trigger::tone_intent(entry.tone, entry.intent),
            entry.payload(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    /// Authored response, before any mutation.
    pub fn template(&self) -> &ResponsePayload {
        &self.template
    }

    pub fn reward_score(&self) -> i32 {
        self.reward_score
    }

    pub fn evolution_threshold(&self) -> i32 {
        self.evolution_threshold
    }

    /// Number of evolutions so far (0 = unevolved).
    pub fn generation(&self) -> u32 {
        self.lineage.len() as u32
    }

    pub fn lineage(&self) -> &[Mutation] {
        &self.lineage
    }

    pub fn matches(&self, context: &Context) -> bool {
        self.trigger.matches(context)
    }

    /// Current response: the template with the lineage replayed over it. An unevolved
    /// protocol always returns its template; an evolved one draws from `rng` per call.
    pub fn render<R: Rng + ?Sized>(&self, rng: &mut R) -> ResponsePayload {
        mutation::render(&self.template, &self.lineage, rng)
    }

    /// Match without feedback. Changes no protocol state.
    pub fn activate<R: Rng + ?Sized>(
        &self,
        context: &Context,
        rng: &mut R,
    ) -> Option<ResponsePayload> {
        if !self.matches(context) {
            return None;
        }
        Some(self.render(rng))
    }

    /// Evaluate the trigger; on a match return the current response and, when feedback
    /// is given, run the reward update afterwards. The returned response is the one
    /// rendered before the update, whether or not the update evolved the protocol.
    pub fn try_activate<R: Rng + ?Sized>(
        &mut self,
        context: &Context,
        feedback: Option<&FeedbackSignal>,
        rng: &mut R,
    ) -> Option<ResponsePayload> {
        match feedback {
            Some(signal) => self
                .activate_with_feedback(context, signal, rng)
                .map(|(response, _)| response),
            None => self.activate(context, rng),
        }
    }

    /// Like [`Protocol::try_activate`] with feedback, also returning what the update did.
    pub fn activate_with_feedback<R: Rng + ?Sized>(
        &mut self,
        context: &Context,
        signal: &FeedbackSignal,
        rng: &mut R,
    ) -> Option<(ResponsePayload, FeedbackOutcome)> {
        let response = self.activate(context, rng)?;
        debug!(protocol = %self.name, %signal, "feedback on matched protocol");
        let outcome = FeedbackLoop::apply(self, signal);
        Some((response, outcome))
    }

    pub fn snapshot(&self) -> ProtocolSnapshot {
        ProtocolSnapshot {
            name: self.name.clone(),
            reward_score: self.reward_score,
            generation: self.generation(),
            template: self.template.clone(),
        }
    }

    pub(crate) fn adjust_reward(&mut self, delta: i32) {
        self.reward_score += delta;
    }

    pub(crate) fn should_evolve(&self) -> bool {
        self.reward_score >= self.evolution_threshold
    }

    /// Reset the reward and wrap the response in one more generation layer.
    pub(crate) fn evolve(&mut self) -> Mutation {
        self.reward_score = 0;
        let mutation = Mutation::new(self.generation() + 1);
        self.lineage.push(mutation);
        mutation
    }
}

/// Inspectable state of one protocol. Evolved responses are drawn per call, so the
/// snapshot carries the authored template and the generation rather than a sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtocolSnapshot {
    pub name: String,
    pub reward_score: i32,
    pub generation: u32,
    pub template: ResponsePayload,
}
