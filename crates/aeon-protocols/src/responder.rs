//! Responder: the external-facing orchestrator over the protocol registry.

use std::sync::{Arc, Mutex, MutexGuard};

use aeon_core::{AeonConfig, Context, ContextResponder, FeedbackSignal, ResponsePayload};
use rand::RngCore;
use tracing::debug;

use crate::feedback::FeedbackOutcome;
use crate::journal::EvolutionJournal;
use crate::mutation::mutation_rng;
use crate::protocol::{Protocol, ProtocolSnapshot};
use crate::registry::ProtocolRegistry;

/// Owns the registry for the lifetime of a session and routes contexts and feedback.
///
/// The protocol set is fixed at construction; unmatched contexts get the fallback
/// payload and never become protocols. Evolved protocols draw from the responder's
/// RNG on every response, so the RNG sits behind a lock and reads stay `&self`.
pub struct Responder {
    registry: ProtocolRegistry,
    rng: Mutex<Box<dyn RngCore + Send>>,
    journal: Option<EvolutionJournal>,
}

impl Responder {
    /// OS-entropy mutation RNG, journal on.
    pub fn new(registry: ProtocolRegistry) -> Self {
        Self::with_rng(registry, mutation_rng(None))
    }

    /// Reproducible mutations from a fixed seed.
    pub fn with_seed(registry: ProtocolRegistry, seed: u64) -> Self {
        Self::with_rng(registry, mutation_rng(Some(seed)))
    }

    /// Inject any RNG as the mutation source.
    pub fn with_rng(registry: ProtocolRegistry, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            registry,
            rng: Mutex::new(Box::new(rng)),
            journal: Some(EvolutionJournal::new()),
        }
    }

    /// Default protocols, seed and journal toggle taken from config.
    pub fn from_config(config: &AeonConfig) -> Self {
        let mut responder = Self::with_rng(
            ProtocolRegistry::with_default_protocols(),
            mutation_rng(config.mutation_seed),
        );
        if !config.evolution_journal {
            responder.journal = None;
        }
        responder
    }

    // A draw never leaves the RNG half-updated, so a poisoned lock is still usable.
    fn rng(&self) -> MutexGuard<'_, Box<dyn RngCore + Send>> {
        self.rng.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// First matching protocol and its current response.
    pub fn resolve(&self, context: &Context) -> Option<(&Protocol, ResponsePayload)> {
        let mut rng = self.rng();
        self.registry.resolve(context, &mut **rng)
    }

    /// Current response of the first matching protocol, or the fallback payload.
    /// A plain match changes no protocol state; an evolved protocol redraws its
    /// rewrite and emotion on every call.
    pub fn generate_response(&self, context: &Context) -> ResponsePayload {
        self.resolve(context)
            .map(|(_, response)| response)
            .unwrap_or_else(ResponsePayload::fallback)
    }

    /// Re-resolve the context and feed the signal to the matching protocol.
    ///
    /// Feedback is NOT always recorded: when no protocol matches the context at
    /// feedback time it is silently discarded and `None` is returned. The context is
    /// matched afresh, so it need not be the one a response was generated for, and a
    /// protocol may evolve from feedback on a context it never answered.
    pub fn submit_feedback(
        &mut self,
        context: &Context,
        feedback: impl Into<FeedbackSignal>,
    ) -> Option<FeedbackOutcome> {
        let signal = feedback.into();
        let Some(protocol) = self.registry.resolve_mut(context) else {
            debug!(%context, %signal, "feedback discarded: no protocol matched");
            return None;
        };
        let rng = self.rng.get_mut().unwrap_or_else(|e| e.into_inner());
        let (_, outcome) = protocol.activate_with_feedback(context, &signal, &mut **rng)?;

        if let (Some(mutation), Some(journal)) = (outcome.evolved, self.journal.as_mut()) {
            journal.record(&outcome.protocol, mutation);
        }
        Some(outcome)
    }

    pub fn registry(&self) -> &ProtocolRegistry {
        &self.registry
    }

    pub fn protocol(&self, name: &str) -> Option<&Protocol> {
        self.registry.get(name)
    }

    /// State of every protocol, in registry order.
    pub fn snapshot(&self) -> Vec<ProtocolSnapshot> {
        self.registry.iter().map(Protocol::snapshot).collect()
    }

    /// `None` when the journal is disabled.
    pub fn journal(&self) -> Option<&EvolutionJournal> {
        self.journal.as_ref()
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(ProtocolRegistry::with_default_protocols())
    }
}

impl ContextResponder for Responder {
    fn kind(&self) -> &'static str {
        "rules"
    }

    fn respond(&self, context: &Context) -> ResponsePayload {
        self.generate_response(context)
    }
}

// ---------------------------------------------------------------------------
// Shared handle
// ---------------------------------------------------------------------------

/// Thread-safe handle for embedding a responder in concurrent code.
///
/// Each feedback submission holds the lock across the reward update and the
/// conditional evolution, so one threshold crossing evolves exactly once.
#[derive(Clone)]
pub struct SharedResponder {
    inner: Arc<Mutex<Responder>>,
}

impl SharedResponder {
    pub fn new(responder: Responder) -> Self {
        Self {
            inner: Arc::new(Mutex::new(responder)),
        }
    }

    // Reward reset and lineage push cannot be interrupted by a panic; a poisoned
    // lock still guards consistent state.
    fn lock(&self) -> MutexGuard<'_, Responder> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn generate_response(&self, context: &Context) -> ResponsePayload {
        self.lock().generate_response(context)
    }

    pub fn submit_feedback(
        &self,
        context: &Context,
        feedback: impl Into<FeedbackSignal>,
    ) -> Option<FeedbackOutcome> {
        self.lock().submit_feedback(context, feedback)
    }

    pub fn snapshot(&self) -> Vec<ProtocolSnapshot> {
        self.lock().snapshot()
    }

    /// Run a closure with exclusive access to the responder.
    pub fn with<T>(&self, f: impl FnOnce(&mut Responder) -> T) -> T {
        f(&mut self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_core::Emotion;

    fn responder() -> Responder {
        Responder::with_seed(ProtocolRegistry::with_default_protocols(), 2024)
    }

    #[test]
    fn test_generate_happy_create() {
        let r = responder();
        let out = r.generate_response(&Context::neutral("happy", "create"));
        assert_eq!(
            out,
            ResponsePayload::new("Great energy! Let’s create something amazing!", Emotion::Warm)
        );
    }

    #[test]
    fn test_generate_fallback() {
        let r = responder();
        let out = r.generate_response(&Context::neutral("sad", "dance"));
        assert_eq!(out, ResponsePayload::fallback());
    }

    #[test]
    fn test_orphan_feedback_is_discarded() {
        let mut r = responder();
        let before = r.snapshot();
        assert!(r
            .submit_feedback(&Context::neutral("sad", "dance"), "positive")
            .is_none());
        assert_eq!(r.snapshot(), before);
    }

    #[test]
    fn test_journal_records_evolution() {
        let mut r = responder();
        let ctx = Context::neutral("confident", "learn");
        for _ in 0..3 {
            r.submit_feedback(&ctx, "positive");
        }
        let journal = r.journal().unwrap();
        assert_eq!(journal.len(), 1);
        assert_eq!(journal.records()[0].protocol, "ConfidentLearn");
        assert_eq!(journal.records()[0].mutation.generation, 1);
    }

    #[test]
    fn test_journal_can_be_disabled() {
        let config = AeonConfig {
            evolution_journal: false,
            mutation_seed: Some(1),
            ..AeonConfig::default()
        };
        let mut r = Responder::from_config(&config);
        for _ in 0..3 {
            r.submit_feedback(&Context::neutral("happy", "create"), "positive");
        }
        assert!(r.journal().is_none());
        assert_eq!(r.protocol("HappyCreate").unwrap().generation(), 1);
    }

    #[test]
    fn test_shared_responder_evolves_once_per_crossing() {
        let shared = SharedResponder::new(responder());
        let ctx = Context::neutral("relaxed", "explore");
        let handles: Vec<_> = (0..6)
            .map(|_| {
                let shared = shared.clone();
                let ctx = ctx.clone();
                std::thread::spawn(move || shared.submit_feedback(&ctx, "positive"))
            })
            .collect();
        let evolved = handles
            .into_iter()
            .filter_map(|h| h.join().unwrap())
            .filter(|o| o.evolved.is_some())
            .count();
        assert_eq!(evolved, 2);
        shared.with(|r| {
            let p = r.protocol("RelaxedExplore").unwrap();
            assert_eq!(p.generation(), 2);
            assert_eq!(p.reward_score(), 0);
        });
    }
}
