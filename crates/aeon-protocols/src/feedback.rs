//! Feedback loop: turns user verdicts into reward and, past the threshold, evolution.

use aeon_core::FeedbackSignal;
use serde::Serialize;
use tracing::info;

use crate::mutation::Mutation;
use crate::protocol::Protocol;

/// What one feedback submission did to a protocol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackOutcome {
    pub protocol: String,
    pub signal: FeedbackSignal,
    /// +1, -1, or 0 for unrecognised signals.
    pub delta: i32,
    /// Reward after the update (0 when the update evolved the protocol).
    pub reward_score: i32,
    /// Generation layer appended when the update crossed the threshold.
    pub evolved: Option<Mutation>,
}

/// The only writer of a protocol's reward score.
pub struct FeedbackLoop;

impl FeedbackLoop {
    /// Apply the signal's delta, then evolve once if the reward reached the threshold.
    ///
    /// Negative reward has no floor and never undoes an evolution.
    pub fn apply(protocol: &mut Protocol, signal: &FeedbackSignal) -> FeedbackOutcome {
        let delta = signal.reward_delta();
        protocol.adjust_reward(delta);

        let evolved = if protocol.should_evolve() {
            let mutation = protocol.evolve();
            info!(
                protocol = %protocol.name(),
                generation = mutation.generation,
                rewrite_probability = mutation.rewrite_probability,
                "Protocol '{}' has evolved",
                protocol.name()
            );
            Some(mutation)
        } else {
            None
        };

        FeedbackOutcome {
            protocol: protocol.name().to_string(),
            signal: signal.clone(),
            delta,
            reward_score: protocol.reward_score(),
            evolved,
        }
    }
}
