//! The (tone, intent) → response table.
//!
//! Row order is significant: it is the protocol declaration order of the rule engine
//! and the label index of the classifier.

use crate::shared::{Emotion, ResponsePayload};

/// One authored response row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseEntry {
    /// Classifier label (row index).
    pub label: usize,
    /// Protocol name in the rule engine.
    pub protocol: &'static str,
    pub tone: &'static str,
    pub intent: &'static str,
    pub message: &'static str,
    pub emotion: Emotion,
}

impl ResponseEntry {
    pub fn payload(&self) -> ResponsePayload {
        ResponsePayload::new(self.message, self.emotion)
    }
}

pub const RESPONSE_TABLE: [ResponseEntry; 6] = [
    ResponseEntry {
        label: 0,
        protocol: "HappyCreate",
        tone: "happy",
        intent: "create",
        message: "Great energy! Let’s create something amazing!",
        emotion: Emotion::Warm,
    },
    ResponseEntry {
        label: 1,
        protocol: "RelaxedExplore",
        tone: "relaxed",
        intent: "explore",
        message: "Take it easy. The world is your canvas. Explore freely.",
        emotion: Emotion::Soothing,
    },
    ResponseEntry {
        label: 2,
        protocol: "FrustratedCollaborate",
        tone: "frustrated",
        intent: "collaborate",
        message: "Let’s step back and recalibrate. Teamwork will get us there.",
        emotion: Emotion::Neutral,
    },
    ResponseEntry {
        label: 3,
        protocol: "AnxiousRelax",
        tone: "anxious",
        intent: "relax",
        message: "Breathe deeply. Slow down. Relax and find your peace.",
        emotion: Emotion::Soothing,
    },
    ResponseEntry {
        label: 4,
        protocol: "ConfidentLearn",
        tone: "confident",
        intent: "learn",
        message: "You’ve got this! Knowledge is at your fingertips.",
        emotion: Emotion::Warm,
    },
    ResponseEntry {
        label: 5,
        protocol: "CuriousEscape",
        tone: "curious",
        intent: "escape",
        message: "Curiosity drives adventure. Let’s find a new world to discover.",
        emotion: Emotion::Warm,
    },
];

pub fn entry_for_label(label: usize) -> Option<&'static ResponseEntry> {
    RESPONSE_TABLE.get(label)
}

/// Row whose tone and intent both equal the given (already normalised) words.
pub fn entry_for(tone: &str, intent: &str) -> Option<&'static ResponseEntry> {
    RESPONSE_TABLE
        .iter()
        .find(|e| e.tone == tone && e.intent == intent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_labels_match_row_index() {
        for (i, entry) in RESPONSE_TABLE.iter().enumerate() {
            assert_eq!(entry.label, i);
            assert_eq!(entry_for_label(i), Some(entry));
        }
        assert!(entry_for_label(RESPONSE_TABLE.len()).is_none());
    }

    #[test]
    fn test_tone_intent_pairs_are_disjoint() {
        let pairs: HashSet<_> = RESPONSE_TABLE.iter().map(|e| (e.tone, e.intent)).collect();
        assert_eq!(pairs.len(), RESPONSE_TABLE.len());
        let names: HashSet<_> = RESPONSE_TABLE.iter().map(|e| e.protocol).collect();
        assert_eq!(names.len(), RESPONSE_TABLE.len());
    }

    #[test]
    fn test_lookup_by_pair() {
        let entry = entry_for("anxious", "relax").unwrap();
        assert_eq!(entry.protocol, "AnxiousRelax");
        assert_eq!(entry.emotion, Emotion::Soothing);
        assert!(entry_for("sad", "dance").is_none());
    }
}
