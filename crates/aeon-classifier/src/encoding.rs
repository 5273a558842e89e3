//! Integer encoding of (tone, intent) for the classifier.
//!
//! Words outside the maps encode to 0, the same index as "happy" / "create".

use aeon_core::{Context, RESPONSE_TABLE};

pub const TONES: [&str; 7] = [
    "happy",
    "sad",
    "frustrated",
    "confident",
    "relaxed",
    "curious",
    "anxious",
];

pub const INTENTS: [&str; 6] = ["create", "learn", "explore", "relax", "collaborate", "escape"];

/// Width of an encoded feature row.
pub const FEATURE_COUNT: usize = 2;

pub fn tone_index(tone: &str) -> usize {
    TONES.iter().position(|t| *t == tone).unwrap_or(0)
}

pub fn intent_index(intent: &str) -> usize {
    INTENTS.iter().position(|i| *i == intent).unwrap_or(0)
}

/// `[tone_index, intent_index]` as a feature row.
pub fn encode_features(context: &Context) -> Vec<f64> {
    vec![
        tone_index(context.emotional_tone()) as f64,
        intent_index(context.user_intent()) as f64,
    ]
}

/// The six-row initial training set, derived from the shared response table.
pub fn initial_training_set() -> (Vec<Vec<f64>>, Vec<usize>) {
    RESPONSE_TABLE
        .iter()
        .map(|entry| {
            let ctx = Context::neutral(entry.tone, entry.intent);
            (encode_features(&ctx), entry.label)
        })
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_words() {
        assert_eq!(tone_index("anxious"), 6);
        assert_eq!(intent_index("collaborate"), 4);
        let row = encode_features(&Context::neutral("relaxed", "explore"));
        assert_eq!(row, vec![4.0, 2.0]);
        assert_eq!(row.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_unknown_words_encode_to_zero() {
        assert_eq!(encode_features(&Context::neutral("bored", "dance")), vec![0.0, 0.0]);
        assert_eq!(encode_features(&Context::neutral("sad", "dance")), vec![1.0, 0.0]);
    }

    #[test]
    fn test_initial_training_set_rows() {
        let (features, labels) = initial_training_set();
        assert_eq!(
            features,
            vec![
                vec![0.0, 0.0],
                vec![4.0, 2.0],
                vec![2.0, 4.0],
                vec![6.0, 3.0],
                vec![3.0, 1.0],
                vec![5.0, 5.0],
            ]
        );
        assert_eq!(labels, vec![0, 1, 2, 3, 4, 5]);
    }
}
