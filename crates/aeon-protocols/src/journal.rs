//! Evolution journal: append-only record of every protocol evolution.

use serde::{Deserialize, Serialize};

use crate::mutation::Mutation;

/// One evolution event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionRecord {
    pub protocol: String,
    pub mutation: Mutation,
    /// Epoch millis when the evolution happened.
    pub timestamp_ms: i64,
}

/// Evolution history for a session, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionJournal {
    records: Vec<EvolutionRecord>,
}

impl EvolutionJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, protocol: &str, mutation: Mutation) {
        self.records.push(EvolutionRecord {
            protocol: protocol.to_string(),
            mutation,
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        });
    }

    pub fn records(&self) -> &[EvolutionRecord] {
        &self.records
    }

    /// Records for one protocol, oldest first.
    pub fn for_protocol<'a>(&'a self, protocol: &'a str) -> impl Iterator<Item = &'a EvolutionRecord> {
        self.records.iter().filter(move |r| r.protocol == protocol)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records)
    }
}
