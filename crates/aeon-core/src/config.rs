//! AEON configuration loaded from the environment (`.env` is read by the binary).
//!
//! Change responder behaviour without code edits. Unset or invalid values fall back
//! to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::shared::DEFAULT_ENVIRONMENT;

fn default_true() -> bool {
    true
}

fn default_model_path() -> PathBuf {
    PathBuf::from("./data/aeon_model.bin")
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

/// Which responder a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponderKind {
    /// Protocol rule engine with feedback-driven evolution.
    #[default]
    Rules,
    /// Decision-tree classifier over (tone, intent).
    Classifier,
}

impl ResponderKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rules" | "protocols" => Some(ResponderKind::Rules),
            "classifier" | "model" => Some(ResponderKind::Classifier),
            _ => None,
        }
    }
}

/// AEON configuration.
///
/// | Env | Default | Description |
/// |-----|---------|-------------|
/// | AEON_MUTATION_SEED | unset | Seed for the mutation RNG; unset draws from OS entropy. |
/// | AEON_RESPONDER | rules | `rules` or `classifier`. |
/// | AEON_MODEL_PATH | ./data/aeon_model.bin | Classifier model file. |
/// | AEON_ENVIRONMENT | neutral | `environment_state` for interactive contexts. |
/// | AEON_EVOLUTION_JOURNAL | true | Record evolution events in the journal. |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AeonConfig {
    #[serde(default)]
    pub mutation_seed: Option<u64>,
    #[serde(default)]
    pub responder: ResponderKind,
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_true")]
    pub evolution_journal: bool,
}

impl Default for AeonConfig {
    fn default() -> Self {
        Self {
            mutation_seed: None,
            responder: ResponderKind::default(),
            model_path: default_model_path(),
            environment: default_environment(),
            evolution_journal: true,
        }
    }
}

impl AeonConfig {
    /// Load from environment. Unset or invalid => defaults (see struct docs).
    pub fn from_env() -> Self {
        let responder = match env_opt_string("AEON_RESPONDER") {
            Some(raw) => ResponderKind::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unknown AEON_RESPONDER; using rules");
                ResponderKind::Rules
            }),
            None => ResponderKind::Rules,
        };
        Self {
            mutation_seed: env_opt_string("AEON_MUTATION_SEED").and_then(|s| s.parse().ok()),
            responder,
            model_path: env_opt_string("AEON_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_model_path),
            environment: env_opt_string("AEON_ENVIRONMENT").unwrap_or_else(default_environment),
            evolution_journal: env_bool("AEON_EVOLUTION_JOURNAL", true),
        }
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(v) if v.trim().is_empty() => default,
        Ok(v) => v.trim().eq_ignore_ascii_case("true") || v.trim() == "1",
        Err(_) => default,
    }
}

fn env_opt_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
