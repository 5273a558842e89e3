//! Console session: command parsing and dispatch to the active responder.

use aeon_classifier::{ClassifierError, ClassifierResponder};
use aeon_core::{AeonConfig, Context, ContextResponder, ResponderKind, ResponsePayload};
use aeon_protocols::Responder;
use owo_colors::OwoColorize;
use thiserror::Error;
use tracing::info;

pub const HELP: &str = "\
Commands:
  respond <tone> <intent>   Generate a response (alias: r)
  feedback <positive|negative>
                            Rate the last response (alias: f); rule engine only
  status                    Show protocol reward and generation, or model state
  journal                   Print the evolution journal as JSON; rule engine only
  train                     Retrain the classifier on the initial set and save it
  help                      Show this help
  quit                      Leave (alias: exit)";

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),
    #[error("no response generated yet; use 'respond <tone> <intent>' first")]
    NoContext,
    #[error("'{command}' is not available with the {engine} responder")]
    Unsupported {
        command: &'static str,
        engine: &'static str,
    },
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Respond { tone: String, intent: String },
    Feedback(String),
    Status,
    Journal,
    Train,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines are `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, ConsoleError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = words.collect();
        let command = match head.to_lowercase().as_str() {
            "respond" | "r" => match rest.as_slice() {
                [tone, intent] => Command::Respond {
                    tone: tone.to_string(),
                    intent: intent.to_string(),
                },
                _ => return Err(ConsoleError::Usage("respond <tone> <intent>")),
            },
            "feedback" | "f" => match rest.as_slice() {
                [verdict] => Command::Feedback(verdict.to_lowercase()),
                _ => return Err(ConsoleError::Usage("feedback <positive|negative>")),
            },
            "status" => Command::Status,
            "journal" => Command::Journal,
            "train" => Command::Train,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ConsoleError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The responder a session runs; never both.
pub enum Engine {
    Rules(Responder),
    Classifier(ClassifierResponder),
}

impl Engine {
    fn responder(&self) -> &dyn ContextResponder {
        match self {
            Engine::Rules(r) => r,
            Engine::Classifier(c) => c,
        }
    }
}

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Response(ResponsePayload),
    Text(String),
    Quit,
}

pub struct Session {
    engine: Engine,
    environment: String,
    last_context: Option<Context>,
}

impl Session {
    pub fn new(engine: Engine, environment: impl Into<String>) -> Self {
        Self {
            engine,
            environment: environment.into(),
            last_context: None,
        }
    }

    pub fn from_config(config: &AeonConfig) -> Result<Self, ConsoleError> {
        let engine = match config.responder {
            ResponderKind::Rules => Engine::Rules(Responder::from_config(config)),
            ResponderKind::Classifier => {
                Engine::Classifier(ClassifierResponder::from_config(config)?)
            }
        };
        info!(
            responder = engine.responder().kind(),
            environment = %config.environment,
            seeded = config.mutation_seed.is_some(),
            "session ready"
        );
        Ok(Self::new(engine, config.environment.clone()))
    }

    pub fn kind(&self) -> &'static str {
        self.engine.responder().kind()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn last_context(&self) -> Option<&Context> {
        self.last_context.as_ref()
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply, ConsoleError> {
        let engine = self.kind();
        match command {
            Command::Respond { tone, intent } => {
                let context = Context::new(tone, intent, self.environment.clone());
                let response = self.engine.responder().respond(&context);
                self.last_context = Some(context);
                Ok(Reply::Response(response))
            }
            Command::Feedback(verdict) => self.feedback(&verdict),
            Command::Status => self.status(),
            Command::Journal => match &self.engine {
                Engine::Rules(r) => match r.journal() {
                    Some(journal) => Ok(Reply::Text(journal.to_json()?)),
                    None => Ok(Reply::Text("evolution journal is disabled".to_string())),
                },
                Engine::Classifier(_) => Err(unsupported("journal", engine)),
            },
            Command::Train => match &mut self.engine {
                Engine::Classifier(c) => {
                    c.train_initial_model()?;
                    Ok(Reply::Text(format!(
                        "model retrained and saved to {}",
                        c.model_path().display()
                    )))
                }
                Engine::Rules(_) => Err(unsupported("train", engine)),
            },
            Command::Help => Ok(Reply::Text(HELP.to_string())),
            Command::Quit => Ok(Reply::Quit),
        }
    }

    /// Feedback goes to whatever protocol matches the last context now.
    fn feedback(&mut self, verdict: &str) -> Result<Reply, ConsoleError> {
        let engine = self.kind();
        let context = self.last_context.clone().ok_or(ConsoleError::NoContext)?;
        let Engine::Rules(responder) = &mut self.engine else {
            return Err(unsupported("feedback", engine));
        };
        let text = match responder.submit_feedback(&context, verdict) {
            None => format!("Feedback received: {} (no protocol matched; discarded)", verdict),
            Some(outcome) => {
                let mut text = format!(
                    "Feedback received: {} ({} reward {})",
                    verdict, outcome.protocol, outcome.reward_score
                );
                if let Some(mutation) = outcome.evolved {
                    text.push_str(&format!(
                        "\nProtocol '{}' has evolved (generation {})",
                        outcome.protocol, mutation.generation
                    ));
                }
                text
            }
        };
        Ok(Reply::Text(text))
    }

    fn status(&self) -> Result<Reply, ConsoleError> {
        let text = match &self.engine {
            Engine::Rules(r) => r
                .snapshot()
                .iter()
                .map(|s| {
                    // Evolved protocols redraw their emotion per response.
                    let emotion = if s.generation == 0 {
                        s.template.emotion.as_str()
                    } else {
                        "random"
                    };
                    format!(
                        "{:<22} reward {:>3}  generation {:>2}  {:<8} {}",
                        s.name, s.reward_score, s.generation, emotion, s.template.message
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Engine::Classifier(c) => format!(
                "classifier model {} ({}, depth {})",
                c.model_path().display(),
                if c.is_trained() { "trained" } else { "untrained" },
                c.model().depth()
            ),
        };
        Ok(Reply::Text(text))
    }
}

fn unsupported(command: &'static str, engine: &'static str) -> ConsoleError {
    ConsoleError::Unsupported { command, engine }
}

/// Message in its emotion colour, followed by the tag.
pub fn render_response(response: &ResponsePayload) -> String {
    let (r, g, b) = response.emotion.color_rgb();
    format!(
        "{} [{}]",
        response.message.truecolor(r, g, b),
        response.emotion
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_core::Emotion;
    use aeon_protocols::ProtocolRegistry;

    fn rules_session() -> Session {
        Session::new(
            Engine::Rules(Responder::with_seed(
                ProtocolRegistry::with_default_protocols(),
                17,
            )),
            "neutral",
        )
    }

    fn run(session: &mut Session, line: &str) -> Result<Reply, ConsoleError> {
        let command = Command::parse(line)?.expect("non-blank line");
        session.execute(command)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(
            Command::parse("R Happy Create").unwrap(),
            Some(Command::Respond {
                tone: "Happy".to_string(),
                intent: "Create".to_string()
            })
        );
        assert_eq!(
            Command::parse("feedback POSITIVE").unwrap(),
            Some(Command::Feedback("positive".to_string()))
        );
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
        assert!(matches!(
            Command::parse("respond happy"),
            Err(ConsoleError::Usage(_))
        ));
        assert!(matches!(
            Command::parse("dance"),
            Err(ConsoleError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_respond_normalizes_case() {
        let mut s = rules_session();
        let reply = run(&mut s, "respond HAPPY Create").unwrap();
        assert_eq!(
            reply,
            Reply::Response(ResponsePayload::new(
                "Great energy! Let’s create something amazing!",
                Emotion::Warm
            ))
        );
        assert_eq!(s.last_context().unwrap().emotional_tone(), "happy");
    }

    #[test]
    fn test_feedback_before_respond_is_error() {
        let mut s = rules_session();
        assert!(matches!(
            run(&mut s, "feedback positive"),
            Err(ConsoleError::NoContext)
        ));
    }

    #[test]
    fn test_feedback_evolves_after_three() {
        let mut s = rules_session();
        run(&mut s, "respond anxious relax").unwrap();
        run(&mut s, "f positive").unwrap();
        run(&mut s, "f positive").unwrap();
        let Reply::Text(text) = run(&mut s, "f positive").unwrap() else {
            panic!("expected text reply");
        };
        assert!(text.contains("Protocol 'AnxiousRelax' has evolved (generation 1)"));

        let Reply::Text(status) = run(&mut s, "status").unwrap() else {
            panic!("expected text reply");
        };
        let line = status
            .lines()
            .find(|l| l.starts_with("AnxiousRelax"))
            .unwrap();
        assert!(line.contains("generation  1"));
        assert!(line.contains("random"));

        let Reply::Text(journal) = run(&mut s, "journal").unwrap() else {
            panic!("expected text reply");
        };
        assert!(journal.contains("AnxiousRelax"));
    }

    #[test]
    fn test_feedback_on_unmatched_context_is_discarded() {
        let mut s = rules_session();
        run(&mut s, "respond sad dance").unwrap();
        let reply = run(&mut s, "feedback positive").unwrap();
        assert_eq!(
            reply,
            Reply::Text("Feedback received: positive (no protocol matched; discarded)".to_string())
        );
    }

    #[test]
    fn test_train_unsupported_for_rules() {
        let mut s = rules_session();
        assert!(matches!(
            run(&mut s, "train"),
            Err(ConsoleError::Unsupported { command: "train", engine: "rules" })
        ));
    }

    #[test]
    fn test_classifier_session() {
        let dir = tempfile::tempdir().unwrap();
        let config = AeonConfig {
            responder: ResponderKind::Classifier,
            model_path: dir.path().join("model.bin"),
            ..AeonConfig::default()
        };
        let mut s = Session::from_config(&config).unwrap();
        assert_eq!(s.kind(), "classifier");

        let reply = run(&mut s, "respond confident learn").unwrap();
        assert_eq!(
            reply,
            Reply::Response(ResponsePayload::new(
                "You’ve got this! Knowledge is at your fingertips.",
                Emotion::Warm
            ))
        );
        assert!(matches!(
            run(&mut s, "feedback positive"),
            Err(ConsoleError::Unsupported { command: "feedback", .. })
        ));
        assert!(matches!(run(&mut s, "train").unwrap(), Reply::Text(_)));
    }

    #[test]
    fn test_render_keeps_message_and_tag() {
        let out = render_response(&ResponsePayload::fallback());
        assert!(out.contains("No immediate adaptation found. Learning..."));
        assert!(out.ends_with("[neutral]"));
    }
}
