//! aeon-console: interactive front end for the AEON responders.
//!
//! Reads one command per line, builds a context from the stated tone and intent,
//! prints the response in its emotion colour and forwards feedback to the rule engine.

mod session;

pub use session::{render_response, Command, ConsoleError, Engine, Reply, Session, HELP};
