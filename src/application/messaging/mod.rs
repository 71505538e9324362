//! Message handling - Parsing, dispatching and reply mapping

pub mod dispatcher;
pub mod parser;
pub mod replies;

pub use dispatcher::{CommandDispatcher, DispatchOutcome};
pub use parser::MessageParser;
