// src/client/mod.rs
//! The notebook side of a run: session state, interactive stdin collection,
//! submission to the proxy and rendering of the outcome.

pub mod collector;
pub mod orchestrator;
pub mod report;
pub mod session;
pub mod share;
pub mod transport;

pub use collector::{collect_inputs, collect_lines, PromptOutcome, Prompter, TerminalPrompter};
pub use orchestrator::{Orchestrator, RunInput, RunOutcome};
pub use report::RunReport;
pub use session::{RunPhase, Session};
pub use transport::{HttpTransport, RunTransport};
