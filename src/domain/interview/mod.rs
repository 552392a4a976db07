//! Interview domain module

mod command;
mod flow;
mod question;

pub use command::OperatorCommand;
pub use flow::{AcceptOutcome, FlowPhase, InterviewFlow};
pub use question::{QuestionSet, DEFAULT_QUESTIONS};
