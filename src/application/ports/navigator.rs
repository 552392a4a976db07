//! Navigation port interface

use async_trait::async_trait;

/// Port for moving the candidate between views outside the interview itself
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Leave the entry view for the capture flow. Called once per session.
    async fn enter_interview(&self, total_questions: usize);

    /// Show the completion view. Called once, when the last answer is accepted.
    async fn complete(&self);
}
