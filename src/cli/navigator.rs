//! Terminal navigator adapter

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::Navigator;

use super::presenter::Presenter;

/// Shows the entry and thank-you views on the terminal
pub struct TerminalNavigator {
    presenter: Arc<Presenter>,
}

impl TerminalNavigator {
    pub fn new(presenter: Arc<Presenter>) -> Self {
        Self { presenter }
    }
}

#[async_trait]
impl Navigator for TerminalNavigator {
    async fn enter_interview(&self, total_questions: usize) {
        self.presenter.welcome(total_questions);
    }

    async fn complete(&self) {
        self.presenter.thank_you();
    }
}
