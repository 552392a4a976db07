//! Question set value object

use crate::domain::error::EmptyQuestionSetError;

/// Prompts used when no questions are configured
pub const DEFAULT_QUESTIONS: &[&str] = &[
    "Tell us about yourself and the challenges you have faced in your assessments so far.",
    "What are your greatest strengths and weaknesses?",
    "Why do you want to join this programme?",
];

/// Ordered, non-empty list of interview prompts fixed for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    prompts: Vec<String>,
}

impl QuestionSet {
    /// Create a question set, rejecting an empty list
    pub fn new<I, S>(prompts: I) -> Result<Self, EmptyQuestionSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prompts: Vec<String> = prompts
            .into_iter()
            .map(Into::into)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        if prompts.is_empty() {
            return Err(EmptyQuestionSetError);
        }
        Ok(Self { prompts })
    }

    /// Parse a questions file: one prompt per line, `#` comments and blank lines skipped
    pub fn parse_lines(content: &str) -> Result<Self, EmptyQuestionSetError> {
        Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    /// The built-in prompts
    pub fn builtin() -> Self {
        Self {
            prompts: DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.prompts.get(position).map(String::as_str)
    }

    pub fn last_index(&self) -> usize {
        self.prompts.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prompts.iter().map(String::as_str)
    }
}
