//! Blocking user dialogs
//!
//! The grid asks before destructive actions and prompts for free text
//! (variant labels, row labels, comments). Hosts supply the answers through
//! [`Dialogs`].

use std::collections::VecDeque;

use log::debug;

/// Confirmation and text prompts
pub trait Dialogs {
    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> bool;

    /// Ask for text; `None` means the prompt was cancelled
    fn prompt_text(&mut self, message: &str, default: &str) -> Option<String>;
}

impl<D: Dialogs + ?Sized> Dialogs for &mut D {
    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn prompt_text(&mut self, message: &str, default: &str) -> Option<String> {
        (**self).prompt_text(message, default)
    }
}

impl<D: Dialogs + ?Sized> Dialogs for Box<D> {
    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn prompt_text(&mut self, message: &str, default: &str) -> Option<String> {
        (**self).prompt_text(message, default)
    }
}

/// Confirms everything and accepts every prompt's default
///
/// A fixed `answer` may be given to reply to every prompt instead.
#[derive(Debug, Clone, Default)]
pub struct AutoConfirm {
    answer: Option<String>,
}

impl AutoConfirm {
    /// Accept defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to every prompt with `answer`
    pub fn answering(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
        }
    }
}

impl Dialogs for AutoConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        debug!("auto-confirm: {}", message);
        true
    }

    fn prompt_text(&mut self, message: &str, default: &str) -> Option<String> {
        let answer = self.answer.clone().unwrap_or_else(|| default.to_string());
        debug!("auto-prompt: {} -> {:?}", message, answer);
        Some(answer)
    }
}

/// One queued reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Confirm(bool),
    Text(Option<String>),
}

/// Replays queued answers in order
///
/// An exhausted queue declines confirmations and cancels prompts. Every
/// question asked is recorded.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialogs {
    answers: VecDeque<Answer>,
    asked: Vec<String>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a confirmation reply
    pub fn confirm_with(mut self, yes: bool) -> Self {
        self.push_confirm(yes);
        self
    }

    /// Queue a prompt reply
    pub fn answer_with(mut self, text: impl Into<String>) -> Self {
        self.push_text(Some(text.into()));
        self
    }

    /// Queue a cancelled prompt
    pub fn cancel_next(mut self) -> Self {
        self.push_text(None);
        self
    }

    pub fn push_confirm(&mut self, yes: bool) {
        self.answers.push_back(Answer::Confirm(yes));
    }

    pub fn push_text(&mut self, text: Option<String>) {
        self.answers.push_back(Answer::Text(text));
    }

    /// Replies not yet consumed
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// Messages shown so far
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Dialogs for ScriptedDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        match self.answers.pop_front() {
            Some(Answer::Confirm(yes)) => yes,
            Some(Answer::Text(text)) => {
                debug!("confirm {:?} answered with text {:?}, declining", message, text);
                false
            }
            None => false,
        }
    }

    fn prompt_text(&mut self, message: &str, _default: &str) -> Option<String> {
        self.asked.push(message.to_string());
        match self.answers.pop_front() {
            Some(Answer::Text(text)) => text,
            Some(Answer::Confirm(yes)) => {
                debug!("prompt {:?} answered with confirm {}, cancelling", message, yes);
                None
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scripted_answers_in_order() {
        let mut dialogs = ScriptedDialogs::new()
            .confirm_with(true)
            .answer_with("Pro Forma")
            .cancel_next();

        assert!(dialogs.confirm("Delete?"));
        assert_eq!(dialogs.prompt_text("Label:", ""), Some("Pro Forma".to_string()));
        assert_eq!(dialogs.prompt_text("Comment:", "x"), None);
        // Exhausted
        assert!(!dialogs.confirm("Again?"));
        assert_eq!(dialogs.asked(), ["Delete?", "Label:", "Comment:", "Again?"]);
        assert_eq!(dialogs.remaining(), 0);
    }

    #[test]
    fn test_mismatched_answer_declines() {
        let mut dialogs = ScriptedDialogs::new().answer_with("yes");
        assert!(!dialogs.confirm("Delete?"));
    }

    #[test]
    fn test_auto_confirm() {
        let mut dialogs = AutoConfirm::new();
        assert!(dialogs.confirm("Delete?"));
        assert_eq!(dialogs.prompt_text("Comment:", "old"), Some("old".to_string()));

        let mut dialogs = AutoConfirm::answering("Restated");
        assert_eq!(dialogs.prompt_text("Label:", ""), Some("Restated".to_string()));
    }
}
