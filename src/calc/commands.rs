//! # Intent Dispatch
//!
//! Maps the discrete intents of the UI boundary to the commands that carry
//! them out on a [`CalculationSession`]. The registry checks each command's
//! `is_relevant()` and executes the first match, so front ends never inspect
//! the session themselves.

use crate::calc::models::{is_allowed_char, INITIAL_RESULT};
use crate::calc::session::{CalculationSession, Ticket};
use anyhow::{anyhow, bail, Result};
use std::sync::Arc;

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Append a keystroke or a button label verbatim
    AppendValue(String),
    Backspace,
    ClearAll,
    Submit,
}

/// A raw keystroke from a keyboard-like front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Escape,
}

impl Key {
    /// Classify a character read from a terminal line
    pub fn from_char(ch: char) -> Self {
        match ch {
            '\r' | '\n' => Key::Enter,
            '\x7f' | '\x08' => Key::Backspace,
            '\x1b' => Key::Escape,
            c => Key::Char(c),
        }
    }
}

impl Intent {
    /// Keyboard mapping. Characters outside the allowed set produce no intent.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Enter => Some(Intent::Submit),
            Key::Backspace => Some(Intent::Backspace),
            Key::Escape => Some(Intent::ClearAll),
            Key::Char(c) if is_allowed_char(c) => Some(Intent::AppendValue(c.to_string())),
            Key::Char(_) => None,
        }
    }
}

/// Result of dispatching one intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The buffer or display was edited
    Edited,
    /// A request was issued
    Submitted(Ticket),
    /// Nothing happened (filtered keystroke or empty submit)
    Ignored,
}

pub trait Command: Send + Sync {
    fn is_relevant(&self, intent: &Intent) -> bool;

    fn execute(
        &self,
        intent: &Intent,
        session: &mut CalculationSession,
    ) -> Result<CommandOutcome>;

    fn name(&self) -> &'static str;
}

pub struct AppendValueCommand;

impl Command for AppendValueCommand {
    fn is_relevant(&self, intent: &Intent) -> bool {
        matches!(intent, Intent::AppendValue(_))
    }

    fn execute(
        &self,
        intent: &Intent,
        session: &mut CalculationSession,
    ) -> Result<CommandOutcome> {
        let Intent::AppendValue(value) = intent else {
            bail!("{} cannot handle {:?}", self.name(), intent);
        };
        session.append_value(value);
        Ok(CommandOutcome::Edited)
    }

    fn name(&self) -> &'static str {
        "AppendValue"
    }
}

pub struct BackspaceCommand;

impl Command for BackspaceCommand {
    fn is_relevant(&self, intent: &Intent) -> bool {
        matches!(intent, Intent::Backspace)
    }

    fn execute(
        &self,
        _intent: &Intent,
        session: &mut CalculationSession,
    ) -> Result<CommandOutcome> {
        session.backspace();
        Ok(CommandOutcome::Edited)
    }

    fn name(&self) -> &'static str {
        "Backspace"
    }
}

pub struct ClearAllCommand;

impl Command for ClearAllCommand {
    fn is_relevant(&self, intent: &Intent) -> bool {
        matches!(intent, Intent::ClearAll)
    }

    fn execute(
        &self,
        _intent: &Intent,
        session: &mut CalculationSession,
    ) -> Result<CommandOutcome> {
        session.clear_all(INITIAL_RESULT);
        Ok(CommandOutcome::Edited)
    }

    fn name(&self) -> &'static str {
        "ClearAll"
    }
}

pub struct SubmitCommand;

impl Command for SubmitCommand {
    fn is_relevant(&self, intent: &Intent) -> bool {
        matches!(intent, Intent::Submit)
    }

    fn execute(
        &self,
        _intent: &Intent,
        session: &mut CalculationSession,
    ) -> Result<CommandOutcome> {
        Ok(session
            .submit()
            .map_or(CommandOutcome::Ignored, CommandOutcome::Submitted))
    }

    fn name(&self) -> &'static str {
        "Submit"
    }
}

type CommandArc = Arc<dyn Command>;

/// Dispatch table from intents to commands
pub struct CommandRegistry {
    commands: Vec<CommandArc>,
}

impl CommandRegistry {
    /// Create a registry with the default commands
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };
        registry.add_command(Arc::new(AppendValueCommand));
        registry.add_command(Arc::new(BackspaceCommand));
        registry.add_command(Arc::new(ClearAllCommand));
        registry.add_command(Arc::new(SubmitCommand));
        registry
    }

    pub fn add_command(&mut self, command: CommandArc) {
        self.commands.push(command);
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Run the first command relevant to `intent`
    pub fn dispatch(
        &self,
        intent: &Intent,
        session: &mut CalculationSession,
    ) -> Result<CommandOutcome> {
        let command = self
            .commands
            .iter()
            .find(|command| command.is_relevant(intent))
            .ok_or_else(|| anyhow!("No command registered for {:?}", intent))?;

        tracing::debug!("Dispatching {:?} to {}", intent, command.name());
        command.execute(intent, session)
    }

    /// Map a keystroke to an intent and dispatch it
    pub fn dispatch_key(
        &self,
        key: Key,
        session: &mut CalculationSession,
    ) -> Result<CommandOutcome> {
        match Intent::from_key(key) {
            Some(intent) => self.dispatch(&intent, session),
            None => {
                tracing::debug!("Ignoring keystroke {:?}", key);
                Ok(CommandOutcome::Ignored)
            }
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::models::ComputationOutcome;
    use crate::calc::testing::ScriptedEvaluator;

    fn create_session() -> CalculationSession {
        let evaluator =
            ScriptedEvaluator::new().answer("2*21", ComputationOutcome::Success(42.0));
        CalculationSession::new(Arc::new(evaluator))
    }

    #[test]
    fn key_should_classify_control_characters() {
        assert_eq!(Key::from_char('\n'), Key::Enter);
        assert_eq!(Key::from_char('\x7f'), Key::Backspace);
        assert_eq!(Key::from_char('\x08'), Key::Backspace);
        assert_eq!(Key::from_char('\x1b'), Key::Escape);
        assert_eq!(Key::from_char('7'), Key::Char('7'));
    }

    #[test]
    fn intent_from_key_should_filter_disallowed_chars() {
        assert_eq!(
            Intent::from_key(Key::Char('+')),
            Some(Intent::AppendValue("+".to_string()))
        );
        assert_eq!(Intent::from_key(Key::Char('a')), None);
        assert_eq!(Intent::from_key(Key::Char(' ')), None);
        assert_eq!(Intent::from_key(Key::Enter), Some(Intent::Submit));
        assert_eq!(Intent::from_key(Key::Escape), Some(Intent::ClearAll));
        assert_eq!(Intent::from_key(Key::Backspace), Some(Intent::Backspace));
    }

    #[test]
    fn registry_should_create_with_default_commands() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.command_count(), 4);
    }

    #[test]
    fn dispatch_should_route_edit_intents() {
        let registry = CommandRegistry::new();
        let mut session = create_session();

        for intent in [
            Intent::AppendValue("1".to_string()),
            Intent::AppendValue("√(".to_string()),
            Intent::Backspace,
        ] {
            assert_eq!(
                registry.dispatch(&intent, &mut session).unwrap(),
                CommandOutcome::Edited
            );
        }
        assert_eq!(session.buffer().text(), "1√");

        registry.dispatch(&Intent::Backspace, &mut session).unwrap();
        assert_eq!(session.buffer().text(), "1");

        registry.dispatch(&Intent::ClearAll, &mut session).unwrap();
        assert_eq!(session.buffer().text(), "");
        assert_eq!(session.display().result(), "0");
    }

    #[test]
    fn dispatch_key_should_ignore_letters() {
        let registry = CommandRegistry::new();
        let mut session = create_session();

        let outcome = registry.dispatch_key(Key::Char('x'), &mut session).unwrap();

        assert_eq!(outcome, CommandOutcome::Ignored);
        assert_eq!(session.buffer().text(), "");
    }

    #[test]
    fn empty_submit_should_be_ignored() {
        let registry = CommandRegistry::new();
        let mut session = create_session();

        let outcome = registry.dispatch(&Intent::Submit, &mut session).unwrap();

        assert_eq!(outcome, CommandOutcome::Ignored);
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn typed_keys_then_enter_should_compute() {
        let registry = CommandRegistry::new();
        let mut session = create_session();

        for ch in "2*21\n".chars() {
            registry
                .dispatch_key(Key::from_char(ch), &mut session)
                .unwrap();
        }
        assert!(session.is_pending());

        session.next_outcome().await.unwrap();
        assert_eq!(session.display().result(), "42");
        assert_eq!(session.buffer().text(), "");
    }

    #[test]
    fn dispatch_without_matching_command_should_fail() {
        let mut registry = CommandRegistry {
            commands: Vec::new(),
        };
        registry.add_command(Arc::new(BackspaceCommand));
        let mut session = create_session();

        let result = registry.dispatch(&Intent::Submit, &mut session);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("No command registered"));
    }
}
