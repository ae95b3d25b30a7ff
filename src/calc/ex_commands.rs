//! # Ex Commands Module
//!
//! Colon commands of the terminal front end. Each command parses its own text
//! and produces events for the controller; none of them touches the session
//! directly.

use crate::calc::commands::Intent;
use crate::calc::theme::ThemePreference;
use anyhow::{anyhow, Result};

/// Events produced by ex commands, applied by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExCommandEvent {
    Intent(Intent),
    ThemeToggleRequested,
    ThemeSetRequested(ThemePreference),
    QuitRequested,
}

/// Trait for ex commands
pub trait ExCommand: Send + Sync {
    /// Check if this command can handle the given ex command string
    fn can_handle(&self, command: &str) -> bool;

    /// Execute the ex command and produce events
    fn execute(&self, command: &str) -> Result<Vec<ExCommandEvent>>;

    /// Get command name for debugging
    fn name(&self) -> &'static str;
}

/// Quit command handler (for :q and :quit)
pub struct QuitCommand;

impl ExCommand for QuitCommand {
    fn can_handle(&self, command: &str) -> bool {
        command == "q" || command == "quit"
    }

    fn execute(&self, _command: &str) -> Result<Vec<ExCommandEvent>> {
        Ok(vec![ExCommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "QuitCommand"
    }
}

/// Theme command handler (for :theme, :theme light, :theme dark)
pub struct ThemeCommand;

impl ExCommand for ThemeCommand {
    fn can_handle(&self, command: &str) -> bool {
        command == "theme" || command.starts_with("theme ")
    }

    fn execute(&self, command: &str) -> Result<Vec<ExCommandEvent>> {
        let argument = command.trim_start_matches("theme").trim();
        if argument.is_empty() {
            return Ok(vec![ExCommandEvent::ThemeToggleRequested]);
        }
        let preference =
            ThemePreference::parse(argument).ok_or_else(|| anyhow!("Unknown theme: {argument}"))?;
        Ok(vec![ExCommandEvent::ThemeSetRequested(preference)])
    }

    fn name(&self) -> &'static str {
        "ThemeCommand"
    }
}

/// Button press handler (for :press <label>); the label is appended verbatim
pub struct PressCommand;

impl ExCommand for PressCommand {
    fn can_handle(&self, command: &str) -> bool {
        command == "press" || command.starts_with("press ")
    }

    fn execute(&self, command: &str) -> Result<Vec<ExCommandEvent>> {
        let label = command.trim_start_matches("press").trim();
        if label.is_empty() {
            return Err(anyhow!("Usage: press <label>"));
        }
        Ok(vec![ExCommandEvent::Intent(Intent::AppendValue(
            label.to_string(),
        ))])
    }

    fn name(&self) -> &'static str {
        "PressCommand"
    }
}

/// Clear handler (for :clear and :c)
pub struct ClearCommand;

impl ExCommand for ClearCommand {
    fn can_handle(&self, command: &str) -> bool {
        command == "clear" || command == "c"
    }

    fn execute(&self, _command: &str) -> Result<Vec<ExCommandEvent>> {
        Ok(vec![ExCommandEvent::Intent(Intent::ClearAll)])
    }

    fn name(&self) -> &'static str {
        "ClearCommand"
    }
}

/// Backspace handler (for :back and :bs)
pub struct BackCommand;

impl ExCommand for BackCommand {
    fn can_handle(&self, command: &str) -> bool {
        command == "back" || command == "bs"
    }

    fn execute(&self, _command: &str) -> Result<Vec<ExCommandEvent>> {
        Ok(vec![ExCommandEvent::Intent(Intent::Backspace)])
    }

    fn name(&self) -> &'static str {
        "BackCommand"
    }
}

pub struct ExCommandRegistry {
    commands: Vec<Box<dyn ExCommand>>,
}

impl ExCommandRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };
        registry.add_command(Box::new(QuitCommand));
        registry.add_command(Box::new(ThemeCommand));
        registry.add_command(Box::new(PressCommand));
        registry.add_command(Box::new(ClearCommand));
        registry.add_command(Box::new(BackCommand));
        registry
    }

    pub fn add_command(&mut self, command: Box<dyn ExCommand>) {
        self.commands.push(command);
    }

    /// Parse `command` (without the leading colon) into events
    pub fn parse(&self, command: &str) -> Result<Vec<ExCommandEvent>> {
        let command = command.trim();
        let handler = self
            .commands
            .iter()
            .find(|c| c.can_handle(command))
            .ok_or_else(|| anyhow!("Unknown command: {command}"))?;

        tracing::debug!("Ex command '{}' handled by {}", command, handler.name());
        handler.execute(command)
    }
}

impl Default for ExCommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
