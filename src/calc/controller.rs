//! # Application Controller
//!
//! Runs the terminal front end: reads input lines, turns them into intents or
//! ex commands, and renders display changes. Input and completed computations
//! are multiplexed so the buffer stays editable while a request is in flight.

use crate::calc::{
    commands::{CommandRegistry, Key},
    ex_commands::{ExCommandEvent, ExCommandRegistry},
    models::INITIAL_RESULT,
    services::{Evaluator, HttpEvaluator},
    session::{CalculationSession, Resolution},
    theme::ThemeState,
    view::TerminalRenderer,
};
use crate::{
    cmd_args::CommandLineArgs,
    config::{self, CalcProfile, ProfileStore},
};
use anyhow::Result;
use std::io::{Stdout, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;

type DisplaySnapshot = (String, String);

pub struct AppController<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    session: CalculationSession,
    command_registry: CommandRegistry,
    ex_registry: ExCommandRegistry,
    theme: ThemeState,
    renderer: TerminalRenderer<W>,
    input: Lines<R>,
    input_closed: bool,
    display_updates: mpsc::UnboundedReceiver<DisplaySnapshot>,
    should_quit: bool,
}

impl AppController<BufReader<Stdin>, Stdout> {
    /// Create a controller on stdin/stdout configured from the profile file
    /// and command line arguments
    pub fn new(cmd_args: CommandLineArgs) -> Result<Self> {
        let profile_name = cmd_args.profile();
        let profile_path = config::get_profile_path();
        let store = ProfileStore::new(&profile_path);
        let profile = Self::load_profile(&store, profile_name)?;

        let server = cmd_args
            .server()
            .map(String::as_str)
            .unwrap_or(profile.server());
        tracing::info!(
            "Using profile '{}' from '{}', server {}",
            profile_name,
            profile_path,
            server
        );

        let evaluator = HttpEvaluator::new(server)?;
        let theme = ThemeState::with_store(profile.theme(), store, profile_name);

        Ok(Self::with_io_streams(
            Arc::new(evaluator),
            theme,
            BufReader::new(tokio::io::stdin()),
            std::io::stdout(),
        ))
    }

    /// Load profile from INI file or return blank profile if not found
    fn load_profile(store: &ProfileStore, profile_name: &str) -> Result<CalcProfile> {
        tracing::debug!(
            "Loading profile '{}' from '{}'",
            profile_name,
            store.path().display()
        );

        let profile = match store.get_profile(profile_name)? {
            Some(p) => p,
            None => {
                tracing::debug!("Profile '{}' not found, using blank profile", profile_name);
                config::get_blank_profile()
            }
        };
        Ok(profile)
    }
}

impl<R, W> AppController<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    /// Create a controller with injected I/O streams
    pub fn with_io_streams(
        evaluator: Arc<dyn Evaluator>,
        theme: ThemeState,
        input: R,
        output: W,
    ) -> Self {
        let mut session = CalculationSession::new(evaluator);
        let (sender, display_updates) = mpsc::unbounded_channel();
        session.subscribe_display_changes(Box::new(move |expression, result| {
            let _ = sender.send((expression.to_string(), result.to_string()));
        }));

        Self {
            session,
            command_registry: CommandRegistry::new(),
            ex_registry: ExCommandRegistry::new(),
            theme,
            renderer: TerminalRenderer::new(output),
            input: input.lines(),
            input_closed: false,
            display_updates,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &CalculationSession {
        &self.session
    }

    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    pub fn into_writer(self) -> W {
        self.renderer.into_writer()
    }

    /// Run until `:q` or end of input. At end of input, an outstanding
    /// computation is still awaited so its outcome gets rendered.
    pub async fn run(&mut self) -> Result<()> {
        self.session.clear_all(INITIAL_RESULT);
        self.flush_display()?;
        self.render_current()?;

        while !self.should_quit {
            if self.input_closed {
                if !self.session.is_pending() {
                    break;
                }
                if let Some(resolution) = self.session.next_outcome().await {
                    Self::log_resolution(&resolution);
                }
            } else {
                tokio::select! {
                    line = self.input.next_line() => match line? {
                        Some(line) => self.handle_line(&line)?,
                        None => {
                            tracing::debug!("Input closed");
                            self.input_closed = true;
                        }
                    },
                    Some(resolution) = self.session.next_outcome() => {
                        Self::log_resolution(&resolution);
                    }
                }
            }
            self.flush_display()?;
        }

        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<()> {
        if let Some(command) = line.strip_prefix(':') {
            match self.ex_registry.parse(command) {
                Ok(events) => {
                    for event in events {
                        self.apply_ex_event(event)?;
                    }
                }
                Err(e) => self.renderer.render_message(&e.to_string())?,
            }
            return Ok(());
        }

        for ch in line.chars() {
            self.command_registry
                .dispatch_key(Key::from_char(ch), &mut self.session)?;
        }
        self.command_registry
            .dispatch_key(Key::Enter, &mut self.session)?;
        Ok(())
    }

    fn apply_ex_event(&mut self, event: ExCommandEvent) -> Result<()> {
        match event {
            ExCommandEvent::Intent(intent) => {
                self.command_registry.dispatch(&intent, &mut self.session)?;
            }
            ExCommandEvent::ThemeToggleRequested => {
                self.theme.toggle();
                self.render_current()?;
            }
            ExCommandEvent::ThemeSetRequested(preference) => {
                self.theme.set(preference);
                self.render_current()?;
            }
            ExCommandEvent::QuitRequested => {
                tracing::debug!("Quit requested");
                self.should_quit = true;
            }
        }
        Ok(())
    }

    fn log_resolution(resolution: &Resolution) {
        match resolution {
            Resolution::Applied { ticket, outcome } => {
                tracing::debug!("Outcome of {} applied: {:?}", ticket, outcome);
            }
            Resolution::Superseded { ticket } => {
                tracing::debug!("Outcome of {} superseded", ticket);
            }
        }
    }

    /// Render the latest queued display change, if any
    fn flush_display(&mut self) -> Result<()> {
        let mut latest = None;
        while let Ok(snapshot) = self.display_updates.try_recv() {
            latest = Some(snapshot);
        }
        if let Some((expression, result)) = latest {
            self.renderer
                .render_display(self.theme.label(), &expression, &result)?;
        }
        Ok(())
    }

    fn render_current(&mut self) -> Result<()> {
        let display = self.session.display();
        self.renderer
            .render_display(self.theme.label(), display.expression(), display.result())
    }
}
