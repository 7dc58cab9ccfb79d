//! TUI (Terminal User Interface) module for the word guessing game
//!
//! This module provides the interactive form using Ratatui.
//!
//! # Layout
//! Instruction text, a single-line guess input, feedback text, a status line
//! and key help. Two modal dialogs sit on top: the empty-guess warning and
//! the end-of-round result.
//!
//! # State Machine
//! - `EnteringGuess` → `InputWarning` → back to `EnteringGuess`
//! - `EnteringGuess` → `RoundResult` → `AwaitingReset` → (reset) `EnteringGuess`
//!
//! Guess input is disabled while awaiting reset, and reset is only offered
//! there.

use crate::game_state::{
    EMPTY_GUESS_WARNING, GameInterface, Outcome, RESET_UNAVAILABLE_NOTICE, ROUND_OVER_NOTICE,
    UserAction, feedback_text, instruction_text, result_text,
};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const MAX_INPUT_LEN: usize = 32;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const DIALOG_WIDTH: u16 = 44;
const DIALOG_HEIGHT: u16 = 7;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const DISABLED_STYLE: Style = Style::new().fg(Color::DarkGray);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    /// Modal warning for a blank guess
    InputWarning,
    /// Modal end-of-round dialog
    RoundResult { won: bool },
    AwaitingReset,
}

impl TuiState {
    fn accepts_input(self) -> bool {
        matches!(self, Self::EnteringGuess)
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    state: TuiState,
    instruction: &'a str,
    current_input: &'a str,
    feedback: &'a str,
    feedback_style: Style,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and round display. Generic
/// over the backend so it can render into a `TestBackend`.
pub struct TuiInterface<B: Backend> {
    terminal: Terminal<B>,
    owns_terminal: bool,
    state: TuiState,
    instruction: String,
    current_input: String,
    feedback: String,
    feedback_style: Style,
    status: String,
}

impl TuiInterface<CrosstermBackend<io::Stdout>> {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let terminal = restore_on_error(
            || {
                let mut stdout = io::stdout();
                execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
                Terminal::new(CrosstermBackend::new(stdout))
            },
            restore_terminal,
        )?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        let mut interface = Self::with_terminal(terminal);
        interface.owns_terminal = true;
        Ok(interface)
    }
}

impl<B: Backend> TuiInterface<B> {
    pub fn with_terminal(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            owns_terminal: false,
            state: TuiState::EnteringGuess,
            instruction: String::new(),
            current_input: String::new(),
            feedback: String::new(),
            feedback_style: MESSAGE_STYLE,
            status: "Ready".to_string(),
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    /// Draw the current UI state to the terminal.
    pub fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            state: self.state,
            instruction: &self.instruction,
            current_input: &self.current_input,
            feedback: &self.feedback,
            feedback_style: self.feedback_style,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Instruction
                Constraint::Length(3), // Guess input
                Constraint::Min(3),    // Feedback
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Key help
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_block_text(f, chunks[1], "Instructions", ctx.instruction, HEADER_STYLE);
        Self::render_input(f, chunks[2], ctx.current_input, ctx.state);
        Self::render_block_text(f, chunks[3], "Feedback", ctx.feedback, ctx.feedback_style);
        Self::render_block_text(f, chunks[4], "Status", ctx.status, INFO_STYLE);
        Self::render_help(f, chunks[5], ctx.state);

        match ctx.state {
            TuiState::InputWarning => {
                Self::render_dialog(f, "Input Error", EMPTY_GUESS_WARNING, ERROR_STYLE);
            }
            TuiState::RoundResult { won } => {
                let style = if won { SUCCESS_STYLE } else { ERROR_STYLE };
                Self::render_dialog(f, "Game Over", result_text(won), style);
            }
            TuiState::EnteringGuess | TuiState::AwaitingReset => {}
        }
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORD GUESSING GAME")
            .style(HEADER_STYLE)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_block_text(f: &mut Frame, area: Rect, title: &str, text: &str, style: Style) {
        let paragraph = Paragraph::new(Line::from(Span::styled(text, style)))
            .block(Block::default().title(title).borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_input(f: &mut Frame, area: Rect, current_input: &str, state: TuiState) {
        let (text, style) = if state.accepts_input() {
            (format!("{current_input}_"), Style::default().fg(Color::White))
        } else {
            (current_input.to_string(), DISABLED_STYLE)
        };
        let paragraph = Paragraph::new(text).style(style).block(
            Block::default()
                .title("Your Guess")
                .borders(Borders::ALL)
                .border_style(style),
        );
        f.render_widget(paragraph, area);
    }

    fn render_help(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => "Type your guess | ENTER: Submit Guess | ESC: Quit",
            TuiState::InputWarning | TuiState::RoundResult { .. } => "ENTER: OK",
            TuiState::AwaitingReset => "R: Reset Game | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_dialog(f: &mut Frame, title: &str, text: &str, style: Style) {
        let area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, f.area());
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(text, style)),
            Line::from(""),
            Line::from(Span::styled("[ OK ]", HEADER_STYLE)),
        ];
        let dialog = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Apply one key press. Returns an action when the key completes one.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            info_log!("handle_key() - Ctrl-C pressed, returning Exit");
            return Some(UserAction::Exit);
        }
        debug_log!("handle_key() - code={:?}, state={:?}", key.code, self.state);

        match self.state {
            TuiState::EnteringGuess => self.handle_guess_input(key),
            TuiState::InputWarning => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.state = TuiState::EnteringGuess;
                }
                None
            }
            TuiState::RoundResult { .. } => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.state = TuiState::AwaitingReset;
                    self.status = "Press R to start a new game".to_string();
                }
                None
            }
            TuiState::AwaitingReset => self.handle_reset_input(key),
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char(c) => {
                // Filter out garbage from escape sequences (alt-tab and friends)
                if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD {
                    debug_log!("handle_guess_input() - Ignoring invalid character: {:?}", c);
                } else if Self::has_modifier_keys(&key) {
                    debug_log!(
                        "handle_guess_input() - Ignoring character with modifier: {:?}",
                        key.modifiers
                    );
                } else if self.current_input.chars().count() < MAX_INPUT_LEN {
                    self.current_input.push(c);
                }
                None
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                None
            }
            KeyCode::Enter => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_input() - Submitting guess: '{}'", guess);
                Some(UserAction::Guess(guess))
            }
            KeyCode::Esc => {
                info_log!("handle_guess_input() - ESC pressed, returning Exit");
                Some(UserAction::Exit)
            }
            _ => None,
        }
    }

    fn handle_reset_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('r' | 'R') | KeyCode::Enter => Some(UserAction::Reset),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(UserAction::Exit),
            _ => {
                self.status = "Input is disabled. Press R to start a new game".to_string();
                None
            }
        }
    }

    fn poll_action(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(self.handle_key(key)),
            other => {
                debug_log!("poll_action() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
}

/// Run `setup`; on failure run `restore` before handing back the error.
fn restore_on_error<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce(),
) -> io::Result<T> {
    setup().inspect_err(|_| restore())
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl<B: Backend> GameInterface for TuiInterface<B> {
    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.poll_action() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Input error: {e}");
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_new_round(&mut self, limit: usize, first_round: bool) {
        self.state = TuiState::EnteringGuess;
        self.instruction = instruction_text(limit, first_round);
        self.current_input.clear();
        self.feedback.clear();
        self.feedback_style = MESSAGE_STYLE;
        self.status = "Type a guess and press ENTER".to_string();
        self.draw_or_log();
    }

    fn display_fetching_word(&mut self) {
        self.status = "Fetching a new word...".to_string();
        self.draw_or_log();
    }

    fn display_input_warning(&mut self) {
        self.state = TuiState::InputWarning;
        self.draw_or_log();
    }

    fn display_outcome(&mut self, outcome: Outcome, secret_word: &str) {
        self.feedback = feedback_text(outcome, secret_word);
        self.feedback_style = match outcome {
            Outcome::Correct => SUCCESS_STYLE,
            Outcome::IncorrectExhausted => ERROR_STYLE,
            Outcome::Empty | Outcome::IncorrectRemaining(_) => MESSAGE_STYLE,
        };
        self.draw_or_log();
    }

    fn display_round_over(&mut self, won: bool, _secret_word: &str) {
        self.state = TuiState::RoundResult { won };
        self.status = "Round over".to_string();
        self.draw_or_log();
    }

    fn display_round_over_notice(&mut self) {
        self.status = ROUND_OVER_NOTICE.to_string();
        self.draw_or_log();
    }

    fn display_reset_unavailable(&mut self) {
        self.status = RESET_UNAVAILABLE_NOTICE.to_string();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.status = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl<B: Backend> Drop for TuiInterface<B> {
    fn drop(&mut self) {
        if self.owns_terminal {
            restore_terminal();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::GUESS_LIMIT;
    use ratatui::backend::TestBackend;

    fn interface() -> TuiInterface<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut tui = TuiInterface::with_terminal(terminal);
        tui.display_new_round(GUESS_LIMIT, true);
        tui
    }

    fn press(tui: &mut TuiInterface<TestBackend>, code: KeyCode) -> Option<UserAction> {
        tui.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(tui: &mut TuiInterface<TestBackend>, text: &str) {
        for c in text.chars() {
            assert_eq!(press(tui, KeyCode::Char(c)), None);
        }
    }

    fn screen(tui: &TuiInterface<TestBackend>) -> String {
        tui.terminal()
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_initial_render_shows_instruction() {
        let tui = interface();
        let text = screen(&tui);
        assert!(text.contains("WORD GUESSING GAME"));
        assert!(text.contains("Guess the secret word! (You have 3 guesses)"));
        assert!(text.contains("ENTER: Submit Guess"));
    }

    #[test]
    fn test_typing_and_submit() {
        let mut tui = interface();
        type_text(&mut tui, "Dog");
        assert_eq!(tui.current_input(), "Dog");
        press(&mut tui, KeyCode::Backspace);
        assert_eq!(tui.current_input(), "Do");
        assert_eq!(
            press(&mut tui, KeyCode::Enter),
            Some(UserAction::Guess("Do".to_string()))
        );
        assert_eq!(tui.current_input(), "");
    }

    #[test]
    fn test_empty_submit_is_forwarded() {
        let mut tui = interface();
        assert_eq!(
            press(&mut tui, KeyCode::Enter),
            Some(UserAction::Guess(String::new()))
        );
    }

    #[test]
    fn test_modifier_keys_ignored() {
        let mut tui = interface();
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(tui.handle_key(key), None);
        assert_eq!(tui.current_input(), "");
    }

    #[test]
    fn test_ctrl_c_exits() {
        let mut tui = interface();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(tui.handle_key(key), Some(UserAction::Exit));
    }

    #[test]
    fn test_input_length_is_capped() {
        let mut tui = interface();
        type_text(&mut tui, &"a".repeat(MAX_INPUT_LEN + 5));
        assert_eq!(tui.current_input().len(), MAX_INPUT_LEN);
    }

    #[test]
    fn test_input_warning_dialog() {
        let mut tui = interface();
        tui.display_input_warning();
        let text = screen(&tui);
        assert!(text.contains("Input Error"));
        assert!(text.contains(EMPTY_GUESS_WARNING));

        // Typing is blocked until the dialog is dismissed
        assert_eq!(press(&mut tui, KeyCode::Char('a')), None);
        assert_eq!(tui.current_input(), "");
        assert_eq!(press(&mut tui, KeyCode::Enter), None);
        type_text(&mut tui, "a");
        assert_eq!(tui.current_input(), "a");
    }

    #[test]
    fn test_feedback_rendered() {
        let mut tui = interface();
        tui.display_outcome(Outcome::IncorrectRemaining(1), "tree");
        assert!(screen(&tui).contains("Incorrect guess. You have 1 guess left."));
    }

    #[test]
    fn test_round_over_flow() {
        let mut tui = interface();
        tui.display_outcome(Outcome::IncorrectExhausted, "tree");
        assert!(screen(&tui).contains("The correct word was 'tree'."));
        tui.display_round_over(false, "tree");
        let text = screen(&tui);
        assert!(text.contains("Game Over"));
        assert!(text.contains("Out of Guesses, YOU LOSE!"));

        // Dismiss the dialog; input stays disabled and only reset/exit respond
        assert_eq!(press(&mut tui, KeyCode::Enter), None);
        assert_eq!(press(&mut tui, KeyCode::Char('x')), None);
        assert_eq!(tui.current_input(), "");
        tui.draw().unwrap();
        assert!(screen(&tui).contains("R: Reset Game"));
        assert_eq!(press(&mut tui, KeyCode::Char('r')), Some(UserAction::Reset));
    }

    #[test]
    fn test_win_dialog_and_new_round() {
        let mut tui = interface();
        tui.display_round_over(true, "python");
        assert!(screen(&tui).contains("You Win!"));
        press(&mut tui, KeyCode::Enter);
        assert_eq!(press(&mut tui, KeyCode::Esc), Some(UserAction::Exit));

        tui.display_new_round(GUESS_LIMIT, false);
        assert!(screen(&tui).contains("New game started! Guess the word."));
        type_text(&mut tui, "cat");
        assert_eq!(tui.current_input(), "cat");
    }

    #[test]
    fn test_failed_setup_restores_terminal() {
        let restored = std::cell::Cell::new(false);
        let result: io::Result<()> = restore_on_error(
            || Err(io::Error::other("no tty")),
            || restored.set(true),
        );
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_successful_setup_keeps_terminal() {
        let restored = std::cell::Cell::new(false);
        let result = restore_on_error(|| Ok(7), || restored.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!restored.get());
    }

    #[test]
    fn test_centered_rect_clips_to_area() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
        assert_eq!(rect, Rect::new(0, 0, 20, 5));

        let rect = centered_rect(10, 2, Rect::new(0, 0, 30, 10));
        assert_eq!(rect, Rect::new(10, 4, 10, 2));
    }
}
