//! TUI (Terminal User Interface) module for the game
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: owns the terminal, renders the board and reads keys
//!
//! # State Machine
//! - `EnteringGuess` → (guess accepted or rejected) → `EnteringGuess`
//! - Terminal state: `GameOver`, entered when the session reports its end
//!
//! Raw mode and the alternate screen are acquired in `TuiInterface::new` and
//! released in `Drop`, so every exit path restores the terminal.

use crate::cli::{rejection_message, result_message};
use crate::evaluator::Verdict;
use crate::game_state::{GameInterface, GuessError, SessionEnd, SessionInfo, TurnReport, UserAction};
use crate::{MAX_TURNS, WORD_LENGTH};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const LOSS_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Debug)]
enum LetterState {
    Empty,
    Entered,
    Correct, // Green
    Present, // Yellow
    Absent,  // Gray
}

impl LetterState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty | Self::Entered => (Color::DarkGray, Color::White),
            Self::Correct => (Color::Green, Color::Black),
            Self::Present => (Color::Yellow, Color::Black),
            Self::Absent => (Color::Gray, Color::Black),
        }
    }
}

impl From<Verdict> for LetterState {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Correct => Self::Correct,
            Verdict::Present => Self::Present,
            Verdict::Absent => Self::Absent,
        }
    }
}

#[derive(Debug)]
struct GuessRow {
    letters: [char; WORD_LENGTH],
    states: [LetterState; WORD_LENGTH],
}

impl GuessRow {
    fn empty() -> Self {
        Self {
            letters: [' '; WORD_LENGTH],
            states: [LetterState::Empty; WORD_LENGTH],
        }
    }

    fn from_input(input: &str) -> Self {
        let mut row = Self::empty();
        for (i, ch) in input.chars().enumerate().take(WORD_LENGTH) {
            row.letters[i] = ch;
            row.states[i] = LetterState::Entered;
        }
        row
    }

    fn from_report(report: &TurnReport) -> Self {
        let mut row = Self::empty();
        for (i, (letter, verdict)) in report
            .guess
            .letters()
            .zip(report.feedback.iter())
            .enumerate()
        {
            row.letters[i] = letter;
            row.states[i] = verdict.into();
        }
        row
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TuiState {
    EnteringGuess,
    GameOver,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    rows: &'a [GuessRow],
    current_input: &'a str,
    state: TuiState,
    message: &'a str,
    message_style: Style,
    error_message: &'a str,
    status: &'a str,
}

/// Full-screen game interface.
///
/// Manages terminal rendering, key input and the board of past guesses.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    rows: Vec<GuessRow>,
    current_input: String,
    state: TuiState,
    message: String,
    message_style: Style,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, cursor::Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
                return Err(e);
            }
        };
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            rows: Vec::new(),
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            message: String::new(),
            message_style: MESSAGE_STYLE,
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            rows: &self.rows,
            current_input: &self.current_input,
            state: self.state,
            message: &self.message,
            message_style: self.message_style,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(_e) = self.draw() {
            debug_log!("Draw error: {}", _e);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                                 // Title
                Constraint::Length(MAX_TURNS as u16 * ROW_SPACING + 2), // Board
                Constraint::Min(4),                                    // Messages
                Constraint::Length(3),                                 // Status line
                Constraint::Length(3),                                 // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx.rows, ctx.current_input, ctx.state);
        Self::render_info(
            f,
            chunks[2],
            ctx.message,
            ctx.message_style,
            ctx.error_message,
        );
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORDLE")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(
        f: &mut Frame,
        area: Rect,
        rows: &[GuessRow],
        current_input: &str,
        state: TuiState,
    ) {
        let block = Block::default()
            .title("Guesses")
            .borders(Borders::ALL)
            .style(Style::default());

        let inner = block.inner(area);
        f.render_widget(block, area);

        let input_row = GuessRow::from_input(current_input);
        let empty_row = GuessRow::empty();
        for index in 0..MAX_TURNS {
            let row = match rows.get(index) {
                Some(row) => row,
                None if index == rows.len() && state == TuiState::EnteringGuess => &input_row,
                None => &empty_row,
            };
            Self::render_guess_row(f, row, index, inner);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_guess_row(f: &mut Frame, row: &GuessRow, row_index: usize, area: Rect) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for i in 0..WORD_LENGTH {
            let (bg_color, fg_color) = row.states[i].colors();
            let letter = row.letters[i];

            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(fg_color).bg(bg_color),
            ));
            spans.push(Span::raw(" "));
        }

        f.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_info(
        f: &mut Frame,
        area: Rect,
        message: &str,
        message_style: Style,
        error_message: &str,
    ) {
        let mut lines = Vec::new();

        if !message.is_empty() {
            lines.push(Line::from(vec![Span::styled(message, message_style)]));
        }

        if !error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => "Type your 5-letter guess | ENTER: Submit | BACKSPACE: Delete | ESC: Quit",
            TuiState::GameOver => "Press any key to exit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Next key press, if one arrives within the poll timeout.
    fn next_key(&mut self) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != event::KeyEventKind::Press {
                    return Ok(None);
                }

                // Filter out garbage that some terminals send on focus changes
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("next_key() - Ignoring invalid character: {:?}", c);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            _other => {
                debug_log!("next_key() - Ignoring non-key event: {:?}", _other);
                Ok(None)
            }
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        // Raw mode swallows SIGINT, so Ctrl+C arrives as a key
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            info_log!("handle_guess_input() - Ctrl+C pressed, returning Exit");
            return Some(UserAction::Exit);
        }

        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                if Self::has_modifier_keys(&key) {
                    debug_log!(
                        "handle_guess_input() - Ignoring character with modifier: {:?}",
                        key.modifiers
                    );
                } else if self.current_input.len() < WORD_LENGTH {
                    self.error_message.clear();
                    self.current_input.push(c.to_ascii_uppercase());
                }
            }
            KeyCode::Backspace => {
                self.error_message.clear();
                self.current_input.pop();
            }
            KeyCode::Enter => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_input() - Submitting guess: '{}'", guess);
                return Some(UserAction::Guess(guess));
            }
            KeyCode::Esc => {
                info_log!("handle_guess_input() - ESC pressed, returning Exit");
                return Some(UserAction::Exit);
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            _ => {
                debug_log!("handle_guess_input() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn wait_for_any_key(&mut self) {
        loop {
            match self.next_key() {
                Ok(Some(_)) => return,
                Ok(None) => {}
                Err(_e) => {
                    debug_log!("wait_for_any_key() - Input error: {}", _e);
                    return;
                }
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_intro(&mut self, info: &SessionInfo) {
        self.message = format!(
            "Loaded {} words. Guess the {}-letter word in {} tries.",
            info.word_count, info.word_length, info.max_turns
        );
        self.status = "Ready - Enter your first guess".to_string();
        self.draw_or_log();
    }

    fn read_guess(&mut self, turn: usize) -> UserAction {
        info_log!("read_guess() - Waiting for guess on turn {}", turn);
        self.state = TuiState::EnteringGuess;
        self.status = format!("Turn {turn} of {MAX_TURNS}");
        loop {
            if self.draw().is_err() {
                info_log!("read_guess() - Draw failed, returning Exit");
                return UserAction::Exit;
            }

            match self.next_key() {
                Ok(Some(key)) => {
                    if let Some(action) = self.handle_guess_input(key) {
                        return action;
                    }
                }
                Ok(None) => {}
                Err(_e) => {
                    info_log!("read_guess() - Error handling input, returning Exit");
                    return UserAction::Exit;
                }
            }
        }
    }

    fn display_rejection(&mut self, error: &GuessError) {
        self.error_message = rejection_message(error);
        self.draw_or_log();
    }

    fn display_feedback(&mut self, report: &TurnReport) {
        self.rows.push(GuessRow::from_report(report));
        self.error_message.clear();
        self.status = format!("Turn {}: {}", report.turn, report.feedback);
        self.draw_or_log();
    }

    fn display_result(&mut self, end: &SessionEnd) {
        self.state = TuiState::GameOver;
        self.error_message.clear();
        self.message = result_message(end);
        self.message_style = match end {
            SessionEnd::Won { .. } => SUCCESS_STYLE,
            SessionEnd::Lost { .. } => LOSS_STYLE,
            SessionEnd::Aborted => MESSAGE_STYLE,
        };
        self.status = "Game over".to_string();
        self.draw_or_log();

        if *end != SessionEnd::Aborted {
            self.wait_for_any_key();
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
