use crate::evaluator::Verdict;
use crate::game_state::{GameInterface, GuessError, SessionEnd, SessionInfo, TurnReport, UserAction};
use clap::Parser;
use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Guess the hidden five-letter word in six tries
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list file (defaults to the built-in list)
    #[arg(short = 'i', long = "input")]
    pub wordlist_path: Option<PathBuf>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Seed for choosing the secret word, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print feedback as G/Y/X letters instead of colors
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Player-facing text for a rejected guess.
#[must_use]
pub fn rejection_message(error: &GuessError) -> String {
    match error {
        GuessError::InvalidLength { .. } => {
            "Error: Word must be 5 characters long. Try again.".to_string()
        }
        GuessError::InvalidCharacters => {
            "Error: Word must only contain English letters. Try again.".to_string()
        }
        GuessError::NotInDictionary(_) => "Error: Not a word. Try again.".to_string(),
        GuessError::GameOver => "Error: The game is already over.".to_string(),
    }
}

#[must_use]
pub fn result_message(end: &SessionEnd) -> String {
    match end {
        SessionEnd::Won { turns, secret } => {
            let plural = if *turns == 1 { "turn" } else { "turns" };
            format!("You won! You guessed the word {secret} in {turns} {plural}!")
        }
        SessionEnd::Lost { secret } => format!("You lost! The word was {secret}!"),
        SessionEnd::Aborted => "Game aborted.".to_string(),
    }
}

fn styled_letter(letter: char, verdict: Verdict) -> String {
    let cell = format!(" {letter} ");
    match verdict {
        Verdict::Correct => cell.black().on_green().to_string(),
        Verdict::Present => cell.black().on_yellow().to_string(),
        Verdict::Absent => cell.black().on_grey().to_string(),
    }
}

/// Line-oriented game interface over any reader/writer pair.
///
/// End of input on the reader ends the game as an abort.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    color: bool,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            color: true,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn emit(&mut self, text: &str) {
        let result = self
            .writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush());
        if let Err(e) = result {
            log::warn!("Failed to write to output: {e}");
        }
    }

    fn emit_line(&mut self, text: &str) {
        self.emit(&format!("{text}\n"));
    }

    fn emit_error(&mut self, text: &str) {
        if self.color {
            self.emit_line(&text.red().bold().to_string());
        } else {
            self.emit_line(text);
        }
    }

    fn legend_cell(&self, label: &str, verdict: Verdict) -> String {
        if self.color {
            let cell = format!("{label:^10}");
            match verdict {
                Verdict::Correct => cell.black().on_green().to_string(),
                Verdict::Present => cell.black().on_yellow().to_string(),
                Verdict::Absent => cell.black().on_grey().to_string(),
            }
        } else {
            format!("{} = {label}", verdict.to_char())
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_intro(&mut self, info: &SessionInfo) {
        let green = self.legend_cell("GREEN", Verdict::Correct);
        let yellow = self.legend_cell("YELLOW", Verdict::Present);
        let gray = self.legend_cell("GRAY", Verdict::Absent);
        let rule = "-".repeat(53);
        let intro = format!(
            "{rule}\nWelcome to Wordle!\n{rule}\n\n\
             How to play:\n\
             1. Enter a {len}-letter word.\n\
             2. You have {turns} attempts to guess the word.\n\
             3. After each guess, the program will give you feedback.\n   \
             - {green} : Correct letter in the correct position.\n   \
             - {yellow} : Correct letter in the wrong position.\n   \
             - {gray} : Incorrect letter.\n\
             4. If you guess the word, you win!\n\
             5. If you run out of attempts, you lose.\n\n\
             Loaded {words} words.\n",
            len = info.word_length,
            turns = info.max_turns,
            words = info.word_count,
        );
        self.emit(&intro);
    }

    fn read_guess(&mut self, turn: usize) -> UserAction {
        self.emit(&format!("Turn {turn}: Please enter your guess> "));
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => {
                self.emit_line("");
                UserAction::Exit
            }
            Ok(_) => UserAction::Guess(input),
            Err(e) => {
                log::warn!("Failed to read guess: {e}");
                UserAction::Exit
            }
        }
    }

    fn display_rejection(&mut self, error: &GuessError) {
        self.emit_error(&rejection_message(error));
    }

    fn display_feedback(&mut self, report: &TurnReport) {
        let mut line = format!("Turn {}: ", report.turn);
        if self.color {
            for (letter, verdict) in report.guess.letters().zip(report.feedback.iter()) {
                line.push_str(&styled_letter(letter, verdict));
            }
        } else {
            line.push_str(&format!("{}  {}", report.guess, report.feedback));
        }
        self.emit_line(&line);
    }

    fn display_result(&mut self, end: &SessionEnd) {
        let message = result_message(end);
        let message = match (self.color, end) {
            (true, SessionEnd::Won { .. }) => message.green().to_string(),
            (true, SessionEnd::Lost { .. }) => message.red().to_string(),
            _ => message,
        };
        self.emit(&format!("\n{message}\n"));
    }
}

/// A [`CliInterface`] on the process's stdin and stdout.
pub fn stdio_interface() -> CliInterface<io::StdinLock<'static>, io::Stdout> {
    CliInterface::new(io::stdin().lock(), io::stdout())
}
