// Integration tests for wordle-tui
// These tests verify that word list loading, evaluation and the session loop work together

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{Cursor, Write};
use wordle_tui::cli::CliInterface;
use wordle_tui::*;

fn word(s: &str) -> Word {
    s.parse().unwrap()
}

fn write_wordlist(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

#[test]
fn test_wordlist_file_to_finished_game() {
    // Load a word list from disk, play a game through the CLI interface
    let file = write_wordlist(&[
        "# fruit",
        "",
        "apple",
        "grape",
        "lemon",
        "melon",
        "peach",
        "bananas",
        "fig",
    ]);
    let dict = Dictionary::load(file.path()).unwrap();
    assert_eq!(dict.len(), 6);
    assert!(dict.contains(&word("BANAN")));
    assert!(!dict.contains(&word("PLUMB")));

    let mut session = GameSession::with_secret(&dict, word("MELON"));
    let input = "lemon\nplumb\nmelon\n";
    let mut ui = CliInterface::new(Cursor::new(input), Vec::new()).with_color(false);
    let end = game_loop(&mut session, &mut ui);

    assert_eq!(
        end,
        SessionEnd::Won {
            turns: 2,
            secret: word("MELON"),
        }
    );
    let out = String::from_utf8(ui.into_writer()).unwrap();
    // LEMON against MELON: L/M swap, E/O/N already in place
    assert!(out.contains("Turn 1: LEMON  YGYGG"));
    assert!(out.contains("Error: Not a word. Try again."));
}

#[test]
fn test_missing_wordlist_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let result = Dictionary::load(dir.path().join("wordlist.txt"));
    assert!(matches!(result, Err(LoadError::SourceUnavailable { .. })));
}

#[test]
fn test_wordlist_without_valid_words_is_fatal() {
    let file = write_wordlist(&["# nothing here", "", "abc", "12345", "a-b-c"]);
    let result = Dictionary::load(file.path());
    assert!(matches!(result, Err(LoadError::EmptyDictionary)));
}

#[test]
fn test_seeded_games_are_reproducible() {
    let dict = Dictionary::embedded().unwrap();
    let first = GameSession::new(&dict, &mut StdRng::seed_from_u64(2025));
    let second = GameSession::new(&dict, &mut StdRng::seed_from_u64(2025));
    assert_eq!(first.secret(), second.secret());
    assert!(dict.contains(&first.secret()));
}

#[test]
fn test_full_loss_never_exceeds_max_turns() {
    let dict: Dictionary = "crane\nslate\nraise\nstare\narise\nirate\natone".parse().unwrap();
    let mut session = GameSession::with_secret(&dict, word("ATONE"));
    let guesses = ["crane", "slate", "raise", "stare", "arise", "irate"];

    for (i, guess) in guesses.iter().enumerate() {
        let report = session.submit_guess(guess).unwrap();
        assert_eq!(report.turn, i + 1);
        assert!(session.current_turn() <= MAX_TURNS);
    }
    assert_eq!(session.state(), SessionState::Lost);
    assert_eq!(session.revealed_secret(), Some(word("ATONE")));
    assert_eq!(session.submit_guess("atone"), Err(GuessError::GameOver));
    assert_eq!(session.history().len(), MAX_TURNS);
}

#[test]
fn test_history_feedback_matches_evaluator() {
    let dict: Dictionary = "speed\nerase\nrobot\nboost".parse().unwrap();
    let mut session = GameSession::with_secret(&dict, word("SPEED"));
    session.submit_guess("erase").unwrap();
    session.submit_guess("boost").unwrap();

    for report in session.history() {
        assert_eq!(report.feedback, evaluate(&word("SPEED"), &report.guess));
    }
    assert_eq!(
        session.history()[0].feedback,
        GuessFeedback::from_pattern("YXXYY").unwrap()
    );
}

#[test]
fn test_rejected_guesses_keep_state() {
    let dict = Dictionary::embedded().unwrap();
    let mut session = GameSession::with_secret(&dict, word("CRANE"));

    for bad in ["", "abc", "crane!", "c r a n e", "zzzzz"] {
        assert!(session.submit_guess(bad).is_err());
        assert_eq!(session.current_turn(), 1);
        assert_eq!(session.state(), SessionState::AwaitingGuess);
    }
    assert!(session.history().is_empty());
}

#[test]
fn test_clean_abort_on_end_of_input() {
    let dict = Dictionary::embedded().unwrap();
    let mut session = GameSession::with_secret(&dict, word("CRANE"));
    let mut ui = CliInterface::new(Cursor::new("slate\nraise\n"), Vec::new()).with_color(false);

    assert_eq!(game_loop(&mut session, &mut ui), SessionEnd::Aborted);
    assert_eq!(session.outcome(), Outcome::InProgress);
    assert_eq!(session.current_turn(), 3);
    let out = String::from_utf8(ui.into_writer()).unwrap();
    assert!(out.contains("Game aborted."));
}

#[test]
fn test_wordlist_with_latin1_line_still_loads() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"# mixed encodings\ncrane\ncaf\xe9s\nslate\n").unwrap();
    let dict = Dictionary::load(file.path()).unwrap();
    assert_eq!(dict.len(), 2);
    assert!(dict.contains(&word("CRANE")));
    assert!(dict.contains(&word("SLATE")));
}
