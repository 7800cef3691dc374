use rand::SeedableRng;
use rand::rngs::StdRng;
use std::process::ExitCode;
use wordle_tui::cli::{Cli, parse_cli, stdio_interface};
use wordle_tui::logging::{LogTarget, init_logging, log_target, logging_requested};
use wordle_tui::tui::TuiInterface;
use wordle_tui::{Dictionary, GameSession, LoadError, game_loop};

fn load_dictionary(cli: &Cli) -> Result<Dictionary, LoadError> {
    match &cli.wordlist_path {
        Some(path) => Dictionary::load(path),
        None => Dictionary::embedded(),
    }
}

fn main() -> ExitCode {
    let cli = parse_cli();

    let target = log_target(
        cli.log_file.as_deref(),
        cli.tui,
        logging_requested(cli.verbose),
    );
    let logging = match &target {
        LogTarget::Stderr => init_logging(cli.verbose, None),
        LogTarget::File(path) => init_logging(cli.verbose, Some(path)),
        LogTarget::Disabled => Ok(()),
    };
    if let Err(e) = logging {
        eprintln!("Warning: logging disabled: {e}");
    }

    let dictionary = match load_dictionary(&cli) {
        Ok(dictionary) => dictionary,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = GameSession::new(&dictionary, &mut rng);

    let end = if cli.tui {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Error: cannot start the terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&mut session, &mut interface)
    } else {
        let mut interface = stdio_interface().with_color(!cli.no_color);
        game_loop(&mut session, &mut interface)
    };
    log::info!("Session finished: {end:?}");

    ExitCode::SUCCESS
}
