use hangman::cli::{CliInterface, RenderConfig, parse_cli};
use hangman::notifier::{Bell, Notifier, Silent};
use hangman::tui::TuiInterface;
use hangman::wordbank::{DirWordSource, EmbeddedWordSource, WordSource};
use hangman::{Game, GameError, Leaderboard, logging};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();
    let cli = parse_cli();

    let words: Box<dyn WordSource> = match &cli.words_dir {
        Some(dir) => Box::new(DirWordSource::new(dir)),
        None => Box::new(EmbeddedWordSource),
    };
    let leaderboard = match &cli.scores_path {
        Some(path) => Leaderboard::with_path(path),
        None => Leaderboard::new(),
    };
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let config = RenderConfig::detect(cli.no_color);
    let notifier: Box<dyn Notifier> = if cli.mute || !config.clear_screen {
        Box::new(Silent)
    } else {
        Box::new(Bell::stdout())
    };
    log::debug!("Scores at '{}'", leaderboard.path().display());

    let mut game = Game::new(words, leaderboard, rng).with_notifier(notifier);
    let result = if cli.tui {
        TuiInterface::new(config)
            .map_err(GameError::from)
            .and_then(|mut ui| game.run(&mut ui))
    } else {
        let mut ui = CliInterface::new(io::stdin().lock(), config);
        game.run(&mut ui)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.shown_to_player() {
                log::error!("{e}");
            } else {
                eprintln!("{e}");
            }
            ExitCode::FAILURE
        }
    }
}
