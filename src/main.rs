//! Retro arcade runner (default binary).
//!
//! Shows the game menu, then hands the terminal to the loop controller until
//! the player leaves the menu or presses Ctrl-C.

use std::fs::File;
use std::sync::{mpsc, Arc};

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

use retro_arcade::core::SharedStore;
use retro_arcade::engine::{ControllerConfig, LoopController};
use retro_arcade::input::{InputReader, ReaderConfig};
use retro_arcade::store::FileStore;
use retro_arcade::term::{Screen, TerminalView};

fn main() -> Result<()> {
    let config = ControllerConfig::from_env()?;
    init_logging(&config)?;

    let mut screen = Screen::stdout();
    screen.enter()?;

    let result = run(&config);

    // Always try to restore terminal state.
    let _ = screen.leave();
    result
}

/// Log to the file named by the config.
///
/// The game owns the terminal, so without a log file nothing is logged;
/// failures still reach stderr through `main`'s result once the screen is
/// restored.
fn init_logging(config: &ControllerConfig) -> Result<()> {
    if let Some(mut builder) = log_builder(config)? {
        builder.try_init()?;
    }
    Ok(())
}

fn log_builder(config: &ControllerConfig) -> Result<Option<Builder>> {
    let Some(path) = &config.log_path else {
        return Ok(None);
    };
    let file =
        File::create(path).with_context(|| format!("cannot open log file {}", path.display()))?;
    let mut builder = Builder::from_env(Env::default().default_filter_or("debug"));
    builder.target(Target::Pipe(Box::new(file)));
    Ok(Some(builder))
}

fn run(config: &ControllerConfig) -> Result<()> {
    let store: SharedStore = Arc::new(FileStore::new(&config.db_path));
    log::debug!("high scores in {}", config.db_path.display());

    let (tx, rx) = mpsc::channel();
    let reader = InputReader::spawn(
        tx,
        ReaderConfig {
            hold_threshold: config.hold_threshold,
            poll_timeout: config.input_timeout,
        },
    )
    .context("cannot start input reader")?;

    let mut controller = LoopController::new(TerminalView::stdout(), rx, store, config);
    controller.run();

    reader.join()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_logger_without_log_file() {
        let config = ControllerConfig::default();
        assert!(log_builder(&config).unwrap().is_none());
    }

    #[test]
    fn test_log_file_is_created() {
        let dir = TempDir::new().unwrap();
        let config = ControllerConfig {
            log_path: Some(dir.path().join("arcade.log")),
            ..ControllerConfig::default()
        };
        assert!(log_builder(&config).unwrap().is_some());
        assert!(dir.path().join("arcade.log").exists());
    }

    #[test]
    fn test_unwritable_log_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config = ControllerConfig {
            log_path: Some(dir.path().join("missing").join("arcade.log")),
            ..ControllerConfig::default()
        };
        assert!(log_builder(&config).is_err());
    }
}
