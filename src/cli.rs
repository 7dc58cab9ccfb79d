use crate::game_state::{
    EMPTY_GUESS_WARNING, GameInterface, Outcome, RESET_UNAVAILABLE_NOTICE, ROUND_OVER_NOTICE,
    UserAction, feedback_text, instruction_text, result_text,
};
use crate::word_source::{DEFAULT_TIMEOUT_SECS, DEFAULT_WORD_URL, SourceConfig};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

/// Guess the secret word in three tries
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited list of fallback words
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Word service endpoint returning a JSON array of words
    #[arg(long, default_value = DEFAULT_WORD_URL)]
    pub url: String,

    /// Word service timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Never contact the word service; always use the fallback words
    #[arg(long)]
    pub offline: bool,

    /// Line-based prompt on stdin/stdout instead of the full-screen form
    #[arg(long)]
    pub plain: bool,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            url: self.url.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

// Commands carry a ':' prefix so every plain word stays a valid guess.
pub const EXIT_COMMAND: &str = ":exit";
pub const NEXT_COMMAND: &str = ":next";
pub const RESET_COMMAND: &str = ":reset";

fn parse_action(line: &str) -> UserAction {
    match line.trim().to_lowercase().as_str() {
        EXIT_COMMAND => UserAction::Exit,
        NEXT_COMMAND | RESET_COMMAND => UserAction::Reset,
        _ => UserAction::Guess(line.to_string()),
    }
}

pub fn read_action<R: BufRead>(reader: &mut R) -> UserAction {
    println!(
        "\nEnter your guess ('{NEXT_COMMAND}' for a new game once this one ends, '{EXIT_COMMAND}' to quit):"
    );
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => UserAction::Exit,
        Ok(_) => parse_action(&input),
        Err(e) => {
            log::warn!("Failed to read input: {e}");
            UserAction::Exit
        }
    }
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_action(&mut self) -> Option<UserAction> {
        Some(read_action(&mut self.reader))
    }

    fn display_new_round(&mut self, limit: usize, first_round: bool) {
        println!("{}", instruction_text(limit, first_round));
    }

    fn display_fetching_word(&mut self) {
        println!("Fetching a new word...");
    }

    fn display_input_warning(&mut self) {
        println!("Input Error: {EMPTY_GUESS_WARNING}");
    }

    fn display_outcome(&mut self, outcome: Outcome, secret_word: &str) {
        println!("{}", feedback_text(outcome, secret_word));
    }

    fn display_round_over(&mut self, won: bool, _secret_word: &str) {
        println!("Game Over: {}", result_text(won));
    }

    fn display_round_over_notice(&mut self) {
        println!("{ROUND_OVER_NOTICE}");
    }

    fn display_reset_unavailable(&mut self) {
        println!("{RESET_UNAVAILABLE_NOTICE}");
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["word-guess"]).unwrap();
        assert_eq!(cli.wordbank_path, None);
        assert_eq!(cli.url, DEFAULT_WORD_URL);
        assert_eq!(cli.timeout, 5);
        assert!(!cli.offline);
        assert!(!cli.plain);
        assert_eq!(cli.log_file, None);
        assert_eq!(cli.source_config(), SourceConfig::default());
    }

    #[test]
    fn test_parse_cli_all_flags() {
        let cli = Cli::try_parse_from([
            "word-guess",
            "-i",
            "words.txt",
            "--url",
            "http://localhost:8080/word",
            "--timeout",
            "2",
            "--offline",
            "--plain",
            "--log-file",
            "game.log",
        ])
        .unwrap();
        assert_eq!(cli.wordbank_path, Some(PathBuf::from("words.txt")));
        assert!(cli.offline);
        assert!(cli.plain);
        assert_eq!(cli.log_file, Some(PathBuf::from("game.log")));
        let config = cli.source_config();
        assert_eq!(config.url, "http://localhost:8080/word");
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_parse_cli_rejects_bad_timeout() {
        assert!(Cli::try_parse_from(["word-guess", "--timeout", "soon"]).is_err());
    }

    #[test]
    fn test_read_action_guess_kept_raw() {
        let mut reader = Cursor::new("  Apple \n");
        assert_eq!(
            read_action(&mut reader),
            UserAction::Guess("  Apple \n".to_string())
        );
    }

    #[test]
    fn test_read_action_commands() {
        let mut reader = Cursor::new(":exit\n:EXIT\n :next \n:Reset\n");
        assert_eq!(read_action(&mut reader), UserAction::Exit);
        assert_eq!(read_action(&mut reader), UserAction::Exit);
        assert_eq!(read_action(&mut reader), UserAction::Reset);
        assert_eq!(read_action(&mut reader), UserAction::Reset);
    }

    #[test]
    fn test_read_action_bare_command_words_are_guesses() {
        let mut reader = Cursor::new("next\nRESET\nexit\n");
        assert_eq!(read_action(&mut reader), UserAction::Guess("next\n".to_string()));
        assert_eq!(read_action(&mut reader), UserAction::Guess("RESET\n".to_string()));
        assert_eq!(read_action(&mut reader), UserAction::Guess("exit\n".to_string()));
    }

    #[test]
    fn test_read_action_blank_line_is_guess() {
        let mut reader = Cursor::new("\n");
        assert_eq!(read_action(&mut reader), UserAction::Guess("\n".to_string()));
    }

    #[test]
    fn test_read_action_eof_exits() {
        let mut reader = Cursor::new("");
        assert_eq!(read_action(&mut reader), UserAction::Exit);
    }
}
