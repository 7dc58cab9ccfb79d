// Library interface for word-guess
// This allows integration tests to access internal modules

pub mod cli;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod word_source;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use game_state::{
    GUESS_LIMIT, GameInterface, GuessError, GuessSession, Outcome, Round, Status, UserAction,
    game_loop, play,
};
pub use word_source::{
    FetchError, HttpFetcher, SecretSource, SourceConfig, WordFetcher, WordSource, parse_word_list,
};
pub use wordbank::{
    FALLBACK_WORDS, default_wordbank, load_wordbank_from_file, load_wordbank_from_str,
};
