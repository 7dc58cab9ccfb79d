use crate::word_source::SecretSource;
use thiserror::Error;

pub const GUESS_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

/// Classification of a single submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Blank input; no guess was consumed.
    Empty,
    Correct,
    IncorrectRemaining(usize),
    IncorrectExhausted,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessError {
    #[error("Round already ended, reset to play again")]
    RoundOver,
}

/// One play-through, from word selection to win or loss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    secret_word: String,
    guess_count: usize,
    limit: usize,
    status: Status,
}

impl Round {
    pub fn new(secret_word: String) -> Self {
        Self {
            secret_word: secret_word.trim().to_lowercase(),
            guess_count: 0,
            limit: GUESS_LIMIT,
            status: Status::Playing,
        }
    }

    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    pub fn guess_count(&self) -> usize {
        self.guess_count
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn remaining(&self) -> usize {
        self.limit - self.guess_count
    }

    pub fn is_over(&self) -> bool {
        self.status != Status::Playing
    }

    fn submit(&mut self, raw_input: &str) -> Result<Outcome, GuessError> {
        if self.is_over() {
            return Err(GuessError::RoundOver);
        }
        let guess = raw_input.trim().to_lowercase();
        if guess.is_empty() {
            return Ok(Outcome::Empty);
        }

        self.guess_count += 1;
        if guess == self.secret_word {
            self.status = Status::Won;
            Ok(Outcome::Correct)
        } else if self.guess_count < self.limit {
            Ok(Outcome::IncorrectRemaining(self.limit - self.guess_count))
        } else {
            self.status = Status::Lost;
            Ok(Outcome::IncorrectExhausted)
        }
    }
}

/// Owns the current round and the source of secret words.
pub struct GuessSession<S: SecretSource> {
    source: S,
    round: Round,
}

impl<S: SecretSource> GuessSession<S> {
    /// Start a session; resolves the first secret word immediately.
    pub fn new(mut source: S) -> Self {
        let round = Round::new(source.resolve());
        log::info!("Round started ({} guesses)", round.limit());
        Self { source, round }
    }

    /// Classify a guess against the secret word.
    ///
    /// Input is trimmed and lower-cased first. Once the round is won or lost
    /// every submission is rejected with [`GuessError::RoundOver`] until
    /// [`reset`](Self::reset) is called.
    pub fn submit(&mut self, raw_input: &str) -> Result<Outcome, GuessError> {
        let outcome = self.round.submit(raw_input)?;
        match outcome {
            Outcome::Correct => log::info!("Round won after {} guesses", self.round.guess_count()),
            Outcome::IncorrectExhausted => log::info!("Round lost"),
            Outcome::Empty | Outcome::IncorrectRemaining(_) => {}
        }
        Ok(outcome)
    }

    /// Replace the round with a fresh one and a newly resolved word.
    pub fn reset(&mut self) {
        self.round = Round::new(self.source.resolve());
        log::info!("Round reset");
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn status(&self) -> Status {
        self.round.status()
    }

    pub fn guess_count(&self) -> usize {
        self.round.guess_count()
    }

    pub fn remaining(&self) -> usize {
        self.round.remaining()
    }

    pub fn limit(&self) -> usize {
        self.round.limit()
    }

    pub fn secret_word(&self) -> &str {
        self.round.secret_word()
    }

    pub fn is_over(&self) -> bool {
        self.round.is_over()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

// Player-facing text shared by every interface.

pub const EMPTY_GUESS_WARNING: &str = "Please enter a guess.";
pub const ROUND_OVER_NOTICE: &str = "The round is over. Reset to play again.";
pub const RESET_UNAVAILABLE_NOTICE: &str = "Reset is available once the round is over.";

pub fn instruction_text(limit: usize, first_round: bool) -> String {
    if first_round {
        format!("Guess the secret word! (You have {limit} guesses)")
    } else {
        format!("New game started! Guess the word. (You have {limit} guesses)")
    }
}

pub fn feedback_text(outcome: Outcome, secret_word: &str) -> String {
    match outcome {
        Outcome::Empty => EMPTY_GUESS_WARNING.to_string(),
        Outcome::Correct => "Congratulations! You guessed correctly!".to_string(),
        Outcome::IncorrectRemaining(n) => {
            let noun = if n == 1 { "guess" } else { "guesses" };
            format!("Incorrect guess. You have {n} {noun} left.")
        }
        Outcome::IncorrectExhausted => {
            format!("Out of guesses! The correct word was '{secret_word}'.")
        }
    }
}

pub fn result_text(won: bool) -> &'static str {
    if won {
        "You Win!"
    } else {
        "Out of Guesses, YOU LOSE!"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Reset,
    Exit,
}

/// A surface the game loop can drive: terminal form, line-based prompt, test double.
pub trait GameInterface {
    /// Next user action. `None` means nothing actionable happened; ask again.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_new_round(&mut self, limit: usize, first_round: bool);
    fn display_fetching_word(&mut self);
    fn display_input_warning(&mut self);
    fn display_outcome(&mut self, outcome: Outcome, secret_word: &str);
    fn display_round_over(&mut self, won: bool, secret_word: &str);
    fn display_round_over_notice(&mut self);
    fn display_reset_unavailable(&mut self);
    fn display_exit_message(&mut self);
}

pub fn game_loop<S: SecretSource, I: GameInterface>(
    session: &mut GuessSession<S>,
    interface: &mut I,
) {
    interface.display_new_round(session.limit(), true);

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::Reset if session.is_over() => {
                interface.display_fetching_word();
                session.reset();
                interface.display_new_round(session.limit(), false);
            }
            UserAction::Reset => interface.display_reset_unavailable(),
            UserAction::Guess(raw) => match session.submit(&raw) {
                Ok(Outcome::Empty) => interface.display_input_warning(),
                Ok(outcome) => {
                    interface.display_outcome(outcome, session.secret_word());
                    if session.is_over() {
                        let won = session.status() == Status::Won;
                        interface.display_round_over(won, session.secret_word());
                    }
                }
                Err(GuessError::RoundOver) => interface.display_round_over_notice(),
            },
        }
    }
}

/// Resolve the first word behind a fetching notice, then run the loop.
pub fn play<S: SecretSource, I: GameInterface>(source: S, interface: &mut I) -> GuessSession<S> {
    interface.display_fetching_word();
    let mut session = GuessSession::new(source);
    game_loop(&mut session, interface);
    session
}
