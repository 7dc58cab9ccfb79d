use std::io;
use word_guess::cli::{CliInterface, parse_cli};
use word_guess::game_state::play;
use word_guess::logging::{LogDestination, init_logging};
use word_guess::tui::TuiInterface;
use word_guess::word_source::WordSource;
use word_guess::wordbank::{default_wordbank, load_wordbank_from_file};

fn main() {
    let cli = parse_cli();
    let destination = LogDestination::choose(cli.log_file.as_deref(), !cli.plain);
    if let Err(e) = init_logging(destination) {
        eprintln!("Failed to open log file: {e}");
        return;
    }

    let fallback = match &cli.wordbank_path {
        Some(path) => match load_wordbank_from_file(path) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("Failed to load word list from '{}': {e}", path.display());
                return;
            }
        },
        None => default_wordbank(),
    };

    let source = if cli.offline {
        WordSource::offline(fallback)
    } else {
        WordSource::from_config(&cli.source_config(), fallback)
    };

    if cli.plain {
        let mut interface = CliInterface::new(io::stdin().lock());
        play(source, &mut interface);
        return;
    }

    match TuiInterface::new() {
        Ok(mut interface) => {
            play(source, &mut interface);
        }
        Err(e) => eprintln!("Failed to start terminal interface: {e}"),
    }
}
