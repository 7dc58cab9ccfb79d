use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Words used when the remote word service cannot be reached.
pub const FALLBACK_WORDS: [&str; 5] = ["cat", "dog", "apple", "python", "tree"];

#[must_use]
pub fn default_wordbank() -> Vec<String> {
    FALLBACK_WORDS.iter().map(|w| w.to_lowercase()).collect()
}

fn normalize(line: &str) -> Option<String> {
    let word = line.trim().to_lowercase();
    if !word.is_empty() && word.chars().all(char::is_alphabetic) {
        Some(word)
    } else {
        None
    }
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}
