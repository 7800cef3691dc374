use crate::word::{Word, WordError, normalize_entry};
use rand::Rng;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const EMBEDDED_WORDLIST: &str = include_str!("resources/wordlist.txt");

/// Fatal errors while building a [`Dictionary`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read word list '{source_name}': {source}")]
    SourceUnavailable {
        source_name: String,
        #[source]
        source: io::Error,
    },

    #[error("word list contains no valid five-letter words")]
    EmptyDictionary,
}

/// The words that may be guessed and drawn as the secret.
///
/// Entries keep their source order, duplicates included; membership checks go
/// through a hash index.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<Word>,
    index: HashSet<Word>,
}

impl Dictionary {
    /// Build from already-normalised words. Fails if there are none.
    pub fn from_words<I: IntoIterator<Item = Word>>(words: I) -> Result<Self, LoadError> {
        let words: Vec<Word> = words.into_iter().collect();
        if words.is_empty() {
            return Err(LoadError::EmptyDictionary);
        }
        let index = words.iter().copied().collect();
        Ok(Self { words, index })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::SourceUnavailable {
            source_name: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), &path.display().to_string())
    }

    /// Read a word list line by line. `source_name` only appears in errors and logs.
    ///
    /// Lines are split on raw bytes, so a line in another encoding is filtered
    /// out like any other non-letter line. Only I/O failures are fatal.
    pub fn from_reader<R: BufRead>(reader: R, source_name: &str) -> Result<Self, LoadError> {
        let mut words = Vec::new();
        for (number, line) in reader.split(b'\n').enumerate() {
            let line = line.map_err(|source| LoadError::SourceUnavailable {
                source_name: source_name.to_string(),
                source,
            })?;
            collect_entry(&mut words, &String::from_utf8_lossy(&line), number + 1);
        }
        let dictionary = Self::from_words(words)?;
        log::info!(
            "Loaded {} words from {}",
            dictionary.len(),
            source_name
        );
        Ok(dictionary)
    }

    /// The word list compiled into the binary.
    pub fn embedded() -> Result<Self, LoadError> {
        EMBEDDED_WORDLIST.parse()
    }

    /// Uniform choice over the stored entries.
    pub fn pick_secret<R: Rng + ?Sized>(&self, rng: &mut R) -> Word {
        let idx = rng.gen_range(0..self.words.len());
        self.words[idx]
    }

    #[must_use]
    pub fn contains(&self, candidate: &Word) -> bool {
        self.index.contains(candidate)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false for a constructed dictionary.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

impl FromStr for Dictionary {
    type Err = LoadError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let mut words = Vec::new();
        for (number, line) in data.lines().enumerate() {
            collect_entry(&mut words, line, number + 1);
        }
        Self::from_words(words)
    }
}

fn collect_entry(words: &mut Vec<Word>, line: &str, number: usize) {
    match normalize_entry(line) {
        Ok(word) => words.push(word),
        Err(WordError::Empty | WordError::Comment) => {}
        Err(e) => log::debug!("Skipping word list line {number}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;

    #[test]
    fn test_filters_invalid_lines() {
        let data = "# header comment\n\ncrane\nslate\nCR4NE\nab\n  raise  \nstares\n!!!!!\n";
        let dict: Dictionary = data.parse().unwrap();
        let words: Vec<String> = dict.words().iter().map(ToString::to_string).collect();
        assert_eq!(words, vec!["CRANE", "SLATE", "RAISE", "STARE"]);
    }

    #[test]
    fn test_keeps_duplicates_in_source_order() {
        let dict: Dictionary = "crane\nslate\nCRANE\n".parse().unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.words()[0], dict.words()[2]);
    }

    #[test]
    fn test_empty_source_is_an_error() {
        assert!(matches!(
            "".parse::<Dictionary>(),
            Err(LoadError::EmptyDictionary)
        ));
        assert!(matches!(
            "# only comments\n\nabc\n12345\n".parse::<Dictionary>(),
            Err(LoadError::EmptyDictionary)
        ));
        assert!(matches!(
            Dictionary::from_words(Vec::new()),
            Err(LoadError::EmptyDictionary)
        ));
    }

    #[test]
    fn test_from_reader_matches_from_str() {
        let data = "crane\nslate\n#comment\nraise";
        let from_reader = Dictionary::from_reader(Cursor::new(data), "cursor").unwrap();
        let from_str: Dictionary = data.parse().unwrap();
        assert_eq!(from_reader.words(), from_str.words());
    }

    #[test]
    fn test_non_utf8_line_is_skipped() {
        let data: &[u8] = b"crane\ncaf\xe9s\nslate\n";
        let dict = Dictionary::from_reader(Cursor::new(data), "latin1").unwrap();
        let words: Vec<String> = dict.words().iter().map(ToString::to_string).collect();
        assert_eq!(words, vec!["CRANE", "SLATE"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let dict = Dictionary::from_reader(Cursor::new("crane\r\nslate\r\n"), "crlf").unwrap();
        assert_eq!(dict.len(), 2);
        assert!(dict.contains(&"SLATE".parse().unwrap()));
    }

    #[test]
    fn test_read_failure_is_source_unavailable() {
        struct FailingReader;

        impl io::Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk went away"))
            }
        }

        let result = Dictionary::from_reader(BufReader::new(FailingReader), "broken");
        assert!(matches!(
            result,
            Err(LoadError::SourceUnavailable { ref source_name, .. }) if source_name == "broken"
        ));
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let err = Dictionary::load("/nonexistent/dir/wordlist.txt").unwrap_err();
        match err {
            LoadError::SourceUnavailable { source_name, .. } => {
                assert!(source_name.ends_with("wordlist.txt"));
            }
            LoadError::EmptyDictionary => panic!("Expected SourceUnavailable"),
        }
    }

    #[test]
    fn test_contains() {
        let dict: Dictionary = "crane\nslate".parse().unwrap();
        assert!(dict.contains(&"CRANE".parse().unwrap()));
        assert!(dict.contains(&"slate".parse().unwrap()));
        assert!(!dict.contains(&"RAISE".parse().unwrap()));
    }

    #[test]
    fn test_pick_secret_is_member_and_reproducible() {
        let dict: Dictionary = "crane\nslate\nraise\nstare\narise".parse().unwrap();
        let first = dict.pick_secret(&mut StdRng::seed_from_u64(42));
        let second = dict.pick_secret(&mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
        assert!(dict.contains(&first));
    }

    #[test]
    fn test_pick_secret_reaches_every_word() {
        let dict: Dictionary = "crane\nslate\nraise".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let picked: HashSet<Word> = (0..200).map(|_| dict.pick_secret(&mut rng)).collect();
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn test_embedded_wordlist_loads() {
        let dict = Dictionary::embedded().unwrap();
        assert!(dict.len() > 100);
        assert!(dict.contains(&"CRANE".parse().unwrap()));
    }
}
