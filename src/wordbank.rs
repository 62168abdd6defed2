use crate::error::{KnightError, KnightResult};
use crate::game_state::Word;
use crate::info_log;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fs;
use std::path::{Path, PathBuf};

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/ye_olde_names.txt");

const APP_DIR: &str = "name-that-knight";
const USER_WORDBANK_FILE: &str = "words.txt";

/// The cached list of candidate names for a run.
#[derive(Clone, Debug)]
pub struct WordBank {
    words: Vec<Word>,
}

impl WordBank {
    /// Splits `data` on whitespace. Tokens that are not plain A-Z names are
    /// skipped with a warning.
    pub fn from_str(data: &str, origin: &str) -> KnightResult<Self> {
        let words: Vec<Word> = data
            .split_whitespace()
            .filter_map(|token| {
                let word = Word::parse(token);
                if word.is_none() {
                    log::warn!("Skipping '{token}' from {origin}: only the letters A-Z can be guessed");
                }
                word
            })
            .collect();

        if words.is_empty() {
            return Err(KnightError::empty_word_list(origin));
        }
        info_log!("Loaded {} names from {}", words.len(), origin);
        Ok(Self { words })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> KnightResult<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| KnightError::WordListUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&data, &format!("'{}'", path.display()))
    }

    pub fn embedded() -> KnightResult<Self> {
        Self::from_str(EMBEDDED_WORDBANK, "the built-in name list")
    }

    /// Explicit path first, then the per-user list, then the built-in one.
    pub fn resolve(explicit: Option<&Path>) -> KnightResult<Self> {
        Self::resolve_from(explicit, user_wordbank_path())
    }

    /// [`WordBank::resolve`] with the per-user location supplied by the caller.
    pub fn resolve_from(explicit: Option<&Path>, user_path: Option<PathBuf>) -> KnightResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = user_path
            && path.is_file()
        {
            info_log!("Using per-user word list at {}", path.display());
            return Self::from_file(path);
        }
        Self::embedded()
    }

    /// Picks one name uniformly at random.
    pub fn choose_word<R: Rng + ?Sized>(&self, rng: &mut R) -> KnightResult<&Word> {
        self.words
            .choose(rng)
            .ok_or_else(|| KnightError::empty_word_list("the word bank"))
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// `<config dir>/name-that-knight/words.txt`, if the platform has a config dir.
pub fn user_wordbank_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(USER_WORDBANK_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use std::io::Write;

    #[test]
    fn test_from_str_uppercases_and_splits_on_whitespace() {
        let bank = WordBank::from_str("arthur  Gawain\nlancelot\tbors\n", "test").unwrap();
        let names: Vec<String> = bank.words().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["ARTHUR", "GAWAIN", "LANCELOT", "BORS"]);
    }

    #[test]
    fn test_from_str_skips_unguessable_tokens() {
        let bank = WordBank::from_str("Bedivere 42 Kay O'Neill", "test").unwrap();
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn test_from_str_empty_is_error() {
        let err = WordBank::from_str(" \n\t ", "test").unwrap_err();
        assert!(matches!(err, KnightError::EmptyWordList { .. }));
    }

    #[test]
    fn test_from_str_only_junk_is_error() {
        assert!(WordBank::from_str("123 ---", "test").is_err());
    }

    #[test]
    fn test_embedded_wordbank_loads() {
        let bank = WordBank::embedded().unwrap();
        assert!(bank.len() > 20);
        assert!(bank.words().iter().any(|w| w.to_string() == "BEOWULF"));
    }

    #[test]
    fn test_from_file_reads_names() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Percival Tristan").unwrap();
        writeln!(file, "Isolde").unwrap();

        let bank = WordBank::from_file(file.path()).unwrap();
        assert_eq!(bank.len(), 3);
    }

    #[test]
    fn test_from_file_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = WordBank::from_file(dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, KnightError::WordListUnreadable { .. }));
    }

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Mordred").unwrap();
        let bank = WordBank::resolve(Some(file.path())).unwrap();
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.words()[0].to_string(), "MORDRED");
    }

    #[test]
    fn test_resolve_uses_user_list_without_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let user_path = dir.path().join("words.txt");
        fs::write(&user_path, "Gwalchmai Peredur\n").unwrap();

        let bank = WordBank::resolve_from(None, Some(user_path)).unwrap();
        let names: Vec<String> = bank.words().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["GWALCHMAI", "PEREDUR"]);
    }

    #[test]
    fn test_resolve_falls_back_to_embedded_when_user_list_absent() {
        let dir = tempfile::tempdir().unwrap();
        let embedded = WordBank::embedded().unwrap();

        let bank = WordBank::resolve_from(None, Some(dir.path().join("words.txt"))).unwrap();
        assert_eq!(bank.words(), embedded.words());

        let bank = WordBank::resolve_from(None, None).unwrap();
        assert_eq!(bank.len(), embedded.len());
    }

    #[test]
    fn test_resolve_explicit_beats_user_list() {
        let dir = tempfile::tempdir().unwrap();
        let user_path = dir.path().join("words.txt");
        let explicit = dir.path().join("mine.txt");
        fs::write(&user_path, "Peredur").unwrap();
        fs::write(&explicit, "Owain").unwrap();

        let bank = WordBank::resolve_from(Some(explicit.as_path()), Some(user_path)).unwrap();
        assert_eq!(bank.words()[0].to_string(), "OWAIN");
    }

    #[test]
    fn test_choose_word_is_from_bank() {
        let bank = WordBank::from_str("Lug Dagda Nuada", "test").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let word = bank.choose_word(&mut rng).unwrap();
            assert!(bank.words().contains(word));
        }
    }

    #[test]
    fn test_choose_word_reaches_every_name() {
        let bank = WordBank::from_str("Lug Dagda Nuada Ogma", "test").unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<String> = (0..200)
            .map(|_| bank.choose_word(&mut rng).unwrap().to_string())
            .collect();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_user_wordbank_path_shape() {
        if let Some(path) = user_wordbank_path() {
            assert!(path.ends_with("name-that-knight/words.txt"));
        }
    }
}
