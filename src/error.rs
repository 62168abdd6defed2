use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type KnightResult<T> = Result<T, KnightError>;

/// Everything that can stop the game from starting or rendering.
#[derive(Error, Debug)]
pub enum KnightError {
    #[error("could not read word list '{}': {source}", path.display())]
    WordListUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("word list {origin} contains no usable names")]
    EmptyWordList { origin: String },

    #[error("no knight frames found in '{}' (expected knight1.txt, knight2.txt, ...)", dir.display())]
    MissingFrames { dir: PathBuf },

    #[error("could not read knight frame '{}': {source}", path.display())]
    FrameUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl KnightError {
    pub fn empty_word_list<S: Into<String>>(origin: S) -> Self {
        Self::EmptyWordList {
            origin: origin.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_word_list_message() {
        let error = KnightError::empty_word_list("'names.txt'");
        assert!(matches!(error, KnightError::EmptyWordList { .. }));
        assert_eq!(
            error.to_string(),
            "word list 'names.txt' contains no usable names"
        );
    }

    #[test]
    fn test_unreadable_word_list_names_path() {
        let error = KnightError::WordListUnreadable {
            path: PathBuf::from("/nowhere/names.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let message = error.to_string();
        assert!(message.contains("/nowhere/names.txt"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn test_terminal_error_from_io() {
        let error: KnightError = io::Error::other("broken pipe").into();
        assert!(matches!(error, KnightError::Terminal(_)));
    }
}
