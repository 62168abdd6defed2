//! The Black Knight, one text-art frame per miss level.
//!
//! Frames are named `knight1.txt`, `knight2.txt`, ... and frame `n` is shown
//! while the player has `n - 1` misses. The number of frames is also the
//! number of misses that loses the round.

use crate::error::{KnightError, KnightResult};
use crate::info_log;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const EMBEDDED_FRAMES: [&str; 7] = [
    include_str!("resources/knight1.txt"),
    include_str!("resources/knight2.txt"),
    include_str!("resources/knight3.txt"),
    include_str!("resources/knight4.txt"),
    include_str!("resources/knight5.txt"),
    include_str!("resources/knight6.txt"),
    include_str!("resources/knight7.txt"),
];

#[derive(Clone, Debug)]
pub struct KnightFrames {
    frames: Vec<String>,
}

impl KnightFrames {
    pub fn embedded() -> Self {
        Self {
            frames: EMBEDDED_FRAMES.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Loads consecutive frames from `dir`, stopping at the first missing index.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> KnightResult<Self> {
        let dir = dir.as_ref();
        let mut frames = Vec::new();

        for number in 1.. {
            let path = frame_path(dir, number);
            match fs::read_to_string(&path) {
                Ok(frame) => frames.push(frame),
                Err(e) if e.kind() == io::ErrorKind::NotFound => break,
                Err(source) => return Err(KnightError::FrameUnreadable { path, source }),
            }
        }

        if frames.is_empty() {
            return Err(KnightError::MissingFrames {
                dir: dir.to_path_buf(),
            });
        }
        info_log!("Loaded {} knight frames from {}", frames.len(), dir.display());
        Ok(Self { frames })
    }

    pub fn resolve(dir: Option<&Path>) -> KnightResult<Self> {
        match dir {
            Some(dir) => Self::load_from_dir(dir),
            None => Ok(Self::embedded()),
        }
    }

    /// The picture for a miss count. Counts past the last frame hold the last one.
    pub fn frame_for(&self, misses: usize) -> &str {
        let index = misses.min(self.frames.len() - 1);
        &self.frames[index]
    }

    /// How many misses end the round.
    pub fn max_misses(&self) -> usize {
        self.frames.len()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn frame_path(dir: &Path, number: usize) -> PathBuf {
    dir.join(format!("knight{number}.txt"))
}
