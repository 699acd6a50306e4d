//! Entropy test doubles.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::random::error::{GeneratorError, GeneratorResult};
use crate::random::source::{EntropySource, OsEntropy};

/// Replays a fixed byte sequence, then under-delivers.
pub struct ReplayEntropy {
    bytes: Mutex<VecDeque<u8>>,
}

impl ReplayEntropy {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Mutex::new(bytes.into()),
        }
    }

    /// Replay 64-bit words in the order `SecureRandom` reads them.
    pub fn from_words(words: &[u64]) -> Self {
        Self::new(words.iter().flat_map(|w| w.to_le_bytes()).collect())
    }

    pub fn remaining(&self) -> usize {
        self.bytes.lock().len()
    }
}

impl EntropySource for ReplayEntropy {
    fn fill(&self, dest: &mut [u8]) -> GeneratorResult<usize> {
        let mut bytes = self.bytes.lock();
        let mut written = 0;
        for slot in dest.iter_mut() {
            let Some(byte) = bytes.pop_front() else {
                break;
            };
            *slot = byte;
            written += 1;
        }
        Ok(written)
    }

    fn name(&self) -> &'static str {
        "replay"
    }
}

/// Always fails.
pub struct FailingEntropy;

impl EntropySource for FailingEntropy {
    fn fill(&self, _dest: &mut [u8]) -> GeneratorResult<usize> {
        Err(GeneratorError::EntropyUnavailable(
            "entropy source offline".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Delegates to the OS source and records how many bytes were drawn.
#[derive(Default)]
pub struct CountingEntropy {
    drawn: AtomicUsize,
}

impl CountingEntropy {
    pub fn bytes_drawn(&self) -> usize {
        self.drawn.load(Ordering::SeqCst)
    }
}

impl EntropySource for CountingEntropy {
    fn fill(&self, dest: &mut [u8]) -> GeneratorResult<usize> {
        let written = OsEntropy.fill(dest)?;
        self.drawn.fetch_add(written, Ordering::SeqCst);
        Ok(written)
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}
