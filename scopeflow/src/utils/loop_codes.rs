//! Short identifiers for loop groups, cut from UUIDs.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::HashSet;
use uuid::{Builder, Uuid};

/// Generates fixed-width loop codes, never repeating one.
///
/// Unseeded generators draw from `Uuid::new_v4`. Seeded generators build
/// v4-shaped UUIDs from a deterministic RNG so repeated builds name their
/// loops identically. Once every code of the configured width has been
/// issued, further codes carry a `-<n>` suffix.
#[derive(Debug)]
pub struct LoopCodeGenerator {
    rng: Option<StdRng>,
    width: usize,
    issued: HashSet<String>,
}

impl LoopCodeGenerator {
    /// Creates a generator producing codes of `width` hex characters.
    #[must_use]
    pub fn new(width: usize, seed: Option<u64>) -> Self {
        Self {
            rng: seed.map(StdRng::seed_from_u64),
            width: width.clamp(1, 32),
            issued: HashSet::new(),
        }
    }

    /// Returns the next code, distinct from every code issued before.
    pub fn next_code(&mut self) -> String {
        if self.is_exhausted() {
            let code = format!("{}-{}", self.draw(), self.issued.len());
            self.issued.insert(code.clone());
            return code;
        }
        loop {
            let code = self.draw();
            if self.issued.insert(code.clone()) {
                return code;
            }
        }
    }

    /// Returns the code width.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns how many codes have been issued.
    #[must_use]
    pub fn issued(&self) -> usize {
        self.issued.len()
    }

    fn is_exhausted(&self) -> bool {
        // Hex codes of `width` chars; widths from 16 up cannot run out.
        u32::try_from(self.width * 4)
            .ok()
            .and_then(|bits| 1usize.checked_shl(bits))
            .is_some_and(|capacity| self.issued.len() >= capacity)
    }

    fn draw(&mut self) -> String {
        let uuid = match self.rng.as_mut() {
            Some(rng) => {
                let mut bytes = [0u8; 16];
                rng.fill_bytes(&mut bytes);
                Builder::from_random_bytes(bytes).into_uuid()
            }
            None => Uuid::new_v4(),
        };
        let mut code = uuid.simple().to_string();
        code.truncate(self.width);
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_width() {
        let mut generator = LoopCodeGenerator::new(8, None);
        let code = generator.next_code();
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_seeded_codes_repeat() {
        let mut a = LoopCodeGenerator::new(8, Some(42));
        let mut b = LoopCodeGenerator::new(8, Some(42));

        let first: Vec<String> = (0..3).map(|_| a.next_code()).collect();
        let second: Vec<String> = (0..3).map(|_| b.next_code()).collect();
        assert_eq!(first, second);
        assert_ne!(first[0], first[1]);
    }

    #[test]
    fn test_narrow_codes_never_repeat() {
        let mut generator = LoopCodeGenerator::new(1, Some(7));
        let codes: HashSet<String> = (0..40).map(|_| generator.next_code()).collect();

        assert_eq!(codes.len(), 40);
        assert_eq!(generator.issued(), 40);
        assert_eq!(codes.iter().filter(|c| c.len() == 1).count(), 16);
    }
}
