//! Fake vision backend.
//!
//! Implements [`ImageDetector`] without looking at the pixels: each call
//! draws a confidence score from a seedable RNG and compares it with the
//! threshold.  Stands in for the real cloud detector during development
//! and demos; a fixed seed makes a run reproducible.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::ports::{DetectorError, ImageDetector};
use crate::image::Image;

pub struct FakeImageDetector {
    rng: StdRng,
}

impl FakeImageDetector {
    /// `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl ImageDetector for FakeImageDetector {
    fn detect(&mut self, image: &Image, confidence_threshold: f32) -> Result<bool, DetectorError> {
        if image.is_empty() {
            return Err(DetectorError::InvalidImage);
        }
        let confidence: f32 = self.rng.gen_range(0.0..100.0);
        debug!(
            "FakeImageDetector: {} scored {:.1} (threshold {:.1})",
            image.label(),
            confidence,
            confidence_threshold
        );
        Ok(confidence >= confidence_threshold)
    }
}
