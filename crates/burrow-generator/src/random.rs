use crate::Generator;
use burrow_core::shortcode::{ALPHABET, CODE_LENGTH};
use burrow_core::ShortCode;
use rand::rngs::OsRng;
use rand::Rng;

/// Generates short codes from the operating system's CSPRNG.
///
/// Each of the [`CODE_LENGTH`] characters is drawn independently and
/// uniformly from [`ALPHABET`]. Codes must not be guessable, so no
/// user-space PRNG is involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn new() -> Self {
        Self
    }

    fn sample(&self) -> String {
        let mut rng = OsRng;
        (0..CODE_LENGTH)
            .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
            .collect()
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        ShortCode::new_unchecked(self.sample())
    }
}
