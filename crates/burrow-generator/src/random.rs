use crate::error::Error;
use crate::Generator;
use burrow_core::shortcode::{ALPHABET, DEFAULT_LENGTH, MAX_LENGTH, MIN_LENGTH};
use burrow_core::ShortCode;
use rand::Rng;
use typed_builder::TypedBuilder;

/// Configures a [`RandomGenerator`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct RandomGeneratorSettings {
    /// Number of symbols per code, in `[MIN_LENGTH, MAX_LENGTH]`.
    ///
    /// Lengths close to `MIN_LENGTH` are a weaker policy: the candidate
    /// space gets crowded quickly and the shortener's retry budget can run
    /// out on a large corpus.
    #[builder(default = DEFAULT_LENGTH)]
    pub length: usize,
}

impl Default for RandomGeneratorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Draws codes of independent, uniformly distributed symbols from
/// [`ALPHABET`].
///
/// The generator keeps no state between calls. Each draw uses the
/// thread-local CSPRNG, so concurrent callers never share a lock.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    pub fn new(settings: RandomGeneratorSettings) -> Result<Self, Error> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&settings.length) {
            return Err(Error::InvalidLength {
                length: settings.length,
                min: MIN_LENGTH,
                max: MAX_LENGTH,
            });
        }

        Ok(Self {
            length: settings.length,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Draws a code from the given random source.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> ShortCode {
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
        }
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        self.generate_with(&mut rand::rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn default_length_is_ten() {
        let generator = RandomGenerator::default();
        assert_eq!(generator.length(), 10);
        assert_eq!(generator.generate().as_str().len(), 10);
    }

    #[test]
    fn codes_use_only_the_alphabet() {
        let generator = RandomGenerator::default();

        for _ in 0..1_000 {
            let code = generator.generate();
            assert!(code
                .as_str()
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
            // Generated codes always pass public validation.
            assert!(ShortCode::new(code.as_str()).is_ok());
        }
    }

    #[test]
    fn ten_thousand_codes_are_unique() {
        let generator = RandomGenerator::default();

        let codes: HashSet<_> = (0..10_000).map(|_| generator.generate()).collect();

        assert_eq!(codes.len(), 10_000);
    }

    #[test]
    fn custom_length() {
        let settings = RandomGeneratorSettings::builder().length(6).build();
        let generator = RandomGenerator::new(settings).unwrap();

        assert_eq!(generator.generate().as_str().len(), 6);
    }

    #[test]
    fn rejects_out_of_range_lengths() {
        let too_short = RandomGeneratorSettings::builder().length(5).build();
        assert_eq!(
            RandomGenerator::new(too_short).unwrap_err(),
            Error::InvalidLength {
                length: 5,
                min: MIN_LENGTH,
                max: MAX_LENGTH
            }
        );

        let too_long = RandomGeneratorSettings::builder().length(33).build();
        assert!(RandomGenerator::new(too_long).is_err());
    }

    #[test]
    fn same_seed_draws_same_code() {
        let generator = RandomGenerator::default();

        let first = generator.generate_with(&mut StdRng::seed_from_u64(7));
        let second = generator.generate_with(&mut StdRng::seed_from_u64(7));

        assert_eq!(first, second);
    }

    #[test]
    fn every_symbol_eventually_appears() {
        let generator = RandomGenerator::default();
        let mut rng = StdRng::seed_from_u64(42);

        let seen: HashSet<u8> = (0..1_000)
            .flat_map(|_| generator.generate_with(&mut rng).as_str().as_bytes().to_vec())
            .collect();

        assert_eq!(seen.len(), ALPHABET.len());
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
