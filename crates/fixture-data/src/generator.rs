//! Seeded fixture generation.
//!
//! A [`FixtureGenerator`] owns a ChaCha RNG. The same seed always produces
//! the same sequence of fixtures, which lets a failing suite run be replayed
//! by re-using the seed it logged.

use fake::Fake;
use fake::faker::internet::raw::{Password, SafeEmail};
use fake::faker::lorem::raw::{Paragraph, Sentence};
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::fixture::{PostFixture, UserFixture};
use crate::validation::{AGE_MAX, AGE_MIN, is_valid_age, is_valid_email, is_valid_text};

/// Maximum number of attempts to produce a valid value for one field.
const MAX_FIELD_ATTEMPTS: usize = 100;

/// Word count range for generated post titles.
const TITLE_WORDS: std::ops::Range<usize> = 3..8;

/// Sentence count range for generated post bodies.
const BODY_SENTENCES: std::ops::Range<usize> = 2..5;

/// Character count range for generated passwords.
const PASSWORD_LENGTH: std::ops::Range<usize> = 10..20;

/// Produces randomised user and post fixtures.
///
/// # Example
///
/// ```
/// use fixture_data::FixtureGenerator;
///
/// let mut first = FixtureGenerator::from_seed(7);
/// let mut second = FixtureGenerator::from_seed(7);
///
/// assert_eq!(
///     first.generate_user().expect("user"),
///     second.generate_user().expect("user"),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FixtureGenerator {
    seed: u64,
    rng: ChaCha8Rng,
}

impl FixtureGenerator {
    /// Creates a generator whose output is fully determined by `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a generator seeded from the thread RNG.
    ///
    /// The chosen seed is available through [`FixtureGenerator::seed`].
    #[must_use]
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::rng().random();
        Self::from_seed(seed)
    }

    /// Returns the seed this generator was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a user registration fixture.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::FieldGenerationFailed`] when a field keeps
    /// failing validation after the attempt budget is spent.
    pub fn generate_user(&mut self) -> Result<UserFixture, GenerationError> {
        let email = self.generate_field(
            "email",
            |rng| SafeEmail(EN).fake_with_rng(rng),
            |v: &String| is_valid_email(v),
        )?;
        let password = self.generate_field(
            "password",
            |rng| Password(EN, PASSWORD_LENGTH).fake_with_rng(rng),
            |v: &String| is_valid_text(v),
        )?;
        let first_name = self.generate_field(
            "first name",
            |rng| FirstName(EN).fake_with_rng(rng),
            |v: &String| is_valid_text(v),
        )?;
        let last_name = self.generate_field(
            "last name",
            |rng| LastName(EN).fake_with_rng(rng),
            |v: &String| is_valid_text(v),
        )?;
        let age = self.generate_field(
            "age",
            |rng| rng.random_range(AGE_MIN..=AGE_MAX),
            |v: &u8| is_valid_age(*v),
        )?;

        Ok(UserFixture {
            email,
            password,
            first_name,
            last_name,
            age,
        })
    }

    /// Generates a post fixture.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::FieldGenerationFailed`] when the title or
    /// body keeps coming back blank.
    pub fn generate_post(&mut self) -> Result<PostFixture, GenerationError> {
        let title = self.generate_field(
            "title",
            |rng| Sentence(EN, TITLE_WORDS).fake_with_rng(rng),
            |v: &String| is_valid_text(v),
        )?;
        let body = self.generate_field(
            "body",
            |rng| Paragraph(EN, BODY_SENTENCES).fake_with_rng(rng),
            |v: &String| is_valid_text(v),
        )?;

        Ok(PostFixture { title, body })
    }

    /// Draws candidates until one satisfies `is_valid`.
    fn generate_field<T>(
        &mut self,
        field: &'static str,
        mut produce: impl FnMut(&mut ChaCha8Rng) -> T,
        is_valid: impl Fn(&T) -> bool,
    ) -> Result<T, GenerationError> {
        for _ in 0..MAX_FIELD_ATTEMPTS {
            let candidate = produce(&mut self.rng);
            if is_valid(&candidate) {
                return Ok(candidate);
            }
        }

        Err(GenerationError::FieldGenerationFailed {
            field,
            max_attempts: MAX_FIELD_ATTEMPTS,
        })
    }
}
