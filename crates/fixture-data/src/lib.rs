//! Randomised request fixtures for the posts API scenario suite.
//!
//! This crate produces believable, structurally valid input records for the
//! end-to-end scenarios: a user registration payload and a post payload. It
//! is independent of the harness crate so fixtures can be generated and
//! inspected without any HTTP machinery.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Seeded, reproducible generation via [`FixtureGenerator::from_seed`]
//! - Entropy-seeded generation that still reports its seed for replay
//! - Field validation (email grammar, age bounds, non-empty text)
//!
//! # Example
//!
//! ```
//! use fixture_data::{AGE_MAX, AGE_MIN, FixtureGenerator, is_valid_email};
//!
//! let mut generator = FixtureGenerator::from_seed(42);
//! let user = generator.generate_user().expect("user fixture");
//! let post = generator.generate_post().expect("post fixture");
//!
//! assert!(is_valid_email(&user.email));
//! assert!((AGE_MIN..=AGE_MAX).contains(&user.age));
//! assert!(!post.title.is_empty());
//! ```

mod error;
mod fixture;
mod generator;
mod validation;

pub use error::GenerationError;
pub use fixture::{PostFixture, UserFixture};
pub use generator::FixtureGenerator;
pub use validation::{AGE_MAX, AGE_MIN, is_valid_age, is_valid_email, is_valid_text};
