//! Behavioural tests for fixture generation.
//!
//! These tests validate reproducibility and field constraints of generated
//! user and post fixtures against Gherkin scenarios.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use fixture_data::{
    FixtureGenerator, PostFixture, UserFixture, is_valid_age, is_valid_email, is_valid_text,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

/// Test world holding the generator and whatever it produced.
#[derive(Default, ScenarioState)]
struct World {
    generator: Slot<FixtureGenerator>,
    users: Slot<Vec<UserFixture>>,
    replayed_users: Slot<Vec<UserFixture>>,
    post: Slot<PostFixture>,
}

impl World {
    fn generator(&self) -> FixtureGenerator {
        self.generator.get().expect("generator should be set")
    }

    fn users(&self) -> Vec<UserFixture> {
        self.users.get().expect("users should be generated")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("a fixture generator seeded with {seed:u64}")]
fn a_fixture_generator_seeded_with(world: &World, seed: u64) {
    world.generator.set(FixtureGenerator::from_seed(seed));
}

// ============================================================================
// When steps
// ============================================================================

#[when("a user fixture is generated twice from that seed")]
fn a_user_fixture_is_generated_twice_from_that_seed(world: &World) {
    let seed = world.generator().seed();
    let first = FixtureGenerator::from_seed(seed)
        .generate_user()
        .expect("first generation");
    let second = FixtureGenerator::from_seed(seed)
        .generate_user()
        .expect("second generation");

    world.users.set(vec![first]);
    world.replayed_users.set(vec![second]);
}

#[when("{count:usize} user fixtures are generated")]
fn user_fixtures_are_generated(world: &World, count: usize) {
    let mut generator = world.generator();
    let users = (0..count)
        .map(|_| generator.generate_user().expect("user generation"))
        .collect();
    world.users.set(users);
}

#[when("a post fixture is generated")]
fn a_post_fixture_is_generated(world: &World) {
    let post = world.generator().generate_post().expect("post generation");
    world.post.set(post);
}

// ============================================================================
// Then steps
// ============================================================================

#[then("both user fixtures are identical")]
fn both_user_fixtures_are_identical(world: &World) {
    let replayed = world
        .replayed_users
        .get()
        .expect("replayed users should be set");
    assert_eq!(world.users(), replayed, "generation should be deterministic");
}

#[then("every age lies between {min:u8} and {max:u8}")]
fn every_age_lies_between(world: &World, min: u8, max: u8) {
    for user in world.users() {
        assert!(
            (min..=max).contains(&user.age) && is_valid_age(user.age),
            "age out of range: {}",
            user.age
        );
    }
}

#[then("every email matches the email grammar")]
fn every_email_matches_the_email_grammar(world: &World) {
    for user in world.users() {
        assert!(is_valid_email(&user.email), "invalid email: {}", user.email);
    }
}

#[then("the post has a non-blank title and body")]
fn the_post_has_a_non_blank_title_and_body(world: &World) {
    let post = world.post.get().expect("post should be generated");
    assert!(is_valid_text(&post.title), "blank title: {post:?}");
    assert!(is_valid_text(&post.body), "blank body: {post:?}");
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/fixtures.feature",
    name = "Seeded generation is reproducible"
)]
fn seeded_generation_is_reproducible(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixtures.feature",
    name = "Generated users satisfy field constraints"
)]
fn generated_users_satisfy_field_constraints(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixtures.feature",
    name = "Generated posts carry content"
)]
fn generated_posts_carry_content(world: World) {
    let _ = world;
}
