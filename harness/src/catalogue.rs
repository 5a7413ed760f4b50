//! The CRUD scenarios run against the posts API.

use fixture_data::{PostFixture, UserFixture};
use serde_json::json;

use crate::domain::{Expected, JsonKind, Scenario, Step, keys};
use crate::suite::Suite;

/// Scenario names, usable as filters.
pub mod names {
    /// Registers the fixture user and establishes the session.
    pub const REGISTRATION: &str = "Registration";
    /// Lists every post.
    pub const GET_ALL_POSTS: &str = "Get all posts";
    /// Lists posts with a result limit.
    pub const GET_FIRST_TEN_POSTS: &str = "Get only first 10 posts";
    /// Lists posts filtered by id.
    pub const GET_POSTS_BY_ID: &str = "Get posts with id = 55 and id = 60";
    /// Posts to the guarded route without credentials.
    pub const CREATE_WITHOUT_AUTH: &str = "Creating a post with no auth";
    /// Posts to the guarded route with the session token.
    pub const CREATE_WITH_AUTH: &str = "Create a post with authorization";
    /// Posts with an explicit JSON content type.
    pub const CREATE_WITH_JSON: &str = "Creating a post with JSON";
    /// Updates the collection rather than a post.
    pub const MODIFY_MISSING: &str = "Modifying non-existing post";
    /// Creates then updates a post.
    pub const CREATE_AND_UPDATE: &str = "Create and update post";
    /// Deletes a post that cannot exist.
    pub const DELETE_MISSING: &str = "Delete non-existing post";
    /// Creates, updates, then deletes a post.
    pub const CREATE_UPDATE_DELETE: &str = "Create, update and delete post";
    /// Confirms a deleted post is gone.
    pub const DELETED_IS_GONE: &str = "Deleted post is no longer retrievable";
}

/// Content type the API reports for JSON responses.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Route that requires a bearer token for writes.
pub const GUARDED_POSTS_PATH: &str = "/664/posts";

/// Title and body written by update steps.
pub const UPDATED_TEXT: &str = "Updated";

/// Builds the full suite from generated fixtures.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if the user fixture cannot be serialised.
pub fn build_suite(user: &UserFixture, post: &PostFixture) -> Result<Suite, serde_json::Error> {
    let registration = Scenario::new(names::REGISTRATION).step(
        Step::post("Register user", "/register")
            .literal_json_body(serde_json::to_value(user)?)
            .expect_status(201)
            .expect_kind("/accessToken", JsonKind::NonEmptyString)
            .expect_kind("/user/id", JsonKind::Integer)
            .capture(keys::ACCESS_TOKEN, "/accessToken")
            .capture(keys::USER_ID, "/user/id"),
    );

    let with_post = |name: &str| {
        Scenario::new(name)
            .with_value(keys::TITLE, post.title.as_str())
            .with_value(keys::BODY, post.body.as_str())
            .with_value(keys::UPDATED_TITLE, UPDATED_TEXT)
            .with_value(keys::UPDATED_BODY, UPDATED_TEXT)
    };

    Ok(Suite::new(registration)
        .with_scenario(
            Scenario::new(names::GET_ALL_POSTS).step(
                Step::get("List posts", "/posts")
                    .expect_status(200)
                    .expect_header("content-type", JSON_CONTENT_TYPE),
            ),
        )
        .with_scenario(
            Scenario::new(names::GET_FIRST_TEN_POSTS).step(
                Step::get("List first ten posts", "/posts?_limit=10")
                    .expect_status(200)
                    .expect_len("", 10),
            ),
        )
        .with_scenario(
            Scenario::new(names::GET_POSTS_BY_ID).step(
                Step::get("List posts 55 and 60", "/posts?id=55&id=60")
                    .expect_status(200)
                    .expect_len("", 2)
                    .expect_field("/0/id", Expected::literal(55))
                    .expect_field("/1/id", Expected::literal(60)),
            ),
        )
        .with_scenario(
            with_post(names::CREATE_WITHOUT_AUTH).step(
                Step::post("Create post without token", GUARDED_POSTS_PATH)
                    .json_body(post_body())
                    .expect_status(401),
            ),
        )
        .with_scenario(
            with_post(names::CREATE_WITH_AUTH)
                .requires_session()
                .step(
                    Step::post("Create post with token", GUARDED_POSTS_PATH)
                        .header("Authorization", "{authorization}")
                        .json_body(json!({
                            "userId": "{userId}",
                            "title": "{title}",
                            "body": "{body}"
                        }))
                        .expect_status(201)
                        .expect_field("/title", Expected::context(keys::TITLE))
                        .expect_field("/body", Expected::context(keys::BODY))
                        .expect_field("/userId", Expected::context(keys::USER_ID))
                        .capture(keys::POST_ID, "/id"),
                )
                .step(
                    verify_post(keys::TITLE, keys::BODY)
                        .expect_field("/userId", Expected::context(keys::USER_ID)),
                ),
        )
        .with_scenario(
            with_post(names::CREATE_WITH_JSON)
                .step(
                    create_post()
                        .header("Content-Type", "application/json")
                        .capture(keys::POST_ID, "/id"),
                )
                .step(
                    verify_post(keys::TITLE, keys::BODY)
                        .header("Content-Type", "application/json"),
                ),
        )
        .with_scenario(
            with_post(names::MODIFY_MISSING).step(
                Step::put("Update post collection", "/posts")
                    .json_body(post_body())
                    .expect_status(404),
            ),
        )
        .with_scenario(
            with_post(names::CREATE_AND_UPDATE)
                .step(create_post().capture(keys::POST_ID, "/id"))
                .step(update_post())
                .step(verify_post(keys::UPDATED_TITLE, keys::UPDATED_BODY)),
        )
        .with_scenario(
            Scenario::new(names::DELETE_MISSING)
                .step(Step::delete("Delete post 0", "/posts/0").expect_status(404)),
        )
        .with_scenario(
            with_post(names::CREATE_UPDATE_DELETE)
                .step(create_post().capture(keys::POST_ID, "/id"))
                .step(update_post())
                .step(delete_post()),
        )
        .with_scenario(
            with_post(names::DELETED_IS_GONE)
                .step(create_post().capture(keys::POST_ID, "/id"))
                .step(delete_post())
                .step(Step::get("Read deleted post", "/posts/{postId}").expect_status(404)),
        ))
}

fn post_body() -> serde_json::Value {
    json!({ "title": "{title}", "body": "{body}" })
}

fn create_post() -> Step {
    Step::post("Create post", "/posts")
        .json_body(post_body())
        .expect_status(201)
}

fn update_post() -> Step {
    Step::put("Update post", "/posts/{postId}")
        .json_body(json!({ "title": "{updatedTitle}", "body": "{updatedBody}" }))
        .expect_status(200)
        .expect_field("/title", Expected::context(keys::UPDATED_TITLE))
        .expect_field("/body", Expected::context(keys::UPDATED_BODY))
}

fn verify_post(title: &str, body: &str) -> Step {
    Step::get("Verify post", "/posts/{postId}")
        .expect_status(200)
        .expect_field("/title", Expected::context(title))
        .expect_field("/body", Expected::context(body))
}

fn delete_post() -> Step {
    Step::delete("Delete post", "/posts/{postId}")
        .expect_status(200)
        .expect_empty_body()
}
