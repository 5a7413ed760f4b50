//! Generated fixture record types.
//!
//! The serialised shape of each record is the JSON payload the target API
//! accepts, so the harness can send fixtures without an extra mapping layer.

use serde::{Deserialize, Serialize};

/// A user registration payload.
///
/// # Example
///
/// ```
/// use fixture_data::UserFixture;
///
/// let user = UserFixture {
///     email: "ada@example.com".to_owned(),
///     password: "s3cret-pass".to_owned(),
///     first_name: "Ada".to_owned(),
///     last_name: "Lovelace".to_owned(),
///     age: 36,
/// };
///
/// assert_eq!(user.first_name, "Ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFixture {
    /// Email address used as the login identifier.
    pub email: String,
    /// Plain-text password submitted at registration.
    pub password: String,
    /// Given name.
    #[serde(rename = "firstname")]
    pub first_name: String,
    /// Family name.
    #[serde(rename = "lastname")]
    pub last_name: String,
    /// Age in years.
    pub age: u8,
}

/// A post payload reused by every post-creation scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFixture {
    /// Post title.
    pub title: String,
    /// Post body text.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_fixture_serializes_with_registration_keys() {
        let user = UserFixture {
            email: "ada@example.com".to_owned(),
            password: "pw".to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            age: 36,
        };
        let json = serde_json::to_value(&user).expect("serialize");
        assert_eq!(json["firstname"], "Ada");
        assert_eq!(json["lastname"], "Lovelace");
        assert_eq!(json["age"], 36);
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn post_fixture_serializes_title_and_body() {
        let post = PostFixture {
            title: "Hello".to_owned(),
            body: "World".to_owned(),
        };
        let json = serde_json::to_string(&post).expect("serialize");
        assert_eq!(json, r#"{"title":"Hello","body":"World"}"#);
    }
}
