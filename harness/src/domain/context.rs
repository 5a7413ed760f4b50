//! Named values threaded through the steps of one scenario.

use std::collections::BTreeMap;

use serde_json::Value;

/// Context keys shared between the catalogue, the session, and captures.
pub mod keys {
    /// Bearer credential captured at registration.
    pub const ACCESS_TOKEN: &str = "accessToken";
    /// Identifier of the registered user.
    pub const USER_ID: &str = "userId";
    /// `Authorization` header value derived from the session.
    pub const AUTHORIZATION: &str = "authorization";
    /// Identifier of the post created earlier in the scenario.
    pub const POST_ID: &str = "postId";
    /// Title of the post fixture.
    pub const TITLE: &str = "title";
    /// Body of the post fixture.
    pub const BODY: &str = "body";
    /// Replacement title used by update steps.
    pub const UPDATED_TITLE: &str = "updatedTitle";
    /// Replacement body used by update steps.
    pub const UPDATED_BODY: &str = "updatedBody";
}

/// Ordered map of JSON values available to step templates and predicates.
///
/// A context starts with the scenario's seeded values (fixtures and, for
/// authorised scenarios, the session) and grows as steps capture values from
/// responses. It never outlives the scenario run that owns it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioContext {
    values: BTreeMap<String, Value>,
}

impl ScenarioContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Copies every value from `other`, overwriting existing names.
    pub fn merge(&mut self, other: &Self) {
        self.values
            .extend(other.values.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
