//! `{name}` placeholder substitution for paths, headers, and JSON bodies.

use serde_json::Value;
use thiserror::Error;

use super::context::ScenarioContext;

/// Errors raised while rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A placeholder named a value the context does not hold.
    #[error("template references unknown value '{name}'")]
    MissingValue {
        /// Placeholder name.
        name: String,
    },
    /// A `{` had no matching `}`.
    #[error("unterminated placeholder in '{template}'")]
    Unterminated {
        /// The template text.
        template: String,
    },
}

/// Text containing `{name}` placeholders resolved against a
/// [`ScenarioContext`].
///
/// # Examples
///
/// ```
/// use api_scenarios::domain::{ScenarioContext, Template};
///
/// let ctx = ScenarioContext::new().with("postId", 101);
/// let path = Template::new("/posts/{postId}");
///
/// assert_eq!(path.render(&ctx).expect("rendered"), "/posts/101");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template(String);

impl Template {
    /// Wraps template text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Substitutes every placeholder with its context value.
    ///
    /// String values are inserted verbatim; other JSON values use their JSON
    /// text. Substituted text is never re-scanned for placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] for unknown names or an unterminated `{`.
    pub fn render(&self, ctx: &ScenarioContext) -> Result<String, TemplateError> {
        let mut rendered = String::with_capacity(self.0.len());
        let mut rest = self.0.as_str();

        while let Some(open) = rest.find('{') {
            let (literal, tail) = rest.split_at(open);
            rendered.push_str(literal);
            let Some(close) = tail.find('}') else {
                return Err(TemplateError::Unterminated {
                    template: self.0.clone(),
                });
            };
            let name = &tail[1..close];
            rendered.push_str(&value_text(lookup(ctx, name)?));
            rest = &tail[close + 1..];
        }

        rendered.push_str(rest);
        Ok(rendered)
    }

    /// Returns the placeholder name when the whole template is one placeholder.
    fn sole_placeholder(&self) -> Option<&str> {
        let inner = self.0.strip_prefix('{')?.strip_suffix('}')?;
        (!inner.contains(['{', '}'])).then_some(inner)
    }
}

/// Renders every string inside a JSON document as a [`Template`].
///
/// A string that is exactly one placeholder is replaced by the typed context
/// value, so `"{userId}"` becomes the number `7` rather than the text `"7"`.
///
/// # Errors
///
/// Returns [`TemplateError`] when any embedded template fails to render.
pub fn render_json(value: &Value, ctx: &ScenarioContext) -> Result<Value, TemplateError> {
    match value {
        Value::String(text) if text.contains('{') => {
            let template = Template::new(text.as_str());
            match template.sole_placeholder() {
                Some(name) => lookup(ctx, name).cloned(),
                None => template.render(ctx).map(Value::String),
            }
        }
        Value::Array(items) => items
            .iter()
            .map(|item| render_json(item, ctx))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(fields) => fields
            .iter()
            .map(|(key, item)| render_json(item, ctx).map(|rendered| (key.clone(), rendered)))
            .collect::<Result<serde_json::Map<_, _>, _>>()
            .map(Value::Object),
        other => Ok(other.clone()),
    }
}

fn lookup<'a>(ctx: &'a ScenarioContext, name: &str) -> Result<&'a Value, TemplateError> {
    ctx.get(name).ok_or_else(|| TemplateError::MissingValue {
        name: name.to_owned(),
    })
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
