//! Field validation for generated fixtures.
//!
//! # Validation Rules
//!
//! - Email: `local@domain` where the local part uses the RFC 5322 atom
//!   characters with single interior dots, and the domain has at least two
//!   hyphenated alphanumeric labels ending in an alphabetic TLD
//! - Age: between [`AGE_MIN`] and [`AGE_MAX`] inclusive
//! - Text fields: not empty or whitespace-only

/// Youngest age a generated user may have.
pub const AGE_MIN: u8 = 18;

/// Oldest age a generated user may have.
pub const AGE_MAX: u8 = 80;

const LOCAL_PART_MAX: usize = 64;
const DOMAIN_LABEL_MAX: usize = 63;
const TLD_MIN: usize = 2;

/// Validates an email address against a standard address grammar.
///
/// # Examples
///
/// ```
/// use fixture_data::is_valid_email;
///
/// assert!(is_valid_email("ada.lovelace@example.com"));
/// assert!(is_valid_email("o'brien+posts@mail.example.org"));
/// assert!(!is_valid_email("ada@localhost"));        // No TLD
/// assert!(!is_valid_email("ada..l@example.com"));   // Consecutive dots
/// assert!(!is_valid_email("@example.com"));         // Empty local part
/// ```
#[must_use]
pub fn is_valid_email(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_domain(domain)
}

/// Returns `true` when `age` lies within the generated age bounds.
#[must_use]
pub fn is_valid_age(age: u8) -> bool {
    (AGE_MIN..=AGE_MAX).contains(&age)
}

/// Returns `true` when `text` holds at least one non-whitespace character.
#[must_use]
pub fn is_valid_text(text: &str) -> bool {
    !text.trim().is_empty()
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.chars().count() > LOCAL_PART_MAX {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    local.chars().all(is_local_part_char)
}

const fn is_local_part_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '.' | '!'
                | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '*'
                | '+'
                | '/'
                | '='
                | '?'
                | '^'
                | '_'
                | '`'
                | '{'
                | '|'
                | '}'
                | '~'
                | '-'
        )
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|label| is_valid_domain_label(label)) {
        return false;
    }
    labels
        .last()
        .is_some_and(|tld| tld.len() >= TLD_MIN && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

fn is_valid_domain_label(label: &str) -> bool {
    if label.is_empty() || label.len() > DOMAIN_LABEL_MAX {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
