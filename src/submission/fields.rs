use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_MESSAGE_LEN: usize = 5000;

/// local-part "@" domain-with-dot, no whitespace.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// A contact form that passed validation. Every field is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validate a parsed contact body. Any other keys in the body are ignored.
pub fn validate(raw: &Value) -> Result<ContactForm, String> {
    let (Some(name), Some(email), Some(message)) = (
        text_field(raw, "name"),
        text_field(raw, "email"),
        text_field(raw, "message"),
    ) else {
        return Err("All fields are required".to_string());
    };

    if !is_valid_email(email) {
        return Err("Please provide a valid email address".to_string());
    }

    for (label, value, max) in [
        ("Name", name, MAX_NAME_LEN),
        ("Email", email, MAX_EMAIL_LEN),
        ("Message", message, MAX_MESSAGE_LEN),
    ] {
        if value.chars().count() > max {
            return Err(format!("{label} must be at most {max} characters"));
        }
    }

    Ok(ContactForm {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

fn text_field<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
