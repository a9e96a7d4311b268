use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NameError {
    #[error("invalid variable name `{0}`")]
    InvalidName(String),
}

/// `[a-z][0-9]*` or `[A-Z][a-z0-9]*`.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => chars.all(|c| c.is_ascii_digit()),
        Some(c) if c.is_ascii_uppercase() => {
            chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        }
        _ => false,
    }
}

#[derive(PartialEq, Eq, Hash, Clone, derive_more::Display, Debug)]
#[display(fmt = "{}", "_0")]
pub struct Name(Rc<str>);

impl Name {
    pub fn new(text: &str) -> Result<Self, NameError> {
        if is_identifier(text) {
            Ok(Self(text.into()))
        } else {
            Err(NameError::InvalidName(text.to_string()))
        }
    }

    /// Caller guarantees `text` passes `is_identifier`.
    pub(crate) fn from_valid(text: String) -> Self {
        debug_assert!(is_identifier(&text));
        Self(text.as_str().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Bound-variable candidates in preference order.
const CANDIDATES: &str = "xyzwvutsrabcdefghijklmnpq";

/// A name not present in `excluded`: the first surviving single-letter
/// candidate, or `v<n+1>` past the largest `v<digits>` excluded.
pub fn fresh_name<'a>(excluded: impl IntoIterator<Item = &'a Name>) -> Name {
    let mut candidates: Vec<char> = CANDIDATES.chars().collect();
    let mut next_index: Option<u64> = None;
    for name in excluded {
        let text = name.as_str();
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => candidates.retain(|&candidate| candidate != c),
            (Some('v'), Some(digit)) if digit.is_ascii_digit() => {
                if let Ok(n) = text[1..].parse::<u64>() {
                    let n = n.saturating_add(1);
                    if next_index.map_or(true, |m| n > m) {
                        next_index = Some(n);
                    }
                }
            }
            _ => {}
        }
    }
    match candidates.first() {
        Some(&c) => Name::from_valid(c.to_string()),
        None => Name::from_valid(format!("v{}", next_index.unwrap_or(0))),
    }
}
