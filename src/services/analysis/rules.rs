//! Ordered, declarative header rules shared by the standard and external mappers.
//!
//! A rule table is a slice of [`Rule`]s evaluated top to bottom; the first
//! rule whose [`Predicate`] accepts the header wins.

use crate::models::FieldType;

/// Case-insensitive test against a header name, optionally gated on type.
#[derive(Debug, Clone, Copy)]
pub struct Predicate {
    pub contains_all: &'static [&'static str],
    pub contains_any: &'static [&'static str],
    pub exact: Option<&'static str>,
    pub types: &'static [FieldType],
}

impl Predicate {
    /// Accepts every header.
    pub const ANY: Predicate = Predicate {
        contains_all: &[],
        contains_any: &[],
        exact: None,
        types: &[],
    };

    pub const fn all(words: &'static [&'static str]) -> Self {
        Predicate {
            contains_all: words,
            ..Predicate::ANY
        }
    }

    pub const fn exact(name: &'static str) -> Self {
        Predicate {
            exact: Some(name),
            ..Predicate::ANY
        }
    }

    pub const fn typed(types: &'static [FieldType]) -> Self {
        Predicate {
            types,
            ..Predicate::ANY
        }
    }

    pub const fn with_all(self, words: &'static [&'static str]) -> Self {
        Predicate {
            contains_all: words,
            ..self
        }
    }

    pub const fn with_any(self, words: &'static [&'static str]) -> Self {
        Predicate {
            contains_any: words,
            ..self
        }
    }

    /// `header` must already be lowercased.
    pub fn matches(&self, header: &str, field_type: FieldType) -> bool {
        if let Some(exact) = self.exact {
            if header != exact {
                return false;
            }
        }
        if !self.types.is_empty() && !self.types.contains(&field_type) {
            return false;
        }
        if !self.contains_all.iter().all(|word| header.contains(word)) {
            return false;
        }
        self.contains_any.is_empty() || self.contains_any.iter().any(|word| header.contains(word))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule<T> {
    pub when: Predicate,
    pub then: T,
}

impl<T> Rule<T> {
    pub const fn new(when: Predicate, then: T) -> Self {
        Rule { when, then }
    }
}

/// Returns the payload of the first rule accepting `header`.
pub fn first_match<'a, T>(rules: &'a [Rule<T>], header: &str, field_type: FieldType) -> Option<&'a T> {
    let header = header.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.when.matches(&header, field_type))
        .map(|rule| &rule.then)
}

/// `"order total"` -> `"Order total"`.
pub fn capitalize(header: &str) -> String {
    let mut chars = header.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
