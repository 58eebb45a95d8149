//! Insertion-ordered email deduplication.

use std::collections::HashSet;

/// An ordered set of email addresses that keeps the first occurrence of each.
///
/// Comparison is exact: `A@x.io` and `a@x.io` are different entries, as are
/// addresses differing only in surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl EmailSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `email` unless it is already present. Returns true if it was added.
    pub fn insert(&mut self, email: impl Into<String>) -> bool {
        let email = email.into();
        if self.seen.contains(&email) {
            return false;
        }
        self.seen.insert(email.clone());
        self.ordered.push(email);
        true
    }

    pub fn contains(&self, email: &str) -> bool {
        self.seen.contains(email)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Emails in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

impl<S: Into<String>> Extend<S> for EmailSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for email in iter {
            self.insert(email);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for EmailSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl From<EmailSet> for Vec<String> {
    fn from(set: EmailSet) -> Self {
        set.into_vec()
    }
}
