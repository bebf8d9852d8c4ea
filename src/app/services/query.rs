//! Tag search expressions.
//!
//! A query is a list of space-separated tags. Every term must hold for an
//! item to match; a leading `!` negates a term. `math !urgent` selects the
//! items tagged `math` that are not also tagged `urgent`.

use crate::app::domain::TaggedItem;

const NEGATION: char = '!';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Has(String),
    Lacks(String),
}

impl Term {
    fn matches(&self, item: &TaggedItem) -> bool {
        match self {
            Term::Has(tag) => item.has_tag(tag),
            Term::Lacks(tag) => !item.has_tag(tag),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    terms: Vec<Term>,
}

impl Query {
    /// Parse a raw search string.
    ///
    /// An empty string, or one whose first space-separated token is empty,
    /// yields the empty query that matches everything. Later empty tokens
    /// (runs of spaces) are skipped.
    pub fn parse(input: &str) -> Self {
        if input.split(' ').next().is_none_or(str::is_empty) {
            return Self::default();
        }

        let terms = input
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(|t| match t.strip_prefix(NEGATION) {
                Some(tag) => Term::Lacks(tag.to_string()),
                None => Term::Has(t.to_string()),
            })
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, item: &TaggedItem) -> bool {
        self.terms.iter().all(|term| term.matches(item))
    }

    /// The matching items, in their original order.
    pub fn filter<'a>(&self, items: &'a [TaggedItem]) -> Vec<&'a TaggedItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}
