//! Prism assignment and fuzzy spell-name resolution
//!
//! A prism is a thematic grouping of spells; a spell may belong to zero,
//! one, or several prisms. The mapping table is keyed by spell name, and
//! lookups tolerate the casing, whitespace, and punctuation drift that
//! free-text spell names accumulate.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Normalize a spell name for fuzzy comparison.
///
/// Lowercases, trims, collapses whitespace runs to a single space, unifies
/// apostrophe/quote variants to `'` and en/em dashes to `-`, and strips
/// every character that is not alphanumeric, whitespace, apostrophe, or
/// hyphen.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;
    for raw in lowered.trim().chars() {
        let c = match raw {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{201C}' | '\u{201D}' | '"'
            | '\u{2032}' | '`' | '\u{00B4}' => '\'',
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            other => other,
        };
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if !(c.is_alphanumeric() || c == '\'' || c == '-') {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

/// The loose comparison key: the normalized form with everything
/// non-alphanumeric removed. Catches punctuation-only differences the
/// first normalization pass does not unify ("Ray-of-Frost" vs
/// "Ray of Frost").
pub fn strict_key(name: &str) -> String {
    normalize_name(name)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// An ordered, non-empty list of prism names assigned to a spell.
///
/// An unmapped spell is represented by the absence of an assignment,
/// never by an empty list. At the serialization boundary a single-valued
/// assignment collapses to a bare string; multi-valued assignments are
/// lists. Both shapes deserialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrismAssignment(Vec<String>);

impl PrismAssignment {
    /// Build an assignment, returning `None` for an empty list so that
    /// "no prisms" can only ever be represented by absence.
    pub fn new(prisms: Vec<String>) -> Option<Self> {
        if prisms.is_empty() {
            None
        } else {
            Some(Self(prisms))
        }
    }

    pub fn single(prism: impl Into<String>) -> Self {
        Self(vec![prism.into()])
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, prism: &str) -> bool {
        self.0.iter().any(|p| p == prism)
    }

    /// The assignment with one prism removed, or `None` if nothing is
    /// left (the entry must then disappear entirely).
    pub fn without(&self, prism: &str) -> Option<Self> {
        let rest: Vec<String> = self.0.iter().filter(|p| *p != prism).cloned().collect();
        Self::new(rest)
    }
}

impl Serialize for PrismAssignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.len() == 1 {
            serializer.serialize_str(&self.0[0])
        } else {
            self.0.serialize(serializer)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PrismAssignmentRepr {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for PrismAssignment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match PrismAssignmentRepr::deserialize(deserializer)? {
            PrismAssignmentRepr::One(prism) => Ok(Self(vec![prism])),
            PrismAssignmentRepr::Many(prisms) => PrismAssignment::new(prisms)
                .ok_or_else(|| D::Error::custom("prism assignment cannot be an empty list")),
        }
    }
}

/// The mapping table from spell name to prism assignment.
///
/// Backed by a `BTreeMap` so iteration order, and therefore fuzzy-match
/// tie-breaking, is deterministic: when several keys normalize
/// identically, the lexicographically smallest key wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrismTable {
    entries: BTreeMap<String, PrismAssignment>,
}

impl PrismTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PrismAssignment)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Assign prisms to a spell name, replacing any previous assignment.
    pub fn assign(&mut self, spell_name: impl Into<String>, assignment: PrismAssignment) {
        self.entries.insert(spell_name.into(), assignment);
    }

    /// Drop the entry for a spell name (exact key).
    pub fn remove_spell(&mut self, spell_name: &str) -> Option<PrismAssignment> {
        self.entries.remove(spell_name)
    }

    /// Strip a prism from every assignment, dropping entries that become
    /// empty. Used when a prism itself is deleted.
    pub fn remove_prism(&mut self, prism: &str) {
        let mut remaining = BTreeMap::new();
        for (name, assignment) in &self.entries {
            if let Some(rest) = assignment.without(prism) {
                remaining.insert(name.clone(), rest);
            }
        }
        self.entries = remaining;
    }

    /// Exact-key lookup.
    pub fn get(&self, spell_name: &str) -> Option<&PrismAssignment> {
        self.entries.get(spell_name)
    }

    /// Resolve a free-text spell name to its assignment.
    ///
    /// Three passes, first match wins:
    /// 1. exact key match,
    /// 2. normalized-form equality ([`normalize_name`]),
    /// 3. stripped-key equality ([`strict_key`]).
    ///
    /// Returns `None` for an unmapped name; that is a valid terminal
    /// state, not an error.
    pub fn resolve(&self, query: &str) -> Option<&PrismAssignment> {
        if let Some(assignment) = self.entries.get(query) {
            return Some(assignment);
        }

        let normalized = normalize_name(query);
        if !normalized.is_empty() {
            if let Some(assignment) = self
                .entries
                .iter()
                .find(|(key, _)| normalize_name(key) == normalized)
                .map(|(_, assignment)| assignment)
            {
                return Some(assignment);
            }
        }

        let stripped = strict_key(query);
        if stripped.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(key, _)| strict_key(key) == stripped)
            .map(|(_, assignment)| assignment)
    }
}
