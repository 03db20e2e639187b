//! Compiled rules and the ruleset they are linked into.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::feature::{Feature, FeatureKind, FeatureState};

/// One rule per distinct canonical executable path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Stable sequence number, assigned by [`Ruleset::finalize_ids`] once
    /// the whole document has been compiled.
    pub id: u32,
    /// Canonical executable path; unique key within a ruleset.
    pub path: PathBuf,
    /// Feature toggles in the order the document produced them. Repeated
    /// toggles of the same kind are all retained.
    pub features: Vec<Feature>,
}

impl Rule {
    /// New rule with no toggles yet. The id is provisional until
    /// finalization.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            id: 0,
            path,
            features: Vec::new(),
        }
    }

    /// Append a toggle. Never overwrites or deduplicates earlier entries.
    pub fn push_feature(&mut self, kind: FeatureKind, state: FeatureState) {
        self.features.push(Feature::new(kind, state));
    }
}

/// The compiled collection of rules produced by one policy load.
///
/// Order contract: the first rule ever created is the permanent head; each
/// later newly created rule is linked in immediately after the head. The
/// enforcement layer receives rules in exactly this order, and ids are a
/// function of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    rules: Vec<Rule>,
}

impl Ruleset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the rule for a canonical path, if one was already linked.
    #[must_use]
    pub fn find_mut(&mut self, path: &Path) -> Option<&mut Rule> {
        self.rules.iter_mut().find(|r| r.path == path)
    }

    /// Link a newly created rule into the set.
    ///
    /// The first rule becomes the head and never moves; every later rule is
    /// spliced in directly behind the head, pushing the previous second
    /// element back.
    pub fn link(&mut self, rule: Rule) {
        if self.rules.is_empty() {
            self.rules.push(rule);
        } else {
            self.rules.insert(1, rule);
        }
    }

    /// Walk the final order head to tail and assign dense ids `0..n`.
    pub fn finalize_ids(&mut self) {
        for (id, rule) in self.rules.iter_mut().enumerate() {
            rule.id = id as u32;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a Ruleset {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
