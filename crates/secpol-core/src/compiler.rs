//! Ruleset compiler.
//!
//! Walks the `applications` section of a policy document, resolves one rule
//! per canonical executable path, validates each requested feature against
//! the availability oracle, and assigns ids once the whole document has
//! been processed. Any failure aborts the entire compile; the enforcement
//! layer never sees a partial ruleset.

use std::path::Path;

use crate::doc::{self, Document, Node};
use crate::error::CompileError;
use crate::feature::{FeatureKind, FeatureState};
use crate::oracle::FeatureOracle;
use crate::resolver::PathResolver;
use crate::rule::{Rule, Ruleset};

/// Compiles policy documents against a path resolver and a feature oracle.
pub struct Compiler<'a> {
    resolver: &'a dyn PathResolver,
    oracle: &'a dyn FeatureOracle,
}

impl<'a> Compiler<'a> {
    #[must_use]
    pub fn new(resolver: &'a dyn PathResolver, oracle: &'a dyn FeatureOracle) -> Self {
        Self { resolver, oracle }
    }

    /// Compile a parsed document into a finalized ruleset.
    ///
    /// A document without an `applications` section compiles to an empty
    /// ruleset.
    pub fn compile(&self, document: &Document) -> Result<Ruleset, CompileError> {
        let mut ruleset = Ruleset::new();

        if let Some(apps) = document.lookup("applications") {
            self.compile_applications(apps, &mut ruleset)?;
        }

        ruleset.finalize_ids();
        tracing::debug!(rules = ruleset.len(), "compiled ruleset");
        Ok(ruleset)
    }

    fn compile_applications(
        &self,
        apps: &Node,
        ruleset: &mut Ruleset,
    ) -> Result<(), CompileError> {
        let entries = apps.as_sequence().map(Vec::as_slice).unwrap_or_default();

        for (index, entry) in entries.iter().enumerate() {
            self.compile_entry(index, entry, ruleset)?;
        }
        Ok(())
    }

    /// One application entry: extract and resolve the path, then merge its
    /// feature directives onto the rule for that path.
    fn compile_entry(
        &self,
        index: usize,
        entry: &Node,
        ruleset: &mut Ruleset,
    ) -> Result<(), CompileError> {
        let raw = match doc::lookup(entry, "path") {
            None => return Err(CompileError::MissingPath { index }),
            Some(node) => node
                .as_str()
                .ok_or(CompileError::PathNotString { index })?,
        };

        let canonical = self
            .resolver
            .canonicalize(raw)
            .map_err(|source| CompileError::Path {
                path: raw.to_string(),
                source,
            })?;

        // Lookup before create: repeated entries for the same canonical
        // path accumulate onto one rule.
        match ruleset.find_mut(&canonical) {
            Some(rule) => self.merge_features(entry, rule)?,
            None => {
                let mut rule = Rule::new(canonical);
                self.merge_features(entry, &mut rule)?;
                ruleset.link(rule);
            }
        }
        Ok(())
    }

    /// Append every recognized boolean feature directive of `entry` to
    /// `rule`, in the fixed probe order of [`FeatureKind::ALL`].
    ///
    /// A missing or non-mapping `features` field contributes nothing. A
    /// non-boolean value under a recognized key is skipped without error;
    /// the rest of the entry still applies.
    fn merge_features(&self, entry: &Node, rule: &mut Rule) -> Result<(), CompileError> {
        let Some(features) = doc::lookup(entry, "features").and_then(Node::as_mapping) else {
            return Ok(());
        };

        for kind in FeatureKind::ALL {
            if let Some(value) = features.get(kind.config_key()) {
                if let Some(enabled) = value.as_bool() {
                    self.append_feature(rule, kind, FeatureState::from(enabled))?;
                }
            }
        }
        Ok(())
    }

    /// Validate one toggle against the oracle and append it.
    ///
    /// An unsupported mitigation invalidates the whole document, not just
    /// this entry.
    fn append_feature(
        &self,
        rule: &mut Rule,
        kind: FeatureKind,
        state: FeatureState,
    ) -> Result<(), CompileError> {
        if !self.oracle.is_supported(kind.mitigation()) {
            return Err(CompileError::UnsupportedFeature {
                path: rule.path.clone(),
                mitigation: kind.mitigation(),
            });
        }
        rule.push_feature(kind, state);
        Ok(())
    }
}

/// Load and compile a policy file: read, parse, compile, finalize ids.
pub fn load_policy(
    path: &Path,
    resolver: &dyn PathResolver,
    oracle: &dyn FeatureOracle,
) -> Result<Ruleset, CompileError> {
    let bytes = std::fs::read(path).map_err(|source| CompileError::Source {
        path: path.to_path_buf(),
        source,
    })?;
    let document = Document::from_slice(&bytes)?;
    Compiler::new(resolver, oracle).compile(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::FixedFeatures;
    use crate::resolver::LexicalResolver;

    fn compile(yaml: &str) -> Result<Ruleset, CompileError> {
        let document = Document::from_str(yaml).expect("fixture parses");
        Compiler::new(&LexicalResolver, &FixedFeatures::all()).compile(&document)
    }

    #[test]
    fn empty_document_compiles_to_empty_ruleset() {
        let set = compile("other_section: 1\n").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn entry_without_features_still_creates_a_rule() {
        let set = compile("applications:\n  - path: /bin/ls\n").unwrap();
        assert_eq!(set.len(), 1);
        let rule = set.iter().next().unwrap();
        assert!(rule.features.is_empty());
    }

    #[test]
    fn non_mapping_features_field_is_tolerated() {
        let set = compile("applications:\n  - path: /bin/ls\n    features: nope\n").unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.iter().next().unwrap().features.is_empty());
    }
}
