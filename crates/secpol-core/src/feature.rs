//! Exploit-mitigation feature kinds and per-rule toggles.

use serde::{Deserialize, Serialize};

/// The closed set of mitigation kinds a policy may toggle.
///
/// Each kind maps to the kernel feature name the availability oracle is
/// queried with. Unknown keys in a policy document never construct a kind;
/// the compiler only probes the keys listed in [`FeatureKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    /// Non-executable page protection (PAGEEXEC).
    PageExec,
    /// Write-xor-execute mprotect restrictions.
    Mprotect,
    /// Stack-overflow / repeated-segfault guard.
    SegvGuard,
    /// Address-space layout randomization.
    Aslr,
    /// Shared-library base randomization.
    ShlibRandom,
}

impl FeatureKind {
    /// Every kind, in the order the compiler probes policy entries.
    pub const ALL: [FeatureKind; 5] = [
        FeatureKind::PageExec,
        FeatureKind::Mprotect,
        FeatureKind::SegvGuard,
        FeatureKind::Aslr,
        FeatureKind::ShlibRandom,
    ];

    /// Key under an entry's `features` mapping.
    #[must_use]
    pub fn config_key(self) -> &'static str {
        match self {
            FeatureKind::PageExec => "pageexec",
            FeatureKind::Mprotect => "mprotect",
            FeatureKind::SegvGuard => "segvguard",
            FeatureKind::Aslr => "aslr",
            FeatureKind::ShlibRandom => "shlibrandom",
        }
    }

    /// Kernel feature name used for the availability query.
    #[must_use]
    pub fn mitigation(self) -> &'static str {
        match self {
            FeatureKind::PageExec => "pax_pageexec",
            FeatureKind::Mprotect => "pax_mprotect",
            FeatureKind::SegvGuard => "pax_segvguard",
            FeatureKind::Aslr => "pax_aslr",
            FeatureKind::ShlibRandom => "pax_shlibrandom",
        }
    }
}

/// Whether a toggle turns its mitigation on or off for the rule's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureState {
    Enabled,
    Disabled,
}

impl From<bool> for FeatureState {
    fn from(enabled: bool) -> Self {
        if enabled {
            FeatureState::Enabled
        } else {
            FeatureState::Disabled
        }
    }
}

/// One (kind, state) directive within a rule.
///
/// A rule keeps every toggle the document produced for it, in document
/// order, including repeated toggles of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub kind: FeatureKind,
    pub state: FeatureState,
}

impl Feature {
    #[must_use]
    pub fn new(kind: FeatureKind, state: FeatureState) -> Self {
        Self { kind, state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mitigation_names_are_pax_prefixed() {
        for kind in FeatureKind::ALL {
            assert!(kind.mitigation().starts_with("pax_"));
        }
    }

    #[test]
    fn config_keys_are_distinct() {
        let keys: std::collections::HashSet<_> =
            FeatureKind::ALL.iter().map(|k| k.config_key()).collect();
        assert_eq!(keys.len(), FeatureKind::ALL.len());
    }

    #[test]
    fn state_from_bool() {
        assert_eq!(FeatureState::from(true), FeatureState::Enabled);
        assert_eq!(FeatureState::from(false), FeatureState::Disabled);
    }
}
