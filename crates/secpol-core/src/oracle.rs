//! Availability oracle for exploit mitigations.
//!
//! The compiler never decides on its own whether a mitigation exists; it
//! asks an oracle. Tests and deterministic CI loads use [`FixedFeatures`];
//! a real policy load can probe the running kernel with [`SystemFeatures`].

use std::collections::BTreeSet;

use crate::feature::FeatureKind;

/// Reports whether a named mitigation is compiled into the running system.
pub trait FeatureOracle {
    fn is_supported(&self, mitigation: &str) -> bool;
}

/// Oracle over an explicit supported set.
#[derive(Debug, Clone, Default)]
pub struct FixedFeatures {
    supported: BTreeSet<String>,
}

impl FixedFeatures {
    /// Every known mitigation reported as present.
    #[must_use]
    pub fn all() -> Self {
        let supported = FeatureKind::ALL
            .iter()
            .map(|k| k.mitigation().to_string())
            .collect();
        Self { supported }
    }

    /// No mitigation reported as present.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Add one mitigation to the supported set.
    #[must_use]
    pub fn with(mut self, mitigation: &str) -> Self {
        self.supported.insert(mitigation.to_string());
        self
    }
}

impl FeatureOracle for FixedFeatures {
    fn is_supported(&self, mitigation: &str) -> bool {
        self.supported.contains(mitigation)
    }
}

/// Oracle backed by the running kernel's feature list.
///
/// Probes `kern.features.<mitigation>` through sysctl. On systems without
/// sysctl the probe fails and every mitigation reports unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFeatures;

impl FeatureOracle for SystemFeatures {
    fn is_supported(&self, mitigation: &str) -> bool {
        let name = format!("kern.features.{mitigation}");
        let out = std::process::Command::new("sysctl")
            .arg("-n")
            .arg(&name)
            .output();
        match out {
            Ok(out) if out.status.success() => {
                let present = String::from_utf8_lossy(&out.stdout).trim() == "1";
                tracing::debug!(%name, present, "probed kernel feature");
                present
            }
            _ => {
                tracing::debug!(%name, "kernel feature probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_covers_every_kind() {
        let oracle = FixedFeatures::all();
        for kind in FeatureKind::ALL {
            assert!(oracle.is_supported(kind.mitigation()));
        }
    }

    #[test]
    fn none_rejects_everything() {
        let oracle = FixedFeatures::none();
        assert!(!oracle.is_supported("pax_aslr"));
    }

    #[test]
    fn with_adds_a_single_name() {
        let oracle = FixedFeatures::none().with("pax_aslr");
        assert!(oracle.is_supported("pax_aslr"));
        assert!(!oracle.is_supported("pax_mprotect"));
    }
}
