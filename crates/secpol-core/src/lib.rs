//! Compiles hierarchical security-policy documents into rulesets of
//! per-executable exploit-mitigation toggles.
//!
//! The compiled [`Ruleset`] is the hand-off product for a kernel-resident
//! enforcement layer: one [`Rule`] per canonical executable path, each
//! carrying the feature toggles the policy requested for it, validated
//! against the mitigations actually present on the running system.
//!
//! ```
//! use secpol_core::{Compiler, Document, FixedFeatures, LexicalResolver};
//!
//! let doc = Document::from_str(
//!     "applications:\n  - path: /bin/ls\n    features:\n      aslr: true\n",
//! )?;
//! let ruleset = Compiler::new(&LexicalResolver, &FixedFeatures::all()).compile(&doc)?;
//! assert_eq!(ruleset.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compiler;
pub mod doc;
mod error;
pub mod feature;
pub mod oracle;
pub mod resolver;
pub mod rule;

pub use compiler::{load_policy, Compiler};
pub use doc::Document;
pub use error::CompileError;
pub use feature::{Feature, FeatureKind, FeatureState};
pub use oracle::{FeatureOracle, FixedFeatures, SystemFeatures};
pub use resolver::{LexicalResolver, PathResolver, SystemResolver};
pub use rule::{Rule, Ruleset};
