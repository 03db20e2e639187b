use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a policy compile.
///
/// Every variant is fatal to the whole document: there is no per-entry
/// recovery and no partial ruleset on failure.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("cannot read policy file '{}': {source}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("policy document is not well-formed: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("application entry #{index} has no path")]
    MissingPath { index: usize },

    #[error("application entry #{index}: path is not a string")]
    PathNotString { index: usize },

    #[error("cannot resolve rule path '{path}': {source}")]
    Path {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("rule '{}': feature '{mitigation}' is not supported by the running system", path.display())]
    UnsupportedFeature {
        path: PathBuf,
        mitigation: &'static str,
    },
}
