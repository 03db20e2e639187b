//! Path canonicalization seam.
//!
//! Rule identity is the canonical path, so the resolver decides which
//! document entries merge. [`SystemResolver`] follows symlinks on the real
//! filesystem; [`LexicalResolver`] normalizes purely textually, which keeps
//! compiles independent of the host filesystem (tests, cross-host policy
//! checks).

use std::io;
use std::path::{Component, PathBuf};

/// Turns a raw configuration string into the canonical path used as a rule
/// key.
pub trait PathResolver {
    fn canonicalize(&self, raw: &str) -> io::Result<PathBuf>;
}

/// Resolves against the real filesystem; the executable must exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl PathResolver for SystemResolver {
    fn canonicalize(&self, raw: &str) -> io::Result<PathBuf> {
        std::fs::canonicalize(raw)
    }
}

/// Pure lexical normalization: requires an absolute path, collapses `.` and
/// parent segments, never touches the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalResolver;

impl PathResolver for LexicalResolver {
    fn canonicalize(&self, raw: &str) -> io::Result<PathBuf> {
        let path = PathBuf::from(raw);
        if !path.is_absolute() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("rule path is not absolute: {raw}"),
            ));
        }

        let mut out = PathBuf::new();
        for comp in path.components() {
            match comp {
                Component::RootDir | Component::Prefix(_) => out.push(comp),
                Component::CurDir => {}
                Component::ParentDir => {
                    // `/..` is `/`, as realpath resolves it.
                    out.pop();
                }
                Component::Normal(seg) => out.push(seg),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexical_normalizes_dot_segments() {
        let r = LexicalResolver;
        assert_eq!(
            r.canonicalize("/usr/./bin/../bin/ls").unwrap(),
            PathBuf::from("/usr/bin/ls")
        );
    }

    #[test]
    fn lexical_rejects_relative_paths() {
        let r = LexicalResolver;
        assert!(r.canonicalize("bin/ls").is_err());
    }

    #[test]
    fn lexical_clamps_parent_of_root() {
        let r = LexicalResolver;
        assert_eq!(
            r.canonicalize("/../etc/passwd").unwrap(),
            PathBuf::from("/etc/passwd")
        );
    }

    #[test]
    fn system_resolver_requires_existing_path() {
        let r = SystemResolver;
        assert!(r.canonicalize("/nonexistent/secpol/test/path").is_err());
    }
}
