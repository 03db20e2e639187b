//! Generic hierarchical policy document.
//!
//! The compiler does not deserialize into fixed structs: a policy document
//! is walked as a tree of typed nodes so that unknown sections pass through
//! untouched and malformed single fields can be tolerated where the merge
//! semantics call for it. `serde_yaml::Value` is that tree; this module adds
//! parse-time key normalization and dotted-path lookup over it.

pub use serde_yaml::Value as Node;

/// A parsed policy document.
#[derive(Debug, Clone)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Parse a document from raw bytes.
    ///
    /// Mapping keys are lowercased recursively, so `Path:` and `path:`
    /// address the same field.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_yaml::Error> {
        let root: Node = serde_yaml::from_slice(bytes)?;
        Ok(Self {
            root: lowercase_keys(root),
        })
    }

    pub fn from_str(text: &str) -> Result<Self, serde_yaml::Error> {
        Self::from_slice(text.as_bytes())
    }

    /// Look up a node by dotted path from the document root.
    #[must_use]
    pub fn lookup(&self, dotted: &str) -> Option<&Node> {
        lookup(&self.root, dotted)
    }
}

/// Look up a node by dotted path relative to `node`. Every intermediate
/// segment must be a mapping.
#[must_use]
pub fn lookup<'a>(node: &'a Node, dotted: &str) -> Option<&'a Node> {
    let mut cur = node;
    for segment in dotted.split('.') {
        cur = cur.as_mapping()?.get(segment)?;
    }
    Some(cur)
}

fn lowercase_keys(node: Node) -> Node {
    match node {
        Node::Mapping(map) => Node::Mapping(
            map.into_iter()
                .map(|(k, v)| {
                    let k = match k {
                        Node::String(s) => Node::String(s.to_lowercase()),
                        other => other,
                    };
                    (k, lowercase_keys(v))
                })
                .collect(),
        ),
        Node::Sequence(seq) => Node::Sequence(seq.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_lookup_descends_mappings() {
        let doc = Document::from_str("a:\n  b:\n    c: true\n").unwrap();
        assert_eq!(doc.lookup("a.b.c").and_then(Node::as_bool), Some(true));
        assert!(doc.lookup("a.b.d").is_none());
        assert!(doc.lookup("a.b.c.d").is_none());
    }

    #[test]
    fn keys_are_lowercased_on_parse() {
        let doc = Document::from_str("Applications:\n  - Path: /bin/ls\n").unwrap();
        let apps = doc.lookup("applications").unwrap();
        let entry = &apps.as_sequence().unwrap()[0];
        assert_eq!(
            lookup(entry, "path").and_then(Node::as_str),
            Some("/bin/ls")
        );
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        assert!(Document::from_str("applications: [unterminated").is_err());
    }
}
