//! Hierarchical grouping of node types for palette listings.

use std::collections::BTreeMap;
use std::fmt;

/// A namespace level. Type ids are split on `.`; the last segment names the
/// entry, everything before it names nested namespaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceTree {
    pub children: BTreeMap<String, NamespaceTree>,
    /// `(type_id, display_name)` of types living directly in this namespace.
    pub entries: Vec<(String, String)>,
}

impl NamespaceTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, type_id: &str, display_name: &str) {
        let mut level = self;
        let mut segments: Vec<&str> = type_id.split('.').collect();
        segments.pop();
        for segment in segments {
            level = level.children.entry(segment.to_string()).or_default();
        }
        level.entries.push((type_id.to_string(), display_name.to_string()));
    }

    pub fn child(&self, name: &str) -> Option<&NamespaceTree> {
        self.children.get(name)
    }

    /// Number of types in this namespace and below.
    pub fn len(&self) -> usize {
        self.entries.len() + self.children.values().map(NamespaceTree::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_level(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        for (type_id, display_name) in &self.entries {
            writeln!(f, "{:indent$}{} ({})", "", display_name, type_id, indent = indent)?;
        }
        for (name, child) in &self.children {
            writeln!(f, "{:indent$}{}/", "", name, indent = indent)?;
            child.write_level(f, indent + 2)?;
        }
        Ok(())
    }
}

impl fmt::Display for NamespaceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_level(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_namespaces() {
        let mut tree = NamespaceTree::new();
        tree.insert("math.add", "Add");
        tree.insert("math.int.abs", "Abs");
        tree.insert("print", "Print");

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.entries, vec![("print".to_string(), "Print".to_string())]);
        let math = tree.child("math").unwrap();
        assert_eq!(math.entries.len(), 1);
        assert_eq!(math.child("int").unwrap().entries[0].0, "math.int.abs");
    }

    #[test]
    fn test_display_indents_levels() {
        let mut tree = NamespaceTree::new();
        tree.insert("math.add", "Add");
        assert_eq!(tree.to_string(), "math/\n  Add (math.add)\n");
    }
}
