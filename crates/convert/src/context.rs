//! Immutable traversal state threaded through recursive field visits.

use apollo_compiler::Name;

/// Combines a parameter-name prefix with a field name, underscore-joined.
pub(crate) fn combine_names(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}_{name}")
    }
}

/// Per-branch traversal state for the field visitor.
///
/// Contexts are values: each child visit derives its own from the parent and
/// sibling branches never observe one another, so depth or cycles in one
/// branch cannot affect another. `visited` holds the object types entered on
/// the current path; apollo-compiler keeps one canonical type per name in a
/// schema, so name equality is identity here.
#[derive(Debug, Clone)]
pub(crate) struct VisitContext {
    operation_path: String,
    prefix: String,
    visited: Vec<Name>,
}

impl VisitContext {
    pub(crate) fn root(operation_keyword: &str, field_name: &str) -> Self {
        Self {
            operation_path: format!("{operation_keyword}.{field_name}"),
            prefix: String::new(),
            visited: Vec::new(),
        }
    }

    /// Derives the context for visiting `field_name`, recording that
    /// `parent_type` has been entered on this path.
    pub(crate) fn nested(&self, field_name: &str, parent_type: Name) -> Self {
        let mut visited = self.visited.clone();
        visited.push(parent_type);
        Self {
            operation_path: format!("{}.{}", self.operation_path, field_name),
            prefix: combine_names(&self.prefix, field_name),
            visited,
        }
    }

    pub(crate) fn operation_path(&self) -> &str {
        &self.operation_path
    }

    pub(crate) fn prefix(&self) -> &str {
        &self.prefix
    }

    pub(crate) fn has_visited(&self, type_name: &Name) -> bool {
        self.visited.contains(type_name)
    }

    /// Number of object types entered on the current path.
    pub(crate) fn depth(&self) -> usize {
        self.visited.len()
    }
}
