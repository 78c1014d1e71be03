//! Core graph types
//!
//! This module contains the node and edge weights stored in the dependency
//! graph.

use crate::core::{Entity, ReferenceKind};

/// An entity as it appears in the dependency graph
#[derive(Debug, Clone, PartialEq)]
pub struct EntityNode {
    pub id: String,
    pub qualified_name: String,
    /// Label used in output; the qualified name unless a namespace filter
    /// shortened it
    pub display_name: String,
    pub group: Option<String>,
}

impl EntityNode {
    pub fn new(id: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        Self {
            id: id.into(),
            display_name: qualified_name.clone(),
            qualified_name,
            group: None,
        }
    }

    pub fn with_group(mut self, group: Option<String>) -> Self {
        self.group = group;
        self
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl From<&Entity> for EntityNode {
    fn from(entity: &Entity) -> Self {
        EntityNode::new(&entity.id, &entity.qualified_name).with_group(entity.group.clone())
    }
}

/// "source depends on target", recording the first reference that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyEdge {
    pub kind: ReferenceKind,
}

impl DependencyEdge {
    pub fn new(kind: ReferenceKind) -> Self {
        Self { kind }
    }
}
