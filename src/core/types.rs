//! Core type definitions
//!
//! Plain records describing what Doxygen documented: entities, the groups
//! that cluster them, and the raw references found between them.

use crate::doxygen_parser::CompoundKind;

/// A documented class, struct or interface
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Doxygen refid of the record that defined this entity
    pub id: String,
    pub qualified_name: String,
    pub kind: CompoundKind,
    /// Refid of the owning group, if any
    pub group: Option<String>,
}

/// A Doxygen group (`\defgroup`), rendered as a cluster
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: String,
    pub title: String,
}

/// Where in an entity's documentation a reference was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReferenceKind {
    Base,
    Nested,
    Variable,
    ReturnType,
    Parameter,
    /// A member of another entity calls into this one
    ReferencedBy,
}

impl ReferenceKind {
    /// Reverse references make the referenced entity depend on the scanned one
    pub fn is_reverse(&self) -> bool {
        matches!(self, ReferenceKind::ReferencedBy)
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::Base => write!(f, "base"),
            ReferenceKind::Nested => write!(f, "nested"),
            ReferenceKind::Variable => write!(f, "variable"),
            ReferenceKind::ReturnType => write!(f, "return type"),
            ReferenceKind::Parameter => write!(f, "parameter"),
            ReferenceKind::ReferencedBy => write!(f, "referenced by"),
        }
    }
}

/// An unresolved mention of another entity
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// Qualified name as written in the documentation
    pub name: String,
    /// Refid when Doxygen hyperlinked the mention
    pub refid: Option<String>,
    pub kind: ReferenceKind,
}

impl Reference {
    pub fn named(name: impl Into<String>, kind: ReferenceKind) -> Self {
        Self {
            name: name.into(),
            refid: None,
            kind,
        }
    }

    pub fn linked(name: impl Into<String>, refid: impl Into<String>, kind: ReferenceKind) -> Self {
        Self {
            name: name.into(),
            refid: Some(refid.into()),
            kind,
        }
    }
}
