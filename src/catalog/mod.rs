//! # Entity Catalog Module
//!
//! This module discovers the documented entities and groups of a project from
//! Doxygen's XML output and extracts the raw references each entity makes to
//! other entities.
//!
//! ## Key Components
//!
//! - **EntityCatalog**: Every class, struct and interface keyed by qualified
//!   name and refid, plus the groups that own them
//! - **ReferenceExtractor**: Turns one entity's detail document into raw
//!   [`Reference`](crate::core::Reference)s
//!
//! ## Example
//!
//! ```
//! use doxdepends::catalog::EntityCatalog;
//! use doxdepends::doxygen_parser::CompoundKind;
//!
//! let mut catalog = EntityCatalog::new();
//! catalog.insert_entity("classProj_1_1Engine", "Proj::Engine", CompoundKind::Class);
//! catalog.insert_entity("classProj_1_1Engine_1_1Part", "Proj::Engine::Part", CompoundKind::Class);
//! catalog.insert_group("group__core", "Core");
//! catalog.assign_group("classProj_1_1Engine", "group__core");
//! catalog.inherit_enclosing_groups();
//!
//! // Nested classes land in the group of their enclosing class
//! let part = catalog.get_by_name("Proj::Engine::Part").unwrap();
//! assert_eq!(part.group.as_deref(), Some("group__core"));
//! ```

mod catalog_impl;
mod reference_extractor;

pub use catalog_impl::*;
pub use reference_extractor::ReferenceExtractor;
