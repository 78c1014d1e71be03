use std::collections::HashMap;
use std::path::Path;

use miette::{Result, WrapErr};

use crate::constants::input::DETAIL_EXTENSION;
use crate::core::{Entity, Group};
use crate::doxygen_parser::{CompoundKind, DoxygenIndex, GroupDef};
use crate::progress::ProgressReporter;

/// Index of every documented entity and group of one run
///
/// Entities keep the position of their first appearance in `index.xml`, so
/// iteration order is stable across runs.
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    entities: Vec<Entity>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
    groups: Vec<Group>,
    groups_by_id: HashMap<String, usize>,
}

impl EntityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the catalog from `index.xml` and the group documents it lists
    pub fn load(xml_dir: &Path, progress: Option<&ProgressReporter>) -> Result<Self> {
        let index = DoxygenIndex::parse_dir(xml_dir).wrap_err("Failed to read the Doxygen index")?;

        let mut catalog = Self::new();
        let mut memberships = Vec::new();

        for compound in &index.compounds {
            match compound.kind {
                kind if kind.is_entity() => {
                    catalog.insert_entity(&compound.refid, &compound.name, kind);
                }
                CompoundKind::Group => {
                    let path = detail_path(xml_dir, &compound.refid);
                    if let Some(p) = progress {
                        p.processing_file(compound.kind.as_str(), &path);
                    }

                    let group = GroupDef::parse_file(&path).wrap_err_with(|| {
                        format!("Failed to read group '{}'", compound.name)
                    })?;
                    let title = group.title.unwrap_or_else(|| compound.name.clone());
                    catalog.insert_group(&compound.refid, &title);
                    memberships.extend(
                        group
                            .inner_classes
                            .into_iter()
                            .map(|member| (member, compound.refid.clone())),
                    );
                }
                _ => {}
            }
        }

        // Groups may precede the entities they own in the index
        for (entity_id, group_id) in memberships {
            catalog.assign_group(&entity_id, &group_id);
        }
        catalog.inherit_enclosing_groups();

        Ok(catalog)
    }

    /// Add an entity, replacing any earlier entity with the same qualified name
    ///
    /// Returns the entity's catalog position.
    pub fn insert_entity(&mut self, id: &str, qualified_name: &str, kind: CompoundKind) -> usize {
        let position = match self.by_name.get(qualified_name) {
            Some(&position) => {
                let existing = &mut self.entities[position];
                existing.id = id.to_string();
                existing.kind = kind;
                position
            }
            None => {
                self.entities.push(Entity {
                    id: id.to_string(),
                    qualified_name: qualified_name.to_string(),
                    kind,
                    group: None,
                });
                let position = self.entities.len() - 1;
                self.by_name.insert(qualified_name.to_string(), position);
                position
            }
        };
        self.by_id.insert(id.to_string(), position);
        position
    }

    pub fn insert_group(&mut self, id: &str, title: &str) {
        let group = Group {
            id: id.to_string(),
            title: title.to_string(),
        };
        match self.groups_by_id.get(id) {
            Some(&position) => self.groups[position] = group,
            None => {
                self.groups.push(group);
                self.groups_by_id.insert(id.to_string(), self.groups.len() - 1);
            }
        }
    }

    /// Place an entity in a group; unknown entities or groups are ignored
    pub fn assign_group(&mut self, entity_id: &str, group_id: &str) -> bool {
        if !self.groups_by_id.contains_key(group_id) {
            return false;
        }
        match self.by_id.get(entity_id) {
            Some(&position) => {
                self.entities[position].group = Some(group_id.to_string());
                true
            }
            None => false,
        }
    }

    /// Give ungrouped nested entities the group of their nearest grouped
    /// enclosing entity
    pub fn inherit_enclosing_groups(&mut self) {
        let inherited: Vec<(usize, String)> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, entity)| entity.group.is_none())
            .filter_map(|(position, entity)| {
                let mut current = entity.qualified_name.as_str();
                while let Some(outer) = enclosing_name(current) {
                    let outer_entity = &self.entities[*self.by_name.get(outer)?];
                    if let Some(group) = &outer_entity.group {
                        return Some((position, group.clone()));
                    }
                    current = outer;
                }
                None
            })
            .collect();

        for (position, group) in inherited {
            self.entities[position].group = Some(group);
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn position_of_name(&self, qualified_name: &str) -> Option<usize> {
        self.by_name.get(qualified_name).copied()
    }

    pub fn position_of_id(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn get_by_name(&self, qualified_name: &str) -> Option<&Entity> {
        self.position_of_name(qualified_name)
            .map(|position| &self.entities[position])
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Entity> {
        self.position_of_id(id).map(|position| &self.entities[position])
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups_by_id.get(id).map(|&position| &self.groups[position])
    }

    /// Entities owned by the given group, in catalog order
    pub fn members_of(&self, group_id: &str) -> Vec<&Entity> {
        self.entities
            .iter()
            .filter(|entity| entity.group.as_deref() == Some(group_id))
            .collect()
    }

    /// Entities that belong to no group, in catalog order
    pub fn ungrouped(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|entity| entity.group.is_none())
    }
}

/// Path of the detail document Doxygen writes for a compound
pub fn detail_path(xml_dir: &Path, refid: &str) -> std::path::PathBuf {
    xml_dir.join(format!("{refid}.{DETAIL_EXTENSION}"))
}

/// Name of the scope enclosing a qualified name (`A::B::C` -> `A::B`)
fn enclosing_name(qualified_name: &str) -> Option<&str> {
    let cpp = qualified_name.rfind("::");
    let dotted = qualified_name.rfind('.');
    match (cpp, dotted) {
        (Some(c), Some(d)) if d > c => Some(&qualified_name[..d]),
        (Some(c), _) => Some(&qualified_name[..c]),
        (None, Some(d)) => Some(&qualified_name[..d]),
        (None, None) => None,
    }
    .filter(|outer| !outer.is_empty())
}
