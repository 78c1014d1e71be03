//! Reference extraction from entity detail documents
//!
//! Walks the bases, nested classes and members of one documented entity and
//! collects every plausible mention of another entity. Nothing is resolved
//! here; primitive types and unknown names are dropped later, when the graph
//! builder looks references up in the catalog.

use crate::core::{Reference, ReferenceKind};
use crate::doxygen_parser::{ClassDef, MemberKind, TypeText};

/// Words that can appear in a type annotation but never name an entity
const TYPE_KEYWORDS: &[&str] = &[
    "const",
    "volatile",
    "mutable",
    "static",
    "inline",
    "virtual",
    "explicit",
    "constexpr",
    "struct",
    "class",
    "enum",
    "union",
    "typename",
    "template",
    "unsigned",
    "signed",
    "ref",
    "out",
    "in",
    "params",
    "readonly",
];

/// Collects the raw references made by one entity
#[derive(Debug, Default)]
pub struct ReferenceExtractor {
    references: Vec<Reference>,
}

impl ReferenceExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract every reference found in a class, struct or interface document
    pub fn from_class_def(class: &ClassDef) -> Self {
        let mut extractor = Self::new();

        for base in &class.base_refs {
            if let Some(refid) = &base.refid {
                extractor.push(Reference::linked(&base.name, refid, ReferenceKind::Base));
            }
            extractor.add_type_names(&base.name, ReferenceKind::Base);
        }

        for inner in &class.inner_classes {
            extractor.push(Reference::linked(
                &inner.name,
                &inner.refid,
                ReferenceKind::Nested,
            ));
        }

        for member in &class.members {
            match member.kind {
                MemberKind::Variable => {
                    if let Some(member_type) = &member.member_type {
                        extractor.add_type(member_type, ReferenceKind::Variable);
                    }
                }
                MemberKind::Function => {
                    if let Some(return_type) = &member.member_type {
                        extractor.add_type(return_type, ReferenceKind::ReturnType);
                    }
                    for param in &member.params {
                        extractor.add_type(param, ReferenceKind::Parameter);
                    }
                    for caller in &member.referenced_by {
                        extractor.push(Reference::linked(
                            "",
                            owner_of_member(caller),
                            ReferenceKind::ReferencedBy,
                        ));
                    }
                }
                MemberKind::Other => {}
            }
        }

        extractor
    }

    pub fn push(&mut self, reference: Reference) {
        self.references.push(reference);
    }

    /// Add the hyperlinks and every qualified name written in a type
    pub fn add_type(&mut self, type_text: &TypeText, kind: ReferenceKind) {
        for link in &type_text.links {
            self.push(Reference::linked(&link.name, &link.refid, kind));
        }
        self.add_type_names(&type_text.text, kind);
    }

    fn add_type_names(&mut self, text: &str, kind: ReferenceKind) {
        for name in split_type_names(text) {
            self.push(Reference::named(name, kind));
        }
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn into_references(self) -> Vec<Reference> {
        self.references
    }
}

/// Split a type annotation into the qualified names it mentions
///
/// Template arguments are unwrapped, so `Container<Foo, ns::Bar*>` yields
/// `Container`, `Foo` and `ns::Bar`.
pub fn split_type_names(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == ':' || c == '.'))
        .map(|token| token.trim_matches(|c| c == ':' || c == '.'))
        .filter(|token| !token.is_empty())
        .filter(|token| !token.starts_with(|c: char| c.is_ascii_digit()))
        .filter(|token| !TYPE_KEYWORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Refid of the compound owning a member refid
///
/// Doxygen builds member refids as `<compound refid>_1<hash>`, so everything
/// before the last underscore names the owner.
pub fn owner_of_member(member_refid: &str) -> &str {
    member_refid
        .rsplit_once('_')
        .map(|(owner, _)| owner)
        .unwrap_or(member_refid)
}
