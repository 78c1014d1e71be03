use std::path::Path;

use miette::{NamedSource, SourceSpan};
use roxmltree::{Document, Node, ParsingOptions};

use crate::constants::input::INDEX_FILE;
use crate::error::{DoxDependsError, XmlParseError};

/// Kind of compound listed in `index.xml`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundKind {
    Class,
    Struct,
    Interface,
    Group,
    Other,
}

impl CompoundKind {
    fn from_attribute(kind: &str) -> Self {
        match kind {
            "class" => CompoundKind::Class,
            "struct" => CompoundKind::Struct,
            "interface" => CompoundKind::Interface,
            "group" => CompoundKind::Group,
            _ => CompoundKind::Other,
        }
    }

    /// Classes, structs and interfaces become graph entities
    pub fn is_entity(&self) -> bool {
        matches!(
            self,
            CompoundKind::Class | CompoundKind::Struct | CompoundKind::Interface
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompoundKind::Class => "class",
            CompoundKind::Struct => "struct",
            CompoundKind::Interface => "interface",
            CompoundKind::Group => "group",
            CompoundKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndexCompound {
    pub refid: String,
    pub kind: CompoundKind,
    pub name: String,
}

/// The compounds enumerated by `index.xml`, in document order
#[derive(Debug, Clone, Default)]
pub struct DoxygenIndex {
    pub compounds: Vec<IndexCompound>,
}

/// Contents of a group detail document
#[derive(Debug, Clone)]
pub struct GroupDef {
    pub refid: String,
    pub title: Option<String>,
    pub inner_classes: Vec<String>,
}

/// A type annotation: its flattened text plus any hyperlinks Doxygen resolved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeText {
    pub text: String,
    pub links: Vec<TypeLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeLink {
    pub refid: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Variable,
    Function,
    Other,
}

#[derive(Debug, Clone)]
pub struct MemberDef {
    pub kind: MemberKind,
    pub member_type: Option<TypeText>,
    pub params: Vec<TypeText>,
    pub referenced_by: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct BaseRef {
    pub refid: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct InnerClass {
    pub refid: String,
    pub name: String,
}

/// Contents of a class, struct or interface detail document
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub refid: String,
    pub name: Option<String>,
    pub base_refs: Vec<BaseRef>,
    pub inner_classes: Vec<InnerClass>,
    pub members: Vec<MemberDef>,
}

impl DoxygenIndex {
    /// Read `index.xml` from the given XML directory
    pub fn parse_dir(xml_dir: &Path) -> Result<Self, DoxDependsError> {
        let path = xml_dir.join(INDEX_FILE);
        let content = read_xml(&path)?;
        Self::parse_str(&path.display().to_string(), &content)
    }

    pub fn parse_str(file: &str, content: &str) -> Result<Self, DoxDependsError> {
        let doc = parse_document(file, content)?;
        let mut compounds = Vec::new();

        for compound in children_named(doc.root_element(), "compound") {
            let kind = CompoundKind::from_attribute(&required_attr(compound, "kind", file)?);
            if kind == CompoundKind::Other {
                continue;
            }
            let refid = required_attr(compound, "refid", file)?;
            let name = child_text(compound, "name").ok_or_else(|| missing(file, "element <name>"))?;
            compounds.push(IndexCompound { refid, kind, name });
        }

        Ok(Self { compounds })
    }
}

impl GroupDef {
    pub fn parse_file(path: &Path) -> Result<Self, DoxDependsError> {
        let content = read_xml(path)?;
        Self::parse_str(&path.display().to_string(), &content)
    }

    pub fn parse_str(file: &str, content: &str) -> Result<Self, DoxDependsError> {
        let doc = parse_document(file, content)?;
        let def = compounddef(&doc, file)?;

        let inner_classes = children_named(def, "innerclass")
            .map(|inner| required_attr(inner, "refid", file))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            refid: required_attr(def, "id", file)?,
            title: child_text(def, "title"),
            inner_classes,
        })
    }
}

impl ClassDef {
    pub fn parse_file(path: &Path) -> Result<Self, DoxDependsError> {
        let content = read_xml(path)?;
        Self::parse_str(&path.display().to_string(), &content)
    }

    pub fn parse_str(file: &str, content: &str) -> Result<Self, DoxDependsError> {
        let doc = parse_document(file, content)?;
        let def = compounddef(&doc, file)?;

        let base_refs = children_named(def, "basecompoundref")
            .map(|base| BaseRef {
                refid: base.attribute("refid").map(str::to_string),
                name: node_text(base),
            })
            .collect();

        let inner_classes = children_named(def, "innerclass")
            .map(|inner| {
                Ok(InnerClass {
                    refid: required_attr(inner, "refid", file)?,
                    name: node_text(inner),
                })
            })
            .collect::<Result<Vec<_>, DoxDependsError>>()?;

        let mut members = Vec::new();
        for section in children_named(def, "sectiondef") {
            for member in children_named(section, "memberdef") {
                members.push(parse_member(member, file)?);
            }
        }

        Ok(Self {
            refid: required_attr(def, "id", file)?,
            name: child_text(def, "compoundname"),
            base_refs,
            inner_classes,
            members,
        })
    }
}

fn parse_member(member: Node<'_, '_>, file: &str) -> Result<MemberDef, DoxDependsError> {
    let kind = match required_attr(member, "kind", file)?.as_str() {
        "variable" => MemberKind::Variable,
        "function" => MemberKind::Function,
        _ => MemberKind::Other,
    };

    let params = children_named(member, "param")
        .filter_map(|param| children_named(param, "type").next())
        .map(type_text)
        .collect();

    let referenced_by = children_named(member, "referencedby")
        .map(|by| required_attr(by, "refid", file))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MemberDef {
        kind,
        member_type: children_named(member, "type").next().map(type_text),
        params,
        referenced_by,
    })
}

fn type_text(node: Node<'_, '_>) -> TypeText {
    let links = node
        .descendants()
        .filter(|n| n.has_tag_name("ref"))
        .filter_map(|r| {
            r.attribute("refid").map(|refid| TypeLink {
                refid: refid.to_string(),
                name: node_text(r),
            })
        })
        .collect();

    TypeText {
        text: node_text(node),
        links,
    }
}

/// Read an XML file, mapping a missing file to `InputNotFound`
pub fn read_xml(path: &Path) -> Result<String, DoxDependsError> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DoxDependsError::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DoxDependsError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

fn parse_document<'input>(
    file: &str,
    content: &'input str,
) -> Result<Document<'input>, DoxDependsError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };

    Document::parse_with_options(content, options).map_err(|e| {
        let pos = e.pos();
        let span = byte_offset(content, pos.row, pos.col).map(|offset| SourceSpan::new(offset.into(), 1));

        DoxDependsError::MalformedInput(Box::new(XmlParseError {
            file: file.to_string(),
            source_code: NamedSource::new(file, content.to_string()),
            span,
            source: e,
        }))
    })
}

/// Convert a 1-based row/column into a byte offset within `content`
fn byte_offset(content: &str, row: u32, col: u32) -> Option<usize> {
    let mut offset = 0;
    for (index, line) in content.split_inclusive('\n').enumerate() {
        if index + 1 == row as usize {
            let column = line
                .char_indices()
                .nth(col.saturating_sub(1) as usize)
                .map(|(i, _)| i)
                .unwrap_or(line.len());
            return Some(offset + column).filter(|&o| o < content.len());
        }
        offset += line.len();
    }
    None
}

fn compounddef<'a, 'input>(
    doc: &'a Document<'input>,
    file: &str,
) -> Result<Node<'a, 'input>, DoxDependsError> {
    children_named(doc.root_element(), "compounddef")
        .next()
        .ok_or_else(|| missing(file, "element <compounddef>"))
}

fn children_named<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |n| n.has_tag_name(name))
}

fn child_text(node: Node<'_, '_>, name: &'static str) -> Option<String> {
    children_named(node, name)
        .next()
        .map(node_text)
        .filter(|text| !text.is_empty())
}

/// Concatenated text of a node and all its descendants, trimmed
fn node_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn required_attr(node: Node<'_, '_>, name: &str, file: &str) -> Result<String, DoxDependsError> {
    node.attribute(name).map(str::to_string).ok_or_else(|| {
        missing(
            file,
            &format!("attribute '{}' on <{}>", name, node.tag_name().name()),
        )
    })
}

fn missing(file: &str, field: &str) -> DoxDependsError {
    DoxDependsError::MissingField {
        file: file.to_string(),
        field: field.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const INDEX: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygenindex version="1.9.1">
  <compound refid="classProj_1_1Widget" kind="class"><name>Proj::Widget</name>
    <member refid="classProj_1_1Widget_1a0" kind="function"><name>Draw</name></member>
  </compound>
  <compound refid="structProj_1_1Point" kind="struct"><name>Proj::Point</name></compound>
  <compound refid="namespaceProj" kind="namespace"><name>Proj</name></compound>
  <compound refid="group__core" kind="group"><name>core</name></compound>
</doxygenindex>
"#;

    const CLASS: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.9.1">
  <compounddef id="classProj_1_1Widget" kind="class" language="C++">
    <compoundname>Proj::Widget</compoundname>
    <basecompoundref refid="classProj_1_1Base" prot="public" virt="non-virtual">Proj::Base</basecompoundref>
    <basecompoundref prot="public" virt="non-virtual">std::enable_shared_from_this&lt; Widget &gt;</basecompoundref>
    <innerclass refid="classProj_1_1Widget_1_1Impl" prot="private">Proj::Widget::Impl</innerclass>
    <sectiondef kind="private-attrib">
      <memberdef kind="variable" id="classProj_1_1Widget_1a1">
        <type>std::vector&lt; <ref refid="structProj_1_1Point" kindref="compound">Point</ref> &gt;</type>
        <name>points_</name>
      </memberdef>
    </sectiondef>
    <sectiondef kind="public-func">
      <memberdef kind="function" id="classProj_1_1Widget_1a0">
        <type>void</type>
        <name>Draw</name>
        <param><type><ref refid="classProj_1_1Canvas" kindref="compound">Canvas</ref> &amp;</type><declname>canvas</declname></param>
        <param><declname>untyped</declname></param>
        <referencedby refid="classProj_1_1Scene_1a9" compoundref="scene_8cpp">Proj::Scene::Render</referencedby>
      </memberdef>
      <memberdef kind="typedef" id="classProj_1_1Widget_1a2"><type>int</type><name>Id</name></memberdef>
    </sectiondef>
  </compounddef>
</doxygen>
"#;

    #[test]
    fn test_parse_index_keeps_entities_and_groups() {
        let index = DoxygenIndex::parse_str("index.xml", INDEX).unwrap();

        let kinds: Vec<_> = index.compounds.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CompoundKind::Class,
                CompoundKind::Struct,
                CompoundKind::Group
            ]
        );
        assert_eq!(index.compounds[0].name, "Proj::Widget");
        assert_eq!(index.compounds[0].refid, "classProj_1_1Widget");
        assert_eq!(index.compounds[2].name, "core");
    }

    #[test]
    fn test_parse_class_def() {
        let class = ClassDef::parse_str("classProj_1_1Widget.xml", CLASS).unwrap();

        assert_eq!(class.refid, "classProj_1_1Widget");
        assert_eq!(class.name.as_deref(), Some("Proj::Widget"));

        assert_eq!(class.base_refs.len(), 2);
        assert_eq!(class.base_refs[0].refid.as_deref(), Some("classProj_1_1Base"));
        assert_eq!(class.base_refs[1].refid, None);
        assert_eq!(class.base_refs[1].name, "std::enable_shared_from_this< Widget >");

        assert_eq!(class.inner_classes.len(), 1);
        assert_eq!(class.inner_classes[0].name, "Proj::Widget::Impl");

        assert_eq!(class.members.len(), 3);
        let variable = &class.members[0];
        assert_eq!(variable.kind, MemberKind::Variable);
        let var_type = variable.member_type.as_ref().unwrap();
        assert_eq!(var_type.text, "std::vector< Point >");
        assert_eq!(
            var_type.links,
            vec![TypeLink {
                refid: "structProj_1_1Point".to_string(),
                name: "Point".to_string(),
            }]
        );

        let function = &class.members[1];
        assert_eq!(function.kind, MemberKind::Function);
        assert_eq!(function.params.len(), 1);
        assert_eq!(function.params[0].links[0].refid, "classProj_1_1Canvas");
        assert_eq!(function.referenced_by, vec!["classProj_1_1Scene_1a9"]);

        assert_eq!(class.members[2].kind, MemberKind::Other);
    }

    #[test]
    fn test_parse_group_def() {
        let group = GroupDef::parse_str(
            "group__core.xml",
            r#"<doxygen><compounddef id="group__core" kind="group">
                 <compoundname>core</compoundname>
                 <title>Core Services</title>
                 <innerclass refid="classA" prot="public">A</innerclass>
                 <innerclass refid="classB" prot="public">B</innerclass>
               </compounddef></doxygen>"#,
        )
        .unwrap();

        assert_eq!(group.refid, "group__core");
        assert_eq!(group.title.as_deref(), Some("Core Services"));
        assert_eq!(group.inner_classes, vec!["classA", "classB"]);
    }

    #[test]
    fn test_malformed_xml_is_reported_with_span() {
        let err = DoxygenIndex::parse_str("index.xml", "<doxygenindex>\n  <compound>\n</doxygenindex>")
            .unwrap_err();

        match err {
            DoxDependsError::MalformedInput(parse_err) => {
                assert_eq!(parse_err.file, "index.xml");
                assert!(parse_err.span.is_some());
            }
            other => panic!("Expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_refid_is_reported() {
        let err = DoxygenIndex::parse_str(
            "index.xml",
            r#"<doxygenindex><compound kind="class"><name>A</name></compound></doxygenindex>"#,
        )
        .unwrap_err();

        match err {
            DoxDependsError::MissingField { file, field } => {
                assert_eq!(file, "index.xml");
                assert_eq!(field, "attribute 'refid' on <compound>");
            }
            other => panic!("Expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_compounddef_is_reported() {
        let err = ClassDef::parse_str("classA.xml", "<doxygen/>").unwrap_err();
        assert!(matches!(err, DoxDependsError::MissingField { .. }));
    }

    #[test]
    fn test_parse_dir_without_index() {
        let temp_dir = TempDir::new().unwrap();
        let err = DoxygenIndex::parse_dir(temp_dir.path()).unwrap_err();

        match err {
            DoxDependsError::InputNotFound { path } => {
                assert_eq!(path, temp_dir.path().join("index.xml"));
            }
            other => panic!("Expected InputNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_dir_reads_index() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("index.xml"), INDEX).unwrap();

        let index = DoxygenIndex::parse_dir(temp_dir.path()).unwrap();
        assert_eq!(index.compounds.len(), 3);
    }

    #[test]
    fn test_byte_offset() {
        let content = "ab\ncde\nf";
        assert_eq!(byte_offset(content, 1, 1), Some(0));
        assert_eq!(byte_offset(content, 2, 2), Some(4));
        assert_eq!(byte_offset(content, 3, 1), Some(7));
        assert_eq!(byte_offset(content, 9, 1), None);
    }
}
