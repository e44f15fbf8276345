//! Output object model.
//!
//! The model is an arena-backed element tree (namespaces → classes/enums →
//! members) plus separate edge objects for generalization, association and
//! dependency. Every element is reachable through exactly one owning-parent
//! chain; edges reference endpoints by [`ElementId`], never by embedding
//! copies.

use indexmap::IndexMap;
use smol_str::SmolStr;

// ============================================================================
// IDS
// ============================================================================

/// Unique identifier for a model element in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u32);

impl ElementId {
    /// Create an id from an arena index.
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// The arena index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ============================================================================
// ENUMS
// ============================================================================

/// The metatype of a model element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Namespace,
    Class,
    Enumeration,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Class => "class",
            Self::Enumeration => "enumeration",
        }
    }
}

/// Declared visibility of an element or member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
    /// Package-default: no explicit visibility was declared.
    Package,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Package => "package",
        }
    }
}

/// Parameter direction. The return slot is a reserved parameter with
/// [`Direction::Return`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    In,
    Return,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Return => "return",
        }
    }
}

/// Aggregation kind carried by an association's member end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AggregationKind {
    #[default]
    None,
    Aggregation,
    Composition,
}

impl AggregationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Aggregation => "aggregation",
            Self::Composition => "composition",
        }
    }
}

/// The resolved type of a typed feature (attribute, parameter, return slot).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TypeRef {
    /// Resolved to a model element.
    Element(ElementId),
    /// An opaque primitive/scalar type name.
    Scalar(SmolStr),
    /// Explicitly undetermined — never a stray object.
    #[default]
    Unknown,
}

// ============================================================================
// MEMBERS
// ============================================================================

/// A typed attribute owned by a class or namespace.
#[derive(Clone, Debug)]
pub struct Attribute {
    pub name: SmolStr,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_read_only: bool,
    pub is_volatile: bool,
    pub is_transient: bool,
    /// Initializer literal kept as opaque text.
    pub default_value: Option<String>,
    /// Finalized in Phase 2.
    pub type_ref: TypeRef,
    /// Comma-joined multiplicity, one `*` per array dimension, or `*` for a
    /// recognized collection type.
    pub multiplicity: Option<String>,
    /// Original collection type text when the element-type hook fired.
    pub collection_type: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Package,
            is_static: false,
            is_read_only: false,
            is_volatile: false,
            is_transient: false,
            default_value: None,
            type_ref: TypeRef::Unknown,
            multiplicity: None,
            collection_type: None,
        }
    }
}

/// A formal parameter of an operation.
#[derive(Clone, Debug)]
pub struct Parameter {
    pub name: SmolStr,
    pub direction: Direction,
    pub type_ref: TypeRef,
    pub multiplicity: Option<String>,
    pub collection_type: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<SmolStr>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
            type_ref: TypeRef::Unknown,
            multiplicity: None,
            collection_type: None,
        }
    }
}

/// An operation owned by a class or namespace.
#[derive(Clone, Debug)]
pub struct Operation {
    pub name: SmolStr,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_constructor: bool,
    /// Ordered parameters, including the reserved return slot.
    pub parameters: Vec<Parameter>,
}

impl Operation {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Package,
            is_static: false,
            is_abstract: false,
            is_constructor: false,
            parameters: Vec::new(),
        }
    }
}

// ============================================================================
// ELEMENT
// ============================================================================

/// A model element: namespace, class, or enumeration.
#[derive(Clone, Debug)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub name: SmolStr,
    /// `::`-joined path from the root (empty for the root itself).
    pub qualified_name: String,
    pub visibility: Visibility,
    pub is_abstract: bool,
    /// Owning parent (None only for the root).
    pub owner: Option<ElementId>,
    /// Directly nested elements, in insertion order.
    pub nested: Vec<ElementId>,
    pub attributes: Vec<Attribute>,
    pub operations: Vec<Operation>,
}

// ============================================================================
// EDGES
// ============================================================================

/// Directed generalization edge: class → base type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Generalization {
    pub source: ElementId,
    pub target: ElementId,
}

/// One end of an association.
#[derive(Clone, Debug)]
pub struct AssociationEnd {
    /// Anonymous for the owning end.
    pub name: Option<SmolStr>,
    pub visibility: Visibility,
    pub navigable: bool,
    pub aggregation: AggregationKind,
    pub is_static: bool,
    pub is_volatile: bool,
    pub is_transient: bool,
    pub is_read_only: bool,
}

impl AssociationEnd {
    /// The anonymous, non-navigable owning end.
    pub fn anonymous() -> Self {
        Self {
            name: None,
            visibility: Visibility::Package,
            navigable: false,
            aggregation: AggregationKind::None,
            is_static: false,
            is_volatile: false,
            is_transient: false,
            is_read_only: false,
        }
    }

    /// A named, navigable member end.
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self {
            name: Some(name.into()),
            navigable: true,
            ..Self::anonymous()
        }
    }
}

/// Directed structural edge between two model elements.
#[derive(Clone, Debug)]
pub struct Association {
    /// The declaring classifier (owner of end1).
    pub source: ElementId,
    /// The resolved field type (end2's classifier).
    pub target: ElementId,
    pub end1: AssociationEnd,
    pub end2: AssociationEnd,
}

/// Directed dependency edge, deduplicated per (source, target) for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dependency {
    pub source: ElementId,
    pub target: ElementId,
}

// ============================================================================
// MODEL
// ============================================================================

/// The rooted element tree plus its relationship edges.
///
/// The qualified-name index is an `IndexMap` so iteration order is the
/// element creation order, keeping serialization deterministic.
#[derive(Clone, Debug)]
pub struct Model {
    arena: Vec<Element>,
    root: ElementId,
    by_qname: IndexMap<String, ElementId>,
    pub generalizations: Vec<Generalization>,
    pub associations: Vec<Association>,
    pub dependencies: Vec<Dependency>,
}

impl Model {
    /// Create a model containing only the root namespace.
    pub fn new() -> Self {
        let root = Element {
            id: ElementId::new(0),
            kind: ElementKind::Namespace,
            name: SmolStr::default(),
            qualified_name: String::new(),
            visibility: Visibility::Public,
            is_abstract: false,
            owner: None,
            nested: Vec::new(),
            attributes: Vec::new(),
            operations: Vec::new(),
        };
        Self {
            arena: vec![root],
            root: ElementId::new(0),
            by_qname: IndexMap::new(),
            generalizations: Vec::new(),
            associations: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// The global root namespace.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Get an element by id. Panics only on a foreign id, which cannot be
    /// constructed outside this model's arena in normal use.
    pub fn get(&self, id: ElementId) -> &Element {
        &self.arena[id.index()]
    }

    /// Get a mutable element by id.
    pub fn get_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.arena[id.index()]
    }

    /// Number of elements, including the root.
    pub fn element_count(&self) -> usize {
        self.arena.len()
    }

    /// Iterate all elements in creation order, root first.
    pub fn iter_elements(&self) -> impl Iterator<Item = &Element> {
        self.arena.iter()
    }

    /// Create a new element owned by `parent`.
    pub fn add_element(
        &mut self,
        parent: ElementId,
        kind: ElementKind,
        name: impl Into<SmolStr>,
    ) -> ElementId {
        let name = name.into();
        let id = ElementId::new(self.arena.len());
        let parent_qname = &self.get(parent).qualified_name;
        let qualified_name = if parent_qname.is_empty() {
            name.to_string()
        } else {
            format!("{parent_qname}::{name}")
        };
        let element = Element {
            id,
            kind,
            name,
            qualified_name: qualified_name.clone(),
            visibility: Visibility::Public,
            is_abstract: false,
            owner: Some(parent),
            nested: Vec::new(),
            attributes: Vec::new(),
            operations: Vec::new(),
        };
        self.arena.push(element);
        self.get_mut(parent).nested.push(id);
        // First declaration wins the index slot; duplicates merge upstream
        self.by_qname.entry(qualified_name).or_insert(id);
        id
    }

    /// Find a direct child of `parent` by name and kind.
    pub fn child_by_name(
        &self,
        parent: ElementId,
        name: &str,
        kind: Option<ElementKind>,
    ) -> Option<ElementId> {
        self.get(parent)
            .nested
            .iter()
            .copied()
            .find(|&id| {
                let child = self.get(id);
                child.name == name && kind.is_none_or(|k| child.kind == k)
            })
    }

    /// Walk a `::`-separated path of child names down from `from`.
    pub fn lookdown(&self, from: ElementId, segments: &[&str]) -> Option<ElementId> {
        let mut current = from;
        for segment in segments {
            current = self.child_by_name(current, segment, None)?;
        }
        Some(current)
    }

    /// Exact qualified-name lookup.
    pub fn find_by_qualified_name(&self, qualified_name: &str) -> Option<ElementId> {
        self.by_qname.get(qualified_name).copied()
    }

    /// Find the first element with the given simple name, in creation order.
    /// The root itself never matches.
    pub fn find_by_name(&self, name: &str) -> Option<ElementId> {
        self.arena
            .iter()
            .skip(1)
            .find(|e| e.name == name)
            .map(|e| e.id)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}
