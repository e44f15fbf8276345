//! Model interchange: export of the finished model to the host tool.
//!
//! The finished [`Model`](crate::model::Model) is rendered to a single
//! serializable [`Document`] with strictly scalar leaf values; edge entries
//! reference their endpoints by stable string id (the qualified name), never
//! by embedding copies. Diagram generation and persistence live behind the
//! [`ExportSink`] boundary.

mod json;

pub use json::{JsonWriter, to_json_string};

use serde::Serialize;

use crate::error::TranslateError;
use crate::model::{Element, ElementId, Model, TypeRef};

/// Host boundary: receives the finished document.
pub trait ExportSink {
    fn export(&mut self, document: &Document) -> Result<(), TranslateError>;
}

// ============================================================================
// DOCUMENT
// ============================================================================

/// The serializable form of a finished model.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub metadata: Metadata,
    pub elements: Vec<ElementDoc>,
    pub generalizations: Vec<EdgeDoc>,
    pub associations: Vec<AssociationDoc>,
    pub dependencies: Vec<EdgeDoc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub generator: &'static str,
    pub element_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDoc {
    /// Stable id: the `::`-qualified name.
    pub id: String,
    pub kind: &'static str,
    pub name: String,
    pub visibility: &'static str,
    pub is_abstract: bool,
    /// Owner id; absent for top-level elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub attributes: Vec<AttributeDoc>,
    pub operations: Vec<OperationDoc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDoc {
    pub name: String,
    pub visibility: &'static str,
    pub is_static: bool,
    pub is_read_only: bool,
    pub is_volatile: bool,
    pub is_transient: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// `null` when the type is explicitly unknown.
    pub r#type: Option<TypeRefDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplicity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDoc {
    pub name: String,
    pub visibility: &'static str,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_constructor: bool,
    pub parameters: Vec<ParameterDoc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDoc {
    pub name: String,
    pub direction: &'static str,
    pub r#type: Option<TypeRefDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplicity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_type: Option<String>,
}

/// A typed-feature reference: a model element by id, or an opaque scalar.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TypeRefDoc {
    Element { element: String },
    Scalar { scalar: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDoc {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationDoc {
    pub source: String,
    pub target: String,
    pub end1: AssociationEndDoc,
    pub end2: AssociationEndDoc,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationEndDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub visibility: &'static str,
    pub navigable: bool,
    pub aggregation: &'static str,
    pub is_static: bool,
    pub is_volatile: bool,
    pub is_transient: bool,
    pub is_read_only: bool,
}

// ============================================================================
// RENDERING
// ============================================================================

/// Render a finished model to its interchange document.
pub fn document(model: &Model) -> Document {
    let elements = model
        .iter_elements()
        .filter(|e| e.owner.is_some())
        .map(|e| element_doc(model, e))
        .collect();

    Document {
        metadata: Metadata {
            generator: concat!("declmodel ", env!("CARGO_PKG_VERSION")),
            element_count: model.element_count().saturating_sub(1),
        },
        elements,
        generalizations: model
            .generalizations
            .iter()
            .map(|g| EdgeDoc {
                source: element_id(model, g.source),
                target: element_id(model, g.target),
            })
            .collect(),
        associations: model
            .associations
            .iter()
            .map(|a| AssociationDoc {
                source: element_id(model, a.source),
                target: element_id(model, a.target),
                end1: end_doc(&a.end1),
                end2: end_doc(&a.end2),
            })
            .collect(),
        dependencies: model
            .dependencies
            .iter()
            .map(|d| EdgeDoc {
                source: element_id(model, d.source),
                target: element_id(model, d.target),
            })
            .collect(),
    }
}

fn element_id(model: &Model, id: ElementId) -> String {
    model.get(id).qualified_name.clone()
}

fn element_doc(model: &Model, element: &Element) -> ElementDoc {
    ElementDoc {
        id: element.qualified_name.clone(),
        kind: element.kind.as_str(),
        name: element.name.to_string(),
        visibility: element.visibility.as_str(),
        is_abstract: element.is_abstract,
        owner: element
            .owner
            .filter(|&o| o != model.root())
            .map(|o| element_id(model, o)),
        attributes: element
            .attributes
            .iter()
            .map(|a| AttributeDoc {
                name: a.name.to_string(),
                visibility: a.visibility.as_str(),
                is_static: a.is_static,
                is_read_only: a.is_read_only,
                is_volatile: a.is_volatile,
                is_transient: a.is_transient,
                default_value: a.default_value.clone(),
                r#type: type_ref_doc(model, &a.type_ref),
                multiplicity: a.multiplicity.clone(),
                collection_type: a.collection_type.clone(),
            })
            .collect(),
        operations: element
            .operations
            .iter()
            .map(|op| OperationDoc {
                name: op.name.to_string(),
                visibility: op.visibility.as_str(),
                is_static: op.is_static,
                is_abstract: op.is_abstract,
                is_constructor: op.is_constructor,
                parameters: op
                    .parameters
                    .iter()
                    .map(|p| ParameterDoc {
                        name: p.name.to_string(),
                        direction: p.direction.as_str(),
                        r#type: type_ref_doc(model, &p.type_ref),
                        multiplicity: p.multiplicity.clone(),
                        collection_type: p.collection_type.clone(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn type_ref_doc(model: &Model, type_ref: &TypeRef) -> Option<TypeRefDoc> {
    match type_ref {
        TypeRef::Element(id) => Some(TypeRefDoc::Element {
            element: element_id(model, *id),
        }),
        TypeRef::Scalar(name) => Some(TypeRefDoc::Scalar {
            scalar: name.to_string(),
        }),
        TypeRef::Unknown => None,
    }
}

fn end_doc(end: &crate::model::AssociationEnd) -> AssociationEndDoc {
    AssociationEndDoc {
        name: end.name.as_ref().map(|n| n.to_string()),
        visibility: end.visibility.as_str(),
        navigable: end.navigable,
        aggregation: end.aggregation.as_str(),
        is_static: end.is_static,
        is_volatile: end.is_volatile,
        is_transient: end.is_transient,
        is_read_only: end.is_read_only,
    }
}

#[cfg(test)]
mod tests;
