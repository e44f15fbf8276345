#![allow(clippy::unwrap_used)]
use crate::ast::{ClassDecl, CompilationUnit, Declaration, FieldDecl, MethodDecl, NamespaceDecl};
use crate::semantic::{CollectionTyper, ModelOptions, Pipeline, translate_units};

use super::{ExportSink, JsonWriter, TypeRefDoc, document, to_json_string};

fn sample_model() -> crate::model::Model {
    let unit = CompilationUnit::new()
        .with_name("sample.h")
        .with_member(Declaration::Namespace(
            NamespaceDecl::new("wd")
                .with_member(Declaration::Class(ClassDecl::new("Configuration")))
                .with_member(Declaration::Class(
                    ClassDecl::new("CacheManager")
                        .with_base("Service")
                        .with_member(Declaration::Field(
                            FieldDecl::new("Configuration*")
                                .with_modifier("private")
                                .with_var("_config"),
                        )),
                )),
        ));
    translate_units([unit], ModelOptions::default()).model
}

/// the document references edge endpoints by qualified-name id
#[test]
fn test_document_edges_reference_ids() {
    let model = sample_model();
    let doc = document(&model);

    assert_eq!(doc.generalizations.len(), 1);
    assert_eq!(doc.generalizations[0].source, "wd::CacheManager");
    assert_eq!(doc.generalizations[0].target, "Service"); // synthesized

    assert_eq!(doc.associations.len(), 1);
    assert_eq!(doc.associations[0].source, "wd::CacheManager");
    assert_eq!(doc.associations[0].target, "wd::Configuration");
    assert_eq!(doc.associations[0].end2.name.as_deref(), Some("_config"));
    assert_eq!(doc.associations[0].end2.aggregation, "aggregation");
}

/// the root namespace never appears as an element or an owner id
#[test]
fn test_document_hides_root() {
    let model = sample_model();
    let doc = document(&model);

    assert!(doc.elements.iter().all(|e| !e.id.is_empty()));
    let wd = doc.elements.iter().find(|e| e.id == "wd").unwrap();
    assert!(wd.owner.is_none());
    let manager = doc
        .elements
        .iter()
        .find(|e| e.id == "wd::CacheManager")
        .unwrap();
    assert_eq!(manager.owner.as_deref(), Some("wd"));
}

/// JSON output parses back and keeps leaves strictly scalar
#[test]
fn test_json_round_trips_as_scalars() {
    let model = sample_model();
    let json = to_json_string(&model).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let elements = value["elements"].as_array().unwrap();
    assert!(!elements.is_empty());
    for element in elements {
        assert!(element["id"].is_string());
        assert!(element["kind"].is_string());
    }
    assert!(value["metadata"]["elementCount"].as_u64().unwrap() >= 3);
}

struct VectorTyper;

impl CollectionTyper for VectorTyper {
    fn element_type(&self, type_text: &str) -> Option<String> {
        let inner = type_text.strip_prefix("vector<")?.strip_suffix('>')?;
        Some(inner.to_string())
    }
}

/// collection tags on parameter and return slots survive export
#[test]
fn test_parameter_collection_type_exported() {
    let unit = CompilationUnit::new()
        .with_member(Declaration::Class(ClassDecl::new("Widget")))
        .with_member(Declaration::Class(
            ClassDecl::new("Screen").with_member(Declaration::Method(
                MethodDecl::new("widgets").with_return_type("std::vector<Widget>"),
            )),
        ));

    let mut pipeline =
        Pipeline::new(ModelOptions::default()).with_collection_typer(Box::new(VectorTyper));
    pipeline.translate_unit(&unit);
    let model = pipeline.finish().model;

    let doc = document(&model);
    let screen = doc.elements.iter().find(|e| e.id == "Screen").unwrap();
    let ret = screen.operations[0].parameters.last().unwrap();
    assert_eq!(ret.multiplicity.as_deref(), Some("*"));
    assert_eq!(ret.collection_type.as_deref(), Some("std::vector<Widget>"));
    match ret.r#type.as_ref().unwrap() {
        TypeRefDoc::Element { element } => assert_eq!(element, "Widget"),
        other => panic!("expected an element reference, got {other:?}"),
    }

    let json = to_json_string(&model).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let screen_json = value["elements"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["id"] == "Screen")
        .unwrap();
    let ret_json = screen_json["operations"][0]["parameters"]
        .as_array()
        .unwrap()
        .last()
        .unwrap();
    assert_eq!(ret_json["collectionType"], serde_json::json!("std::vector<Widget>"));
}

/// the JSON sink writes a parseable document to any writer
#[test]
fn test_json_writer_sink() {
    let model = sample_model();
    let doc = document(&model);

    let mut sink = JsonWriter::new(Vec::new());
    sink.export(&doc).unwrap();
    let bytes = sink.into_inner();

    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(value["associations"].as_array().unwrap().len() == 1);
}
