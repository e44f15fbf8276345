//! End-to-end integration: translate a multi-unit reverse-engineering run
//! through the public API and export the finished model as JSON.
#![allow(clippy::unwrap_used)]

use std::fs;
use std::io::Write as _;

use declmodel::ast::{
    ClassDecl, CompilationUnit, Declaration, EnumDecl, FieldDecl, MethodDecl, NamespaceDecl,
    UsingDecl,
};
use declmodel::interchange::{ExportSink, JsonWriter, document, to_json_string};
use declmodel::model::{AggregationKind, TypeRef};
use declmodel::{ModelOptions, Pipeline, TranslateError, translate_units};

/// `CacheManager.h`: the class under reverse engineering.
fn cache_manager_unit() -> CompilationUnit {
    CompilationUnit::new()
        .with_name("CacheManager.h")
        .with_member(Declaration::Using(UsingDecl::new("wd::cache")))
        .with_member(Declaration::Namespace(
            NamespaceDecl::new("wd").with_member(Declaration::Class(
                ClassDecl::new("CacheManager")
                    .with_base("Singleton<CacheManager>")
                    .with_member(Declaration::Method(
                        MethodDecl::new("getKeyCache")
                            .with_modifier("public")
                            .with_param("pthreadName", "std::string")
                            .with_return_type("LRUCache &"),
                    ))
                    .with_member(Declaration::Field(
                        FieldDecl::new("std::vector<std::pair<std::string, LRUCache>>")
                            .with_modifier("private")
                            .with_var("_keyCacheList"),
                    ))
                    .with_member(Declaration::Field(
                        FieldDecl::new("Configuration*")
                            .with_modifier("private")
                            .with_var("_config"),
                    )),
            )),
        ))
}

/// `Collaborators.h`: the types CacheManager refers to, declared elsewhere.
fn collaborators_unit() -> CompilationUnit {
    CompilationUnit::new()
        .with_name("Collaborators.h")
        .with_member(Declaration::Namespace(
            NamespaceDecl::new("wd")
                .with_member(Declaration::Class(ClassDecl::new("Configuration")))
                .with_member(Declaration::Namespace(NamespaceDecl::new("cache").with_member(
                    Declaration::Class(ClassDecl::new("LRUCache")),
                )))
                .with_member(Declaration::Enum(EnumDecl::new("EvictionPolicy"))),
        ))
}

#[test]
fn test_full_run_produces_model_and_edges() {
    let translation = translate_units(
        [cache_manager_unit(), collaborators_unit()],
        ModelOptions::default(),
    );
    assert!(translation.failures.is_empty());
    let model = translation.model;

    let manager = model.find_by_qualified_name("wd::CacheManager").unwrap();
    let config = model.find_by_qualified_name("wd::Configuration").unwrap();
    let cache = model.find_by_qualified_name("wd::cache::LRUCache").unwrap();

    // The templated base is not a clean identifier: no generalization and no
    // synthesized placeholder class for it
    assert!(model.generalizations.is_empty());
    assert!(model.find_by_qualified_name("Singleton<CacheManager>").is_none());

    // `Configuration*` resolves through the lexical chain: one association
    assert_eq!(model.associations.len(), 1);
    let association = &model.associations[0];
    assert_eq!(association.source, manager);
    assert_eq!(association.target, config);
    assert_eq!(association.end2.aggregation, AggregationKind::Aggregation);

    // `LRUCache` is only reachable through the using directive
    let op = &model.get(manager).operations[0];
    assert_eq!(op.parameters.last().unwrap().type_ref, TypeRef::Element(cache));
    assert!(model
        .dependencies
        .iter()
        .any(|d| d.source == manager && d.target == cache));
}

#[test]
fn test_parse_failures_do_not_abort_the_run() {
    let mut pipeline = Pipeline::new(ModelOptions::default());
    pipeline.add_parse_result(
        "Broken.h",
        Err(TranslateError::parse("Broken.h", "unterminated class body")),
    );
    pipeline.add_parse_result("CacheManager.h", Ok(cache_manager_unit()));
    pipeline.add_parse_result("Collaborators.h", Ok(collaborators_unit()));
    let translation = pipeline.finish();

    assert_eq!(translation.failures.len(), 1);
    assert_eq!(translation.failures[0].unit, "Broken.h");
    assert_eq!(translation.model.associations.len(), 1);
}

#[test]
fn test_json_export_to_file() {
    let translation = translate_units(
        [cache_manager_unit(), collaborators_unit()],
        ModelOptions::default(),
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    {
        let file = fs::File::create(&path).unwrap();
        let mut sink = JsonWriter::new(file);
        sink.export(&document(&translation.model)).unwrap();
        sink.into_inner().flush().unwrap();
    }

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["associations"].as_array().unwrap().len(), 1);
    assert_eq!(
        value["associations"][0]["target"],
        serde_json::json!("wd::Configuration")
    );
    assert!(
        value["elements"]
            .as_array()
            .unwrap()
            .iter()
            .any(|e| e["id"] == "wd::cache::LRUCache")
    );

    // The string form matches what the sink wrote, minus the trailing newline
    let json = to_json_string(&translation.model).unwrap();
    assert_eq!(json.trim_end(), fs::read_to_string(&path).unwrap().trim_end());
}
