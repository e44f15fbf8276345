//! Phase 2: deferred resolution.
//!
//! Runs once, after all compilation units are translated. Four deterministic
//! sub-passes drain their worklists in a fixed order — base types, then
//! associations, then typed features, then dependencies — because base-type
//! resolution may synthesize symbols the later passes can then find.
//!
//! Resolution failure is never fatal: every sub-pass has an explicit
//! fallback (skip the edge, degrade to attribute, assign an opaque scalar,
//! assign an unknown type).

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::model::{
    AggregationKind, Association, AssociationEnd, Dependency, ElementId, Generalization, TypeRef,
    Visibility,
};
use crate::semantic::options::ModelOptions;
use crate::semantic::table::SymbolTable;
use crate::semantic::translate::{push_field_attributes, visibility_of};
use crate::semantic::worklist::{FeatureSlot, Worklists};
use crate::typename::{self, TypeMarker};

// ============================================================================
// COLLECTION HOOK
// ============================================================================

/// Extension point for recognizing generic-collection shapes.
///
/// Given a normalized type string, an implementation may report the element
/// type carried by the collection (e.g. `vector<Widget>` → `Widget`). The
/// default policy, [`NoCollections`], always reports none, leaving
/// multiplicity/element-type handling for collections dormant.
pub trait CollectionTyper {
    fn element_type(&self, type_text: &str) -> Option<String>;
}

/// The documented default: no collection shape is ever recognized.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCollections;

impl CollectionTyper for NoCollections {
    fn element_type(&self, _type_text: &str) -> Option<String> {
        None
    }
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Drain all four worklists against the now-complete symbol table.
pub fn resolve_all(
    table: &mut SymbolTable,
    lists: &mut Worklists,
    options: &ModelOptions,
    collections: &dyn CollectionTyper,
) {
    debug!(pending = lists.len(), "phase 2: resolving worklists");
    resolve_base_types(table, lists);
    resolve_associations(table, lists, options, collections);
    resolve_typed_features(table, lists, collections);
    resolve_dependencies(table, lists);
}

/// Sub-pass 1: base types → generalization edges.
///
/// An unresolved base synthesizes a class under the root only when its
/// normalized name is a syntactically clean identifier; anything templated
/// or decorated drops the edge silently. This is the only place the system
/// invents symbols for unseen names.
fn resolve_base_types(table: &mut SymbolTable, lists: &mut Worklists) {
    for pending in std::mem::take(&mut lists.base_types) {
        let raw = pending.token.text().to_string();
        let target = match table.find_type(pending.classifier, &raw, pending.unit.as_deref()) {
            Some(found) => found,
            None => {
                let normalized = typename::normalize(&raw);
                if !typename::is_clean_identifier(&normalized) {
                    trace!(base = %normalized, "dropping unclean base-type reference");
                    continue;
                }
                let segments: Vec<&str> = normalized.split("::").collect();
                let root = table.model().root();
                table.ensure_class(root, &segments)
            }
        };
        table.model_mut().generalizations.push(Generalization {
            source: pending.classifier,
            target,
        });
    }
}

/// Sub-pass 2: association candidates.
///
/// A field whose declared type (or collection element type) resolves becomes
/// one association per declared variable; otherwise the whole field degrades
/// to the Phase-1 attribute path.
fn resolve_associations(
    table: &mut SymbolTable,
    lists: &mut Worklists,
    options: &ModelOptions,
    collections: &dyn CollectionTyper,
) {
    for pending in std::mem::take(&mut lists.associations) {
        let raw = pending.field.ty.text().to_string();
        let unit = pending.unit.as_deref();

        let mut target = table.find_type(pending.classifier, &raw, unit);
        if target.is_none() {
            if let Some(element_type) = collections.element_type(&typename::normalize(&raw)) {
                target = table.find_type(pending.classifier, &element_type, unit);
            }
        }

        let Some(target) = target else {
            trace!(ty = %raw, "association candidate degrades to attribute");
            push_field_attributes(
                table,
                lists,
                pending.classifier,
                &pending.field,
                pending.unit.clone(),
            );
            continue;
        };

        let normalized = typename::normalize(&raw);
        let aggregation = aggregation_kind(&normalized, options);
        let modifiers = &pending.field.modifiers;
        let visibility = visibility_of(modifiers).unwrap_or(Visibility::Package);

        for var in &pending.field.vars {
            let mut end2 = AssociationEnd::named(var.name.clone());
            end2.visibility = visibility;
            end2.aggregation = aggregation;
            end2.is_static = modifiers.has("static");
            end2.is_volatile = modifiers.has("volatile");
            end2.is_transient = modifiers.has("mutable") || modifiers.has("transient");
            end2.is_read_only = modifiers.has("const");

            table.model_mut().associations.push(Association {
                source: pending.classifier,
                target,
                end1: AssociationEnd::anonymous(),
                end2,
            });
        }
    }
}

/// Sub-pass 3: typed features (attribute, parameter and return types).
fn resolve_typed_features(
    table: &mut SymbolTable,
    lists: &mut Worklists,
    collections: &dyn CollectionTyper,
) {
    for pending in std::mem::take(&mut lists.typed_features) {
        let raw = pending.token.text().to_string();
        let scope = pending.slot.owner();

        let mut multiplicity = array_multiplicity(pending.token.array_dims());
        let mut collection_type = None;

        let type_ref = match table.find_type(scope, &raw, pending.unit.as_deref()) {
            Some(found) => TypeRef::Element(found),
            None => {
                let mut normalized = typename::normalize(&raw);
                if let Some(element_type) = collections.element_type(&normalized) {
                    // Collection shape recognized: record multiplicity and
                    // the original collection text, then classify the
                    // element type instead
                    multiplicity = Some("*".to_string());
                    // The tag keeps the original collection text in a safe
                    // scalar rendering
                    collection_type = Some(pending.token.scalar_text());
                    match table.find_type(scope, &element_type, pending.unit.as_deref()) {
                        Some(found) => {
                            assign_feature(table, pending.slot, TypeRef::Element(found),
                                multiplicity, collection_type);
                            continue;
                        }
                        None => normalized = typename::normalize(&element_type),
                    }
                }
                scalar_type_ref(&normalized)
            }
        };

        assign_feature(table, pending.slot, type_ref, multiplicity, collection_type);
    }
}

/// Classify an unresolved, normalized type name as an opaque scalar.
///
/// Empty names become [`TypeRef::Unknown`]. Recognized primitives, `_t`
/// aliases, well-known `std` string aliases and every other normalized name
/// all keep their literal text — no class is ever synthesized to
/// type-annotate a feature.
fn scalar_type_ref(normalized: &str) -> TypeRef {
    if normalized.is_empty() {
        return TypeRef::Unknown;
    }
    TypeRef::Scalar(normalized.into())
}

fn assign_feature(
    table: &mut SymbolTable,
    slot: FeatureSlot,
    type_ref: TypeRef,
    multiplicity: Option<String>,
    collection_type: Option<String>,
) {
    match slot {
        FeatureSlot::Attribute { owner, index } => {
            let attribute = &mut table.model_mut().get_mut(owner).attributes[index];
            attribute.type_ref = type_ref;
            if multiplicity.is_some() {
                attribute.multiplicity = multiplicity;
            }
            attribute.collection_type = collection_type;
        }
        FeatureSlot::Parameter {
            owner,
            operation,
            index,
        } => {
            let parameter =
                &mut table.model_mut().get_mut(owner).operations[operation].parameters[index];
            parameter.type_ref = type_ref;
            if multiplicity.is_some() {
                parameter.multiplicity = multiplicity;
            }
            parameter.collection_type = collection_type;
        }
    }
}

/// Bracket array dimensions become a comma-joined multiplicity, one `*` per
/// dimension.
fn array_multiplicity(dims: usize) -> Option<String> {
    if dims == 0 {
        return None;
    }
    Some(vec!["*"; dims].join(","))
}

/// Sub-pass 4: dependency candidates, deduplicated per (source, target)
/// across the whole run.
fn resolve_dependencies(table: &mut SymbolTable, lists: &mut Worklists) {
    let mut emitted: FxHashSet<(ElementId, ElementId)> = FxHashSet::default();
    for pending in std::mem::take(&mut lists.dependencies) {
        let Some(target) =
            table.find_type(pending.source, &pending.base_name, pending.unit.as_deref())
        else {
            continue;
        };
        if emitted.insert((pending.source, target)) {
            table.model_mut().dependencies.push(Dependency {
                source: pending.source,
                target,
            });
        }
    }
}

// ============================================================================
// AGGREGATION DECISION TABLE
// ============================================================================

/// Choose the aggregation kind for an association end from the field's
/// normalized type string and the configured switches.
///
/// | marker                  | option                            | kind        |
/// |-------------------------|-----------------------------------|-------------|
/// | owning pointer          | unique_ptr_as_composition = on    | composition |
/// | owning pointer          | off, pointer_as_aggregation = on  | aggregation |
/// | raw or shared pointer   | pointer_as_aggregation = on       | aggregation |
/// | reference               | reference_as_association = on     | none        |
/// | reference               | reference_as_association = off    | aggregation |
/// | value type              | —                                 | composition |
pub(crate) fn aggregation_kind(normalized: &str, options: &ModelOptions) -> AggregationKind {
    match typename::marker_of(normalized) {
        TypeMarker::OwningPointer if options.unique_ptr_as_composition => {
            AggregationKind::Composition
        }
        TypeMarker::OwningPointer | TypeMarker::SharedPointer | TypeMarker::RawPointer
            if options.pointer_as_aggregation =>
        {
            AggregationKind::Aggregation
        }
        TypeMarker::OwningPointer | TypeMarker::SharedPointer | TypeMarker::RawPointer => {
            AggregationKind::None
        }
        TypeMarker::Reference if options.reference_as_association => AggregationKind::None,
        TypeMarker::Reference => AggregationKind::Aggregation,
        TypeMarker::Value => AggregationKind::Composition,
    }
}
