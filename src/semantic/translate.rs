//! Phase 1: declaration translation.
//!
//! One sequential pass per compilation unit. Namespaces, classes, enums,
//! fields and operations are materialized (or merged) into the symbol table;
//! every cross-reference that cannot be decided locally is appended to a
//! worklist for Phase 2.

use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::ast::{
    ClassDecl, CompilationUnit, Declaration, EnumDecl, FieldDecl, MethodDecl, Modifiers,
    NamespaceDecl,
};
use crate::model::{Direction, ElementId, Operation, Parameter, Visibility};
use crate::semantic::options::ModelOptions;
use crate::semantic::table::SymbolTable;
use crate::semantic::worklist::{
    FeatureSlot, PendingAssociation, PendingBase, PendingDependency, PendingFeature, Worklists,
};
use crate::typename;

/// Translate one compilation unit into the shared table and worklists.
pub fn translate_unit(
    table: &mut SymbolTable,
    lists: &mut Worklists,
    options: &ModelOptions,
    unit: &CompilationUnit,
) {
    debug!(unit = ?unit.name, members = unit.members.len(), "phase 1: translating unit");
    let mut translator = UnitTranslator {
        table,
        lists,
        options,
        unit: unit.name.clone(),
    };
    let root = translator.table.model().root();
    translator.declare_all(root, &unit.members);
}

struct UnitTranslator<'a> {
    table: &'a mut SymbolTable,
    lists: &'a mut Worklists,
    options: &'a ModelOptions,
    unit: Option<SmolStr>,
}

impl UnitTranslator<'_> {
    fn declare_all(&mut self, scope: ElementId, members: &[Declaration]) {
        for member in members {
            self.declare(scope, member);
        }
    }

    fn declare(&mut self, scope: ElementId, decl: &Declaration) {
        match decl {
            Declaration::Namespace(ns) => self.declare_namespace(scope, ns),
            Declaration::Class(class) => self.declare_class(scope, class),
            Declaration::Enum(en) => self.declare_enum(scope, en),
            Declaration::Using(using) => {
                self.table.add_import(using.path.clone(), self.unit.clone());
            }
            Declaration::Field(field) | Declaration::Property(field) => {
                if self.member_allowed(&field.modifiers) {
                    self.declare_field(scope, field);
                }
            }
            Declaration::Constructor(method) => {
                if self.member_allowed(&method.modifiers) {
                    self.declare_operation(scope, method, true);
                }
            }
            Declaration::Method(method) => {
                if self.member_allowed(&method.modifiers) {
                    self.declare_operation(scope, method, false);
                }
            }
            Declaration::Constant(constant) => {
                // Constants are out of scope for the model
                trace!(name = %constant.name, "skipping constant declaration");
            }
        }
    }

    fn declare_namespace(&mut self, scope: ElementId, ns: &NamespaceDecl) {
        let id = self.table.ensure_namespace(scope, &[&ns.name]);
        self.declare_all(id, &ns.body);
    }

    fn declare_class(&mut self, scope: ElementId, class: &ClassDecl) {
        // A pure forward declaration contributes nothing: no empty duplicate
        // symbol, no pending work
        let Some(body) = &class.body else {
            trace!(name = %class.name, "skipping forward declaration");
            return;
        };

        let id = self.table.ensure_class(scope, &[&class.name]);
        {
            // Last writer wins for flags carried on the symbol itself
            let element = self.table.model_mut().get_mut(id);
            element.visibility = visibility_of(&class.modifiers).unwrap_or(Visibility::Public);
            element.is_abstract = class.modifiers.has("abstract");
        }

        for base in &class.bases {
            self.lists.base_types.push(PendingBase {
                classifier: id,
                token: base.clone(),
                unit: self.unit.clone(),
            });
        }

        self.declare_all(id, body);
    }

    fn declare_enum(&mut self, scope: ElementId, en: &EnumDecl) {
        // Enums carry no forward-declaration ambiguity: created even bodiless
        let id = self.table.ensure_enum(scope, &en.name);
        if let Some(body) = &en.body {
            self.declare_all(id, body);
        }
    }

    fn declare_field(&mut self, scope: ElementId, field: &FieldDecl) {
        if self.options.association {
            // Defer the whole field node; Phase 2 decides association vs.
            // attribute after the type resolves (or doesn't)
            self.lists.associations.push(PendingAssociation {
                classifier: scope,
                field: field.clone(),
                unit: self.unit.clone(),
            });
        } else {
            push_field_attributes(self.table, self.lists, scope, field, self.unit.clone());
        }
    }

    fn declare_operation(&mut self, scope: ElementId, method: &MethodDecl, is_constructor: bool) {
        let mut operation = Operation::new(method.name.clone());
        operation.visibility = visibility_of(&method.modifiers).unwrap_or(Visibility::Package);
        operation.is_static = method.modifiers.has("static");
        operation.is_abstract = method.modifiers.has("abstract");
        operation.is_constructor = is_constructor;

        let op_index = self.table.model().get(scope).operations.len();
        let mut pending = Vec::new();

        for param in &method.params {
            let index = operation.parameters.len();
            operation
                .parameters
                .push(Parameter::new(param.name.clone(), Direction::In));
            if let Some(ty) = &param.ty {
                pending.push((index, ty.clone()));
            }
        }

        if !is_constructor {
            if let Some(return_type) = &method.return_type {
                let index = operation.parameters.len();
                operation
                    .parameters
                    .push(Parameter::new("return", Direction::Return));
                pending.push((index, return_type.clone()));
            }
        }

        self.table.model_mut().get_mut(scope).operations.push(operation);

        for (index, token) in pending {
            self.lists.typed_features.push(PendingFeature {
                slot: FeatureSlot::Parameter {
                    owner: scope,
                    operation: op_index,
                    index,
                },
                token: token.clone(),
                unit: self.unit.clone(),
            });
            push_type_dependency(self.lists, scope, token.text(), self.unit.clone());
        }
    }

    fn member_allowed(&self, modifiers: &Modifiers) -> bool {
        !self.options.public_only || modifiers.has("public")
    }
}

/// Field-as-attribute translation: one [`Attribute`](crate::model::Attribute)
/// per declared variable, with pending typed-feature and dependency entries.
///
/// Shared with Phase 2, which re-dispatches association candidates through
/// this path when their type never resolves.
pub(crate) fn push_field_attributes(
    table: &mut SymbolTable,
    lists: &mut Worklists,
    owner: ElementId,
    field: &FieldDecl,
    unit: Option<SmolStr>,
) {
    for var in &field.vars {
        let mut attribute = crate::model::Attribute::new(var.name.clone());
        attribute.visibility = visibility_of(&field.modifiers).unwrap_or(Visibility::Package);
        attribute.is_static = field.modifiers.has("static");
        attribute.is_volatile = field.modifiers.has("volatile");
        // `mutable` is the closest transient analog; there is no direct
        // "final" analog for attributes
        attribute.is_transient = field.modifiers.has("mutable") || field.modifiers.has("transient");
        attribute.default_value = var.initializer.clone();

        let element = table.model_mut().get_mut(owner);
        let index = element.attributes.len();
        element.attributes.push(attribute);

        lists.typed_features.push(PendingFeature {
            slot: FeatureSlot::Attribute { owner, index },
            token: field.ty.clone(),
            unit: unit.clone(),
        });
    }
    push_type_dependency(lists, owner, field.ty.text(), unit);
}

/// Record a dependency candidate keyed off the base type name, skipping
/// empty names and known primitives. Anything else stays a candidate;
/// Phase 2 drops whatever fails to resolve.
fn push_type_dependency(
    lists: &mut Worklists,
    source: ElementId,
    raw_type: &str,
    unit: Option<SmolStr>,
) {
    let base = typename::base_name(raw_type);
    if base.is_empty() || typename::is_primitive(&base) {
        return;
    }
    lists.dependencies.push(PendingDependency {
        source,
        base_name: base.into(),
        unit,
    });
}

/// Map declared visibility modifiers to the model's visibility, if any was
/// declared.
pub(crate) fn visibility_of(modifiers: &Modifiers) -> Option<Visibility> {
    if modifiers.has("public") {
        Some(Visibility::Public)
    } else if modifiers.has("protected") {
        Some(Visibility::Protected)
    } else if modifiers.has("private") {
        Some(Visibility::Private)
    } else {
        None
    }
}
