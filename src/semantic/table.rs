//! Symbol table: the growing model tree plus name-based lookup.
//!
//! The table wraps the [`Model`] under construction and adds the idempotent
//! `ensure` operations Phase 1 relies on, the using-directive registry, and
//! the layered [`find_type`](SymbolTable::find_type) lookup Phase 2 resolves
//! against.

use smol_str::SmolStr;
use tracing::trace;

use crate::model::{ElementId, ElementKind, Model};
use crate::typename;

/// A using/import directive recorded during Phase 1.
#[derive(Clone, Debug)]
pub struct ImportDirective {
    /// The imported path, e.g. `wd::cache`.
    pub path: SmolStr,
    /// The compilation unit that declared it.
    pub unit: Option<SmolStr>,
}

/// Central registry of all named elements in the model under construction.
#[derive(Debug, Default)]
pub struct SymbolTable {
    model: Model,
    imports: Vec<ImportDirective>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            model: Model::new(),
            imports: Vec::new(),
        }
    }

    /// Read access to the model tree.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Mutable access to the model tree.
    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    /// Consume the table, yielding the finished model.
    pub fn into_model(self) -> Model {
        self.model
    }

    /// Record a using/import directive for lookup stage 3.
    pub fn add_import(&mut self, path: impl Into<SmolStr>, unit: Option<SmolStr>) {
        self.imports.push(ImportDirective {
            path: path.into(),
            unit,
        });
    }

    // ============================================================
    // Ensure (idempotent declaration)
    // ============================================================

    /// Return the existing namespace at `segments` below `parent`, creating
    /// any missing links. Idempotent.
    pub fn ensure_namespace(&mut self, parent: ElementId, segments: &[&str]) -> ElementId {
        let mut current = parent;
        for segment in segments {
            current = self.ensure_child(current, segment, ElementKind::Namespace);
        }
        current
    }

    /// Return the existing class named by the trailing segment, creating it
    /// (and any namespace path before it) if absent. Idempotent: a forward
    /// declaration followed by a definition merges into one symbol.
    pub fn ensure_class(&mut self, parent: ElementId, segments: &[&str]) -> ElementId {
        let (class_name, namespace_path) = match segments.split_last() {
            Some(split) => split,
            None => return parent,
        };
        let scope = self.ensure_namespace(parent, namespace_path);
        self.ensure_child(scope, class_name, ElementKind::Class)
    }

    /// Return the existing enumeration named `name`, creating it if absent.
    pub fn ensure_enum(&mut self, parent: ElementId, name: &str) -> ElementId {
        self.ensure_child(parent, name, ElementKind::Enumeration)
    }

    fn ensure_child(&mut self, parent: ElementId, name: &str, kind: ElementKind) -> ElementId {
        if let Some(existing) = self.model.child_by_name(parent, name, Some(kind)) {
            return existing;
        }
        self.model.add_element(parent, kind, name)
    }

    // ============================================================
    // Layered lookup
    // ============================================================

    /// Resolve a raw type name from `scope`, consulting the imports visible
    /// to `unit`. Four stages, short-circuiting on the first hit:
    ///
    /// 1. direct-child lookdown within `scope`;
    /// 2. lexical-scope walk up the parent chain (ending at the root);
    /// 3. qualified lookdown from the root through each visible import path;
    /// 4. global find-by-name from the root.
    ///
    /// Returns `None` when every stage misses — callers always carry a
    /// fallback policy.
    pub fn find_type(
        &self,
        scope: ElementId,
        raw: &str,
        unit: Option<&str>,
    ) -> Option<ElementId> {
        let name = typename::lookup_name(raw);
        if name.is_empty() {
            return None;
        }
        let segments: Vec<&str> = name.split("::").collect();

        // 1. Lookdown: direct child match within the scope
        if let Some(found) = self.model.lookdown(scope, &segments) {
            trace!(name = %name, "find_type: lookdown hit");
            return Some(found);
        }

        // 2. Lexical scope: walk the parent chain up to and including the root
        let mut current = scope;
        while let Some(parent) = self.model.get(current).owner {
            current = parent;
            if let Some(found) = self.model.lookdown(current, &segments) {
                trace!(name = %name, scope = %self.model.get(current).qualified_name,
                    "find_type: lexical-chain hit");
                return Some(found);
            }
        }

        // 3. Using directives visible to the unit, as qualified lookdowns
        // from the root
        for import in self.visible_imports(unit) {
            let mut path: Vec<&str> = import.path.split("::").collect();
            path.extend(&segments);
            if let Some(found) = self.model.lookdown(self.model.root(), &path) {
                trace!(name = %name, import = %import.path, "find_type: import hit");
                return Some(found);
            }
        }

        // 4. Global fallback: first element anywhere with the trailing name
        if let Some(found) = segments.last().and_then(|last| self.model.find_by_name(last)) {
            trace!(name = %name, "find_type: global find-by-name hit");
            return Some(found);
        }

        trace!(name = %name, "find_type: unresolved");
        None
    }

    fn visible_imports(&self, unit: Option<&str>) -> impl Iterator<Item = &ImportDirective> {
        self.imports.iter().filter(move |import| match unit {
            Some(unit) => import.unit.as_deref() == Some(unit),
            // References with no originating unit see every directive
            None => true,
        })
    }
}
