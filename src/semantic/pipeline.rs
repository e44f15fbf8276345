//! The orchestrating run object.
//!
//! A [`Pipeline`] owns the symbol table and the four worklists for the
//! duration of one run; no other component mutates them. The lifecycle is
//! strictly two-phase: translate all units sequentially, then resolve every
//! worklist, then finalize. Unit-level parse failures are collected, never
//! fatal.

use tracing::{debug, warn};

use crate::ast::CompilationUnit;
use crate::error::{TranslateError, UnitFailure};
use crate::model::Model;
use crate::semantic::options::ModelOptions;
use crate::semantic::resolve::{self, CollectionTyper, NoCollections};
use crate::semantic::table::SymbolTable;
use crate::semantic::translate;
use crate::semantic::worklist::Worklists;

/// The result of one full run: the finished model plus the per-unit
/// failures collected along the way.
#[derive(Debug)]
pub struct Translation {
    pub model: Model,
    pub failures: Vec<UnitFailure>,
}

/// Single-threaded two-pass batch pipeline.
pub struct Pipeline {
    table: SymbolTable,
    lists: Worklists,
    options: ModelOptions,
    failures: Vec<UnitFailure>,
    collections: Box<dyn CollectionTyper>,
}

impl Pipeline {
    pub fn new(options: ModelOptions) -> Self {
        Self {
            table: SymbolTable::new(),
            lists: Worklists::new(),
            options,
            failures: Vec::new(),
            collections: Box::new(NoCollections),
        }
    }

    /// Override the generic-collection element-type hook.
    pub fn with_collection_typer(mut self, collections: Box<dyn CollectionTyper>) -> Self {
        self.collections = collections;
        self
    }

    /// Phase 1 for one unit. Units must be fed sequentially: later units may
    /// complete symbols earlier units only partially declared.
    pub fn translate_unit(&mut self, unit: &CompilationUnit) {
        translate::translate_unit(&mut self.table, &mut self.lists, &self.options, unit);
    }

    /// Feed one upstream parse result: a parsed unit is translated, a parse
    /// failure is recorded and the run continues.
    pub fn add_parse_result(
        &mut self,
        name: impl Into<String>,
        result: Result<CompilationUnit, TranslateError>,
    ) {
        match result {
            Ok(unit) => self.translate_unit(&unit),
            Err(error) => {
                let unit = name.into();
                warn!(unit = %unit, error = %error, "unit failed to parse; continuing");
                self.failures.push(UnitFailure { unit, error });
            }
        }
    }

    /// Run Phase 2 and finalize.
    pub fn finish(mut self) -> Translation {
        resolve::resolve_all(
            &mut self.table,
            &mut self.lists,
            &self.options,
            self.collections.as_ref(),
        );
        let model = self.table.into_model();
        debug!(
            elements = model.element_count(),
            failures = self.failures.len(),
            "translation finished"
        );
        Translation {
            model,
            failures: self.failures,
        }
    }
}

/// One-shot convenience wrapper: translate every unit, then resolve.
pub fn translate_units<I>(units: I, options: ModelOptions) -> Translation
where
    I: IntoIterator<Item = CompilationUnit>,
{
    let mut pipeline = Pipeline::new(options);
    for unit in units {
        pipeline.translate_unit(&unit);
    }
    pipeline.finish()
}
