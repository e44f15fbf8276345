//! # Semantic translation
//!
//! Two-phase declaration-to-model translation with deferred type resolution.
//!
//! Phase 1 ([`translate`]) walks each compilation unit's AST, creating and
//! merging symbols in the [`SymbolTable`] while appending unresolved
//! cross-references to four worklists. Phase 2 ([`resolve`]) runs once, after
//! every unit has been translated, and drains the worklists against the
//! complete table, emitting edges or falling back to opaque scalar typing.

pub mod options;
pub mod pipeline;
pub mod resolve;
pub mod table;
pub mod translate;
pub mod worklist;

pub use options::ModelOptions;
pub use pipeline::{Pipeline, Translation, translate_units};
pub use resolve::{CollectionTyper, NoCollections};
pub use table::SymbolTable;
pub use worklist::Worklists;
