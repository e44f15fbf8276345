//! # declmodel
//!
//! Library for translating parsed C++-style declarations into a normalized
//! UML-flavored object model suitable for diagramming and interchange.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! interchange → JSON export of the finished model (host boundary)
//!   ↓
//! semantic    → symbol table, two-phase translator and resolver
//!   ↓
//! model       → output element tree, edges, type references
//!   ↓
//! ast         → input AST contract consumed from an external parser
//!   ↓
//! typename    → type-expression normalization and classification
//! ```
//!
//! Translation runs in two phases. Phase 1 walks each compilation unit's
//! declarations, materializing namespaces, classes, enums, fields and
//! operations while recording unresolved cross-references into four
//! worklists. Phase 2 drains the worklists against the now-complete symbol
//! table, emitting generalization, association and dependency edges, or
//! falling back to opaque scalar typing where a reference cannot be
//! resolved.

/// Type-expression normalization: display form, base names, classification
pub mod typename;

/// Input AST contract: compilation units, declaration nodes, type tokens
pub mod ast;

/// Output model: element tree, attributes, operations, relationship edges
pub mod model;

/// Semantic translation: symbol table, phase-1 translator, phase-2 resolver
pub mod semantic;

/// Model interchange: JSON document export for the host tool
pub mod interchange;

/// Error types shared across the crate
pub mod error;

// Re-export the types most callers need
pub use ast::{CompilationUnit, Declaration, TypeToken};
pub use error::{TranslateError, UnitFailure};
pub use model::Model;
pub use semantic::{ModelOptions, Pipeline, Translation, translate_units};
