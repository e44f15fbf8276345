//! Pending cross-references recorded in Phase 1 and consumed exactly once in
//! Phase 2.

use smol_str::SmolStr;

use crate::ast::{FieldDecl, TypeToken};
use crate::model::ElementId;

/// A base-type reference awaiting resolution.
#[derive(Clone, Debug)]
pub struct PendingBase {
    /// The declaring class.
    pub classifier: ElementId,
    /// The raw base-type token as declared.
    pub token: TypeToken,
    /// Originating compilation unit, for import-aware lookup.
    pub unit: Option<SmolStr>,
}

/// A field that may become an association, or degrade to attributes.
#[derive(Clone, Debug)]
pub struct PendingAssociation {
    pub classifier: ElementId,
    /// The whole field node; it may declare several variables of one type.
    pub field: FieldDecl,
    pub unit: Option<SmolStr>,
}

/// Which typed slot of an element a pending feature refers to.
#[derive(Clone, Copy, Debug)]
pub enum FeatureSlot {
    Attribute {
        owner: ElementId,
        index: usize,
    },
    Parameter {
        owner: ElementId,
        operation: usize,
        index: usize,
    },
}

impl FeatureSlot {
    /// The element owning the feature, used as the resolution scope.
    pub fn owner(&self) -> ElementId {
        match self {
            Self::Attribute { owner, .. } | Self::Parameter { owner, .. } => *owner,
        }
    }
}

/// A typed feature (attribute, parameter or return slot) awaiting its type.
#[derive(Clone, Debug)]
pub struct PendingFeature {
    pub slot: FeatureSlot,
    pub token: TypeToken,
    pub unit: Option<SmolStr>,
}

/// A dependency-edge candidate.
#[derive(Clone, Debug)]
pub struct PendingDependency {
    pub source: ElementId,
    /// Base type name extracted via [`crate::typename::base_name`].
    pub base_name: SmolStr,
    pub unit: Option<SmolStr>,
}

/// The four worklists shared by the translation phases.
///
/// Drained in a fixed order (base types, associations, typed features,
/// dependencies) because base-type resolution may synthesize symbols the
/// later passes can then find.
#[derive(Debug, Default)]
pub struct Worklists {
    pub base_types: Vec<PendingBase>,
    pub associations: Vec<PendingAssociation>,
    pub typed_features: Vec<PendingFeature>,
    pub dependencies: Vec<PendingDependency>,
}

impl Worklists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total pending entries, across all four lists.
    pub fn len(&self) -> usize {
        self.base_types.len()
            + self.associations.len()
            + self.typed_features.len()
            + self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
