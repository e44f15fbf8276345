//! Translation options.

/// Named boolean switches consulted during Phase 1 and Phase 2.
///
/// The three aggregation switches drive the decision table in
/// [`resolve`](super::resolve); they have no effect anywhere else.
#[derive(Clone, Copy, Debug)]
pub struct ModelOptions {
    /// Phase 1 member filter: skip members not declared `public`.
    pub public_only: bool,
    /// Phase 1 field-translation mode: `true` routes fields through the
    /// association-candidate path, `false` through the plain attribute path.
    pub association: bool,
    /// Treat an owning pointer (`unique_ptr`) as composition.
    pub unique_ptr_as_composition: bool,
    /// Treat a raw or shared/non-owning smart pointer as aggregation.
    pub pointer_as_aggregation: bool,
    /// Treat a reference (`&`) as a plain association (aggregation = none).
    pub reference_as_association: bool,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            public_only: false,
            association: true,
            unique_ptr_as_composition: true,
            pointer_as_aggregation: true,
            reference_as_association: true,
        }
    }
}
