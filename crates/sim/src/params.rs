/// Physical quantities of a model that are subject to per-episode
/// randomization.
///
/// Each field holds the per-body, per-dof, or per-geom base values the engine
/// was loaded with. The environment layer treats these as opaque payload: it
/// samples a perturbed copy and hands it back through
/// [`SimBackend::set_params`](crate::SimBackend::set_params) without
/// interpreting individual entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalParams {
    pub body_mass: Vec<f32>,
    pub body_inertia: Vec<f32>,
    pub dof_damping: Vec<f32>,
    pub geom_friction: Vec<f32>,
}

impl PhysicalParams {
    /// Parameter set with no bodies, dofs, or geoms.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            body_mass: Vec::new(),
            body_inertia: Vec::new(),
            dof_damping: Vec::new(),
            geom_friction: Vec::new(),
        }
    }
}
