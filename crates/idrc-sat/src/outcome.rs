//! The result of a single solver invocation (§6: "receive
//! `Satisfiable{model: var->bool}` or `Unsatisfiable`").

/// The outcome of submitting a clause set to a backend solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatOutcome {
    /// The instance is satisfiable; `model[i]` is the truth value of
    /// variable `i + 1`.
    Satisfiable { model: Vec<bool> },
    /// The instance is provably unsatisfiable.
    Unsatisfiable,
}

impl SatOutcome {
    /// The model, if this outcome is satisfiable.
    pub fn model(&self) -> Option<&[bool]> {
        match self {
            SatOutcome::Satisfiable { model } => Some(model),
            SatOutcome::Unsatisfiable => None,
        }
    }

    /// Whether this outcome is satisfiable.
    pub fn is_sat(&self) -> bool {
        matches!(self, SatOutcome::Satisfiable { .. })
    }
}
