//! Builder-style configuration for the seed-generation pipeline.

/// Configuration for drawing and synthesizing one seed identity.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    width: u32,
    forward_length: usize,
    inverse_budget: usize,
    sat_backend: String,
    max_attempts: usize,
}

impl SeedConfig {
    /// Start from a width, a forward-circuit length, and an inverse gate
    /// budget; defaults to the `"cadical"` backend and 8 retry attempts.
    pub fn new(width: u32, forward_length: usize, inverse_budget: usize) -> Self {
        Self {
            width,
            forward_length,
            inverse_budget,
            sat_backend: "cadical".to_string(),
            max_attempts: 8,
        }
    }

    /// Use a different named SAT backend (§6: `minisat`, `glucose`,
    /// `cadical`, ...).
    #[must_use]
    pub fn with_sat_backend(mut self, name: impl Into<String>) -> Self {
        self.sat_backend = name.into();
        self
    }

    /// Cap the number of forward-circuit draws before giving up (§7).
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn forward_length(&self) -> usize {
        self.forward_length
    }

    pub fn inverse_budget(&self) -> usize {
        self.inverse_budget
    }

    pub fn sat_backend(&self) -> &str {
        &self.sat_backend
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}

/// Configuration for the equivalence-class unroll step following a
/// successful seed.
#[derive(Debug, Clone, Copy)]
pub struct UnrollConfig {
    max_equivalents: usize,
}

impl UnrollConfig {
    /// Bound the equivalence class at `max_equivalents` circuits (§4.6).
    pub fn new(max_equivalents: usize) -> Self {
        Self { max_equivalents }
    }

    #[must_use]
    pub fn with_max_equivalents(mut self, max_equivalents: usize) -> Self {
        self.max_equivalents = max_equivalents;
        self
    }

    pub fn max_equivalents(&self) -> usize {
        self.max_equivalents
    }
}

impl Default for UnrollConfig {
    fn default() -> Self {
        // §9: unbounded unroll is the documented default; callers operating
        // under a time budget should set an explicit bound.
        Self::new(usize::MAX)
    }
}
