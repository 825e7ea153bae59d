//! Shared batch outcome type.
//!
//! Both batch pipelines (attendance import, vote bridge) report the same
//! shape: how many rows succeeded, how many were recorded as soft failures,
//! and the failure reasons verbatim. Administrative tooling surfaces these
//! counts and the error list as-is; partial failure is never silently
//! swallowed and never blocks the successful rows.

/// Result of one batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl BatchOutcome {
    /// Short-circuit outcome for precondition failures: nothing was
    /// processed, one reason recorded.
    pub fn aborted(reason: String) -> Self {
        BatchOutcome {
            success: 0,
            failed: 0,
            errors: vec![reason],
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.success == 0 && self.failed == 0 && !self.errors.is_empty()
    }
}
