//! Diagnostic output of the resolver.
//!
//! Resolution has no side effects besides diagnostics, so the sink is passed
//! in explicitly rather than read from process-wide state.

/// Receives diagnostics emitted while resolving.
pub trait Diagnostics: Send + Sync {
    /// Whether debug messages are wanted. Callers skip formatting otherwise.
    fn debug_enabled(&self) -> bool;

    fn debug(&self, message: &str);

    fn warn(&self, message: &str);
}

/// Forwards diagnostics to `tracing` under the `swagger_types` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics {
    debug: bool,
}

impl TracingDiagnostics {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }
}

impl Diagnostics for TracingDiagnostics {
    fn debug_enabled(&self) -> bool {
        self.debug
    }

    fn debug(&self, message: &str) {
        if self.debug {
            tracing::debug!(target: "swagger_types", "{}", message);
        }
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "swagger_types", "{}", message);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Diagnostics for Silent {
    fn debug_enabled(&self) -> bool {
        false
    }

    fn debug(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}
}
