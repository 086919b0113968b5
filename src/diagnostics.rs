// src/diagnostics.rs

//! Human-readable progress reporting.
//!
//! The resolver, the loader and the generators only talk to a
//! [`Diagnostics`] sink. The binary plugs in [`TracingDiagnostics`]; library
//! users that want silence use [`NullDiagnostics`].

use tracing::{error, info};

/// Capability used to report what the tool is doing.
pub trait Diagnostics {
    /// Start a new section (e.g. "Loading Grunt Configuration").
    fn title(&self, title: &str);

    /// Free-form informational line.
    fn line(&self, message: &str);

    /// Something was done.
    fn action(&self, message: &str);

    /// The current step completed successfully.
    fn success(&self, message: &str);

    /// The current step failed; `detail` carries the underlying error text.
    fn failure(&self, message: &str, detail: Option<&str>);
}

/// Forwards every event to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn title(&self, title: &str) {
        info!(target: "gruntcfg::diagnostics", "== {title}");
    }

    fn line(&self, message: &str) {
        info!(target: "gruntcfg::diagnostics", "{message}");
    }

    fn action(&self, message: &str) {
        info!(target: "gruntcfg::diagnostics", ">> {message}");
    }

    fn success(&self, message: &str) {
        info!(target: "gruntcfg::diagnostics", "OK {message}");
    }

    fn failure(&self, message: &str, detail: Option<&str>) {
        match detail {
            Some(detail) => error!(target: "gruntcfg::diagnostics", detail, "ERROR {message}"),
            None => error!(target: "gruntcfg::diagnostics", "ERROR {message}"),
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn title(&self, _title: &str) {}
    fn line(&self, _message: &str) {}
    fn action(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn failure(&self, _message: &str, _detail: Option<&str>) {}
}
