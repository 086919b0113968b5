// src/host.rs

//! Host facts printed at the start of a build.

use serde::Serialize;
use sysinfo::System;

use crate::diagnostics::Diagnostics;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostFacts {
    pub hostname: String,
    pub platform: String,
    pub kernel: String,
}

impl HostFacts {
    pub fn collect() -> Self {
        Self {
            hostname: System::host_name().unwrap_or_else(|| "unknown".to_string()),
            platform: std::env::consts::OS.to_string(),
            kernel: System::kernel_version().unwrap_or_else(|| "unknown".to_string()),
        }
    }

    pub fn report(&self, diagnostics: &dyn Diagnostics) {
        diagnostics.action("Fetching system environment information...");
        diagnostics.line(&format!(">>> hostname=[{}]", self.hostname));
        diagnostics.line(&format!(">>> platform=[{}]", self.platform));
        diagnostics.line(&format!(">>> kernel-v=[{}]", self.kernel));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_matches_build_target() {
        let facts = HostFacts::collect();
        assert_eq!(facts.platform, std::env::consts::OS);
        assert!(!facts.hostname.is_empty());
        assert!(!facts.kernel.is_empty());
    }
}
