//! Seam between the host and the sandbox's script-evaluation capability.

use crate::script;

/// Evaluates script text inside the sandbox's global scope.
///
/// Implemented by the embedding host (a webview, a test harness). Evaluation
/// is one-way from the host's perspective: nothing flows back except an
/// evaluation error.
pub trait ScriptHost {
    /// Evaluates `source` in the sandbox's global scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the sandbox rejects or fails to evaluate the
    /// source text.
    fn eval(&self, source: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Installs the interception wrappers into the sandbox, immediately followed
/// by `extra_script`, in a single evaluation pass.
///
/// The reporting bridge must already be reachable from the sandbox's global
/// scope under [`script::BRIDGE_GLOBAL`]; reports fired before that wiring
/// exists are silently lost.
///
/// # Errors
///
/// Returns the host's evaluation error, if any.
pub fn install_interception(
    host: &dyn ScriptHost,
    extra_script: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    host.eval(&script::build_injection(extra_script))
}
