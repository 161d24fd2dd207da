//! Core library for `pagetap` — in-page request observation for embedded
//! web content sandboxes.
//!
//! A host embedding web content cannot always see the requests that page
//! script issues: they may be intercepted before reaching a real transport.
//! `pagetap` observes them from above instead. The host evaluates
//! [`script::INTERCEPTION_SCRIPT`] inside the sandbox (after wiring the
//! reporting bridge under [`script::BRIDGE_GLOBAL`]); the script wraps form
//! submission, `XMLHttpRequest`, and `fetch` so every call is reported over
//! the bridge and then executed with its original semantics. Reports land in
//! an append-only store owned by [`inspector::RequestInspector`], queryable
//! by exact URL.
//!
//! Observation is best-effort instrumentation: a report fired while the
//! bridge or store is unavailable is silently lost, and the page is never
//! broken by a failed capture.

pub mod bridge;
pub mod inspector;
pub mod record;
pub mod sandbox;
pub mod script;
pub mod store;

pub use bridge::{Report, ReportingBridge};
pub use inspector::RequestInspector;
pub use record::{RecordedRequest, RequestType};
pub use sandbox::{install_interception, ScriptHost};
pub use store::RequestStore;
