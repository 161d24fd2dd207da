//! One-way reporting bridge from the sandbox into the request store.

use std::sync::{Mutex, Weak};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::record::RequestType;
use crate::store::RequestStore;

/// A bridge operation as a one-way message.
///
/// The `op` tag and field names match the call surface the interception
/// script uses, so a host whose sandbox boundary is a string channel can
/// hand payloads to [`ReportingBridge::dispatch_json`] verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum Report {
    /// A form submission, programmatic or via a native submit button.
    #[serde(rename = "recordFormSubmission")]
    FormSubmission {
        /// Absolute target URL (page origin + action attribute).
        url: String,
        /// Verb from the `method` attribute, `"GET"` when unspecified.
        method: String,
        /// JSON-stringified array of `{name, value, type}` field objects.
        body: String,
        /// Always empty for form submissions.
        headers: String,
        /// Stack text captured at interception time.
        trace: String,
        /// The `enctype` attribute, when the form carries one.
        #[serde(default)]
        enctype: Option<String>,
    },
    /// An XHR `send`, composed from the state accumulated since `open`.
    #[serde(rename = "recordXhr")]
    Xhr {
        /// URL given to `open`.
        url: String,
        /// Verb given to `open`.
        method: String,
        /// Body given to `send`.
        body: String,
        /// Newline-joined `"name: value"` pairs in `setRequestHeader` order.
        headers: String,
        /// Stack text captured at interception time.
        trace: String,
    },
    /// A `fetch` invocation.
    #[serde(rename = "recordFetch")]
    Fetch {
        /// URL from the options object, `""` when absent.
        url: String,
        /// Verb from the options object, `"GET"` when absent.
        method: String,
        /// Body from the options object, `""` when absent.
        body: String,
        /// JSON-stringified headers object, `"{}"` when absent.
        headers: String,
        /// Stack text captured at interception time.
        trace: String,
    },
}

/// Sandbox-facing handle appending reports to the host's request store.
///
/// Every operation is fire-and-forget: nothing is returned to the caller and
/// delivery is best-effort. The bridge holds only a weak store handle, so a
/// report arriving after sandbox teardown is dropped, never an error.
#[derive(Debug, Clone)]
pub struct ReportingBridge {
    store: Weak<Mutex<RequestStore>>,
}

impl ReportingBridge {
    pub(crate) fn new(store: Weak<Mutex<RequestStore>>) -> Self {
        Self { store }
    }

    /// Records a form submission.
    pub fn record_form_submission(
        &self,
        url: &str,
        method: &str,
        body: &str,
        headers: &str,
        trace: &str,
        enctype: Option<&str>,
    ) {
        self.deliver(Report::FormSubmission {
            url: url.to_string(),
            method: method.to_string(),
            body: body.to_string(),
            headers: headers.to_string(),
            trace: trace.to_string(),
            enctype: enctype.map(str::to_string),
        });
    }

    /// Records an XHR send.
    pub fn record_xhr(&self, url: &str, method: &str, body: &str, headers: &str, trace: &str) {
        self.deliver(Report::Xhr {
            url: url.to_string(),
            method: method.to_string(),
            body: body.to_string(),
            headers: headers.to_string(),
            trace: trace.to_string(),
        });
    }

    /// Records a fetch invocation.
    pub fn record_fetch(&self, url: &str, method: &str, body: &str, headers: &str, trace: &str) {
        self.deliver(Report::Fetch {
            url: url.to_string(),
            method: method.to_string(),
            body: body.to_string(),
            headers: headers.to_string(),
            trace: trace.to_string(),
        });
    }

    /// Delivers one report, appending exactly one record to the store.
    ///
    /// If the store is already gone or its lock is poisoned the report is
    /// dropped with a log line. There are no retries; a lost report is never
    /// replayed.
    pub fn deliver(&self, report: Report) {
        let Some(store) = self.store.upgrade() else {
            debug!("request store gone; report dropped");
            return;
        };
        let Ok(mut store) = store.lock() else {
            warn!("request store lock poisoned; report dropped");
            return;
        };
        match report {
            Report::FormSubmission { url, method, body, headers, trace, enctype } => {
                info!(%url, %method, "recorded form submission from sandbox");
                store.record(RequestType::Form, url, method, body, headers, trace, enctype);
            }
            Report::Xhr { url, method, body, headers, trace } => {
                info!(%url, %method, "recorded XHR from sandbox");
                store.record(RequestType::XmlHttp, url, method, body, headers, trace, None);
            }
            Report::Fetch { url, method, body, headers, trace } => {
                info!(%url, %method, "recorded fetch from sandbox");
                store.record(RequestType::Fetch, url, method, body, headers, trace, None);
            }
        }
    }

    /// Parses a JSON bridge payload and delivers it.
    ///
    /// For hosts whose only crossing primitive is a string message channel.
    /// A malformed payload is dropped with a warning; there is no reply
    /// channel to signal it on.
    pub fn dispatch_json(&self, payload: &str) {
        match serde_json::from_str::<Report>(payload) {
            Ok(report) => self.deliver(report),
            Err(error) => warn!(%error, "undeliverable bridge payload dropped"),
        }
    }
}
