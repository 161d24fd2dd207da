//! Recorded request model and canonical debug serialization.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which sandbox API produced a record.
///
/// Closed enumeration: adding a variant requires extending the interception
/// script, the bridge call surface, and this model together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    /// The global `fetch` function.
    #[serde(rename = "FETCH")]
    Fetch,
    /// The `XMLHttpRequest` open / setRequestHeader / send sequence.
    #[serde(rename = "XML_HTTP")]
    XmlHttp,
    /// Form submission, programmatic or via a native submit button.
    #[serde(rename = "FORM")]
    Form,
}

impl RequestType {
    /// Canonical label used in logs and the debug serialization.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Fetch => "FETCH",
            Self::XmlHttp => "XML_HTTP",
            Self::Form => "FORM",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One observed request-initiating call, normalized across the three APIs.
///
/// Immutable once appended to the store; owned by the store until the store
/// itself is dropped on sandbox teardown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedRequest {
    /// Originating API.
    pub request_type: RequestType,
    /// Target URL: absolute (origin + action) for FORM, as provided by the
    /// caller for XHR and FETCH.
    pub url: String,
    /// HTTP verb in the caller's case; `"GET"` when a form or fetch call
    /// left it unspecified.
    pub method: String,
    /// Serialized payload: a JSON array of `{name, value, type}` objects for
    /// FORM, the raw body for XHR, the raw body or `""` for FETCH.
    pub body: String,
    /// `""` for FORM; newline-joined `"name: value"` pairs in call order for
    /// XHR; a JSON-stringified headers object (`"{}"` if absent) for FETCH.
    pub headers: String,
    /// Call-stack text captured inside the sandbox at interception time.
    pub trace: String,
    /// The form's `enctype` attribute; always `None` for XHR and FETCH.
    pub enctype: Option<String>,
    /// When the host appended this record. Log attribution only; not part of
    /// the canonical debug form.
    pub recorded_at: DateTime<Utc>,
}

impl RecordedRequest {
    /// Builds a record from already-normalized fields, stamped with the
    /// current time.
    #[must_use]
    pub fn new(
        request_type: RequestType,
        url: impl Into<String>,
        method: impl Into<String>,
        body: impl Into<String>,
        headers: impl Into<String>,
        trace: impl Into<String>,
        enctype: Option<String>,
    ) -> Self {
        Self {
            request_type,
            url: url.into(),
            method: method.into(),
            body: body.into(),
            headers: headers.into(),
            trace: trace.into(),
            enctype,
            recorded_at: Utc::now(),
        }
    }
}

impl fmt::Display for RecordedRequest {
    /// Canonical debug form: a flat object-literal string with keys `type,
    /// url, method, body, headers, trace, enctype` in that order. Embedded
    /// double quotes are escaped; an absent enctype renders as the bare
    /// token `null`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let enctype = match &self.enctype {
            Some(value) => format!("\"{}\"", escape_quotes(value)),
            None => "null".to_string(),
        };
        write!(
            f,
            "{{ \"type\": \"{}\", \"url\": \"{}\", \"method\": \"{}\", \"body\": \"{}\", \
             \"headers\": \"{}\", \"trace\": \"{}\", \"enctype\": {} }}",
            self.request_type.label(),
            escape_quotes(&self.url),
            escape_quotes(&self.method),
            escape_quotes(&self.body),
            escape_quotes(&self.headers),
            escape_quotes(&self.trace),
            enctype,
        )
    }
}

/// Escapes embedded double quotes for the canonical debug form.
#[must_use]
pub fn escape_quotes(value: &str) -> String {
    value.replace('"', "\\\"")
}

/// Reverses [`escape_quotes`].
#[must_use]
pub fn unescape_quotes(value: &str) -> String {
    value.replace("\\\"", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_labels_are_canonical() {
        assert_eq!(RequestType::Fetch.to_string(), "FETCH");
        assert_eq!(RequestType::XmlHttp.to_string(), "XML_HTTP");
        assert_eq!(RequestType::Form.to_string(), "FORM");
    }

    #[test]
    fn display_renders_fixed_key_order() {
        let record = RecordedRequest::new(
            RequestType::XmlHttp,
            "https://example.com/api",
            "POST",
            "a=1",
            "Accept: text/plain\n",
            "at send",
            None,
        );
        assert_eq!(
            record.to_string(),
            "{ \"type\": \"XML_HTTP\", \"url\": \"https://example.com/api\", \
             \"method\": \"POST\", \"body\": \"a=1\", \
             \"headers\": \"Accept: text/plain\n\", \"trace\": \"at send\", \
             \"enctype\": null }"
        );
    }

    #[test]
    fn display_escapes_embedded_quotes() {
        let record = RecordedRequest::new(
            RequestType::Fetch,
            "https://example.com/?q=\"quoted\"",
            "GET",
            "{\"key\": \"value\"}",
            "{}",
            "trace",
            None,
        );
        let rendered = record.to_string();
        assert!(rendered.contains("\\\"quoted\\\""));
        assert!(rendered.contains("{\\\"key\\\": \\\"value\\\"}"));
    }

    #[test]
    fn enctype_renders_quoted_only_when_present() {
        let with = RecordedRequest::new(
            RequestType::Form,
            "https://example.com/",
            "POST",
            "[]",
            "",
            "",
            Some("multipart/form-data".to_string()),
        );
        assert!(with.to_string().ends_with("\"enctype\": \"multipart/form-data\" }"));

        let without = RecordedRequest::new(
            RequestType::Form,
            "https://example.com/",
            "GET",
            "[]",
            "",
            "",
            None,
        );
        assert!(without.to_string().ends_with("\"enctype\": null }"));
    }

    #[test]
    fn quote_escaping_round_trips() {
        let original = "say \"hello\" twice: \"hello\"";
        assert_eq!(unescape_quotes(&escape_quotes(original)), original);
        assert_eq!(escape_quotes("no quotes here"), "no quotes here");
    }
}
