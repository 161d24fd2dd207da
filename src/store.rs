//! Append-only, insertion-ordered store of recorded requests.

use crate::record::{RecordedRequest, RequestType};

/// Holds every request reported out of the sandbox, in delivery order.
///
/// Records are never mutated or removed, there is no capacity bound and no
/// eviction. The store lives exactly as long as one sandbox load; the host
/// creates a fresh one per load, so nothing persists across reloads.
#[derive(Debug, Default)]
pub struct RequestStore {
    requests: Vec<RecordedRequest>,
}

impl RequestStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a record from the given fields and appends it.
    ///
    /// Always succeeds; the strings are stored as given, with no validation.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &mut self,
        request_type: RequestType,
        url: impl Into<String>,
        method: impl Into<String>,
        body: impl Into<String>,
        headers: impl Into<String>,
        trace: impl Into<String>,
        enctype: Option<String>,
    ) {
        self.requests.push(RecordedRequest::new(
            request_type,
            url,
            method,
            body,
            headers,
            trace,
            enctype,
        ));
    }

    /// Returns the first (oldest) record whose `url` exactly equals the
    /// argument.
    ///
    /// Equality is plain string equality: no normalization, trimming, or
    /// case folding. `None` is a normal result, not a failure.
    #[must_use]
    pub fn find_by_url(&self, url: &str) -> Option<&RecordedRequest> {
        self.requests.iter().find(|recorded| recorded.url == url)
    }

    /// All records in insertion order.
    #[must_use]
    pub fn requests(&self) -> &[RecordedRequest] {
        &self.requests
    }

    /// Number of recorded requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_simple(store: &mut RequestStore, request_type: RequestType, url: &str) {
        store.record(request_type, url, "GET", "", "", "", None);
    }

    #[test]
    fn preserves_insertion_order() {
        let mut store = RequestStore::new();
        record_simple(&mut store, RequestType::Form, "https://a.example/");
        record_simple(&mut store, RequestType::XmlHttp, "https://b.example/");
        record_simple(&mut store, RequestType::Fetch, "https://c.example/");

        let types: Vec<_> = store.requests().iter().map(|r| r.request_type).collect();
        assert_eq!(types, vec![RequestType::Form, RequestType::XmlHttp, RequestType::Fetch]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn find_by_url_returns_earliest_match() {
        let mut store = RequestStore::new();
        store.record(RequestType::XmlHttp, "https://dup.example/", "POST", "first", "", "", None);
        store.record(RequestType::Fetch, "https://dup.example/", "GET", "second", "", "", None);

        let found = store.find_by_url("https://dup.example/").expect("should match");
        assert_eq!(found.body, "first");
        assert_eq!(found.request_type, RequestType::XmlHttp);
    }

    #[test]
    fn find_by_url_requires_exact_equality() {
        let mut store = RequestStore::new();
        record_simple(&mut store, RequestType::Fetch, "https://example.com/path");

        assert!(store.find_by_url("https://example.com/path").is_some());
        // No case folding, no prefix matching, no trimming.
        assert!(store.find_by_url("https://EXAMPLE.com/path").is_none());
        assert!(store.find_by_url("https://example.com/").is_none());
        assert!(store.find_by_url(" https://example.com/path").is_none());
    }

    #[test]
    fn miss_on_empty_store_is_none() {
        let store = RequestStore::new();
        assert!(store.is_empty());
        assert!(store.find_by_url("https://example.com/").is_none());
    }
}
