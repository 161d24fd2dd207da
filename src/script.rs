//! The interception script evaluated inside the web content sandbox.

/// Global name under which the host wires the reporting bridge inside the
/// sandbox before installation.
///
/// The script's `record*` calls and the host's wiring must agree on this
/// name; neither side renames it independently.
pub const BRIDGE_GLOBAL: &str = "PageTap";

/// JavaScript source that wraps form submission, `XMLHttpRequest`, and
/// `fetch` in the sandbox's global scope.
///
/// Every wrapper captures a normalized request description, reports it over
/// the bridge, then invokes the original behavior with the original
/// arguments. All reporting is wrapped in try/catch — including the case
/// where the bridge global is not installed yet — so a failed capture loses
/// one observation but never breaks the page's networking.
pub const INTERCEPTION_SCRIPT: &str = r#"
(function () {
    function reportFormSubmission(form) {
        var fields = [];
        for (var i = 0; i < form.elements.length; i++) {
            fields.push({
                name: form.elements[i].name,
                value: form.elements[i].value,
                type: form.elements[i].type
            });
        }
        var action = form.attributes['action'] === undefined ? '' : form.attributes['action'].nodeValue;
        var method = form.attributes['method'] === undefined ? 'GET' : form.attributes['method'].nodeValue;
        var enctype = form.attributes['enctype'] === undefined ? null : form.attributes['enctype'].nodeValue;
        var origin = location.protocol + '//' + location.host;
        PageTap.recordFormSubmission(
            origin + action,
            method,
            JSON.stringify(fields),
            '',
            new Error().stack || '',
            enctype
        );
    }

    var originalSubmit = HTMLFormElement.prototype.submit;
    HTMLFormElement.prototype.submit = function () {
        try { reportFormSubmission(this); } catch (e) { }
        return originalSubmit.call(this);
    };
    // Native submit buttons never reach .submit(); the capturing listener
    // reports them and leaves the browser's default submission untouched,
    // so each path performs the real submission exactly once. Programmatic
    // .submit() does not fire this event, so nothing double-reports.
    window.addEventListener('submit', function (event) {
        try { reportFormSubmission(event.target); } catch (e) { }
    }, true);

    var originalOpen = XMLHttpRequest.prototype.open;
    var originalSetRequestHeader = XMLHttpRequest.prototype.setRequestHeader;
    var originalSend = XMLHttpRequest.prototype.send;
    // Accumulation state lives on the instance: concurrent requests must
    // not share method, url, or headers.
    XMLHttpRequest.prototype.open = function (method, url, async, user, password) {
        this.__pagetap = { method: method, url: url, headers: '' };
        return originalOpen.apply(this, arguments);
    };
    XMLHttpRequest.prototype.setRequestHeader = function (header, value) {
        if (this.__pagetap) {
            this.__pagetap.headers += header + ': ' + value + '\n';
        }
        return originalSetRequestHeader.apply(this, arguments);
    };
    XMLHttpRequest.prototype.send = function (body) {
        try {
            var state = this.__pagetap || { method: '', url: '', headers: '' };
            PageTap.recordXhr(
                state.url,
                state.method,
                body === undefined || body === null ? '' : String(body),
                state.headers,
                new Error().stack || ''
            );
        } catch (e) { }
        this.__pagetap = null;
        return originalSend.apply(this, arguments);
    };

    var originalFetch = window.fetch;
    window.fetch = function () {
        try {
            var options = arguments[1];
            var url = options && 'url' in options ? options['url'] : '';
            var method = options && 'method' in options ? options['method'] : 'GET';
            var body = options && 'body' in options ? options['body'] : '';
            var headers = JSON.stringify(options && 'headers' in options ? options['headers'] : {});
            PageTap.recordFetch(url, method, body, headers, new Error().stack || '');
        } catch (e) { }
        return originalFetch.apply(this, arguments);
    };
})();
"#;

/// Builds the full injection text: the interception script immediately
/// followed by the host's extra script, for evaluation in a single pass.
#[must_use]
pub fn build_injection(extra_script: &str) -> String {
    format!("{INTERCEPTION_SCRIPT}\n{extra_script}")
}
