//! Span helpers shared by the client crates

/// Create a span with common HTTP request fields
///
/// `http.status_code` starts empty; record it once the response arrives.
///
/// # Example
///
/// ```rust
/// use skillbridge_observability::http_request_span;
///
/// let span = http_request_span!("GET", "/tasks");
/// let _guard = span.enter();
/// // ... send request ...
/// span.record("http.status_code", 200u16);
/// ```
#[macro_export]
macro_rules! http_request_span {
    ($method:expr, $route:expr) => {
        tracing::info_span!(
            "http.request",
            http.method = $method,
            http.route = $route,
            http.status_code = tracing::field::Empty,
        )
    };
}

/// Create a span for a dashboard view operation
///
/// # Example
///
/// ```rust
/// use skillbridge_observability::view_span;
///
/// let span = view_span!("discovery", 7u64);
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! view_span {
    ($view:expr, $user_id:expr) => {
        tracing::info_span!(
            "view.operation",
            view = $view,
            user.id = $user_id,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Log an error and flag it on the current span
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::error!(error = %error, "Operation failed");
}

/// Record latency/duration on the current span
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
