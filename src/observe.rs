//! Observability hooks injected into the client.
//!
//! The executor opens one [`Span`] per request through the client's
//! [`Observer`] and records the method, URL and status on it. The default
//! [`TracingObserver`] maps these onto `tracing` spans; [`NoopObserver`]
//! discards them.

use std::fmt::Debug;

/// Attribute keys recorded by the executor.
pub mod attr {
    pub const HTTP_METHOD: &str = "http.method";
    pub const HTTP_URL: &str = "http.url";
    pub const HTTP_STATUS_CODE: &str = "http.status_code";
    pub const ERROR: &str = "error";
}

/// Starts spans for outgoing requests.
pub trait Observer: Send + Sync + Debug {
    fn start_span(&self, name: &'static str) -> Box<dyn Span>;
}

/// An open span. Dropping it ends it.
pub trait Span: Send {
    fn record(&mut self, key: &'static str, value: &str);
}

/// Observer backed by the `tracing` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn start_span(&self, name: &'static str) -> Box<dyn Span> {
        let span = tracing::debug_span!(
            "atlassian.request",
            operation = name,
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
        );
        Box::new(TracingSpan { span })
    }
}

struct TracingSpan {
    span: tracing::Span,
}

impl Span for TracingSpan {
    fn record(&mut self, key: &'static str, value: &str) {
        match key {
            attr::HTTP_METHOD | attr::HTTP_URL | attr::HTTP_STATUS_CODE => {
                self.span.record(key, value);
            }
            _ => {
                let _entered = self.span.enter();
                tracing::debug!(attribute = key, value, "span attribute");
            }
        }
    }
}

/// Observer that records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn start_span(&self, _name: &'static str) -> Box<dyn Span> {
        Box::new(NoopSpan)
    }
}

struct NoopSpan;

impl Span for NoopSpan {
    fn record(&mut self, _key: &'static str, _value: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_span_accepts_any_key() {
        let mut span = TracingObserver.start_span("test");
        span.record(attr::HTTP_METHOD, "GET");
        span.record(attr::ERROR, "boom");
    }

    #[test]
    fn test_noop_observer() {
        let mut span = NoopObserver.start_span("test");
        span.record(attr::HTTP_URL, "https://example.com");
    }
}
