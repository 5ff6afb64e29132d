//! Failure observers fed by the client's response interceptor.

use std::sync::{Arc, Mutex};

use tracing::error;

use crate::error::ApiError;

/// Receives every failed request before the error is returned to the caller.
///
/// Implementations must not alter control flow: the interceptor forwards the
/// original error regardless of what the observer does.
pub trait ErrorObserver: Send + Sync + std::fmt::Debug {
    /// Called once per failed request.
    fn on_error(&self, method: &str, url: &str, error: &ApiError);
}

/// Logs failures through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ErrorObserver for TracingObserver {
    fn on_error(&self, method: &str, url: &str, err: &ApiError) {
        error!(
            method,
            url,
            status = err.status().map(|s| s.as_u16()),
            detail = %err.detail(),
            "API error"
        );
    }
}

/// A single failure captured by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedFailure {
    /// HTTP method of the failed request.
    pub method: String,
    /// Full request URL.
    pub url: String,
    /// Status code, if the remote answered.
    pub status: Option<u16>,
    /// Remote payload or error message.
    pub detail: String,
}

/// Captures failures in memory so tests can assert on them.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    failures: Arc<Mutex<Vec<ObservedFailure>>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every failure seen so far.
    pub fn failures(&self) -> Vec<ObservedFailure> {
        self.failures
            .lock()
            .map(|f| f.clone())
            .unwrap_or_default()
    }

    /// Number of failures seen so far.
    pub fn len(&self) -> usize {
        self.failures.lock().map(|f| f.len()).unwrap_or_default()
    }

    /// True if nothing has failed yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorObserver for RecordingObserver {
    fn on_error(&self, method: &str, url: &str, err: &ApiError) {
        let failure = ObservedFailure {
            method: method.to_string(),
            url: url.to_string(),
            status: err.status().map(|s| s.as_u16()),
            detail: err.detail(),
        };

        if let Ok(mut failures) = self.failures.lock() {
            failures.push(failure);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;

    #[test]
    fn recorder_captures_remote_detail() {
        let recorder = RecordingObserver::new();
        let err = ApiError::from_status(
            StatusCode::NOT_FOUND,
            r#"{"error":"not found"}"#.to_string(),
        );

        recorder.on_error("DELETE", "http://localhost:5000/api/users/1", &err);

        assert_eq!(
            recorder.failures(),
            vec![ObservedFailure {
                method: "DELETE".into(),
                url: "http://localhost:5000/api/users/1".into(),
                status: Some(404),
                detail: r#"{"error":"not found"}"#.into(),
            }]
        );
    }

    #[test]
    fn clones_share_the_same_log() {
        let recorder = RecordingObserver::new();
        let clone = recorder.clone();
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".into());

        clone.on_error("GET", "http://localhost:5000/api/users", &err);

        assert_eq!(recorder.len(), 1);
        assert!(!recorder.is_empty());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn tracing_observer_logs_remote_detail() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let err = ApiError::from_status(
            StatusCode::NOT_FOUND,
            r#"{"error":"User not found"}"#.to_string(),
        );

        tracing::subscriber::with_default(subscriber, || {
            TracingObserver.on_error("DELETE", "http://localhost:5000/api/users/1", &err);
        });

        let output = logs.contents();
        assert!(output.contains("ERROR"), "{output}");
        assert!(output.contains("API error"), "{output}");
        assert!(output.contains("status=404"), "{output}");
        assert!(
            output.contains(r#"detail={"error":"User not found"}"#),
            "{output}"
        );
    }

    #[test]
    fn tracing_observer_logs_message_without_payload() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let err = ApiError::from_status(StatusCode::SERVICE_UNAVAILABLE, String::new());

        tracing::subscriber::with_default(subscriber, || {
            TracingObserver.on_error("GET", "http://localhost:5000/api/health", &err);
        });

        let output = logs.contents();
        assert!(
            output.contains("detail=http 503 Service Unavailable: "),
            "{output}"
        );
    }
}
