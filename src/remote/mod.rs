//! Remote fetching
//!
//! Blocking HTTP retrieval of catalog feeds, thumbnails, and model archives.
//! One attempt per call: no timeout, no retry, no backoff. Callers that want
//! more resilience invoke again themselves.

use std::fmt;
use std::path::Path;

/// Error type for remote fetches
#[derive(Debug)]
pub enum FetchError {
    /// Transport failure: DNS, connect, TLS, or a dropped connection mid-body
    Network(String),
    /// The server answered with an error status
    Http { status: u16, url: String },
    /// Local file I/O failure while writing the response
    Io(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {}", msg),
            FetchError::Http { status, url } => write!(f, "HTTP {} from {}", status, url),
            FetchError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        FetchError::Io(e.to_string())
    }
}

/// Download the resource at `url` and write it verbatim to `dest`,
/// creating or overwriting the file.
///
/// A failed transfer may leave a truncated file behind at `dest`; nothing
/// here cleans up partial writes.
pub fn fetch(url: &str, dest: &Path) -> Result<(), FetchError> {
    let response = ureq::get(url).call().map_err(|e| convert_error(url, e))?;

    let mut reader = response.into_reader();
    let mut file = std::fs::File::create(dest)?;
    std::io::copy(&mut reader, &mut file)?;
    Ok(())
}

/// Download the resource at `url` and return the body as text.
pub fn fetch_string(url: &str) -> Result<String, FetchError> {
    let response = ureq::get(url).call().map_err(|e| convert_error(url, e))?;
    response
        .into_string()
        .map_err(|e| FetchError::Io(e.to_string()))
}

/// Split ureq's error into our status/transport taxonomy
fn convert_error(url: &str, e: ureq::Error) -> FetchError {
    match e {
        ureq::Error::Status(status, _) => FetchError::Http {
            status,
            url: url.to_string(),
        },
        other => FetchError::Network(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[test]
    fn test_fetch_writes_body_verbatim() {
        let server = testutil::serve(vec![("/data.bin".to_string(), b"hello bytes".to_vec())]);
        let dir = tempfile::TempDir::new().unwrap();
        let dest = dir.path().join("data.bin");

        fetch(&format!("{}/data.bin", server.url), &dest).unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"hello bytes");
    }

    #[test]
    fn test_fetch_overwrites_existing_file() {
        let server = testutil::serve(vec![("/data.bin".to_string(), b"new".to_vec())]);
        let dir = tempfile::TempDir::new().unwrap();
        let dest = dir.path().join("data.bin");
        std::fs::write(&dest, b"a much longer previous payload").unwrap();

        fetch(&format!("{}/data.bin", server.url), &dest).unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"new");
    }

    #[test]
    fn test_fetch_string() {
        let server = testutil::serve(vec![("/feed".to_string(), b"<rss/>".to_vec())]);

        let body = fetch_string(&format!("{}/feed", server.url)).unwrap();

        assert_eq!(body, "<rss/>");
    }

    #[test]
    fn test_error_status_is_reported() {
        let server = testutil::serve(vec![]);
        let dir = tempfile::TempDir::new().unwrap();

        let err = fetch(
            &format!("{}/missing", server.url),
            &dir.path().join("out"),
        )
        .unwrap_err();

        match err {
            FetchError::Http { status, .. } => assert_eq!(status, 404),
            other => panic!("expected Http error, got {}", other),
        }
    }

    #[test]
    fn test_unreachable_host_is_a_network_error() {
        let dir = tempfile::TempDir::new().unwrap();

        // Port 1 is never listening
        let err = fetch("http://127.0.0.1:1/x", &dir.path().join("out")).unwrap_err();

        assert!(matches!(err, FetchError::Network(_)));
    }
}
