// Error types shared by the library modules. The binary wraps these in
// `anyhow` at the top level; keeping them typed lets tests match on
// variants and gives the empty-pack usage message a single home.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or validating a pack file.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("failed to read pack {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("pack {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("pack {} must be a JSON object with 'chips' and/or 'programs' arrays, found {found}", .path.display())]
    Shape { path: PathBuf, found: &'static str },

    #[error("pack {} has malformed records: {source}", .path.display())]
    Records {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Neither `chips` nor `programs` holds anything.
    #[error("Pack has no 'chips' or 'programs' arrays.")]
    Empty,
}

/// Failures while registering one record.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}{}: {body}", leading_space(.reason))]
    Remote {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("API key is not a valid HTTP header value")]
    InvalidApiKey,
}

/// `" reason"`, or nothing when the status has no reason phrase.
fn leading_space(reason: &str) -> String {
    if reason.is_empty() {
        String::new()
    } else {
        format!(" {reason}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_without_reason_has_no_dangling_space() {
        let err = RegisterError::Remote {
            status: 599,
            reason: String::new(),
            body: "late".into(),
        };
        assert_eq!(err.to_string(), "HTTP 599: late");
    }
}
