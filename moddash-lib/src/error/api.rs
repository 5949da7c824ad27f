//! Failures talking to the hosted database

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

/// JSON body PostgREST sends alongside a non-2xx status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestErrorDetail {
    /// Postgres or PostgREST code, e.g. "PGRST116" or "22P02".
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl fmt::Display for RestErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = &self.code {
            write!(f, "[{}] ", code)?;
        }
        f.write_str(&self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Http {
        status: u16,
        message: String,
        detail: Option<Box<RestErrorDetail>>,
    },

    /// The request never produced a response.
    #[error("request could not be sent: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("invalid backend URL {0}")]
    InvalidUrl(String),

    /// A 2xx body did not have the expected shape.
    #[error("could not decode {what}: {message}")]
    Decode { what: &'static str, message: String },
}

impl ApiError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            detail: None,
        }
    }

    /// Builds an HTTP error from whatever body the backend sent.
    ///
    /// A PostgREST JSON body is kept as [`RestErrorDetail`]; anything else
    /// becomes the message as-is.
    pub fn from_body(status: u16, body: String) -> Self {
        match serde_json::from_str::<RestErrorDetail>(&body) {
            Ok(detail) if !detail.message.is_empty() => Self::Http {
                status,
                message: detail.to_string(),
                detail: Some(Box::new(detail)),
            },
            _ => Self::http(status, body),
        }
    }

    pub fn decode(what: &'static str, err: impl fmt::Display) -> Self {
        Self::Decode {
            what,
            message: err.to_string(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The Postgres/PostgREST code from the error body.
    pub fn rest_code(&self) -> Option<&str> {
        match self {
            Self::Http {
                detail: Some(detail),
                ..
            } => detail.code.as_deref(),
            _ => None,
        }
    }

    /// Transport failures, timeouts, throttling and 5xx answers may succeed
    /// on a second attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::Http { status, .. } => *status == 408 || *status == 429 || *status >= 500,
            Self::InvalidUrl(_) | Self::Decode { .. } => false,
        }
    }
}
