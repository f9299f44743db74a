use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("http {status}: {message}")]
    Http { status: StatusCode, message: String },

    #[error("parser: {0}")]
    Parse(String),

    #[error("Validation failed: {}", .messages.join(", "))]
    Validation {
        status: StatusCode,
        messages: Vec<String>,
    },

    #[error("no authentication token")]
    NotAuthenticated,
}

impl Error {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http { status, .. } | Error::Validation { status, .. } => Some(*status),
            Error::Network(e) => e.status(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_joined() {
        let e = Error::Validation {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            messages: vec![
                "The email has already been taken.".to_string(),
                "The phone field is required.".to_string(),
            ],
        };
        assert_eq!(
            e.to_string(),
            "Validation failed: The email has already been taken., The phone field is required."
        );
        assert_eq!(e.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[test]
    fn http_error_exposes_status() {
        let e = Error::Http {
            status: StatusCode::NOT_FOUND,
            message: "Not found".to_string(),
        };
        assert_eq!(e.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(Error::NotAuthenticated.status(), None);
    }
}
