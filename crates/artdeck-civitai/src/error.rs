//! Internal error types for CivitAI operations.
//!
//! These errors are internal to `artdeck-civitai` and are mapped to the
//! core port error at the boundary.

use thiserror::Error;

use artdeck_core::ports::CatalogFetchError;

/// Result type alias for CivitAI operations.
pub type CivitaiResult<T> = Result<T, CivitaiError>;

/// Errors related to CivitAI API operations.
#[derive(Debug, Error)]
pub enum CivitaiError {
    /// API request failed with an HTTP error status.
    #[error("CivitAI API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The requested resource was not found.
    #[error("'{resource}' not found on CivitAI")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl From<CivitaiError> for CatalogFetchError {
    fn from(error: CivitaiError) -> Self {
        match error {
            CivitaiError::ApiRequestFailed { status, url } => {
                Self::RequestFailed { status, url }
            }
            CivitaiError::NotFound { resource } => Self::NotFound { resource },
            CivitaiError::Network(cause) => Self::Network(cause.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_request_failed_message() {
        let error = CivitaiError::ApiRequestFailed {
            status: 503,
            url: "https://civitai.com/api/v1/models".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("civitai.com"));
    }

    #[test]
    fn test_not_found_message() {
        let error = CivitaiError::NotFound {
            resource: "models/12345".to_string(),
        };
        assert!(error.to_string().contains("models/12345"));
        assert!(error.to_string().contains("not found"));
    }

    #[test]
    fn test_maps_to_port_error() {
        let mapped: CatalogFetchError = CivitaiError::ApiRequestFailed {
            status: 500,
            url: "u".to_string(),
        }
        .into();
        assert!(matches!(
            mapped,
            CatalogFetchError::RequestFailed { status: 500, .. }
        ));

        let mapped: CatalogFetchError = CivitaiError::NotFound {
            resource: "models/1".to_string(),
        }
        .into();
        assert!(matches!(mapped, CatalogFetchError::NotFound { .. }));
    }
}
