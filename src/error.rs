//! Error type shared by all actions

use std::path::PathBuf;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Exit code for a failed action
pub const EXIT_ACTION_FAILED: u8 = 1;
/// Exit code used by clap for usage errors
pub const EXIT_USAGE: u8 = 2;
/// Exit code for a failed instance metadata lookup
pub const EXIT_METADATA_FAILED: u8 = 3;

#[derive(Debug, Error)]
pub enum Error {
    /// Region could not be read from the instance metadata service
    #[error("failed to resolve region from instance metadata")]
    Metadata(#[source] BoxError),

    /// Dimension token is not of the form Name=Value
    #[error("invalid dimension '{token}', expected Name=Value")]
    InvalidDimension { token: String },

    /// STS refused or failed the role assumption
    #[error("failed to assume role '{role_arn}'")]
    AssumeRole {
        role_arn: String,
        #[source]
        source: BoxError,
    },

    #[error(transparent)]
    Download(#[from] DownloadError),

    /// CloudWatch rejected or failed the metric submission
    #[error("failed to put metric '{metric_name}' in namespace '{namespace}'")]
    Publish {
        namespace: String,
        metric_name: String,
        #[source]
        source: BoxError,
    },
}

#[derive(Debug, Error)]
pub enum DownloadError {
    /// Object could not be fetched or its body could not be read
    #[error("failed to fetch s3://{bucket}/{key}")]
    Network {
        bucket: String,
        key: String,
        #[source]
        source: BoxError,
    },

    /// Destination file could not be created, written or renamed into place
    #[error("failed to write '{}'", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Metadata(_) => EXIT_METADATA_FAILED,
            _ => EXIT_ACTION_FAILED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_exit_codes() {
        let metadata = Error::Metadata("unreachable".into());
        assert_eq!(metadata.exit_code(), EXIT_METADATA_FAILED);

        let dimension = Error::InvalidDimension {
            token: "Host".to_string(),
        };
        assert_eq!(dimension.exit_code(), EXIT_ACTION_FAILED);

        let download = Error::from(DownloadError::Filesystem {
            path: PathBuf::from("/nonexistent/file"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert_eq!(download.exit_code(), EXIT_ACTION_FAILED);
        assert_ne!(EXIT_USAGE, EXIT_ACTION_FAILED);
    }

    #[test]
    fn test_display_keeps_context() {
        let err = Error::from(DownloadError::Network {
            bucket: "my-bucket".to_string(),
            key: "path/to/object".to_string(),
            source: "NoSuchKey".into(),
        });
        assert_eq!(err.to_string(), "failed to fetch s3://my-bucket/path/to/object");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("NoSuchKey"));
    }
}
