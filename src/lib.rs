pub mod cli;
pub mod config;
pub mod context;
pub mod credentials;
pub mod dimensions;
pub mod error;
pub mod metrics;
pub mod publisher;
pub mod region;
pub mod s3;
mod cloudwatch;

use log::info;

use crate::config::{Action, Config};
use crate::context::AwsContext;
use crate::credentials::RoleAssumer;
use crate::publisher::{cw_put_metric, PublisherFactory};
use crate::region::{resolve_region, ImdsRegionSource};
use crate::s3::{s3_download, ObjectStore};

pub use crate::error::{DownloadError, Error};

/// Run exactly the action named by `config` against `backend`
pub async fn dispatch<B>(config: &Config, backend: &B) -> Result<(), Error>
where
    B: ObjectStore + RoleAssumer + PublisherFactory + Send + Sync,
{
    info!("Attempting to run {}...", config.action.function().name());
    match &config.action {
        Action::Download(download) => {
            s3_download(backend, download).await?;
        }
        Action::PutMetric(put_metric) => {
            cw_put_metric(backend, backend, put_metric).await?;
        }
    }
    Ok(())
}

/// Entry point that resolves the region, loads AWS config and runs the action
pub async fn main_runner(config: Config) -> Result<(), Error> {
    let region = resolve_region(&config.region, &ImdsRegionSource::new()).await?;
    info!("Using region: '{}'", region);

    let config = Config { region, ..config };
    let context = AwsContext::new(&config.region).await;
    dispatch(&config, &context).await
}

/// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DownloadConfig, PutMetricConfig};
    use crate::credentials::TemporaryCredentials;
    use crate::metrics::MetricPoint;
    use crate::publisher::MetricPublisher;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Backend that records which service each action reached
    #[derive(Default)]
    struct FakeBackend {
        calls: Arc<Mutex<Vec<String>>>,
    }

    struct RecordingPublisher {
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl MetricPublisher for RecordingPublisher {
        async fn send(&mut self, points: &[MetricPoint]) -> Result<(), Error> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("put_metric_data {}", points.len()));
            Ok(())
        }
    }

    #[async_trait]
    impl ObjectStore for FakeBackend {
        async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, Error> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("get_object {}/{}", bucket, key));
            Ok(b"content".to_vec())
        }
    }

    #[async_trait]
    impl RoleAssumer for FakeBackend {
        async fn assume_role(&self, role_arn: &str) -> Result<TemporaryCredentials, Error> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("assume_role {}", role_arn));
            Ok(TemporaryCredentials {
                access_key_id: "key".to_string(),
                secret_access_key: "secret".to_string(),
                session_token: "token".to_string(),
                expiration: None,
            })
        }
    }

    impl PublisherFactory for FakeBackend {
        fn publisher(&self, _credentials: &TemporaryCredentials) -> Box<dyn MetricPublisher + Send> {
            Box::new(RecordingPublisher {
                calls: self.calls.clone(),
            })
        }
    }

    #[tokio::test]
    async fn test_dispatch_download() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("object");
        let config = Config {
            region: "us-east-1".to_string(),
            verbose: false,
            action: Action::Download(DownloadConfig {
                bucket: "my-bucket".to_string(),
                key: "path/to/object".to_string(),
                destination: destination.clone(),
            }),
        };
        let backend = FakeBackend::default();

        dispatch(&config, &backend).await.unwrap();

        assert_eq!(
            *backend.calls.lock().unwrap(),
            vec!["get_object my-bucket/path/to/object".to_string()]
        );
        assert_eq!(std::fs::read(&destination).unwrap(), b"content");
    }

    #[tokio::test]
    async fn test_dispatch_put_metric() {
        let config = Config {
            region: "us-east-1".to_string(),
            verbose: true,
            action: Action::PutMetric(PutMetricConfig {
                namespace: "my-namespace".to_string(),
                metric_name: "my-metric".to_string(),
                dimensions: "Host=myhost".to_string(),
                assume_role_arn: "arn:aws:iam::123456789012:role/putter".to_string(),
                value: 1.0,
            }),
        };
        let backend = FakeBackend::default();

        dispatch(&config, &backend).await.unwrap();

        assert_eq!(
            *backend.calls.lock().unwrap(),
            vec![
                "assume_role arn:aws:iam::123456789012:role/putter".to_string(),
                "put_metric_data 1".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_dispatch_propagates_action_error() {
        let config = Config {
            region: "us-east-1".to_string(),
            verbose: false,
            action: Action::PutMetric(PutMetricConfig {
                namespace: "my-namespace".to_string(),
                metric_name: "my-metric".to_string(),
                dimensions: "Host".to_string(),
                assume_role_arn: "arn:aws:iam::123456789012:role/putter".to_string(),
                value: 1.0,
            }),
        };
        let backend = FakeBackend::default();

        let err = dispatch(&config, &backend).await.unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_ACTION_FAILED);
        assert!(backend.calls.lock().unwrap().is_empty());
    }
}
