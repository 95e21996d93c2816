use crate::config::PutMetricConfig;
use crate::credentials::{RoleAssumer, TemporaryCredentials};
use crate::dimensions::parse_dimensions;
use crate::error::Error;
use crate::metrics::MetricPoint;

use async_trait::async_trait;
use log::{debug, info};

/// Generic sink for metric points
#[async_trait]
pub trait MetricPublisher {
    /// Submit `points` as one batch
    async fn send(&mut self, points: &[MetricPoint]) -> Result<(), Error>;
}

/// Creates publishers that act with elevated credentials
pub trait PublisherFactory {
    fn publisher(&self, credentials: &TemporaryCredentials) -> Box<dyn MetricPublisher + Send>;
}

/// Assume the configured role and put a single metric point with it.
///
/// Dimensions are parsed before any network call. Returns the number of
/// points submitted.
pub async fn cw_put_metric(
    assumer: &(dyn RoleAssumer + Send + Sync),
    publishers: &(dyn PublisherFactory + Send + Sync),
    config: &PutMetricConfig,
) -> Result<usize, Error> {
    debug!("Putting metric {} in {}", config.metric_name, config.namespace);
    let dimensions = parse_dimensions(&config.dimensions)?;

    let credentials = assumer.assume_role(&config.assume_role_arn).await?;
    let mut publisher = publishers.publisher(&credentials);

    let points = vec![MetricPoint {
        namespace: config.namespace.clone(),
        metric_name: config.metric_name.clone(),
        dimensions,
        value: config.value,
    }];
    info!("Attempting to put metric...");
    publisher.send(&points).await?;

    println!(
        "Successfully put {} metric(s) of value {:.6}",
        points.len(),
        config.value
    );
    Ok(points.len())
}
