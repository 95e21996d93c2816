use crate::context::AwsContext;
use crate::credentials::{TemporaryCredentials, ROLE_SESSION_NAME};
use crate::error::Error;
use crate::metrics::MetricPoint;
use crate::publisher::{MetricPublisher, PublisherFactory};

use async_trait::async_trait;
use aws_sdk_cloudwatch::config::Credentials;
use aws_sdk_cloudwatch::types::{Dimension, MetricDatum};
use aws_sdk_cloudwatch::Client;
use log::info;

/// Sink implementation that sends metrics to Cloudwatch
pub struct CloudwatchPublisher {
    client: Client,
}

/// Build a client for the context's region that signs with `credentials`
/// instead of the ambient chain
pub fn create_elevated_client(ctx: &AwsContext, credentials: &TemporaryCredentials) -> Client {
    let provider = Credentials::new(
        credentials.access_key_id.clone(),
        credentials.secret_access_key.clone(),
        Some(credentials.session_token.clone()),
        credentials.expiration,
        ROLE_SESSION_NAME,
    );
    let config = aws_sdk_cloudwatch::config::Builder::from(ctx.sdk_config())
        .credentials_provider(provider)
        .build();
    Client::from_conf(config)
}

fn metric_datum(point: &MetricPoint) -> MetricDatum {
    let dimensions = point
        .dimensions
        .iter()
        .map(|d| Dimension::builder().name(&d.name).value(&d.value).build())
        .collect::<Vec<Dimension>>();
    MetricDatum::builder()
        .set_dimensions(Some(dimensions))
        .metric_name(&point.metric_name)
        .value(point.value)
        .build()
}

impl PublisherFactory for AwsContext {
    fn publisher(&self, credentials: &TemporaryCredentials) -> Box<dyn MetricPublisher + Send> {
        Box::new(CloudwatchPublisher {
            client: create_elevated_client(self, credentials),
        })
    }
}

#[async_trait]
impl MetricPublisher for CloudwatchPublisher {
    async fn send(&mut self, points: &[MetricPoint]) -> Result<(), Error> {
        let Some(first) = points.first() else {
            return Ok(());
        };
        info!("Sending {} point(s) to CloudWatch {:?}", points.len(), first);

        let request_builder = points.iter().fold(
            self.client.put_metric_data().namespace(&first.namespace),
            |builder, point| builder.metric_data(metric_datum(point)),
        );
        if let Err(err) = request_builder.send().await {
            Err(Error::Publish {
                namespace: first.namespace.clone(),
                metric_name: first.metric_name.clone(),
                source: err.into(),
            })
        } else {
            Ok(())
        }
    }
}
