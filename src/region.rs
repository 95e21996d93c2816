//! Region resolution, including the `instance` lookup through IMDS

use crate::config::INSTANCE_REGION;
use crate::error::{BoxError, Error};

use async_trait::async_trait;
use log::debug;

const IMDS_REGION_PATH: &str = "/latest/meta-data/placement/region";

/// Source of the region the current instance runs in
#[async_trait]
pub trait RegionSource {
    async fn instance_region(&self) -> Result<String, BoxError>;
}

/// EC2 instance metadata service (IMDSv2)
pub struct ImdsRegionSource {
    client: aws_config::imds::Client,
}

impl ImdsRegionSource {
    pub fn new() -> Self {
        ImdsRegionSource {
            client: aws_config::imds::Client::builder().build(),
        }
    }
}

impl Default for ImdsRegionSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegionSource for ImdsRegionSource {
    async fn instance_region(&self) -> Result<String, BoxError> {
        debug!("Querying instance metadata for region");
        let answer = self.client.get(IMDS_REGION_PATH).await?;
        let region: &str = answer.as_ref();
        Ok(region.trim().to_string())
    }
}

/// Return `requested`, or ask `source` when it is the `instance` token
pub async fn resolve_region(
    requested: &str,
    source: &(dyn RegionSource + Send + Sync),
) -> Result<String, Error> {
    if requested != INSTANCE_REGION {
        return Ok(requested.to_string());
    }
    let region = source.instance_region().await.map_err(Error::Metadata)?;
    if region.is_empty() {
        return Err(Error::Metadata("instance metadata returned an empty region".into()));
    }
    debug!("Got region {} from instance metadata", region);
    Ok(region)
}
