//! Shared AWS configuration for the resolved region

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// SDK configuration loaded once with the ambient credential chain.
///
/// Service clients for S3, STS and CloudWatch are built from this.
#[derive(Clone)]
pub struct AwsContext {
    config: SdkConfig,
    region: String,
}

impl AwsContext {
    /// Load credentials and settings from the environment, profile files and
    /// instance role, pinned to `region`.
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::from_sdk_config(config, region)
    }

    pub fn from_sdk_config(config: SdkConfig, region: &str) -> Self {
        Self {
            config,
            region: region.to_string(),
        }
    }

    pub fn sdk_config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

impl std::fmt::Debug for AwsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsContext")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}
