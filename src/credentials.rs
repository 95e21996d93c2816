//! Role assumption through STS

use crate::context::AwsContext;
use crate::error::Error;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::fmt;
use std::time::SystemTime;

/// Session name reported to STS for every assumption
pub const ROLE_SESSION_NAME: &str = "sesame-seed";
/// Requested lifetime of the temporary credentials
pub const ROLE_DURATION_SECONDS: i32 = 3200;

/// Short-lived credentials returned by a role assumption
#[derive(Clone, PartialEq)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: Option<SystemTime>,
}

impl fmt::Debug for TemporaryCredentials {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expiration = self
            .expiration
            .map(|ts| DateTime::<Utc>::from(ts).to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string());
        write!(
            fmt,
            "TemporaryCredentials {{ access_key_id {}, secret ***, token ***, expires {} }}",
            self.access_key_id, expiration
        )
    }
}

/// Exchanges the ambient identity for a role-scoped one
#[async_trait]
pub trait RoleAssumer {
    async fn assume_role(&self, role_arn: &str) -> Result<TemporaryCredentials, Error>;
}

#[async_trait]
impl RoleAssumer for AwsContext {
    async fn assume_role(&self, role_arn: &str) -> Result<TemporaryCredentials, Error> {
        debug!("Assuming role {} in {}", role_arn, self.region());
        let client = aws_sdk_sts::Client::new(self.sdk_config());

        let response = client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(ROLE_SESSION_NAME)
            .duration_seconds(ROLE_DURATION_SECONDS)
            .send()
            .await
            .map_err(|err| Error::AssumeRole {
                role_arn: role_arn.to_string(),
                source: err.into(),
            })?;

        let credentials = response.credentials().ok_or_else(|| Error::AssumeRole {
            role_arn: role_arn.to_string(),
            source: "response contained no credentials".into(),
        })?;

        let temporary = TemporaryCredentials {
            access_key_id: credentials.access_key_id().to_string(),
            secret_access_key: credentials.secret_access_key().to_string(),
            session_token: credentials.session_token().to_string(),
            expiration: SystemTime::try_from(*credentials.expiration()).ok(),
        };
        info!("Successfully assumed role {}", role_arn);
        debug!("Got {:?}", temporary);
        Ok(temporary)
    }
}
