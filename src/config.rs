use clap::ValueEnum;
use std::path::PathBuf;

/// Region value that is resolved through the instance metadata service
pub const INSTANCE_REGION: &str = "instance";

/// Action selected on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Function {
    /// Download an S3 object to disk
    #[value(name = "s3download")]
    S3Download,
    /// Put a CloudWatch metric under an assumed role
    #[value(name = "cwputmetric")]
    CwPutMetric,
}

impl Function {
    /// Name as spelled on the command line
    pub fn name(self) -> &'static str {
        match self {
            Function::S3Download => "s3download",
            Function::CwPutMetric => "cwputmetric",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DownloadConfig {
    pub bucket: String,
    pub key: String,
    pub destination: PathBuf,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PutMetricConfig {
    pub namespace: String,
    pub metric_name: String,
    /// Raw `Name=Value,Name=Value` string
    pub dimensions: String,
    pub assume_role_arn: String,
    pub value: f64,
}

/// Parameters of the one action a run performs
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Download(DownloadConfig),
    PutMetric(PutMetricConfig),
}

impl Action {
    pub fn function(&self) -> Function {
        match self {
            Action::Download(_) => Function::S3Download,
            Action::PutMetric(_) => Function::CwPutMetric,
        }
    }
}

/// Run configuration, built once at startup. `region` may hold the
/// `instance` token until [`crate::main_runner`] resolves it.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub region: String,
    pub verbose: bool,
    pub action: Action,
}
