//! Command line surface
//!
//! Flags keep the single-dash spelling of the tool this replaces
//! (`-region us-west-2`, `-cwvalue=3`, `-version=true`). [`normalize_args`]
//! rewrites those to the `--name` form clap understands before parsing.

use crate::config::{Action, Config, DownloadConfig, Function, PutMetricConfig};
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Long flag names accepted with a single dash
const LONG_FLAGS: &[&str] = &[
    "region",
    "function",
    "s3bucket",
    "s3key",
    "s3dest",
    "cwnamespace",
    "cwvalue",
    "cwmetricname",
    "cwdimensions",
    "cwassumerolearn",
    "verbose",
    "version",
    "help",
];

/// Flags that never consume the following argument
const BOOL_FLAGS: &[&str] = &["verbose", "version", "help"];

/// Line printed for `-version`
pub fn version_banner() -> String {
    format!("sesame-seed {}", env!("CARGO_PKG_VERSION"))
}

/// Download an S3 object or put a CloudWatch metric under an assumed role
#[derive(Debug, Parser)]
#[command(name = "sesame-seed")]
pub struct Opt {
    /// Region to use for all actions. Set as 'instance' to pull the instance's region from metadata
    #[arg(long, default_value = "us-east-1", allow_hyphen_values = true)]
    pub region: String,

    /// Which function to perform
    #[arg(long, value_enum, default_value_t = Function::S3Download)]
    pub function: Function,

    /// Name of bucket to get object from
    #[arg(long, default_value = "my-bucket", allow_hyphen_values = true)]
    pub s3bucket: String,

    /// Full key path to object
    #[arg(long, default_value = "/path/to/my/object", allow_hyphen_values = true)]
    pub s3key: String,

    /// Path to destination on disk
    #[arg(long, default_value = "/path/on/disk", allow_hyphen_values = true)]
    pub s3dest: PathBuf,

    /// CloudWatch metric namespace
    #[arg(long, default_value = "my-namespace", allow_hyphen_values = true)]
    pub cwnamespace: String,

    /// CloudWatch metric value
    #[arg(long, default_value_t = 42.0, allow_negative_numbers = true)]
    pub cwvalue: f64,

    /// CloudWatch metric name
    #[arg(long, default_value = "my-metric", allow_hyphen_values = true)]
    pub cwmetricname: String,

    /// CloudWatch metric dimensions, Name=Value pairs separated by comma
    #[arg(
        long,
        default_value = "Host=myhost,MetricSource=sesame-seed",
        allow_hyphen_values = true
    )]
    pub cwdimensions: String,

    /// Role to assume before putting the metric
    #[arg(
        long,
        default_value = "arn:aws:iam::123456789012:role/devopsdept/metrics-putter",
        allow_hyphen_values = true
    )]
    pub cwassumerolearn: String,

    /// Verbose output
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub verbose: bool,

    /// Prints version and exits
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub version: bool,
}

impl Opt {
    /// Build the run configuration. The region is taken as given and may
    /// still be the `instance` token.
    pub fn into_config(self) -> Config {
        let action = match self.function {
            Function::S3Download => Action::Download(DownloadConfig {
                bucket: self.s3bucket,
                key: self.s3key,
                destination: self.s3dest,
            }),
            Function::CwPutMetric => Action::PutMetric(PutMetricConfig {
                namespace: self.cwnamespace,
                metric_name: self.cwmetricname,
                dimensions: self.cwdimensions,
                assume_role_arn: self.cwassumerolearn,
                value: self.cwvalue,
            }),
        };
        Config {
            region: self.region,
            verbose: self.verbose,
            action,
        }
    }
}

/// Boolean spellings accepted by Go's `flag` package
fn parse_go_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Rewrite known long flags to the `--name` form clap understands.
///
/// Accepts `-name`, `-name=value` and `--name` spellings. The argument after
/// a value-taking flag is passed through untouched even when it looks like a
/// flag, and boolean values use Go's spellings (`-verbose=1`, `-version=f`).
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut normalized = Vec::new();
    let mut awaiting_value = false;

    while let Some(arg) = args.next() {
        if awaiting_value {
            awaiting_value = false;
            normalized.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };
        if text == "--" {
            normalized.push(arg);
            normalized.extend(args);
            break;
        }
        let Some(flag) = text.strip_prefix("--").or_else(|| text.strip_prefix('-')) else {
            normalized.push(arg);
            continue;
        };
        let (name, value) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (flag, None),
        };
        if !LONG_FLAGS.contains(&name) {
            normalized.push(arg);
            continue;
        }

        let rewritten = if BOOL_FLAGS.contains(&name) {
            match value.map(|v| (v, parse_go_bool(v))) {
                None => format!("--{}", name),
                Some((_, Some(enabled))) => format!("--{}={}", name, enabled),
                // left for clap to reject
                Some((raw, None)) => format!("--{}={}", name, raw),
            }
        } else {
            awaiting_value = value.is_none();
            format!("--{}", flag)
        };
        normalized.push(OsString::from(rewritten));
    }
    normalized
}
