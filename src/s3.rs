//! S3 object download to local disk

use crate::config::DownloadConfig;
use crate::context::AwsContext;
use crate::error::{BoxError, DownloadError, Error};

use async_trait::async_trait;
use log::debug;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Read access to object storage
#[async_trait]
pub trait ObjectStore {
    /// Fetch the full content of `bucket`/`key` into memory
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, Error>;
}

#[async_trait]
impl ObjectStore for AwsContext {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, Error> {
        let network_error = |source: BoxError| {
            Error::from(DownloadError::Network {
                bucket: bucket.to_string(),
                key: key.to_string(),
                source,
            })
        };
        debug!("Fetching s3://{}/{} in {}", bucket, key, self.region());
        let client = aws_sdk_s3::Client::new(self.sdk_config());

        let response = client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| network_error(err.into()))?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|err| network_error(err.into()))?;
        Ok(body.into_bytes().to_vec())
    }
}

/// Write `content` to `destination`, replacing it in one rename.
///
/// Bytes go to a temporary file next to the destination first, so a failed
/// write never leaves a truncated destination behind. A new file gets the
/// usual `0666 & !umask` mode, a replaced file keeps its mode.
pub fn write_file(destination: &Path, content: &[u8]) -> Result<usize, DownloadError> {
    let filesystem_error = |source: std::io::Error| DownloadError::Filesystem {
        path: destination.to_path_buf(),
        source,
    };
    let directory = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // same mode as a plain create, the umask still applies
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut file: NamedTempFile = builder
        .tempfile_in(directory)
        .map_err(filesystem_error)?;
    // an existing destination keeps its mode
    if let Ok(existing) = std::fs::metadata(destination) {
        if existing.is_file() {
            file.as_file()
                .set_permissions(existing.permissions())
                .map_err(filesystem_error)?;
        }
    }
    {
        let mut writer = BufWriter::new(&mut file);
        writer.write_all(content).map_err(filesystem_error)?;
        writer.flush().map_err(filesystem_error)?;
    }
    file.as_file().sync_all().map_err(filesystem_error)?;
    file.persist(destination)
        .map_err(|err| filesystem_error(err.error))?;
    Ok(content.len())
}

/// Download the configured object and write it to the destination path.
///
/// Returns the number of bytes written.
pub async fn s3_download(
    store: &(dyn ObjectStore + Send + Sync),
    config: &DownloadConfig,
) -> Result<usize, Error> {
    let body = store.get_object(&config.bucket, &config.key).await?;
    debug!("Fetched {} bytes", body.len());
    let written = write_file(&config.destination, &body)?;
    println!(
        "Wrote {} bytes to disk to filename '{}'.",
        written,
        config.destination.display()
    );
    Ok(written)
}
