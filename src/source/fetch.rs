//! Source Acquisition: download the workbook and fingerprint it

use super::{SourceError, SourceResult};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::info;

const DIGEST_BLOCK_SIZE: usize = 4096;

/// Download `url` into `data_dir`, naming the file after the last URL path segment.
///
/// A non-success status aborts immediately; there is no retry.
pub async fn download(
    client: &reqwest::Client,
    url: &str,
    data_dir: &Path,
) -> SourceResult<PathBuf> {
    let file_name = reqwest::Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|segments| segments.last().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .ok_or_else(|| SourceError::BadUrl(url.to_string()))?;

    tokio::fs::create_dir_all(data_dir).await?;
    let target = data_dir.join(file_name);

    let mut response = client.get(url).send().await?.error_for_status()?;
    let mut out = tokio::fs::File::create(&target).await?;
    let mut bytes = 0usize;
    while let Some(chunk) = response.chunk().await? {
        bytes += chunk.len();
        out.write_all(&chunk).await?;
    }
    out.flush().await?;

    info!(url, path = %target.display(), bytes, "downloaded source file");
    Ok(target)
}

/// SHA-256 of a file's contents as lowercase hex, read in fixed-size blocks
pub fn file_digest(path: impl AsRef<Path>) -> SourceResult<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut block = [0u8; DIGEST_BLOCK_SIZE];
    loop {
        let n = reader.read(&mut block)?;
        if n == 0 {
            break;
        }
        hasher.update(&block[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Write the digest as bare hex text to the sidecar file
pub fn write_digest(sidecar: impl AsRef<Path>, digest: &str) -> SourceResult<()> {
    std::fs::write(sidecar, digest)?;
    Ok(())
}
