//! Cache management for VPC snapshots.
//!
//! Provides caching functionality to avoid repeated AWS CLI calls while
//! planning against the same VPC.

use super::ec2::{create_session, fetch_vpc_snapshot};
use crate::config::AwsCredentials;
use crate::error::ProviderError;
use crate::models::VpcSnapshot;
use std::path::Path;

/// Default cache file name for a VPC, one per day.
pub fn default_cache_file(vpc_id: &str) -> String {
    let now = chrono::Utc::now();
    format!("vpc_cache_{vpc_id}_{}.json", now.format("%Y-%m-%d"))
}

/// Read a snapshot from an existing cache file.
///
/// # Returns
/// * `Ok(VpcSnapshot)` - The snapshot stored in the file
/// * `Err` - If the file does not exist or is not a snapshot
pub fn read_snapshot_file(cache_file: &str) -> Result<VpcSnapshot, ProviderError> {
    if !Path::new(cache_file).exists() {
        return Err(format!("Cache file does not exist: {cache_file}").into());
    }
    log::info!("Reading from cache file: {cache_file}");
    let json = std::fs::read_to_string(cache_file)
        .map_err(|e| format!("Error reading cache file {cache_file}: {e}"))?;
    let snapshot: VpcSnapshot =
        serde_json::from_str(&json).map_err(|e| format!("Error parsing cache JSON: {e}"))?;
    Ok(snapshot)
}

/// Read today's snapshot of the VPC, or fetch it from AWS and write the cache.
///
/// Credentials are only needed when today's cache file is missing.
pub async fn read_vpc_cache(
    credentials: &AwsCredentials,
    vpc_id: &str,
) -> Result<VpcSnapshot, ProviderError> {
    read_or_fetch(&default_cache_file(vpc_id), credentials, vpc_id).await
}

async fn read_or_fetch(
    cache_file: &str,
    credentials: &AwsCredentials,
    vpc_id: &str,
) -> Result<VpcSnapshot, ProviderError> {
    if Path::new(cache_file).exists() {
        return read_snapshot_file(cache_file);
    }

    log::warn!("Cache file not found: {cache_file}");
    let session = create_session(credentials)?;
    let snapshot = fetch_vpc_snapshot(&session, vpc_id).await?;
    log::info!("Fetched {snapshot} from AWS CLI");

    let json =
        serde_json::to_string_pretty(&snapshot).map_err(|e| format!("Error serializing JSON: {e}"))?;
    log::warn!("Writing data to cache file: {cache_file}");
    std::fs::write(cache_file, json)
        .map_err(|e| format!("Error writing cache file {cache_file}: {e}"))?;

    Ok(snapshot)
}
