//! Run configuration and constants.

/// Region used when neither a flag nor `AWS_REGION` sets one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Subnets requested per `describe-subnets` page.
pub const PAGE_SIZE: u32 = 100;

/// Pause between paged AWS CLI calls.
pub const SLEEP_MSEC: u64 = 200;

/// Largest AWS CLI response accepted, in bytes.
pub const MAX_RESPONSE_BYTES: usize = 5_000_000;

/// Credentials used to reach AWS.
///
/// Keys take precedence over `profile`; `region` overrides the region
/// configured in the profile.
#[derive(Debug, Clone, Default)]
pub struct AwsCredentials {
    pub profile: Option<String>,
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// Where the VPC data comes from.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CacheMode {
    /// Always ask AWS.
    #[default]
    Off,
    /// Use today's cache file for the VPC, fetching and writing it when missing.
    Daily,
    /// Read this snapshot file; it must exist.
    File(String),
}

/// Everything needed to search one VPC.
#[derive(Debug, Clone)]
pub struct Config {
    pub vpc_id: String,
    pub subnet_size: u64,
    pub credentials: AwsCredentials,
    pub cache: CacheMode,
}

impl std::fmt::Display for AwsCredentials {
    // Never print the secret.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = if self.access_key_id.is_some() {
            "access key"
        } else if self.profile.is_some() {
            "profile"
        } else {
            "none"
        };
        write!(
            f,
            "credentials={source} profile={} region={}",
            self.profile.as_deref().unwrap_or("-"),
            self.region.as_deref().unwrap_or(DEFAULT_REGION)
        )
    }
}
