// cargo watch -x 'fmt' -x 'run -- list-available-subnets --vpc-id vpc-7c872910 --subnet-size 2000'

pub mod aws;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

use config::{CacheMode, Config};
use models::{AvailableSubnetsReport, VpcSnapshot};
use regex::Regex;
use std::sync::OnceLock;

pub use error::{DignetError, FinderError};

static VPC_ID_REGEX: OnceLock<Regex> = OnceLock::new();

/// Return an error unless `vpc_id` looks like `vpc-<hex>`.
pub fn check_vpc_id(vpc_id: &str) -> Result<(), DignetError> {
    if vpc_id.is_empty() {
        return Err(DignetError::Config("VPC ID not provided".to_string()));
    }
    let re = VPC_ID_REGEX.get_or_init(|| Regex::new(r"^vpc-[0-9a-f]+$").expect("Invalid Regex"));
    if !re.is_match(vpc_id) {
        return Err(DignetError::Config(format!("Invalid VPC ID '{vpc_id}'")));
    }
    Ok(())
}

/// Load the VPC snapshot from AWS or from the cache, as configured.
pub async fn get_vpc_snapshot(config: &Config) -> Result<VpcSnapshot, DignetError> {
    let snapshot = match &config.cache {
        CacheMode::File(cache_file) => {
            let snapshot = aws::read_snapshot_file(cache_file).map_err(DignetError::Provider)?;
            if snapshot.vpc_id != config.vpc_id {
                return Err(DignetError::Config(format!(
                    "Cache file {cache_file} holds VPC '{}', not '{}'",
                    snapshot.vpc_id, config.vpc_id
                )));
            }
            snapshot
        }
        CacheMode::Daily => aws::read_vpc_cache(&config.credentials, &config.vpc_id)
            .await
            .map_err(DignetError::Provider)?,
        CacheMode::Off => {
            let session = aws::create_session(&config.credentials).map_err(DignetError::Provider)?;
            aws::fetch_vpc_snapshot(&session, &config.vpc_id)
                .await
                .map_err(DignetError::Provider)?
        }
    };
    log::info!("Loaded {snapshot}");
    Ok(snapshot)
}

/// Search a snapshot for free subnets of `subnet_size` addresses.
pub fn find_in_snapshot(
    snapshot: &VpcSnapshot,
    subnet_size: u64,
) -> Result<AvailableSubnetsReport, DignetError> {
    processing::log_inconsistencies(snapshot);

    let vpc_cidr = processing::parse_parent_block(&snapshot.vpc_cidr, subnet_size)?;
    let available_subnets = processing::find_available_in(
        &vpc_cidr,
        snapshot.occupied_cidrs().as_slice(),
        subnet_size,
    )?;

    Ok(AvailableSubnetsReport {
        region: snapshot.region.clone(),
        vpc_id: snapshot.vpc_id.clone(),
        vpc_cidr,
        subnet_size: subnet_size.next_power_of_two(),
        available_subnets,
    })
}

/// Query the target VPC for existing subnets and return the subnets of the
/// configured size that are available for use.
///
/// The VPC ID and the subnet size are checked before AWS is contacted.
pub async fn find_available_subnets(config: &Config) -> Result<AvailableSubnetsReport, DignetError> {
    check_vpc_id(&config.vpc_id)?;
    let prefix = models::prefix_for_size(config.subnet_size)
        .map_err(|_| FinderError::InvalidSize(config.subnet_size))?;
    log::info!(
        "Searching {} for /{prefix} subnets ({})",
        config.vpc_id,
        config.credentials
    );

    let snapshot = get_vpc_snapshot(config).await?;
    let report = find_in_snapshot(&snapshot, config.subnet_size)?;
    log::info!(
        "Found {} available subnets in {}",
        report.available_subnets.len(),
        report.vpc_cidr
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::AwsCredentials;

    fn offline_config(cache_file: &str, vpc_id: &str, subnet_size: u64) -> Config {
        Config {
            vpc_id: vpc_id.to_string(),
            subnet_size,
            credentials: AwsCredentials::default(),
            cache: CacheMode::File(cache_file.to_string()),
        }
    }

    #[test]
    fn test_check_vpc_id() {
        assert!(check_vpc_id("vpc-7c872910").is_ok());
        assert!(check_vpc_id("vpc-0123456789abcdef0").is_ok());
        assert_eq!(
            check_vpc_id("").unwrap_err().to_string(),
            "VPC ID not provided"
        );
        assert!(check_vpc_id("vpc-XYZ").is_err());
        assert!(check_vpc_id("subnet-7c872910").is_err());
        assert!(check_vpc_id("vpc-7c87 --profile x").is_err());
    }

    #[test]
    fn test_find_in_snapshot() {
        let snapshot = aws::read_snapshot_file("src/tests/test_data/vpc_test_cache_01.json")
            .expect("Error reading vpc cache");
        let report = find_in_snapshot(&snapshot, 2000).unwrap();
        assert_eq!(report.subnet_size, 2048);
        assert_eq!(report.vpc_cidr.to_string(), "10.0.0.0/16");
        // 32 /21 blocks; 10.0.0.0/20 and 10.0.16.0/20 take four, 10.0.32.0/24 takes one.
        assert_eq!(report.available_subnets.len(), 27);
        assert_eq!(report.available_subnets[0].to_string(), "10.0.40.0/21");
        assert_eq!(
            report.available_subnets.last().unwrap().to_string(),
            "10.0.248.0/21"
        );
    }

    #[test]
    fn test_find_in_snapshot_bad_subnet_cidr() {
        let snapshot = VpcSnapshot {
            region: "us-east-1".to_string(),
            vpc_id: "vpc-1".to_string(),
            vpc_cidr: "10.0.0.0/16".to_string(),
            subnets: vec![models::Subnet {
                cidr_block: "10.0.0.0/99".to_string(),
                ..Default::default()
            }],
        };
        let err = find_in_snapshot(&snapshot, 16).unwrap_err();
        assert!(matches!(
            err,
            DignetError::Finder(FinderError::InvalidOccupiedBlock { .. })
        ));
    }

    #[tokio::test]
    async fn test_find_available_subnets_from_cache_file() {
        let config = offline_config(
            "src/tests/test_data/vpc_test_cache_02.json",
            "vpc-0a11b22c",
            128,
        );
        let report = find_available_subnets(&config).await.unwrap();
        assert_eq!(report.region, "eu-west-1");
        assert!(report.available_subnets.is_empty());
    }

    #[tokio::test]
    async fn test_size_checked_before_provider() {
        // The cache file does not exist, so reaching the provider would fail differently.
        let config = offline_config("src/tests/test_data/missing.json", "vpc-0a11b22c", 0);
        let err = find_available_subnets(&config).await.unwrap_err();
        assert!(matches!(err, DignetError::Finder(FinderError::InvalidSize(0))));

        let config = offline_config("src/tests/test_data/missing.json", "", 16);
        let err = find_available_subnets(&config).await.unwrap_err();
        assert!(matches!(err, DignetError::Config(_)));
    }

    #[tokio::test]
    async fn test_cache_file_for_other_vpc() {
        let config = offline_config(
            "src/tests/test_data/vpc_test_cache_02.json",
            "vpc-7c872910",
            16,
        );
        let err = find_available_subnets(&config).await.unwrap_err();
        assert!(err.to_string().contains("holds VPC 'vpc-0a11b22c'"));
    }

    #[tokio::test]
    async fn test_no_credentials_is_provider_error() {
        let config = Config {
            vpc_id: "vpc-7c872910".to_string(),
            subnet_size: 16,
            credentials: AwsCredentials::default(),
            cache: CacheMode::Off,
        };
        let err = find_available_subnets(&config).await.unwrap_err();
        assert!(matches!(err, DignetError::Provider(_)));
        assert_eq!(err.to_string(), "No AWS credentials provided");
    }

    #[tokio::test]
    async fn test_daily_cache_works_offline() {
        let vpc_id = "vpc-0dd1ca4e";
        let mut snapshot = aws::read_snapshot_file("src/tests/test_data/vpc_test_cache_02.json")
            .expect("Error reading vpc cache");
        snapshot.vpc_id = vpc_id.to_string();
        let cache_file = aws::default_cache_file(vpc_id);
        std::fs::write(&cache_file, serde_json::to_string(&snapshot).unwrap()).unwrap();

        let config = Config {
            vpc_id: vpc_id.to_string(),
            subnet_size: 128,
            credentials: AwsCredentials::default(),
            cache: CacheMode::Daily,
        };
        let result = find_available_subnets(&config).await;
        std::fs::remove_file(&cache_file).ok();

        let report = result.expect("daily cache without credentials");
        assert_eq!(report.vpc_id, vpc_id);
        assert!(report.available_subnets.is_empty());
    }
}
