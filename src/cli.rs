//! Command line interface.
//!
//! Global AWS flags fall back to the usual `AWS_*` environment variables,
//! which may also come from a `.env` file.

use crate::config::{self, AwsCredentials, CacheMode, Config};
use crate::error::DignetError;
use crate::output::{print_report, OutputFormat};
use clap::{Args, Parser, Subcommand};

/// Find available Subnets in Amazon VPC
#[derive(Parser, Debug)]
#[command(name = "dignet", version, about, long_about = None)]
pub struct Cli {
    /// The profile to use from AWS credentials file
    #[arg(long, env = "AWS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// AWS Region
    #[arg(long, env = "AWS_REGION", default_value = config::DEFAULT_REGION, global = true)]
    pub region: String,

    /// AWS Access Key ID
    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true, global = true)]
    pub access_key_id: Option<String>,

    /// AWS Secret Access Key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true, global = true)]
    pub secret_access_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available subnet CIDRs of given size in target VPC
    ListAvailableSubnets(ListAvailableSubnetsArgs),
}

#[derive(Args, Debug)]
pub struct ListAvailableSubnetsArgs {
    /// ID of the target VPC
    #[arg(long)]
    pub vpc_id: String,

    /// Desired subnet size (number of addresses, rounded up to a power of two)
    #[arg(long)]
    pub subnet_size: u64,

    /// Reuse today's cached copy of the VPC, fetching it once if missing
    #[arg(long, conflicts_with = "cache_file")]
    pub cache: bool,

    /// Read the VPC from this snapshot file instead of AWS
    #[arg(long)]
    pub cache_file: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Cli {
    pub fn credentials(&self) -> AwsCredentials {
        AwsCredentials {
            profile: self.profile.clone(),
            region: Some(self.region.clone()),
            access_key_id: self.access_key_id.clone(),
            secret_access_key: self.secret_access_key.clone(),
        }
    }
}

impl ListAvailableSubnetsArgs {
    pub fn to_config(&self, credentials: AwsCredentials) -> Config {
        let cache = match (&self.cache_file, self.cache) {
            (Some(file), _) => CacheMode::File(file.clone()),
            (None, true) => CacheMode::Daily,
            (None, false) => CacheMode::Off,
        };
        Config {
            vpc_id: self.vpc_id.trim().to_string(),
            subnet_size: self.subnet_size,
            credentials,
            cache,
        }
    }
}

/// Run the parsed command.
pub async fn run(cli: Cli) -> Result<(), DignetError> {
    match &cli.command {
        Commands::ListAvailableSubnets(args) => {
            let config = args.to_config(cli.credentials());
            let report = crate::find_available_subnets(&config).await?;
            print_report(&report, args.format)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("valid command line")
    }

    #[test]
    fn test_parse_list_available_subnets() {
        let cli = parse(&[
            "dignet",
            "--region",
            "eu-west-1",
            "--profile",
            "dev",
            "list-available-subnets",
            "--vpc-id",
            "vpc-7c872910",
            "--subnet-size",
            "2000",
            "--format",
            "json",
        ]);
        assert_eq!(cli.region, "eu-west-1");
        assert_eq!(cli.profile.as_deref(), Some("dev"));

        let Commands::ListAvailableSubnets(args) = &cli.command;
        assert_eq!(args.format, OutputFormat::Json);
        let config = args.to_config(cli.credentials());
        assert_eq!(config.vpc_id, "vpc-7c872910");
        assert_eq!(config.subnet_size, 2000);
        assert_eq!(config.cache, CacheMode::Off);
        assert_eq!(config.credentials.region.as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&[
            "dignet",
            "list-available-subnets",
            "--vpc-id",
            "vpc-1",
            "--subnet-size",
            "16",
            "--cache",
            "--access-key-id",
            "AKIDEXAMPLE",
        ]);
        assert_eq!(cli.access_key_id.as_deref(), Some("AKIDEXAMPLE"));
        let Commands::ListAvailableSubnets(args) = &cli.command;
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.to_config(cli.credentials()).cache, CacheMode::Daily);
    }

    #[test]
    fn test_cache_file_mode() {
        let cli = parse(&[
            "dignet",
            "list-available-subnets",
            "--vpc-id",
            "vpc-1",
            "--subnet-size",
            "16",
            "--cache-file",
            "snap.json",
        ]);
        let Commands::ListAvailableSubnets(args) = &cli.command;
        assert_eq!(
            args.to_config(cli.credentials()).cache,
            CacheMode::File("snap.json".to_string())
        );
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let base = ["dignet", "list-available-subnets", "--vpc-id", "vpc-1"];
        assert!(Cli::try_parse_from(base).is_err());
        assert!(Cli::try_parse_from([&base[..], &["--subnet-size", "-4"][..]].concat()).is_err());
        assert!(Cli::try_parse_from(
            [
                &base[..],
                &["--subnet-size", "16", "--cache", "--cache-file", "x"][..]
            ]
            .concat()
        )
        .is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
