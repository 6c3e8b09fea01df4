//! EC2 queries through the AWS CLI.
//!
//! Handles reading the VPC CIDR and the existing subnets of a VPC.

use super::cli;
use crate::config::{self, AwsCredentials};
use crate::error::ProviderError;
use crate::models::{Subnet, VpcSnapshot};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Resolved credentials for AWS CLI calls.
///
/// Built once per run by [`create_session`] and passed to every query.
#[derive(Debug, Clone)]
pub struct Session {
    pub region: String,
    profile: Option<String>,
    keys: Option<(String, String)>,
}

/// Create a session from explicit credentials.
///
/// An access key id takes precedence over a profile. The region falls back
/// to [`config::DEFAULT_REGION`].
pub fn create_session(credentials: &AwsCredentials) -> Result<Session, ProviderError> {
    let region = credentials
        .region
        .clone()
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| config::DEFAULT_REGION.to_string());

    if let Some(key_id) = credentials.access_key_id.as_ref().filter(|k| !k.is_empty()) {
        let secret = credentials
            .secret_access_key
            .clone()
            .filter(|s| !s.is_empty())
            .ok_or("AWS secret access key missing for access key id")?;
        log::info!("Using static AWS credentials in region {region}");
        return Ok(Session {
            region,
            profile: None,
            keys: Some((key_id.clone(), secret)),
        });
    }

    if let Some(profile) = credentials.profile.as_ref().filter(|p| !p.is_empty()) {
        log::info!("Using AWS profile '{profile}' in region {region}");
        return Ok(Session {
            region,
            profile: Some(profile.clone()),
            keys: None,
        });
    }

    Err("No AWS credentials provided".into())
}

impl Session {
    /// Build an `aws` command line carrying region and profile.
    fn command(&self, args: &str) -> String {
        let mut cmd = format!("aws {args} --region {} --output json", self.region);
        if let Some(profile) = &self.profile {
            cmd.push_str(&format!(" --profile '{profile}'"));
        }
        cmd
    }

    /// Environment for the child process; only set for static keys.
    fn envs(&self) -> Vec<(&str, &str)> {
        match &self.keys {
            Some((key_id, secret)) => vec![
                ("AWS_ACCESS_KEY_ID", key_id.as_str()),
                ("AWS_SECRET_ACCESS_KEY", secret.as_str()),
            ],
            None => vec![],
        }
    }

    async fn query<T: DeserializeOwned>(&self, args: &str) -> Result<T, ProviderError> {
        let output = cli::run(&self.command(args), &self.envs()).await?;
        parse_json(&output)
    }
}

/// `describe-vpcs` response.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct VpcsPage {
    pub vpcs: Vec<Vpc>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct Vpc {
    pub vpc_id: String,
    pub cidr_block: String,
}

/// One page of a `describe-subnets` response.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct SubnetsPage {
    pub subnets: Vec<Subnet>,
    /// Token for pagination (if more results available).
    pub next_token: Option<String>,
}

/// Parse AWS CLI JSON, reporting the failing path on error.
pub fn parse_json<T: DeserializeOwned>(output: &str) -> Result<T, ProviderError> {
    let mut deserializer = serde_json::Deserializer::from_str(output);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", output);
        format!("Error parsing AWS CLI JSON: path={} error={}", e.path(), e).into()
    })
}

/// Fetch the primary CIDR of the VPC.
pub async fn get_vpc_cidr(session: &Session, vpc_id: &str) -> Result<String, ProviderError> {
    let page: VpcsPage = session
        .query(&format!("ec2 describe-vpcs --vpc-ids {vpc_id}"))
        .await?;
    let vpc = page
        .vpcs
        .into_iter()
        .next()
        .ok_or_else(|| format!("VPC not found: {vpc_id}"))?;
    log::info!("VPC {} has CIDR {}", vpc.vpc_id, vpc.cidr_block);
    Ok(vpc.cidr_block)
}

/// Arguments for one `describe-subnets` page.
fn describe_subnets_args(vpc_id: &str, token: Option<&str>) -> String {
    let mut args = format!(
        "ec2 describe-subnets --filters 'Name=vpc-id,Values={vpc_id}' --max-items {}",
        config::PAGE_SIZE
    );
    if let Some(token) = token {
        args.push_str(&format!(" --starting-token '{token}'"));
    }
    args
}

/// Fetch every subnet of the VPC, following pagination tokens.
pub async fn get_vpc_subnets(session: &Session, vpc_id: &str) -> Result<Vec<Subnet>, ProviderError> {
    collect_subnet_pages(vpc_id, move |args| async move {
        session.query::<SubnetsPage>(&args).await
    })
    .await
}

async fn collect_subnet_pages<F, Fut>(
    vpc_id: &str,
    mut fetch: F,
) -> Result<Vec<Subnet>, ProviderError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<SubnetsPage, ProviderError>>,
{
    let mut subnets = Vec::new();
    let mut token: Option<String> = None;
    let mut count_pages = 0;

    loop {
        let page = fetch(describe_subnets_args(vpc_id, token.as_deref())).await?;

        let count = page.subnets.len();
        subnets.extend(page.subnets);
        log::info!(
            "got page#{count_pages:2} subnets=+{count:3} => {total:3}",
            total = subnets.len()
        );
        count_pages += 1;

        token = match next_token(token.as_deref(), page.next_token)? {
            Some(next) => Some(next),
            None => break,
        };

        // Rate limiting pause
        tokio::time::sleep(std::time::Duration::from_millis(config::SLEEP_MSEC)).await;
    }

    log::info!("Got {} subnets for {vpc_id} in {count_pages} pages", subnets.len());
    Ok(subnets)
}

/// Decide the token for the next page; a repeated token would loop forever.
fn next_token(
    current: Option<&str>,
    returned: Option<String>,
) -> Result<Option<String>, ProviderError> {
    match returned.filter(|t| !t.is_empty()) {
        None => Ok(None),
        Some(t) if Some(t.as_str()) == current => {
            Err("Pagination token not unique - possible infinite loop".into())
        }
        Some(t) => Ok(Some(t)),
    }
}

/// Read the VPC CIDR and its subnets concurrently.
pub async fn fetch_vpc_snapshot(
    session: &Session,
    vpc_id: &str,
) -> Result<VpcSnapshot, ProviderError> {
    let (vpc_cidr, subnets) = tokio::try_join!(
        get_vpc_cidr(session, vpc_id),
        get_vpc_subnets(session, vpc_id)
    )?;
    Ok(VpcSnapshot {
        region: session.region.clone(),
        vpc_id: vpc_id.to_string(),
        vpc_cidr,
        subnets,
    })
}
