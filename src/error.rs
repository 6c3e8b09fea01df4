//! Error types.

use thiserror::Error as ThisError;

/// Boxed error used by the AWS provider plumbing.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync + 'static>;

///
/// FinderError
///
/// Input validation failures of the subnet finder. All of them are raised
/// before any candidate is enumerated.
///

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum FinderError {
    #[error("Invalid subnet size {0}")]
    InvalidSize(u64),

    #[error("Invalid VPC CIDR '{cidr}': {reason}")]
    InvalidParentBlock { cidr: String, reason: String },

    #[error("Invalid subnet CIDR '{cidr}': {reason}")]
    InvalidOccupiedBlock { cidr: String, reason: String },

    #[error("Subnet size cannot be greater than VPC size ({capacity} | {cidr})")]
    RequestExceedsParent { capacity: u64, cidr: String },
}

///
/// DignetError
///

#[derive(Debug, ThisError)]
pub enum DignetError {
    #[error(transparent)]
    Finder(#[from] FinderError),

    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    Provider(ProviderError),

    #[error("Error writing report: {0}")]
    Output(#[from] serde_json::Error),
}
