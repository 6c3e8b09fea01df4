//! AWS subnet data model.

use serde::{Deserialize, Serialize};

/// A key/value tag attached to an AWS resource.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Represents an AWS subnet as returned by `aws ec2 describe-subnets`.
///
/// The CIDR stays textual here; the subnet finder validates it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Subnet {
    /// Subnet ID (`subnet-...`).
    pub subnet_id: String,
    /// ID of the VPC containing this subnet.
    pub vpc_id: String,
    /// IPv4 CIDR block of the subnet.
    pub cidr_block: String,
    /// Availability zone the subnet lives in.
    #[serde(default)]
    pub availability_zone: Option<String>,
    /// Number of unused private IPv4 addresses.
    #[serde(default)]
    pub available_ip_address_count: Option<u64>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Subnet {
    /// Value of the `Name` tag, if any.
    pub fn name(&self) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key == "Name")
            .map(|t| t.value.as_str())
    }
}

impl Default for Subnet {
    fn default() -> Self {
        Subnet {
            subnet_id: "blank".to_string(),
            vpc_id: "blank".to_string(),
            cidr_block: "".to_string(),
            availability_zone: None,
            available_ip_address_count: None,
            tags: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aws_subnet() {
        let json = r#"{
            "AvailabilityZone": "us-east-1a",
            "AvailableIpAddressCount": 250,
            "CidrBlock": "10.0.0.0/24",
            "DefaultForAz": false,
            "State": "available",
            "SubnetId": "subnet-0a1b2c3d",
            "VpcId": "vpc-7c872910",
            "Tags": [{"Key": "Name", "Value": "private-a"}]
        }"#;
        let subnet: Subnet = serde_json::from_str(json).unwrap();
        assert_eq!(subnet.subnet_id, "subnet-0a1b2c3d");
        assert_eq!(subnet.cidr_block, "10.0.0.0/24");
        assert_eq!(subnet.available_ip_address_count, Some(250));
        assert_eq!(subnet.name(), Some("private-a"));
    }

    #[test]
    fn test_parse_untagged_subnet() {
        let json = r#"{"CidrBlock": "10.0.1.0/24", "SubnetId": "subnet-1", "VpcId": "vpc-1"}"#;
        let subnet: Subnet = serde_json::from_str(json).unwrap();
        assert!(subnet.tags.is_empty());
        assert_eq!(subnet.name(), None);
        assert_eq!(subnet.availability_zone, None);
    }
}
