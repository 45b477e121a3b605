//! Shared types used across zonegrid crates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A user submission: how many of each resource to lay out, and where.
///
/// Field names on the wire follow the submission form (`ec2`, `s3`, `rds`,
/// `top3_region`). Counts are unsigned, so a negative count fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCounts {
    #[serde(rename = "ec2")]
    pub compute: u32,
    #[serde(rename = "s3")]
    pub object_storage: u32,
    #[serde(rename = "rds")]
    pub database: u32,
    /// Ranked candidate regions, best first. Usually three.
    #[serde(rename = "top3_region")]
    pub candidate_regions: Vec<String>,
    /// Who submitted the request.
    #[serde(rename = "id", default = "default_submitter")]
    pub submitter: String,
}

fn default_submitter() -> String {
    "anonymous".to_string()
}

impl ResourceCounts {
    pub fn new(compute: u32, object_storage: u32, database: u32) -> Self {
        Self {
            compute,
            object_storage,
            database,
            candidate_regions: Vec::new(),
            submitter: default_submitter(),
        }
    }

    /// Builder-style helper to set the candidate regions.
    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidate_regions = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn total(&self) -> u64 {
        u64::from(self.compute) + u64::from(self.object_storage) + u64::from(self.database)
    }
}

/// Region id → ordered availability zone ids.
///
/// Regions missing from the map are not an error; callers skip them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AzMap(BTreeMap<String, Vec<String>>);

impl AzMap {
    /// Zones for `region`, in the order the map lists them.
    pub fn zones(&self, region: &str) -> Option<&[String]> {
        self.0.get(region).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<String>)> for AzMap {
    fn from_iter<T: IntoIterator<Item = (S, Vec<String>)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(r, z)| (r.into(), z)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_submission_form_fields() {
        let json = r#"{
            "id": "dlrjsgh",
            "ec2": 3,
            "s3": 1,
            "rds": 2,
            "top3_region": ["ap-northeast-2", "us-east-1", "us-west-2"]
        }"#;
        let counts: ResourceCounts = serde_json::from_str(json).unwrap();
        assert_eq!(counts.compute, 3);
        assert_eq!(counts.object_storage, 1);
        assert_eq!(counts.database, 2);
        assert_eq!(counts.candidate_regions.len(), 3);
        assert_eq!(counts.submitter, "dlrjsgh");
    }

    #[test]
    fn missing_submitter_defaults_to_anonymous() {
        let json = r#"{"ec2": 0, "s3": 0, "rds": 0, "top3_region": []}"#;
        let counts: ResourceCounts = serde_json::from_str(json).unwrap();
        assert_eq!(counts.submitter, "anonymous");
    }

    #[test]
    fn missing_count_is_rejected() {
        let json = r#"{"ec2": 1, "s3": 1, "top3_region": ["us-east-1"]}"#;
        assert!(serde_json::from_str::<ResourceCounts>(json).is_err());
    }

    #[test]
    fn negative_count_is_rejected() {
        let json = r#"{"ec2": -1, "s3": 0, "rds": 0, "top3_region": []}"#;
        assert!(serde_json::from_str::<ResourceCounts>(json).is_err());
    }

    #[test]
    fn az_map_preserves_zone_order() {
        let json = r#"{"us-east-1": ["us-east-1b", "us-east-1a"]}"#;
        let map: AzMap = serde_json::from_str(json).unwrap();
        assert_eq!(
            map.zones("us-east-1").unwrap(),
            ["us-east-1b".to_string(), "us-east-1a".to_string()]
        );
        assert!(map.zones("eu-west-1").is_none());
    }
}
