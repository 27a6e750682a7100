use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::comparison::Bucket;
use crate::models::normalize_name;

/// Which comparison buckets are rendered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BucketVisibility {
    pub changed: bool,
    pub unchanged: bool,
    pub new: bool,
    pub missing: bool,
}

impl Default for BucketVisibility {
    fn default() -> Self {
        Self {
            changed: true,
            unchanged: true,
            new: true,
            missing: true,
        }
    }
}

impl BucketVisibility {
    pub fn is_visible(&self, bucket: Bucket) -> bool {
        match bucket {
            Bucket::Changed => self.changed,
            Bucket::Unchanged => self.unchanged,
            Bucket::New => self.new,
            Bucket::Missing => self.missing,
        }
    }
}

/// Visibility for a whole comparison report: a default plus per-room
/// overrides keyed by normalized room name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ComparisonVisibility {
    pub default: BucketVisibility,
    pub rooms: HashMap<String, BucketVisibility>,
}

impl ComparisonVisibility {
    pub fn new(default: BucketVisibility) -> Self {
        Self {
            default,
            rooms: HashMap::new(),
        }
    }

    pub fn set_room(&mut self, room: &str, visibility: BucketVisibility) {
        self.rooms.insert(normalize_name(room), visibility);
    }

    pub fn for_room(&self, room: &str) -> BucketVisibility {
        self.rooms
            .get(&normalize_name(room))
            .copied()
            .unwrap_or(self.default)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyBranding {
    pub name: String,
    pub logo_url: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectorInfo {
    pub name: String,
    pub registration: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInfo {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
}

/// Everything the header needs that does not come from the inspections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportContext {
    pub property: PropertyInfo,
    pub inspector: InspectorInfo,
    pub branding: CompanyBranding,
    pub legal_boilerplate: String,
    pub generated_at: DateTime<Utc>,
}
