//! Analysis data models.
//!
//! An `AnalysisResult` is attached to one photo and holds everything the AI
//! collaborator (or a manual edit) reported about it.

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Condition of a single detected object.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ObjectCondition {
    New,
    Good,
    Worn,
    Damaged,
    NotFound,
}

impl Default for ObjectCondition {
    fn default() -> Self {
        ObjectCondition::Good
    }
}

/// Overall condition of the photographed room.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomCondition {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Default for RoomCondition {
    fn default() -> Self {
        RoomCondition::Good
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Low,
    Medium,
    High,
}

impl Default for IssueSeverity {
    fn default() -> Self {
        IssueSeverity::Low
    }
}

/// Position of an object marker, in percent of the image, top-left origin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MarkerCoordinates {
    pub x: f64,
    pub y: f64,
}

impl MarkerCoordinates {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectedObject {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub item: String,
    #[serde(deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(deserialize_with = "null_as_default")]
    pub material: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition: ObjectCondition,
    #[serde(deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_manual: bool,
    pub marker_coordinates: Option<MarkerCoordinates>,
    pub photo_url: Option<String>,
}

impl DetectedObject {
    /// Matching key: the item name trimmed and case-folded.
    pub fn normalized_item(&self) -> String {
        normalize_name(&self.item)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectedIssue {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub severity: IssueSeverity,
    pub location: Option<String>,
}

/// Surface finish of the room (floor, walls, ceiling...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Finish {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub element: String,
    #[serde(deserialize_with = "null_as_default")]
    pub material: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition: ObjectCondition,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SafetyAssessment {
    #[serde(deserialize_with = "null_as_default")]
    pub hazards: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub room_condition: RoomCondition,
    #[serde(deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(deserialize_with = "lenient_list")]
    pub objects: Vec<DetectedObject>,
    #[serde(deserialize_with = "lenient_list")]
    pub issues: Vec<DetectedIssue>,
    #[serde(deserialize_with = "lenient_list")]
    pub finishes: Vec<Finish>,
    #[serde(deserialize_with = "null_as_default")]
    pub safety: SafetyAssessment,
    #[serde(deserialize_with = "null_as_default")]
    pub maintenance: Vec<String>,
}

/// Explicit `null` reads as the field's default, like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a list entry by entry. Unreadable entries are skipped with a
/// warning instead of failing the whole analysis.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        Value::Null => return Ok(Vec::new()),
        other => {
            warn!("Expected a list in analysis, got {other}; using an empty list");
            return Ok(Vec::new());
        }
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!("Skipping unreadable analysis entry: {err}");
                None
            }
        })
        .collect())
}

/// Trim and case-fold a free-form name (object item or room label).
pub fn normalize_name(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_payload_defaults_missing_fields() {
        let json = r#"{
            "description": "Cozinha ampla",
            "roomCondition": "fair",
            "objects": [{"item": "Geladeira", "condition": "not_found"}]
        }"#;

        let analysis: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.room_condition, RoomCondition::Fair);
        assert!(analysis.issues.is_empty());
        assert!(analysis.safety.hazards.is_empty());
        assert_eq!(analysis.objects[0].condition, ObjectCondition::NotFound);
        assert!(analysis.objects[0].marker_coordinates.is_none());
    }

    #[test]
    fn test_normalized_item_ignores_case_and_padding() {
        let object = DetectedObject {
            item: "  Sofá ".into(),
            ..Default::default()
        };
        assert_eq!(object.normalized_item(), "sofá");
    }

    #[test]
    fn test_issue_kind_uses_type_on_the_wire() {
        let issue: DetectedIssue =
            serde_json::from_str(r#"{"type": "mofo", "severity": "high"}"#).unwrap();
        assert_eq!(issue.kind, "mofo");
        assert_eq!(issue.severity, IssueSeverity::High);
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let json = r#"{
            "description": null,
            "roomCondition": null,
            "objects": [{"id": null, "item": "Sofá", "color": null, "confidence": null}],
            "issues": null,
            "safety": {"hazards": null, "notes": null}
        }"#;

        let analysis: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.description, "");
        assert_eq!(analysis.room_condition, RoomCondition::Good);
        assert!(analysis.issues.is_empty());
        assert!(analysis.safety.hazards.is_empty());
        let sofa = &analysis.objects[0];
        assert_eq!((sofa.id.as_str(), sofa.color.as_str()), ("", ""));
        assert_eq!(sofa.confidence, 0.0);
    }

    #[test]
    fn test_unreadable_entries_are_skipped_individually() {
        let json = r#"{
            "objects": [
                {"item": "Sofá", "condition": "shiny"},
                {"item": "Mesa", "condition": "worn"},
                "not an object"
            ],
            "finishes": {"element": "piso"},
            "issues": [{"type": "mofo", "severity": "critical"}, {"type": "trinca"}]
        }"#;

        let analysis: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.objects.len(), 1);
        assert_eq!(analysis.objects[0].item, "Mesa");
        assert_eq!(analysis.objects[0].condition, ObjectCondition::Worn);
        assert!(analysis.finishes.is_empty());
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.issues[0].kind, "trinca");
    }
}
