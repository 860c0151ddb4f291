//! Detection results and categories

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Event category label.
///
/// One discrete label space shared by all detectors; each detector emits
/// its own subset. `None`/`Normal` are the neutral values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    None,
    Normal,
    Tailgating,
    UnusualTime,
    Loitering,
    PotentialIntoxication,
    SuspiciousInteraction,
    Drowsy,
    Fight,
}

impl Category {
    /// Wire label
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::None => "none",
            Category::Normal => "normal",
            Category::Tailgating => "tailgating",
            Category::UnusualTime => "unusual_time",
            Category::Loitering => "loitering",
            Category::PotentialIntoxication => "potential_intoxication",
            Category::SuspiciousInteraction => "suspicious_interaction",
            Category::Drowsy => "drowsy",
            Category::Fight => "fight",
        }
    }
}

/// Axis-aligned pixel box around a detected person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: u32,
    pub y_min: u32,
    pub x_max: u32,
    pub y_max: u32,
}

/// Outcome of one detect call.
///
/// Constructed fresh per call; never mutated after return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Whether the event was detected
    pub detected: bool,
    /// Confidence score; nominally [0, 1], the access detector can
    /// slightly exceed 1.0 (see its fusion rule)
    pub confidence: f64,
    /// Category label
    pub category: Category,
    /// Raw per-category diagnostic scores
    pub details: BTreeMap<String, f64>,
    /// People involved (presence-based; multi-person counting is out of scope)
    pub person_count: u32,
    /// Person boxes, diagnostic only
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub bounding_boxes: Vec<BoundingBox>,
}

impl DetectionResult {
    /// Canonical "nothing detected" result for a detector's neutral category
    pub fn empty(category: Category) -> Self {
        Self {
            detected: false,
            confidence: 0.0,
            category,
            details: BTreeMap::new(),
            person_count: 0,
            bounding_boxes: Vec::new(),
        }
    }

    /// Attach a diagnostic score
    pub fn with_detail(mut self, name: &str, value: f64) -> Self {
        self.details.insert(name.to_string(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_is_neutral() {
        let result = DetectionResult::empty(Category::Normal);
        assert!(!result.detected);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.category, Category::Normal);
        assert!(result.details.is_empty());
        assert!(result.bounding_boxes.is_empty());
    }

    #[test]
    fn test_category_wire_labels() {
        assert_eq!(Category::PotentialIntoxication.as_str(), "potential_intoxication");
        assert_eq!(Category::UnusualTime.as_str(), "unusual_time");
    }

    #[test]
    fn test_serializes_snake_case() {
        let json = serde_json::to_string(&Category::UnusualTime).unwrap();
        assert_eq!(json, "\"unusual_time\"");
    }
}
