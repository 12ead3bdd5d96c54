//! Data models for the workout exercise catalog.

use serde::{Deserialize, Serialize};

/// A single workout exercise as served by the catalog endpoint.
///
/// The wire format uses prefixed field names (`exercise_name`,
/// `exercise_description`); everything else maps one to one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(rename = "exercise_name")]
    pub name: String,
    #[serde(rename = "exercise_description")]
    pub description: String,
    pub image: String,
    pub body_part: String,
    pub difficulty: String,
    pub needs_equipment: bool,
}

impl Exercise {
    /// Human-readable label for the equipment flag
    pub fn equipment_label(&self) -> &'static str {
        if self.needs_equipment {
            "yes"
        } else {
            "no"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wire_format() {
        let json = r#"[{
            "exercise_name": "Push Up",
            "exercise_description": "A bodyweight press.",
            "image": "https://example.com/pushup.png",
            "body_part": "Chest",
            "difficulty": "Beginner",
            "needs_equipment": false
        }]"#;

        let exercises: Vec<Exercise> = serde_json::from_str(json).unwrap();
        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].name, "Push Up");
        assert_eq!(exercises[0].description, "A bodyweight press.");
        assert_eq!(exercises[0].body_part, "Chest");
        assert_eq!(exercises[0].difficulty, "Beginner");
        assert!(!exercises[0].needs_equipment);
    }

    #[test]
    fn test_decode_rejects_malformed_payload() {
        assert!(serde_json::from_str::<Vec<Exercise>>(r#"{"not": "an array"}"#).is_err());
        assert!(serde_json::from_str::<Vec<Exercise>>(r#"[{"exercise_name": 42}]"#).is_err());
    }

    #[test]
    fn test_equipment_label() {
        let mut exercise = Exercise {
            name: "Plank".to_string(),
            description: String::new(),
            image: String::new(),
            body_part: "Core".to_string(),
            difficulty: "Beginner".to_string(),
            needs_equipment: false,
        };
        assert_eq!(exercise.equipment_label(), "no");
        exercise.needs_equipment = true;
        assert_eq!(exercise.equipment_label(), "yes");
    }
}
