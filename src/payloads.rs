// ABOUTME: Agent callback payload schemas with field-level validation
// ABOUTME: Replaces duck-typed agent JSON with explicit validated structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Structured payloads posted back by the external automation agent.
//!
//! The agent converts free-text input into a workout- or meal-shaped JSON
//! document. Nothing downstream trusts that document until it has passed
//! [`WorkoutPayload::validate`] / [`MealPayload::validate`]: every field
//! failure is collected into one `field -> reason` report so the agent
//! sees the whole problem in a single response, and an invalid payload
//! never causes a partial state change.
//!
//! Required fields are modeled as `Option` so that absence is reported
//! through the validation report instead of a serde-level rejection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationErrors;

const fn default_sets() -> u32 {
    3
}

const fn default_reps() -> u32 {
    8
}

/// One proposed exercise line inside a workout payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseLinePayload {
    /// Catalog id of the exercise performed
    pub exercise_id: Option<i64>,
    /// Sets performed
    #[serde(default = "default_sets")]
    pub sets: u32,
    /// Repetitions per set
    #[serde(default = "default_reps")]
    pub reps: u32,
    /// Working weight; absent for bodyweight movements
    #[serde(default)]
    pub weight: Option<f64>,
    /// Rest between sets, in seconds
    #[serde(default)]
    pub rest_seconds: Option<u32>,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
    /// Position within the workout
    #[serde(default)]
    pub order: u32,
}

/// A workout proposal from the agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPayload {
    /// Owning user id
    pub user_id: Option<i64>,
    /// Session name
    pub name: Option<String>,
    /// Calendar day the session occurred on
    pub date: Option<NaiveDate>,
    /// Free-text session notes
    #[serde(default)]
    pub notes: String,
    /// Proposed exercise lines
    #[serde(default)]
    pub exercises: Vec<ExerciseLinePayload>,
}

impl WorkoutPayload {
    /// Validate the payload shape, collecting every failure.
    ///
    /// Catalog checks (unknown user, unknown exercise ids) happen at
    /// persist time where the database is available; both kinds of
    /// failure land in the same report shape.
    ///
    /// # Errors
    ///
    /// Returns the `field -> reason` report when any field is missing,
    /// blank or out of range.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut report = ValidationErrors::new();

        if self.user_id.is_none() {
            report.insert("user_id".into(), "this field is required".into());
        }
        match self.name.as_deref() {
            None => {
                report.insert("name".into(), "this field is required".into());
            }
            Some(name) if name.trim().is_empty() => {
                report.insert("name".into(), "may not be blank".into());
            }
            Some(_) => {}
        }
        if self.date.is_none() {
            report.insert("date".into(), "this field is required".into());
        }
        if self.exercises.is_empty() {
            report.insert("exercises".into(), "at least one exercise is required".into());
        }

        for (index, line) in self.exercises.iter().enumerate() {
            if line.exercise_id.is_none() {
                report.insert(
                    format!("exercises[{index}].exercise_id"),
                    "this field is required".into(),
                );
            }
            if let Some(weight) = line.weight {
                if !weight.is_finite() || weight < 0.0 {
                    report.insert(
                        format!("exercises[{index}].weight"),
                        "must be a non-negative number".into(),
                    );
                }
            }
        }

        if report.is_empty() {
            Ok(())
        } else {
            Err(report)
        }
    }
}

/// A meal proposal from the agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPayload {
    /// Owning user id
    pub user_id: Option<i64>,
    /// Meal name
    pub name: Option<String>,
    /// Total calories
    pub calories: Option<u32>,
    /// Protein grams
    pub protein: Option<u32>,
    /// Carbohydrate grams, if tracked
    #[serde(default)]
    pub carbs: Option<u32>,
    /// Fat grams, if tracked
    #[serde(default)]
    pub fats: Option<u32>,
    /// Calendar day the meal occurred on
    pub date: Option<NaiveDate>,
}

impl MealPayload {
    /// Validate the payload shape, collecting every failure.
    ///
    /// # Errors
    ///
    /// Returns the `field -> reason` report when any required field is
    /// missing or blank.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut report = ValidationErrors::new();

        if self.user_id.is_none() {
            report.insert("user_id".into(), "this field is required".into());
        }
        match self.name.as_deref() {
            None => {
                report.insert("name".into(), "this field is required".into());
            }
            Some(name) if name.trim().is_empty() => {
                report.insert("name".into(), "may not be blank".into());
            }
            Some(_) => {}
        }
        if self.calories.is_none() {
            report.insert("calories".into(), "this field is required".into());
        }
        if self.protein.is_none() {
            report.insert("protein".into(), "this field is required".into());
        }
        if self.date.is_none() {
            report.insert("date".into(), "this field is required".into());
        }

        if report.is_empty() {
            Ok(())
        } else {
            Err(report)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn workout_json() -> serde_json::Value {
        serde_json::json!({
            "user_id": 1,
            "name": "Push Day",
            "date": "2025-06-01",
            "notes": "",
            "exercises": [
                {"exercise_id": 2, "sets": 3, "reps": 8, "weight": 100.0, "order": 0}
            ]
        })
    }

    #[test]
    fn test_valid_workout_payload() {
        let payload: WorkoutPayload = serde_json::from_value(workout_json()).unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_workout_payload_collects_all_failures() {
        let payload: WorkoutPayload = serde_json::from_value(serde_json::json!({
            "name": "   ",
            "exercises": [{"weight": -5.0}]
        }))
        .unwrap();

        let report = payload.validate().unwrap_err();
        assert_eq!(report.get("user_id").unwrap(), "this field is required");
        assert_eq!(report.get("name").unwrap(), "may not be blank");
        assert_eq!(report.get("date").unwrap(), "this field is required");
        assert!(report.contains_key("exercises[0].exercise_id"));
        assert!(report.contains_key("exercises[0].weight"));
    }

    #[test]
    fn test_line_defaults_mirror_model_defaults() {
        let payload: WorkoutPayload = serde_json::from_value(serde_json::json!({
            "user_id": 1,
            "name": "Quick session",
            "date": "2025-06-01",
            "exercises": [{"exercise_id": 7}]
        }))
        .unwrap();

        assert_eq!(payload.exercises[0].sets, 3);
        assert_eq!(payload.exercises[0].reps, 8);
        assert_eq!(payload.exercises[0].order, 0);
    }

    #[test]
    fn test_meal_payload_requires_core_fields() {
        let payload: MealPayload =
            serde_json::from_value(serde_json::json!({"user_id": 1})).unwrap();

        let report = payload.validate().unwrap_err();
        assert!(report.contains_key("name"));
        assert!(report.contains_key("calories"));
        assert!(report.contains_key("protein"));
        assert!(report.contains_key("date"));
        assert!(!report.contains_key("carbs"));
    }
}
