// ABOUTME: Core data models for the LiftLog fitness tracking backend
// ABOUTME: Defines Workout, MealEntry, ExerciseProgress, DailyLog and catalog types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Data Models
//!
//! This module contains the core data structures used throughout the
//! LiftLog server.
//!
//! ## Design Principles
//!
//! - **Serializable**: All models support JSON serialization for the API
//! - **Type Safe**: Unsigned counters make negative sets/reps unrepresentable
//! - **Integer identity**: Every entity is keyed by its SQLite rowid
//!
//! ## Core Models
//!
//! - `Workout` / `WorkoutLine`: a logged training session and its exercise lines
//! - `MealEntry`: a logged meal with calorie/macro counts
//! - `ExerciseProgress`: cumulative per-(user, exercise, day) performance record
//! - `DailyLog`: per-(user, day) bucket of workouts and meals
//! - `StagedWorkout`: an unconfirmed agent-generated workout proposal

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::SetMetrics;

/// A registered user
///
/// Authentication and session handling live outside this service; user
/// rows exist so records have an owner and unknown ids can be rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user id
    pub id: i64,
    /// Unique login name
    pub username: String,
    /// Optional display name
    pub display_name: Option<String>,
    /// When the user was created
    pub created_at: DateTime<Utc>,
}

/// A muscle group in the exercise catalog (e.g. "Chest", "Quads")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuscleGroup {
    /// Unique id
    pub id: i64,
    /// Unique name
    pub name: String,
}

/// A piece of equipment in the exercise catalog (e.g. "Barbell")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    /// Unique id
    pub id: i64,
    /// Unique name
    pub name: String,
}

/// A concrete exercise users can log (e.g. "Barbell Bench Press")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique id
    pub id: i64,
    /// Unique name
    pub name: String,
    /// Primary muscle group worked
    pub muscle_group_id: i64,
    /// Equipment used
    pub equipment_id: i64,
}

/// One exercise line inside a workout: the performance actually logged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutLine {
    /// Unique id
    pub id: i64,
    /// Owning workout
    pub workout_id: i64,
    /// Exercise performed
    pub exercise_id: i64,
    /// Exercise name, denormalized for display
    pub exercise_name: String,
    /// Number of sets performed
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Working weight; `None` for bodyweight movements
    pub weight: Option<f64>,
    /// Rest between sets, in seconds
    pub rest_seconds: Option<u32>,
    /// Free-text notes for this line
    pub notes: String,
    /// Position of this line within the workout
    pub order_index: u32,
}

impl WorkoutLine {
    /// Derive the per-line metrics for progress aggregation
    #[must_use]
    pub fn metrics(&self) -> SetMetrics {
        SetMetrics::from_line(self.sets, self.reps, self.weight)
    }
}

/// A logged training session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Unique id
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Session name (e.g. "Push Day")
    pub name: String,
    /// Calendar day the session occurred on
    pub date: NaiveDate,
    /// Free-text session notes
    pub notes: String,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// Exercise lines in logged order
    pub lines: Vec<WorkoutLine>,
}

/// A logged meal with calorie and macro counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEntry {
    /// Unique id
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Meal name (e.g. "Chicken and rice")
    pub name: String,
    /// Total calories
    pub calories: u32,
    /// Protein grams
    pub protein: u32,
    /// Carbohydrate grams, if tracked
    pub carbs: Option<u32>,
    /// Fat grams, if tracked
    pub fats: Option<u32>,
    /// Calendar day the meal occurred on
    pub date: NaiveDate,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// Cumulative per-(user, exercise, day) performance record
///
/// At most one row exists per (user, exercise, date). Counters only grow
/// within a day; `avg_weight` is recomputed on each merge rather than
/// summed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseProgress {
    /// Unique id
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Exercise this record tracks
    pub exercise_id: i64,
    /// Exercise name, denormalized for display
    pub exercise_name: String,
    /// Calendar day of the contributions
    pub date: NaiveDate,
    /// Sum of weight x reps x sets contributions
    pub total_volume: f64,
    /// Running average of per-line average weights
    pub avg_weight: f64,
    /// Cumulative sets
    pub total_sets: i64,
    /// Cumulative reps
    pub total_reps: i64,
    /// Best Epley one-rep-max estimate seen
    pub one_rep_max_est: f64,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl ExerciseProgress {
    /// Fold one line's metrics into this record.
    ///
    /// The running average halves the distance to each new contribution
    /// (`(avg + w) / 2`), so merge order is observable. This matches the
    /// deployed behavior and must not be replaced with a sets-weighted
    /// mean.
    pub fn merge(&mut self, metrics: &SetMetrics) {
        self.total_volume += metrics.volume;
        self.total_sets += i64::from(metrics.sets);
        self.total_reps += i64::from(metrics.total_reps);
        self.avg_weight = (self.avg_weight + metrics.avg_weight) / 2.0;
        self.one_rep_max_est = self.one_rep_max_est.max(metrics.one_rep_max_est);
    }
}

/// Per-(user, day) bucket aggregating that day's workouts and meals
///
/// Nutrition totals are recomputed from the linked meals whenever the
/// meal set changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLog {
    /// Unique id
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Calendar day this bucket covers
    pub date: NaiveDate,
    /// Sum of linked meal calories
    pub total_calories: u32,
    /// Sum of linked meal protein grams
    pub total_protein: u32,
    /// Sum of linked meal carb grams
    pub total_carbs: u32,
    /// Sum of linked meal fat grams
    pub total_fats: u32,
}

/// An unconfirmed agent-generated workout proposal
///
/// One live slot per user; re-staging overwrites the previous payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagedWorkout {
    /// Unique id
    pub id: i64,
    /// Owning user (unique: the slot key)
    pub user_id: i64,
    /// The proposed workout payload, stored verbatim
    pub payload: serde_json::Value,
    /// When the proposal was staged
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn progress_with(avg_weight: f64) -> ExerciseProgress {
        ExerciseProgress {
            id: 1,
            user_id: 1,
            exercise_id: 1,
            exercise_name: "Bench Press".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            total_volume: 0.0,
            avg_weight,
            total_sets: 0,
            total_reps: 0,
            one_rep_max_est: 0.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_merge_accumulates_counters() {
        let mut progress = progress_with(0.0);
        progress.merge(&SetMetrics::from_line(3, 8, Some(100.0)));

        assert!((progress.total_volume - 2400.0).abs() < f64::EPSILON);
        assert_eq!(progress.total_sets, 3);
        assert_eq!(progress.total_reps, 24);
    }

    #[test]
    fn test_merge_average_is_order_sensitive() {
        let mut ascending = progress_with(100.0);
        ascending.merge(&SetMetrics::from_line(3, 8, Some(120.0)));

        let mut descending = progress_with(120.0);
        descending.merge(&SetMetrics::from_line(3, 8, Some(100.0)));

        assert!((ascending.avg_weight - 110.0).abs() < f64::EPSILON);
        assert!((descending.avg_weight - 110.0).abs() < f64::EPSILON);

        // A second merge distinguishes the histories
        ascending.merge(&SetMetrics::from_line(3, 8, Some(100.0)));
        descending.merge(&SetMetrics::from_line(3, 8, Some(120.0)));
        assert!((ascending.avg_weight - 105.0).abs() < f64::EPSILON);
        assert!((descending.avg_weight - 115.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_merge_keeps_best_one_rep_max() {
        let mut progress = progress_with(0.0);
        progress.merge(&SetMetrics::from_line(3, 8, Some(100.0)));
        let best = progress.one_rep_max_est;

        // A lighter follow-up set does not lower the estimate
        progress.merge(&SetMetrics::from_line(3, 8, Some(60.0)));
        assert!((progress.one_rep_max_est - best).abs() < f64::EPSILON);
    }
}
