// ABOUTME: Seeding binary for the exercise catalog and a demo user
// ABOUTME: Populates muscle groups, equipment and common exercises for development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Exercise Catalog Seeder
//!
//! Populates the catalog tables (muscle groups, equipment, exercises)
//! and creates a demo user so a fresh development database is usable
//! immediately. Safe to run repeatedly: catalog rows are upserted by
//! name.

use anyhow::Result;
use clap::Parser;
use liftlog::{config::environment::ServerConfig, database::Database, logging};
use tracing::info;

#[derive(Parser)]
#[command(name = "seed-exercises")]
#[command(about = "Seed the LiftLog exercise catalog and a demo user")]
struct Args {
    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,

    /// Username for the demo user
    #[arg(long, default_value = "demo")]
    demo_user: String,
}

/// (exercise, muscle group, equipment) seed rows
const CATALOG: &[(&str, &str, &str)] = &[
    ("Barbell Bench Press", "Chest", "Barbell"),
    ("Incline Dumbbell Press", "Chest", "Dumbbell"),
    ("Barbell Back Squat", "Quads", "Barbell"),
    ("Romanian Deadlift", "Hamstrings", "Barbell"),
    ("Conventional Deadlift", "Back", "Barbell"),
    ("Overhead Press", "Shoulders", "Barbell"),
    ("Dumbbell Lateral Raise", "Shoulders", "Dumbbell"),
    ("Barbell Row", "Back", "Barbell"),
    ("Lat Pulldown", "Back", "Cable"),
    ("Dumbbell Curl", "Biceps", "Dumbbell"),
    ("Cable Triceps Pushdown", "Triceps", "Cable"),
    ("Leg Press", "Quads", "Machine"),
    ("Seated Leg Curl", "Hamstrings", "Machine"),
    ("Standing Calf Raise", "Calves", "Machine"),
    ("Pull Up", "Back", "Bodyweight"),
    ("Push Up", "Chest", "Bodyweight"),
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(database_url) = args.database_url {
        config.database.url = database_url;
    }

    let database = Database::new(&config.database.url).await?;

    let mut created = 0_usize;
    for (exercise, muscle_group, equipment) in CATALOG {
        let group = database.get_or_create_muscle_group(muscle_group).await?;
        let equipment = database.get_or_create_equipment(equipment).await?;

        // An Err here means the exercise is already present from a previous run
        if database
            .create_exercise(exercise, group.id, equipment.id)
            .await
            .is_ok()
        {
            created += 1;
        }
    }

    info!("Seeded exercise catalog ({created} new exercises)");

    match database.create_user(&args.demo_user, Some("Demo User")).await {
        Ok(user) => info!("Created demo user '{}' with id {}", user.username, user.id),
        Err(_) => info!("Demo user '{}' already exists", args.demo_user),
    }

    Ok(())
}
