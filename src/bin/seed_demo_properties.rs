// ABOUTME: Demo property seeding utility for Rentora Server
// ABOUTME: Loads a small set of buildings and units into the database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! # Demo Property Seeder
//!
//! Seeds a handful of Bangkok condominium buildings and units so the chat
//! assistant has inventory to search against.
//!
//! ## Usage
//!
//! ```bash
//! # Seed demo data
//! cargo run --bin seed-demo-properties
//!
//! # Override database URL
//! cargo run --bin seed-demo-properties -- --database-url sqlite:./rentora.db
//!
//! # Dry run (show what would be done)
//! cargo run --bin seed-demo-properties -- --dry-run
//! ```

use clap::Parser;
use rentora_server::database::Database;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// CLI-specific error type for the seed binary
#[derive(Error, Debug)]
enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Setup(String),
}

type SeedResult<T> = Result<T, SeedError>;

#[derive(Parser)]
#[command(
    name = "seed-demo-properties",
    about = "Rentora Server demo property seeder"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Dry run - show what would be done without making changes
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Seeding result statistics
#[derive(Default)]
struct SeedStats {
    buildings_created: u32,
    properties_created: u32,
    skipped: u32,
}

struct DemoBuilding {
    name: &'static str,
    distance_to_bts: f64,
    units: &'static [DemoUnit],
}

struct DemoUnit {
    property_code: &'static str,
    bedrooms: i64,
    bathrooms: i64,
    price: f64,
    size: f64,
    photo_urls: &'static str,
}

const DEMO_BUILDINGS: &[DemoBuilding] = &[
    DemoBuilding {
        name: "Lumpini Park View",
        distance_to_bts: 0.4,
        units: &[
            DemoUnit {
                property_code: "LPV-0803",
                bedrooms: 1,
                bathrooms: 1,
                price: 18_000.0,
                size: 35.0,
                photo_urls: r#"{"living_room": ["https://cdn.rentora.example/lpv-0803-living.jpg"], "bedroom": ["https://cdn.rentora.example/lpv-0803-bed.jpg"]}"#,
            },
            DemoUnit {
                property_code: "LPV-1201",
                bedrooms: 2,
                bathrooms: 2,
                price: 32_000.0,
                size: 68.0,
                photo_urls: r#"{"living_room": ["https://cdn.rentora.example/lpv-1201-living.jpg"]}"#,
            },
        ],
    },
    DemoBuilding {
        name: "Thonglor Residences",
        distance_to_bts: 0.8,
        units: &[
            DemoUnit {
                property_code: "THR-0505",
                bedrooms: 2,
                bathrooms: 1,
                price: 28_000.0,
                size: 55.0,
                photo_urls: r#"{"exterior": ["https://cdn.rentora.example/thr-0505-ext.jpg"]}"#,
            },
            DemoUnit {
                property_code: "THR-1702",
                bedrooms: 3,
                bathrooms: 2,
                price: 55_000.0,
                size: 96.0,
                photo_urls: r#"{}"#,
            },
        ],
    },
    DemoBuilding {
        name: "Riverside Sathorn",
        distance_to_bts: 1.6,
        units: &[DemoUnit {
            property_code: "RSS-0210",
            bedrooms: 1,
            bathrooms: 1,
            price: 14_500.0,
            size: 29.5,
            photo_urls: r#"{"bedroom": ["https://pub-5639854ae5864779be6f398a0fa1c555.r2.dev/noimageyet.jpg"]}"#,
        }],
    },
];

#[tokio::main]
async fn main() -> SeedResult<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== Rentora Server Demo Property Seeder ===");

    if args.dry_run {
        info!("DRY RUN - no changes will be made");
        for building in DEMO_BUILDINGS {
            info!(
                "Would seed building '{}' with {} units",
                building.name,
                building.units.len()
            );
        }
        return Ok(());
    }

    let database_url = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:./rentora.db".to_owned());

    let database = Database::new(&database_url)
        .await
        .map_err(|e| SeedError::Setup(e.to_string()))?;

    let stats = seed(database.pool()).await?;

    info!(
        "Seeding complete: {} buildings created, {} properties created, {} skipped",
        stats.buildings_created, stats.properties_created, stats.skipped
    );

    Ok(())
}

async fn seed(pool: &SqlitePool) -> SeedResult<SeedStats> {
    let mut stats = SeedStats::default();
    let now = chrono::Utc::now().to_rfc3339();

    for building in DEMO_BUILDINGS {
        let building_id = match existing_building_id(pool, building.name).await? {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().to_string();
                sqlx::query(
                    r"
                    INSERT INTO buildings (id, name, distance_to_bts, created_at)
                    VALUES ($1, $2, $3, $4)
                    ",
                )
                .bind(&id)
                .bind(building.name)
                .bind(building.distance_to_bts)
                .bind(&now)
                .execute(pool)
                .await?;
                stats.buildings_created += 1;
                id
            }
        };

        for unit in building.units {
            let result = sqlx::query(
                r"
                INSERT OR IGNORE INTO properties
                    (id, building_id, property_code, building_name, bedrooms, bathrooms, price, size, photo_urls, created_at)
                VALUES ($1, $2, $3, NULL, $4, $5, $6, $7, $8, $9)
                ",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&building_id)
            .bind(unit.property_code)
            .bind(unit.bedrooms)
            .bind(unit.bathrooms)
            .bind(unit.price)
            .bind(unit.size)
            .bind(unit.photo_urls)
            .bind(&now)
            .execute(pool)
            .await?;

            if result.rows_affected() > 0 {
                stats.properties_created += 1;
            } else {
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

async fn existing_building_id(pool: &SqlitePool, name: &str) -> SeedResult<Option<String>> {
    use sqlx::Row;

    let row = sqlx::query("SELECT id FROM buildings WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("id")))
}
