//! # Gradebook CLI
//!
//! Administrative tooling for Gradebook: demo data seeding and admin account
//! bootstrap.
//!
//! Everything here goes through the [`Store`](gradebook_db::Store) traits, so
//! the same code runs against Postgres from the binary and against the
//! in-memory store in tests.
//!
//! ## Usage
//!
//! ```ignore
//! use gradebook_cli::seeder::{SeedConfig, seed_all};
//!
//! let store = gradebook_db::PgStore::new(pool);
//! seed_all(&store, &SeedConfig::default().with_students(50)).await?;
//! ```

pub mod seeder;
