//! Helpers for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use pushkind_common::db::{DbPool, establish_connection_pool};
use pushkind_pricing::schema::prices;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
///
/// The migrations seed the reference price rules for brand 1, product 35455.
pub struct TestDb {
    pool: DbPool,
    path: PathBuf,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);
        let url = path.to_str().expect("Temporary path is not UTF-8.");

        let pool = establish_connection_pool(url).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            pool,
            path,
            _dir: dir,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Row inserted straight into the `prices` table.
pub struct PriceRow<'a> {
    pub brand_id: i64,
    pub product_id: i64,
    pub price_list_id: i64,
    pub start_date: &'a str,
    pub end_date: &'a str,
    pub priority: i32,
    pub price_cents: i64,
    pub currency: &'a str,
}

pub fn datetime(value: &str) -> NaiveDateTime {
    value.parse().expect("valid ISO-8601 datetime")
}

pub fn insert_price(pool: &DbPool, row: PriceRow<'_>) {
    let mut conn = pool.get().expect("Failed to get SQLite connection.");
    diesel::insert_into(prices::table)
        .values((
            prices::brand_id.eq(row.brand_id),
            prices::product_id.eq(row.product_id),
            prices::price_list_id.eq(row.price_list_id),
            prices::start_date.eq(datetime(row.start_date)),
            prices::end_date.eq(datetime(row.end_date)),
            prices::priority.eq(row.priority),
            prices::price_cents.eq(row.price_cents),
            prices::currency.eq(row.currency),
        ))
        .execute(&mut conn)
        .expect("Failed to insert price row.");
}
