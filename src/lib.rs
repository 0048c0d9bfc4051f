// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout tracker: exercise catalog, workout recording and reports.
//!
//! This crate provides the storage and reporting core of a local-first
//! fitness tracker. Sessions and templates live in a key-value store; the
//! report service aggregates them into windowed totals and chart series.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

use config::Config;
use db::{FileBackend, RecordStore};
use services::{CatalogService, ReportService, WorkoutRecorder};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: RecordStore,
    pub catalog: CatalogService,
    pub recorder: WorkoutRecorder,
    pub reports: ReportService,
}

impl AppState {
    /// Wire every service to one record store.
    pub fn new(config: Config, store: RecordStore) -> Self {
        Self {
            catalog: CatalogService::new(store.clone()),
            recorder: WorkoutRecorder::new(store.clone()),
            reports: ReportService::new(store.clone(), config.utc_offset),
            config,
            store,
        }
    }

    /// State backed by files under `config.data_dir`.
    pub fn open(config: Config) -> error::Result<Self> {
        let backend = FileBackend::open(&config.data_dir)?;
        Ok(Self::new(config, RecordStore::new(Arc::new(backend))))
    }
}
