// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable state in a single JSON document. The contract is deliberately
//! lenient: `load` always returns something usable (defaults when nothing is
//! stored or the document is damaged) and `save` reports failure as a value
//! rather than an error, since losing durability must never end the session.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::models::{Record, Settings};

pub const STORAGE_VERSION: &str = "1.1";

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("io.ledgerline", "Ledgerline", "ledgerline"));

pub fn data_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("ledgerline.json"))
}

/// The on-disk document shape. Fields the document omits decode to their
/// defaults; anything type-mismatched fails the whole decode and counts as
/// corruption.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub records: Vec<Record>,
    pub settings: Settings,
    pub version: String,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for PersistedState {
    fn default() -> Self {
        PersistedState {
            records: Vec::new(),
            settings: Settings::default(),
            version: STORAGE_VERSION.to_string(),
            last_updated: None,
        }
    }
}

#[derive(Debug)]
pub struct LoadedState {
    pub records: Vec<Record>,
    pub settings: Settings,
    /// Stored content existed but failed the shape check and was discarded.
    pub corrupted: bool,
}

impl LoadedState {
    fn defaults(corrupted: bool) -> Self {
        LoadedState {
            records: Vec::new(),
            settings: Settings::default(),
            corrupted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveReason {
    Unavailable,
    Quota,
    Unknown,
}

impl fmt::Display for SaveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveReason::Unavailable => f.write_str("storage unavailable"),
            SaveReason::Quota => f.write_str("storage quota exceeded"),
            SaveReason::Unknown => f.write_str("unknown storage failure"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Failed(SaveReason),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInfo {
    pub available: bool,
    pub has_data: bool,
    pub size_bytes: u64,
    pub last_updated: Option<DateTime<Utc>>,
    pub path: String,
}

/// Seam between the session and durable storage; test code substitutes an
/// in-memory implementation.
pub trait Storage {
    fn load(&self) -> LoadedState;
    fn save(&self, state: &PersistedState) -> SaveOutcome;
    fn info(&self) -> StorageInfo;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: PathBuf) -> Self {
        JsonStorage { path }
    }

    pub fn open_default() -> Result<Self> {
        Ok(JsonStorage::new(data_path()?))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> LoadedState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            // Nothing stored yet, or storage we cannot reach: defaults,
            // not corruption.
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) => {
                return LoadedState::defaults(false);
            }
            Err(_) => return LoadedState::defaults(true),
        };
        match serde_json::from_str::<PersistedState>(&raw) {
            Ok(doc) => LoadedState {
                records: doc.records,
                settings: doc.settings,
                corrupted: false,
            },
            Err(_) => {
                // Damaged document: discard it so the next load starts clean.
                let _ = fs::remove_file(&self.path);
                LoadedState::defaults(true)
            }
        }
    }

    fn save(&self, state: &PersistedState) -> SaveOutcome {
        let json = match serde_json::to_string_pretty(state) {
            Ok(json) => json,
            Err(_) => return SaveOutcome::Failed(SaveReason::Unknown),
        };
        if let Some(parent) = self.path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return SaveOutcome::Failed(SaveReason::Unavailable);
            }
        }
        match fs::write(&self.path, json) {
            Ok(()) => SaveOutcome::Saved,
            Err(e) => SaveOutcome::Failed(match e.kind() {
                ErrorKind::StorageFull | ErrorKind::QuotaExceeded => SaveReason::Quota,
                ErrorKind::NotFound | ErrorKind::PermissionDenied => SaveReason::Unavailable,
                _ => SaveReason::Unknown,
            }),
        }
    }

    fn info(&self) -> StorageInfo {
        let path = self.path.display().to_string();
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let last_updated = serde_json::from_str::<PersistedState>(&raw)
                    .map(|doc| doc.last_updated)
                    .unwrap_or(None);
                StorageInfo {
                    available: true,
                    has_data: true,
                    size_bytes: raw.len() as u64,
                    last_updated,
                    path,
                }
            }
            Err(e) => StorageInfo {
                available: e.kind() != ErrorKind::PermissionDenied,
                has_data: false,
                size_bytes: 0,
                last_updated: None,
                path,
            },
        }
    }
}
