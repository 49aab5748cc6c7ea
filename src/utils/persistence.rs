//! Filesystem-backed JSON persistence for ledgers and their backups.

use std::{
    cmp::Reverse,
    fs,
    path::{Path, PathBuf},
};

use chrono::{NaiveDateTime, Utc};

use crate::{domain::ledger::Ledger, errors::LedgerError};

const LEDGER_EXTENSION: &str = "json";
const BACKUP_SUFFIX: &str = "json.bak";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const DEFAULT_RETENTION: usize = 5;

/// A backup snapshot of a named ledger.
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub id: String,
    pub created_at: Option<NaiveDateTime>,
    pub path: PathBuf,
}

/// Stores named ledgers as pretty-printed JSON under a data directory,
/// writing atomically and keeping a bounded set of timestamped backups.
pub struct LedgerStore {
    ledgers_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl LedgerStore {
    /// Opens (creating if needed) a store rooted at `data_dir`, defaulting to
    /// the platform data directory. `retention` bounds backups per ledger.
    pub fn new(data_dir: Option<PathBuf>, retention: Option<usize>) -> Result<Self, LedgerError> {
        let root = match data_dir {
            Some(dir) => dir,
            None => dirs::data_dir()
                .ok_or_else(|| {
                    LedgerError::Persistence("unable to determine platform data directory".into())
                })?
                .join("trade_ledger"),
        };
        let ledgers_dir = root.join("ledgers");
        let backups_dir = root.join("backups");
        fs::create_dir_all(&ledgers_dir)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            ledgers_dir,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn ledger_path(&self, name: &str) -> PathBuf {
        self.ledgers_dir
            .join(format!("{}.{}", canonical_name(name), LEDGER_EXTENSION))
    }

    /// Saves the ledger under `name`, backing up any existing file first.
    pub fn save_named(&self, ledger: &mut Ledger, name: &str) -> Result<PathBuf, LedgerError> {
        let path = self.ledger_path(name);
        self.save_to_path(ledger, &path)?;
        Ok(path)
    }

    /// Saves the ledger to an explicit path. Files inside the store's ledger
    /// directory still get a backup before being overwritten.
    pub fn save_to_path(&self, ledger: &mut Ledger, path: &Path) -> Result<(), LedgerError> {
        if path.starts_with(&self.ledgers_dir) && path.exists() {
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                self.backup_existing_file(stem, path)?;
            }
        }
        ledger.touch();
        let json = serde_json::to_string_pretty(ledger)?;
        write_atomic(path, &json)?;
        tracing::debug!(path = %path.display(), "ledger saved");
        Ok(())
    }

    pub fn load_named(&self, name: &str) -> Result<Ledger, LedgerError> {
        self.load_from_path(&self.ledger_path(name))
    }

    pub fn load_from_path(&self, path: &Path) -> Result<Ledger, LedgerError> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Names of all ledgers currently stored, sorted.
    pub fn list_ledgers(&self) -> Result<Vec<String>, LedgerError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.ledgers_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(LEDGER_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Takes an explicit backup of the named ledger's current file.
    pub fn backup_named(&self, name: &str) -> Result<PathBuf, LedgerError> {
        let path = self.ledger_path(name);
        if !path.exists() {
            return Err(LedgerError::Persistence(format!(
                "ledger {name} has no saved file to back up"
            )));
        }
        self.backup_existing_file(&canonical_name(name), &path)?;
        let newest = self
            .list_backups(name)?
            .into_iter()
            .next()
            .ok_or_else(|| LedgerError::Persistence("backup file missing after copy".into()))?;
        Ok(newest.path)
    }

    /// Backups for `name`, newest first.
    pub fn list_backups(&self, name: &str) -> Result<Vec<BackupInfo>, LedgerError> {
        let dir = self.backup_dir(&canonical_name(name));
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut backups = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !file_name.ends_with(BACKUP_SUFFIX) {
                continue;
            }
            backups.push(BackupInfo {
                id: file_name.to_string(),
                created_at: parse_backup_timestamp(file_name),
                path,
            });
        }
        backups.sort_by_key(|info| Reverse(info.id.clone()));
        Ok(backups)
    }

    /// Restores a backup over the named ledger's file.
    pub fn restore_backup(&self, name: &str, backup: &Path) -> Result<PathBuf, LedgerError> {
        if !backup.is_file() {
            return Err(LedgerError::Persistence(format!(
                "backup {} does not exist",
                backup.display()
            )));
        }
        let target = self.ledger_path(name);
        let contents = fs::read_to_string(backup)?;
        // Validate before overwriting the live file.
        let _: Ledger = serde_json::from_str(&contents)?;
        write_atomic(&target, &contents)?;
        tracing::info!(ledger = name, backup = %backup.display(), "backup restored");
        Ok(target)
    }

    fn backup_dir(&self, slug: &str) -> PathBuf {
        self.backups_dir.join(slug)
    }

    fn backup_existing_file(&self, slug: &str, path: &Path) -> Result<(), LedgerError> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(slug);
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_path = dir.join(format!("{slug}_{timestamp}.{BACKUP_SUFFIX}"));
        fs::copy(path, &backup_path)?;
        self.prune_backups(slug)?;
        Ok(())
    }

    fn prune_backups(&self, slug: &str) -> Result<(), LedgerError> {
        let entries = self.list_backups(slug)?;
        for entry in entries.into_iter().skip(self.retention) {
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }
}

/// Writes the provided ledger to disk atomically by staging to a temporary file.
pub fn save_ledger_to_file(ledger: &Ledger, path: &Path) -> Result<(), LedgerError> {
    let json = serde_json::to_string_pretty(ledger)?;
    write_atomic(path, &json)
}

/// Loads a ledger snapshot from disk, returning structured errors on failure.
pub fn load_ledger_from_file(path: &Path) -> Result<Ledger, LedgerError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Writes via a sibling temp file and rename so a failed write never
/// corrupts the destination.
fn write_atomic(path: &Path, contents: &str) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.tmp"),
        None => String::from("tmp"),
    };
    path.with_extension(ext)
}

fn canonical_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

fn parse_backup_timestamp(file_name: &str) -> Option<NaiveDateTime> {
    let stem = file_name.strip_suffix(&format!(".{BACKUP_SUFFIX}"))?;
    // The timestamp is the fixed-width `%Y%m%d_%H%M%S` tail of the stem.
    let start = stem.len().checked_sub(15)?;
    NaiveDateTime::parse_from_str(stem.get(start..)?, BACKUP_TIMESTAMP_FORMAT).ok()
}
