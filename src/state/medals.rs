//! Durable medal records.
//!
//! Maps an identity token to the medal it was awarded. The file format is
//! one `<token> <level>` pair per line; every mutation is written back to
//! disk before the caller continues.

use super::lines::utf8_lines;
use crate::error::StoreError;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Award level attached to an identity token.
///
/// Only the three named levels can be awarded by command. Any other code
/// found in the file is kept as [`MedalLevel::Other`] so it survives a
/// load/save cycle untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedalLevel {
    Platinum,
    Gold,
    Silver,
    Other(i32),
}

impl MedalLevel {
    /// Levels an admin may hand out, in display order.
    pub const AWARDABLE: [MedalLevel; 3] = [Self::Platinum, Self::Gold, Self::Silver];

    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Platinum,
            2 => Self::Gold,
            3 => Self::Silver,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Platinum => 1,
            Self::Gold => 2,
            Self::Silver => 3,
            Self::Other(code) => code,
        }
    }

    /// Case-insensitive lookup of an awardable level by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::AWARDABLE
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Platinum => "Platinum",
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Other(_) => "Unknown",
        }
    }

    pub fn emblem(self) -> &'static str {
        match self {
            Self::Platinum => "🏆",
            Self::Gold => "🥇",
            Self::Silver => "🥈",
            Self::Other(_) => "🎖️",
        }
    }
}

impl fmt::Display for MedalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
struct MedalRecord {
    /// Token as first written.
    token: String,
    level: MedalLevel,
}

/// File-backed token → medal mapping.
#[derive(Debug)]
pub struct MedalStore {
    path: PathBuf,
    /// Keyed by ASCII-lowercased token; iteration order is listing order.
    records: BTreeMap<String, MedalRecord>,
}

impl MedalStore {
    /// Create an empty store bound to `path` without touching the disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: BTreeMap::new(),
        }
    }

    /// Create a store and load whatever `path` currently holds.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace in-memory records with the file contents.
    ///
    /// A missing file is an empty store. Lines that are not valid UTF-8, or
    /// not exactly a token followed by an integer, are skipped. A token
    /// repeated in another case updates the level and keeps the first
    /// spelling. Returns the number of records.
    pub fn load(&mut self) -> Result<usize, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "medal file not found, starting empty");
                self.records.clear();
                return Ok(0);
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        self.records.clear();
        for line in utf8_lines(&bytes) {
            match parse_record(line) {
                Some((token, code)) => {
                    self.grant(token, MedalLevel::from_code(code));
                }
                None if !line.trim().is_empty() => {
                    debug!(line = %line, "skipping malformed medal record");
                }
                None => {}
            }
        }

        info!(path = %self.path.display(), count = self.records.len(), "Loaded medal records");
        Ok(self.records.len())
    }

    /// Write every record to disk, replacing the previous file.
    ///
    /// Content goes to a sibling temp file first and is renamed into place,
    /// so a crash mid-write leaves the old file intact.
    pub fn save(&self) -> Result<(), StoreError> {
        let content: String = self
            .records
            .values()
            .map(|r| format!("{} {}\n", r.token, r.level.code()))
            .collect();

        let mut tmp = OsString::from(self.path.as_os_str());
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        std::fs::write(&tmp, content).map_err(write_err)?;
        std::fs::rename(&tmp, &self.path).map_err(write_err)?;

        debug!(path = %self.path.display(), count = self.records.len(), "Saved medal records");
        Ok(())
    }

    /// Set the medal for `token`, returning the level it replaced.
    pub fn grant(&mut self, token: &str, level: MedalLevel) -> Option<MedalLevel> {
        let key = token.to_ascii_lowercase();
        match self.records.get_mut(&key) {
            Some(record) => Some(std::mem::replace(&mut record.level, level)),
            None => {
                self.records.insert(
                    key,
                    MedalRecord {
                        token: token.to_string(),
                        level,
                    },
                );
                None
            }
        }
    }

    /// Remove the medal for `token`. Returns `false` if it had none.
    pub fn revoke(&mut self, token: &str) -> bool {
        self.records.remove(&token.to_ascii_lowercase()).is_some()
    }

    pub fn level(&self, token: &str) -> Option<MedalLevel> {
        self.records
            .get(&token.to_ascii_lowercase())
            .map(|record| record.level)
    }

    /// All records, sorted by token.
    pub fn list(&self) -> impl Iterator<Item = (&str, MedalLevel)> {
        self.records
            .values()
            .map(|record| (record.token.as_str(), record.level))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse `<token> <integer>`; anything else is `None`.
fn parse_record(line: &str) -> Option<(&str, i32)> {
    let mut fields = line.split_whitespace();
    let token = fields.next()?;
    let code = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((token, code))
}
