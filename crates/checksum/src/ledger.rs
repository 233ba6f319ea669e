//! Plain-text checksum ledgers in the `cksum` output convention.
//!
//! One line per file:
//!
//! ```text
//! <checksum> <byte-length> <name>
//! ```
//!
//! with decimal numbers and whitespace separated fields. Names cannot
//! contain whitespace and are limited to [`MAX_NAME_LEN`] bytes.
//!
//! A [`Ledger`] keeps entries sorted by name. A single ledger lists every name
//! once. [`Ledger::merge`] is the exception: several ledgers covering
//! overlapping files can be merged, so an identical entry seen again is a
//! no-op there, while two different entries for one name are an error.

use std::{
  collections::{BTreeMap, btree_map},
  fmt,
  fs::File,
  io::{self, BufRead, BufReader, Write},
  path::Path,
  string::{String, ToString},
};

use thiserror::Error;

/// Longest accepted file name, in bytes.
pub const MAX_NAME_LEN: usize = 1023;

/// Errors from reading, merging or verifying ledgers.
#[derive(Debug, Error)]
pub enum LedgerError {
  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("line {line}: did not understand {text:?}")]
  Parse { line: usize, text: String },

  #[error("file name of {len} bytes exceeds the 1023 byte limit")]
  NameTooLong { len: usize },

  #[error("duplicate entry for {name:?}")]
  Duplicate { name: String },

  #[error("{name:?} is not listed in the ledger")]
  Missing { name: String },

  #[error("read {actual} bytes from {name:?}; ledger expects {expected}")]
  SizeMismatch { name: String, expected: u64, actual: u64 },

  #[error("computed checksum {actual} for {name:?}; ledger expects {expected}")]
  ChecksumMismatch { name: String, expected: u32, actual: u32 },
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry
// ─────────────────────────────────────────────────────────────────────────────

/// One ledger line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LedgerEntry {
  /// Finalized cksum value.
  pub crc: u32,
  /// Byte length of the file.
  pub len: u64,
  /// File name as listed; empty for data read from stdin.
  pub name: String,
}

impl LedgerEntry {
  #[must_use]
  pub fn new(crc: u32, len: u64, name: impl Into<String>) -> Self {
    Self {
      crc,
      len,
      name: name.into(),
    }
  }

  /// Parse one ledger line. `line_no` is 1-based and only used for errors.
  pub fn parse_line(text: &str, line_no: usize) -> Result<Self, LedgerError> {
    let parse_err = || LedgerError::Parse {
      line: line_no,
      text: text.trim_end().to_string(),
    };

    let mut fields = text.split_whitespace();
    let (Some(crc), Some(len), Some(name), None) = (fields.next(), fields.next(), fields.next(), fields.next())
    else {
      return Err(parse_err());
    };

    let crc = crc.parse::<u32>().map_err(|_| parse_err())?;
    let len = len.parse::<u64>().map_err(|_| parse_err())?;
    if name.len() > MAX_NAME_LEN {
      return Err(LedgerError::NameTooLong { len: name.len() });
    }
    Ok(Self::new(crc, len, name))
  }
}

impl fmt::Display for LedgerEntry {
  /// Ledger line without the trailing newline. An empty name (data read from
  /// stdin) leaves only the two numbers.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.name.is_empty() {
      write!(f, "{} {}", self.crc, self.len)
    } else {
      write!(f, "{} {} {}", self.crc, self.len, self.name)
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ledger
// ─────────────────────────────────────────────────────────────────────────────

/// A set of ledger entries keyed and ordered by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
  entries: BTreeMap<String, LedgerEntry>,
}

impl Ledger {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Read a ledger. Blank lines are skipped.
  pub fn parse<R: BufRead>(reader: R) -> Result<Self, LedgerError> {
    let mut ledger = Self::new();
    for (idx, line) in reader.lines().enumerate() {
      let line = line?;
      if line.trim().is_empty() {
        continue;
      }
      ledger.insert(LedgerEntry::parse_line(&line, idx + 1)?)?;
    }
    Ok(ledger)
  }

  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
    Self::parse(BufReader::new(File::open(path)?))
  }

  /// Add an entry. Any name already present is a [`LedgerError::Duplicate`].
  pub fn insert(&mut self, entry: LedgerEntry) -> Result<(), LedgerError> {
    match self.entries.entry(entry.name.clone()) {
      btree_map::Entry::Vacant(slot) => {
        slot.insert(entry);
        Ok(())
      }
      btree_map::Entry::Occupied(_) => Err(LedgerError::Duplicate { name: entry.name }),
    }
  }

  /// Build a ledger from entries, with the same rules as [`insert`](Self::insert).
  pub fn from_entries<I: IntoIterator<Item = LedgerEntry>>(entries: I) -> Result<Self, LedgerError> {
    let mut ledger = Self::new();
    for entry in entries {
      ledger.insert(entry)?;
    }
    Ok(ledger)
  }

  /// Union `entries` into this ledger, stopping at the first conflict.
  ///
  /// An entry identical to one already present is skipped; a different
  /// entry under an existing name is a [`LedgerError::Duplicate`].
  pub fn merge<I: IntoIterator<Item = LedgerEntry>>(&mut self, entries: I) -> Result<(), LedgerError> {
    for entry in entries {
      if self.get(&entry.name) == Some(&entry) {
        continue;
      }
      self.insert(entry)?;
    }
    Ok(())
  }

  #[must_use]
  pub fn get(&self, name: &str) -> Option<&LedgerEntry> {
    self.entries.get(name)
  }

  #[must_use]
  pub fn contains(&self, name: &str) -> bool {
    self.entries.contains_key(name)
  }

  /// Check a computed checksum against the ledger. The size is compared
  /// before the checksum.
  pub fn verify(&self, name: &str, crc: u32, len: u64) -> Result<(), LedgerError> {
    let expected = self.get(name).ok_or_else(|| LedgerError::Missing { name: name.to_string() })?;
    if expected.len != len {
      return Err(LedgerError::SizeMismatch {
        name: name.to_string(),
        expected: expected.len,
        actual: len,
      });
    }
    if expected.crc != crc {
      return Err(LedgerError::ChecksumMismatch {
        name: name.to_string(),
        expected: expected.crc,
        actual: crc,
      });
    }
    Ok(())
  }

  /// Write all entries, one line each, sorted by name.
  pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
    for entry in self.iter() {
      writeln!(writer, "{entry}")?;
    }
    Ok(())
  }

  /// Entries in name order.
  pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry> {
    self.entries.values()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl IntoIterator for Ledger {
  type Item = LedgerEntry;
  type IntoIter = btree_map::IntoValues<String, LedgerEntry>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.into_values()
  }
}
