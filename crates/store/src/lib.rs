//! High-score record file.
//!
//! The file is a flat run of 8-byte records, each a little-endian `i32` game
//! id followed by a little-endian `i32` score. There is no header. A short
//! trailing record (a write cut off mid-way) ends the scan and is dropped on
//! the next save.
//!
//! Storage is best-effort: a missing or unreadable file reads as score 0 and
//! a failed write is logged and forgotten.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use retro_arcade_core::HighScoreStore;

/// Bytes per `(game_id, score)` record
pub const RECORD_SIZE: usize = 8;

/// One `(game_id, score)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub game_id: i32,
    pub score: i32,
}

impl Record {
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];
        buf[..4].copy_from_slice(&self.game_id.to_le_bytes());
        buf[4..].copy_from_slice(&self.score.to_le_bytes());
        buf
    }

    pub fn decode(buf: &[u8; RECORD_SIZE]) -> Self {
        let [a, b, c, d, e, f, g, h] = *buf;
        Self {
            game_id: i32::from_le_bytes([a, b, c, d]),
            score: i32::from_le_bytes([e, f, g, h]),
        }
    }
}

/// Split raw file bytes into whole records
pub fn parse_records(bytes: &[u8]) -> Vec<Record> {
    bytes
        .chunks_exact(RECORD_SIZE)
        .filter_map(|chunk| chunk.try_into().ok())
        .map(|chunk: &[u8; RECORD_SIZE]| Record::decode(chunk))
        .collect()
}

/// High scores kept in a record file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All complete records; a missing file has none
    pub fn read_records(&self) -> io::Result<Vec<Record>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(parse_records(&bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Replace the file with `records`
    pub fn write_records(&self, records: &[Record]) -> io::Result<()> {
        let bytes: Vec<u8> = records.iter().flat_map(|r| r.encode()).collect();
        fs::write(&self.path, bytes)
    }

    fn try_load(&self, game_id: i32) -> io::Result<u32> {
        let score = self
            .read_records()?
            .into_iter()
            .find(|r| r.game_id == game_id)
            .map_or(0, |r| r.score.max(0) as u32);
        Ok(score)
    }

    fn try_save(&self, game_id: i32, score: u32) -> io::Result<()> {
        let score = i32::try_from(score).unwrap_or(i32::MAX);
        let mut records = self.read_records()?;

        match records.iter_mut().find(|r| r.game_id == game_id) {
            Some(record) => record.score = score,
            None => records.push(Record { game_id, score }),
        }

        self.write_records(&records)
    }
}

impl HighScoreStore for FileStore {
    fn load(&self, game_id: i32) -> u32 {
        self.try_load(game_id).unwrap_or_else(|e| {
            log::warn!("high score read from {} failed: {}", self.path.display(), e);
            0
        })
    }

    fn save(&self, game_id: i32, score: u32) {
        if let Err(e) = self.try_save(game_id, score) {
            log::warn!("high score write to {} failed: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStore {
        FileStore::new(dir.path().join("game_data.db"))
    }

    #[test]
    fn test_record_layout() {
        let bytes = Record { game_id: 211, score: 1500 }.encode();
        assert_eq!(bytes, [211, 0, 0, 0, 0xdc, 0x05, 0, 0]);
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load(211), 0);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(211, 5);
        assert_eq!(store.load(211), 5);
        assert_eq!(store.load(212), 0);
    }

    #[test]
    fn test_save_replaces_in_place() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(212, 3);
        store.save(211, 700);
        store.save(212, 9);

        let records = store.read_records().unwrap();
        assert_eq!(
            records,
            vec![
                Record { game_id: 212, score: 9 },
                Record { game_id: 211, score: 700 },
            ]
        );
    }

    #[test]
    fn test_first_match_wins() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .write_records(&[
                Record { game_id: 211, score: 10 },
                Record { game_id: 211, score: 20 },
            ])
            .unwrap();
        assert_eq!(store.load(211), 10);
    }

    #[test]
    fn test_partial_trailing_record_ignored() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut bytes = Record { game_id: 212, score: 4 }.encode().to_vec();
        bytes.extend_from_slice(&[211, 0, 0]);
        fs::write(store.path(), bytes).unwrap();

        assert_eq!(store.load(212), 4);
        assert_eq!(store.load(211), 0);

        store.save(211, 1);
        assert_eq!(fs::read(store.path()).unwrap().len(), 2 * RECORD_SIZE);
        assert_eq!(store.load(212), 4);
        assert_eq!(store.load(211), 1);
    }

    #[test]
    fn test_unreadable_path_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be read or written as a file.
        let store = FileStore::new(dir.path());
        assert_eq!(store.load(211), 0);
        store.save(211, 100);
        assert_eq!(store.load(211), 0);
    }
}
