//! Persistent top-10 leaderboard.
//!
//! Scores are stored as newline-delimited, pipe-separated records. The file
//! has gone through four schema revisions; the loader tries the newest
//! layout first and falls back through the older ones, default-filling any
//! context it cannot recover. Loading never fails: a line that cannot yield
//! even the legacy fields is dropped.

use chrono::Local;
use itertools::Itertools;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;

pub const MAX_ENTRIES: usize = 10;
pub const DEFAULT_WORD_COUNT: usize = 15;
pub const UNKNOWN_DATE: &str = "Unknown";

const DATE_FORMAT: &str = "%m/%d/%Y %H:%M";

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub name: String,
    pub wpm: f64,
    pub accuracy: f64,
    pub elapsed_secs: f64,
    pub date: String,
    pub word_count: usize,
    pub punctuation: bool,
    pub numbers: bool,
}

impl ScoreRecord {
    /// Record for a round finished just now; the date is stamped from the
    /// local clock. The field separator is stripped from the name so the
    /// encoded line always decodes back to this record.
    pub fn new(
        name: &str,
        wpm: f64,
        accuracy: f64,
        elapsed_secs: f64,
        word_count: usize,
        punctuation: bool,
        numbers: bool,
    ) -> Self {
        Self {
            name: name.replace('|', "").to_uppercase(),
            wpm,
            accuracy,
            elapsed_secs,
            date: Local::now().format(DATE_FORMAT).to_string(),
            word_count,
            punctuation,
            numbers,
        }
    }

    /// Short mode indicator shown in the leaderboard table.
    pub fn mode_tag(&self) -> String {
        let mut tag = String::new();
        if self.punctuation {
            tag.push('P');
        }
        if self.numbers {
            tag.push('N');
        }
        if tag.is_empty() {
            tag.push('-');
        }
        tag
    }
}

/// Current (newest) schema:
/// `name|wpm|accuracy|elapsed_secs|date|word_count|punctuation(0/1)|numbers(0/1)`
pub fn encode_line(record: &ScoreRecord) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}|{}|{}",
        record.name,
        record.wpm,
        record.accuracy,
        record.elapsed_secs,
        record.date,
        record.word_count,
        record.punctuation as u8,
        record.numbers as u8,
    )
}

/// Decode one line, newest schema first. Returns `None` only when the four
/// legacy fields themselves are unusable.
pub fn decode_line(line: &str) -> Option<ScoreRecord> {
    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    let record = decode_legacy(&fields)?;
    Some(match fields.len() {
        n if n >= 8 => decode_full(record, &fields),
        6 | 7 => decode_with_word_count(record, &fields),
        5 => decode_with_date(record, &fields),
        _ => record,
    })
}

/// Oldest surviving layout: `name|wpm|accuracy|elapsed_secs`. Every newer
/// layout starts with these four fields, so this doubles as the base parse.
fn decode_legacy(fields: &[&str]) -> Option<ScoreRecord> {
    if fields.len() < 4 || fields[0].is_empty() {
        return None;
    }
    Some(ScoreRecord {
        name: fields[0].to_uppercase(),
        wpm: fields[1].parse().ok()?,
        accuracy: fields[2].parse().ok()?,
        elapsed_secs: fields[3].parse().ok()?,
        date: UNKNOWN_DATE.to_string(),
        word_count: DEFAULT_WORD_COUNT,
        punctuation: false,
        numbers: false,
    })
}

/// `... |date`: the first revision that recorded when a score was set.
fn decode_with_date(mut record: ScoreRecord, fields: &[&str]) -> ScoreRecord {
    if !fields[4].is_empty() {
        record.date = fields[4].to_string();
    }
    record
}

/// `... |date|word_count`: added when custom word counts landed.
fn decode_with_word_count(record: ScoreRecord, fields: &[&str]) -> ScoreRecord {
    let mut record = decode_with_date(record, fields);
    match fields[5].parse() {
        Ok(word_count) => record.word_count = word_count,
        // Trailing context is best-effort: keep the defaults.
        Err(_) => {
            record.date = UNKNOWN_DATE.to_string();
            record.word_count = DEFAULT_WORD_COUNT;
        }
    }
    record
}

/// `... |date|word_count|punctuation|numbers`: the current schema.
fn decode_full(record: ScoreRecord, fields: &[&str]) -> ScoreRecord {
    let mut record = decode_with_date(record, fields);
    let parsed = (
        fields[5].parse::<usize>(),
        fields[6].parse::<u8>(),
        fields[7].parse::<u8>(),
    );
    match parsed {
        (Ok(word_count), Ok(punct), Ok(nums)) => {
            record.word_count = word_count;
            record.punctuation = punct == 1;
            record.numbers = nums == 1;
        }
        _ => {
            record.date = UNKNOWN_DATE.to_string();
            record.word_count = DEFAULT_WORD_COUNT;
            record.punctuation = false;
            record.numbers = false;
        }
    }
    record
}

/// Insert a record and keep the list a top-10: wpm descending, ties broken
/// by accuracy descending.
pub fn add(records: &mut Vec<ScoreRecord>, record: ScoreRecord) {
    records.push(record);
    records.sort_by(|a, b| {
        b.wpm
            .total_cmp(&a.wpm)
            .then_with(|| b.accuracy.total_cmp(&a.accuracy))
    });
    records.truncate(MAX_ENTRIES);
}

/// Player names seen on the board, first appearance order preserved.
pub fn unique_names(records: &[ScoreRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.name.clone())
        .unique()
        .collect()
}

pub trait LeaderboardStore {
    fn load(&self) -> Vec<ScoreRecord>;
    fn save(&self, records: &[ScoreRecord]) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileLeaderboardStore {
    path: PathBuf,
}

impl FileLeaderboardStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::leaderboard_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileLeaderboardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LeaderboardStore for FileLeaderboardStore {
    fn load(&self) -> Vec<ScoreRecord> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.lines().filter_map(decode_line).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn save(&self, records: &[ScoreRecord]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut data = records.iter().map(encode_line).join("\n");
        if !data.is_empty() {
            data.push('\n');
        }
        fs::write(&self.path, data)
    }
}
