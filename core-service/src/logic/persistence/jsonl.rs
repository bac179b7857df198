//! JSONL Sink
//!
//! One append-only file per record type under a data directory.
//! Each line is flushed as soon as it is written.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::logic::activity::Event;
use crate::logic::incident::Incident;
use super::sink::{PersistenceSink, RiskSnapshot};

pub const EVENTS_FILE: &str = "events.jsonl";
pub const INCIDENTS_FILE: &str = "incidents.jsonl";
pub const SNAPSHOTS_FILE: &str = "risk_snapshots.jsonl";

struct JsonlFile {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl JsonlFile {
    fn open(path: PathBuf) -> EngineResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| EngineError::Persistence(format!("{}: {}", path.display(), e)))?;
        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    fn append<T: Serialize>(&self, record: &T) -> EngineResult<()> {
        let line = serde_json::to_string(record)?;
        let mut writer = self.writer.lock();
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .and_then(|_| writer.flush())
            .map_err(|e| EngineError::Persistence(format!("{}: {}", self.path.display(), e)))
    }
}

pub struct JsonlSink {
    dir: PathBuf,
    events: JsonlFile,
    incidents: JsonlFile,
    snapshots: JsonlFile,
}

impl JsonlSink {
    pub fn open(dir: impl Into<PathBuf>) -> EngineResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| EngineError::Persistence(format!("{}: {}", dir.display(), e)))?;

        let sink = Self {
            events: JsonlFile::open(dir.join(EVENTS_FILE))?,
            incidents: JsonlFile::open(dir.join(INCIDENTS_FILE))?,
            snapshots: JsonlFile::open(dir.join(SNAPSHOTS_FILE))?,
            dir,
        };
        log::info!("Persistence side channel at {:?}", sink.dir);
        Ok(sink)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PersistenceSink for JsonlSink {
    fn save_event(&self, event: &Event) -> EngineResult<()> {
        self.events.append(event)
    }

    fn save_incident(&self, incident: &Incident) -> EngineResult<()> {
        self.incidents.append(incident)
    }

    fn save_risk_snapshot(&self, snapshot: &RiskSnapshot) -> EngineResult<()> {
        self.snapshots.append(snapshot)
    }
}

/// Read every well-formed record back; malformed lines are skipped
pub fn read_records<T: DeserializeOwned>(path: &Path) -> EngineResult<Vec<T>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(&line) {
            Ok(record) => records.push(record),
            Err(e) => log::debug!("Skipping malformed line in {:?}: {}", path, e),
        }
    }

    Ok(records)
}
