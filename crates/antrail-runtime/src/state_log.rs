//! State log: one JSON object per colony iteration.
//!
//! A run writes its records as JSON Lines so a viewer can replay the
//! colony without re-running it:
//!
//! ```text
//! {"iteration":0,"pheromone":{"0-1":1.0},"all_paths":[{"path":[0,1],"length":1}],"shortest_path":{"path":[0,1],"length":1}}
//! ```
//!
//! [`StateRecorder`] truncates its file when created and appends after
//! that. Every record is flushed as soon as it is written, so a run that
//! fails halfway still leaves a readable log of the iterations it finished.

use antrail_core::error::{AntrailError, Result};
use antrail_core::pheromone::PheromoneMap;
use antrail_core::types::{AntPath, Iteration, StateRecord};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::{Path, PathBuf};

/// Destination for per-iteration state records.
pub trait StateSink {
    fn record(&mut self, record: &StateRecord) -> Result<()>;
}

/// Keeps records in memory.
impl StateSink for Vec<StateRecord> {
    fn record(&mut self, record: &StateRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Drops every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl StateSink for DiscardSink {
    fn record(&mut self, _record: &StateRecord) -> Result<()> {
        Ok(())
    }
}

/// Append-only JSON Lines writer owning one log file for one run.
#[derive(Debug)]
pub struct StateRecorder {
    path: PathBuf,
    writer: BufWriter<File>,
    written: usize,
}

impl StateRecorder {
    /// Create (or truncate) the log at `path`, creating parent directories.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Append one record as a single line.
    pub fn append(&mut self, record: &StateRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Build and append a record from its parts.
    pub fn append_state(
        &mut self,
        iteration: Iteration,
        pheromone: &PheromoneMap,
        all_paths: &[AntPath],
        best_so_far: &AntPath,
    ) -> Result<()> {
        self.append(&StateRecord {
            iteration,
            pheromone: pheromone.clone(),
            all_paths: all_paths.to_vec(),
            shortest_path: best_so_far.clone(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records appended since the log was created.
    pub fn records_written(&self) -> usize {
        self.written
    }

    /// Flush and close the log.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl StateSink for StateRecorder {
    fn record(&mut self, record: &StateRecord) -> Result<()> {
        self.append(record)
    }
}

/// Streaming reader over a state log, in append order.
pub struct StateReader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl StateReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }
}

impl Iterator for StateReader {
    type Item = Result<StateRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            return Some(serde_json::from_str(&line).map_err(|e| {
                AntrailError::Serialization(format!(
                    "{}:{}: {}",
                    self.path.display(),
                    self.line_no,
                    e
                ))
            }));
        }
    }
}

/// Every record in the log, in append order.
pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<StateRecord>> {
    StateReader::open(path)?.collect()
}

/// The record with exactly this iteration index.
///
/// Fails with [`StateError::IterationNotFound`](antrail_core::error::StateError)
/// if the log has no such record.
pub fn load_by_iteration(path: impl AsRef<Path>, iteration: Iteration) -> Result<StateRecord> {
    let path = path.as_ref();
    for record in StateReader::open(path)? {
        let record = record?;
        if record.iteration == iteration {
            return Ok(record);
        }
    }
    Err(AntrailError::iteration_not_found(
        iteration,
        path.display().to_string(),
    ))
}

/// Records for which `predicate` returns true, in append order.
pub fn filter_states<F>(path: impl AsRef<Path>, mut predicate: F) -> Result<Vec<StateRecord>>
where
    F: FnMut(&StateRecord) -> bool,
{
    let mut matched = Vec::new();
    for record in StateReader::open(path)? {
        let record = record?;
        if predicate(&record) {
            matched.push(record);
        }
    }
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use antrail_core::types::{EdgeKey, NodeId};
    use tempfile::TempDir;

    fn n(id: u32) -> NodeId {
        NodeId(id)
    }

    fn record(iteration: usize, best_len: u32) -> StateRecord {
        let mut pheromone = PheromoneMap::uniform(
            [EdgeKey::new(n(0), n(1)), EdgeKey::new(n(1), n(2))],
            0.5,
        );
        pheromone.set(n(1), n(0), 0.125 * (iteration + 1) as f64).unwrap();
        let best = AntPath::new((0..=best_len).map(n).collect());
        StateRecord {
            iteration,
            pheromone,
            all_paths: vec![best.clone(), AntPath::new(vec![n(0), n(1), n(2)])],
            shortest_path: best,
        }
    }

    #[test]
    fn append_and_reload_by_iteration() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("state.jsonl");

        let mut recorder = StateRecorder::create(&log).unwrap();
        for i in 0..3 {
            recorder.record(&record(i, 2)).unwrap();
        }
        assert_eq!(recorder.records_written(), 3);
        recorder.finish().unwrap();

        let loaded = load_by_iteration(&log, 1).unwrap();
        assert_eq!(loaded, record(1, 2));
        assert_eq!(load_all(&log).unwrap().len(), 3);
    }

    #[test]
    fn missing_iteration_is_not_found() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("state.jsonl");
        let mut recorder = StateRecorder::create(&log).unwrap();
        recorder.append(&record(0, 1)).unwrap();
        recorder.append(&record(2, 1)).unwrap();
        drop(recorder);

        let err = load_by_iteration(&log, 1).unwrap_err();
        assert!(err.is_not_found(), "got {err:?}");
    }

    #[test]
    fn create_truncates_previous_run() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("nested").join("state.jsonl");

        let mut first = StateRecorder::create(&log).unwrap();
        for i in 0..5 {
            first.append(&record(i, 3)).unwrap();
        }
        drop(first);

        let mut second = StateRecorder::create(&log).unwrap();
        second.append_state(0, &record(0, 1).pheromone, &[], &AntPath::new(vec![n(0), n(1)]))
            .unwrap();
        drop(second);

        let all = load_all(&log).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].shortest_path.length, 1);
        assert!(all[0].all_paths.is_empty());
    }

    #[test]
    fn filter_keeps_append_order() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("state.jsonl");
        let mut recorder = StateRecorder::create(&log).unwrap();
        for (i, len) in [4, 4, 3, 3, 2].into_iter().enumerate() {
            recorder.append(&record(i, len)).unwrap();
        }
        drop(recorder);

        let mut last = usize::MAX;
        let improvements = filter_states(&log, |r| {
            let better = r.shortest_path.length < last;
            last = r.shortest_path.length;
            better
        })
        .unwrap();
        let iterations: Vec<_> = improvements.iter().map(|r| r.iteration).collect();
        assert_eq!(iterations, vec![0, 2, 4]);
    }

    #[test]
    fn log_lines_have_the_documented_shape() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("state.jsonl");
        let mut recorder = StateRecorder::create(&log).unwrap();
        recorder.append(&record(0, 1)).unwrap();
        drop(recorder);

        let text = std::fs::read_to_string(&log).unwrap();
        assert_eq!(text.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["iteration"], 0);
        assert_eq!(value["pheromone"]["0-1"], 0.125);
        assert_eq!(value["pheromone"]["1-2"], 0.5);
        assert_eq!(value["shortest_path"]["path"], serde_json::json!([0, 1]));
        assert_eq!(value["shortest_path"]["length"], 1);
        assert_eq!(value["all_paths"][1]["length"], 2);
    }

    #[test]
    fn pheromone_levels_reload_bit_for_bit() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("state.jsonl");
        let keys: Vec<EdgeKey> = (0..200).map(|i| EdgeKey::new(n(i), n(i + 1))).collect();

        let mut written = Vec::new();
        let mut recorder = StateRecorder::create(&log).unwrap();
        for iteration in 0..10 {
            let mut pheromone = PheromoneMap::uniform(keys.iter().copied(), 0.0);
            for (k, key) in keys.iter().enumerate() {
                let exponent = ((k * 3 + iteration) % 640) as i32;
                let level = 0.1 * 3.0f64.powi(-exponent);
                pheromone.set(key.low(), key.high(), level).unwrap();
            }
            let record = StateRecord {
                iteration,
                pheromone,
                all_paths: Vec::new(),
                shortest_path: AntPath::new(vec![n(0), n(1)]),
            };
            recorder.append(&record).unwrap();
            written.push(record);
        }
        drop(recorder);

        let loaded = load_all(&log).unwrap();
        assert_eq!(loaded.len(), written.len());
        for (before, after) in written.iter().zip(&loaded) {
            for ((key, old), (reloaded_key, new)) in before.pheromone.iter().zip(after.pheromone.iter()) {
                assert_eq!(key, reloaded_key);
                assert_eq!(old.to_bits(), new.to_bits(), "{key}: {old:e} reloaded as {new:e}");
            }
        }
    }

    #[test]
    fn malformed_line_names_its_position() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("state.jsonl");
        let good = serde_json::to_string(&record(0, 1)).unwrap();
        std::fs::write(&log, format!("{}\n\nnot json\n", good)).unwrap();

        let err = load_all(&log).unwrap_err();
        match err {
            AntrailError::Serialization(msg) => assert!(msg.contains(":3:"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_all(dir.path().join("absent.jsonl")).unwrap_err();
        assert!(matches!(err, AntrailError::Io(_)));
    }
}
