//! Module implementing the tidy table of event-triggered responses.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::error::EtrError;

/// One resampled point of the signal around one event.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ResponseRow {
    /// The position of the event in the extraction order.
    event_index: usize,
    /// The absolute time of the event.
    event_time: f64,
    /// The time of the point relative to the event.
    relative_time: f64,
    /// The interpolated value of the signal, or None outside the recorded interval.
    value: Option<f64>,
}

impl ResponseRow {
    /// Create a new response row with the specified parameters.
    pub fn new(event_index: usize, event_time: f64, relative_time: f64, value: Option<f64>) -> Self {
        ResponseRow {
            event_index,
            event_time,
            relative_time,
            value,
        }
    }

    /// Returns the position of the event in the extraction order.
    pub fn event_index(&self) -> usize {
        self.event_index
    }

    /// Returns the absolute time of the event.
    pub fn event_time(&self) -> f64 {
        self.event_time
    }

    /// Returns the time of the point relative to the event.
    pub fn relative_time(&self) -> f64 {
        self.relative_time
    }

    /// Returns the interpolated value of the signal, or None outside the recorded interval.
    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

/// The signal resampled around every event of an event set, on a relative-time
/// grid shared by all events.
///
/// The rows are ordered by event first and grid point second, and every event
/// carries the same number of rows, so responses can be averaged or stacked
/// across events directly.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ResponseTable {
    rows: Vec<ResponseRow>,
    relative_times: Vec<f64>,
    num_events: usize,
}

impl ResponseTable {
    pub(crate) fn new(rows: Vec<ResponseRow>, relative_times: Vec<f64>, num_events: usize) -> Self {
        debug_assert_eq!(rows.len(), relative_times.len() * num_events);
        ResponseTable {
            rows,
            relative_times,
            num_events,
        }
    }

    /// Returns the rows of the table, ordered by event first and grid point second.
    pub fn rows(&self) -> &[ResponseRow] {
        &self.rows
    }

    /// Returns the number of events the table was extracted around.
    pub fn num_events(&self) -> usize {
        self.num_events
    }

    /// Returns the number of rows each event contributes.
    pub fn samples_per_event(&self) -> usize {
        self.relative_times.len()
    }

    /// Returns the relative-time grid shared by all events.
    pub fn relative_times(&self) -> &[f64] {
        &self.relative_times
    }

    /// Returns true if the table contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the table as a dense matrix with one row per event and one column
    /// per grid point. Missing values are mapped to NaN.
    pub fn to_matrix(&self) -> DMatrix<f64> {
        let num_samples = self.relative_times.len();
        DMatrix::from_fn(self.num_events, num_samples, |i, j| {
            self.rows[i * num_samples + j].value.unwrap_or(f64::NAN)
        })
    }

    /// Saves the table to a JSON file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), EtrError> {
        let file = File::create(path).map_err(|e| EtrError::IOError(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| EtrError::IOError(e.to_string()))?;
        writer.flush().map_err(|e| EtrError::IOError(e.to_string()))?;
        Ok(())
    }

    /// Loads a table from a JSON file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, EtrError> {
        let file = File::open(path).map_err(|e| EtrError::IOError(e.to_string()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| EtrError::IOError(e.to_string()))
    }
}
