//! Module implementing event-triggered response extraction.
//!
//! Around each event time, the signal is resampled by piecewise-linear
//! interpolation onto a relative-time grid spanning `[-t_before, t_after]`,
//! computed once and shared by every event. Grid points falling outside the
//! recorded signal are reported as missing rather than extrapolated, so that
//! events close to the start or end of the recording keep their full set of
//! rows and remain stackable with the others.

use log::debug;
use rayon::prelude::*;

use super::error::EtrError;
use super::response::{ResponseRow, ResponseTable};
use super::signal::Signal;

/// Builds the relative-time grid spanning `[-t_before, t_after]`, both endpoints
/// included, with `round((t_before + t_after) * output_sampling_rate) + 1` evenly
/// spaced points. The last point is pinned to `t_after` exactly.
///
/// Returns an error if the window is negative or the rate is not positive.
pub fn relative_time_grid(
    t_before: f64,
    t_after: f64,
    output_sampling_rate: f64,
) -> Result<Vec<f64>, EtrError> {
    if !(t_before >= 0.0 && t_before.is_finite()) || !(t_after >= 0.0 && t_after.is_finite()) {
        return Err(EtrError::InvalidWindow(format!(
            "t_before and t_after must be non-negative, got {} and {}",
            t_before, t_after
        )));
    }

    if !(output_sampling_rate > 0.0 && output_sampling_rate.is_finite()) {
        return Err(EtrError::InvalidRate(format!(
            "the output sampling rate must be positive, got {}",
            output_sampling_rate
        )));
    }

    let span = t_before + t_after;
    let num_samples = (span * output_sampling_rate).round() as usize + 1;

    let mut grid = Vec::with_capacity(num_samples);
    if num_samples == 1 {
        grid.push(-t_before);
        return Ok(grid);
    }

    let step = span / (num_samples - 1) as f64;
    for i in 0..num_samples - 1 {
        grid.push(-t_before + i as f64 * step);
    }
    grid.push(t_after);

    Ok(grid)
}

fn check_signal(signal: &Signal) -> Result<(), EtrError> {
    if signal.len() < 2 {
        return Err(EtrError::InvalidSignal(format!(
            "interpolation requires at least 2 samples, got {}",
            signal.len()
        )));
    }
    Ok(())
}

/// Extracts the responses of a signal around a set of events, resampled onto a
/// common relative-time grid.
///
/// All inputs are validated before any event is processed; on failure no partial
/// table is produced. An empty event set is valid and yields an empty table.
/// Grid points outside the recorded signal carry a missing value.
///
/// # Parameters
/// - `signal`: The signal to extract responses from, with at least 2 samples.
/// - `event_times`: The absolute times of the events, in any order; duplicates
///   produce duplicate rows.
/// - `t_before`: The time before each event to extract, in seconds.
/// - `t_after`: The time after each event to extract, in seconds.
/// - `output_sampling_rate`: The sampling rate of the grid the responses are
///   interpolated onto, in samples per second.
///
/// # Returns
/// A table with one row per event and grid point, ordered by event first and
/// grid point second.
pub fn event_triggered_response(
    signal: &Signal,
    event_times: &[f64],
    t_before: f64,
    t_after: f64,
    output_sampling_rate: f64,
) -> Result<ResponseTable, EtrError> {
    let grid = relative_time_grid(t_before, t_after, output_sampling_rate)?;
    check_signal(signal)?;

    let mut rows = Vec::with_capacity(event_times.len() * grid.len());
    for (event_index, &event_time) in event_times.iter().enumerate() {
        for &relative_time in grid.iter() {
            let value = signal.value_at(event_time + relative_time);
            rows.push(ResponseRow::new(event_index, event_time, relative_time, value));
        }
    }

    debug!(
        "extracted {} responses of {} samples from a signal of {} samples",
        event_times.len(),
        grid.len(),
        signal.len()
    );

    Ok(ResponseTable::new(rows, grid, event_times.len()))
}

/// Extracts the responses of a signal around a set of events, sharding the
/// events across a rayon thread pool.
///
/// Per-event extraction has no cross-event dependency, so the partial results
/// are simply concatenated back in event order; the output is identical to
/// [`event_triggered_response`] with the same inputs.
pub fn event_triggered_response_par(
    signal: &Signal,
    event_times: &[f64],
    t_before: f64,
    t_after: f64,
    output_sampling_rate: f64,
) -> Result<ResponseTable, EtrError> {
    let grid = relative_time_grid(t_before, t_after, output_sampling_rate)?;
    check_signal(signal)?;

    let per_event = event_times
        .par_iter()
        .enumerate()
        .map(|(event_index, &event_time)| {
            grid.iter()
                .map(|&relative_time| {
                    let value = signal.value_at(event_time + relative_time);
                    ResponseRow::new(event_index, event_time, relative_time, value)
                })
                .collect::<Vec<ResponseRow>>()
        })
        .collect::<Vec<Vec<ResponseRow>>>();

    let rows = per_event.into_iter().flatten().collect::<Vec<ResponseRow>>();

    debug!(
        "extracted {} responses of {} samples from a signal of {} samples (sharded)",
        event_times.len(),
        grid.len(),
        signal.len()
    );

    Ok(ResponseTable::new(rows, grid, event_times.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_time_grid() {
        assert_eq!(
            relative_time_grid(1.0, 1.0, 1.0).unwrap(),
            vec![-1.0, 0.0, 1.0]
        );
        assert_eq!(
            relative_time_grid(0.5, 0.5, 4.0).unwrap(),
            vec![-0.5, -0.25, 0.0, 0.25, 0.5]
        );
        assert_eq!(
            relative_time_grid(0.0, 2.0, 2.0).unwrap(),
            vec![0.0, 0.5, 1.0, 1.5, 2.0]
        );

        // Degenerate window reduces to the event time itself
        assert_eq!(relative_time_grid(0.0, 0.0, 50.0).unwrap(), vec![0.0]);

        // A fractional number of steps is rounded, the endpoints stay pinned
        let grid = relative_time_grid(0.0, 1.0, 2.5).unwrap();
        assert_eq!(grid.len(), 4);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[3], 1.0);
        assert!(grid.windows(2).all(|g| g[0] < g[1]));
    }

    #[test]
    fn test_relative_time_grid_invalid() {
        assert!(matches!(
            relative_time_grid(-1.0, 1.0, 1.0),
            Err(EtrError::InvalidWindow(_))
        ));
        assert!(matches!(
            relative_time_grid(1.0, -1.0, 1.0),
            Err(EtrError::InvalidWindow(_))
        ));
        assert!(matches!(
            relative_time_grid(f64::NAN, 1.0, 1.0),
            Err(EtrError::InvalidWindow(_))
        ));
        assert!(matches!(
            relative_time_grid(1.0, 1.0, 0.0),
            Err(EtrError::InvalidRate(_))
        ));
        assert!(matches!(
            relative_time_grid(1.0, 1.0, -50.0),
            Err(EtrError::InvalidRate(_))
        ));
        assert!(matches!(
            relative_time_grid(1.0, 1.0, f64::NAN),
            Err(EtrError::InvalidRate(_))
        ));
    }

    #[test]
    fn test_extraction_around_one_event() {
        let signal = Signal::build(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap();
        let table = event_triggered_response(&signal, &[1.0], 1.0, 1.0, 1.0).unwrap();

        assert_eq!(table.num_events(), 1);
        assert_eq!(table.relative_times(), &[-1.0, 0.0, 1.0]);
        let values = table
            .rows()
            .iter()
            .map(|row| row.value())
            .collect::<Vec<Option<f64>>>();
        assert_eq!(values, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_extraction_near_recording_edge() {
        let signal = Signal::build(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap();
        let table = event_triggered_response(&signal, &[0.5], 1.0, 1.0, 1.0).unwrap();

        // The grid point one second before the event falls outside the recording
        assert_eq!(table.rows()[0].relative_time(), -1.0);
        assert_eq!(table.rows()[0].value(), None);
        assert_eq!(table.rows()[1].value(), Some(1.5));
        assert_eq!(table.rows()[2].value(), Some(2.5));
    }

    #[test]
    fn test_extraction_empty_event_set() {
        let signal = Signal::build(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap();
        let table = event_triggered_response(&signal, &[], 1.0, 1.0, 10.0).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.num_events(), 0);
        assert_eq!(table.samples_per_event(), 21);
    }

    #[test]
    fn test_extraction_invalid_inputs() {
        let signal = Signal::build(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap();
        assert!(matches!(
            event_triggered_response(&signal, &[1.0], -1.0, 1.0, 1.0),
            Err(EtrError::InvalidWindow(_))
        ));
        assert!(matches!(
            event_triggered_response(&signal, &[1.0], 1.0, 1.0, 0.0),
            Err(EtrError::InvalidRate(_))
        ));

        let short = Signal::build(&[0.0], &[1.0]).unwrap();
        assert!(matches!(
            event_triggered_response(&short, &[1.0], 1.0, 1.0, 1.0),
            Err(EtrError::InvalidSignal(_))
        ));
        let empty = Signal::build(&[], &[]).unwrap();
        assert!(matches!(
            event_triggered_response(&empty, &[1.0], 1.0, 1.0, 1.0),
            Err(EtrError::InvalidSignal(_))
        ));
    }
}
