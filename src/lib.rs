//! This crate provides tools for computing event-triggered responses (ETRs) in Rust.
//!
//! An event-triggered response is a segment of a continuous signal extracted and
//! resampled onto a common relative-time axis around a set of discrete event times,
//! e.g., a fluorescence trace around stimulus omissions. Because every event shares
//! the same grid, the resulting table can be averaged or stacked across events
//! directly.
//!
//! # Building Signals
//!
//! ## From Recorded Samples
//!
//! ```rust
//! use rusty_etr::signal::Signal;
//!
//! // A signal sampled at four (not necessarily regular) timestamps
//! let signal = Signal::build(&[0.0, 0.5, 1.0, 1.75], &[1.0, 2.0, 3.0, 4.0]).unwrap();
//!
//! assert_eq!(signal.len(), 4);
//! assert_eq!(signal.value_at(0.25), Some(1.5));
//! assert_eq!(signal.value_at(2.0), None);
//! ```
//!
//! ## At Random
//!
//! ```rust
//! use rusty_etr::signal::Signal;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! // Create a random signal with 1000 samples spanning 60 seconds
//! let mut rng = StdRng::seed_from_u64(42);
//! let signal = Signal::rand(1000, 60.0, &mut rng).unwrap();
//!
//! assert_eq!(signal.len(), 1000);
//! ```
//!
//! # Extracting Responses
//!
//! ```rust
//! use rusty_etr::signal::Signal;
//! use rusty_etr::etr::event_triggered_response;
//!
//! let signal = Signal::build(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0]).unwrap();
//!
//! // Resample the signal around two events, from 1 second before to 1 second
//! // after each, at 2 samples per second
//! let table = event_triggered_response(&signal, &[1.0, 2.0], 1.0, 1.0, 2.0).unwrap();
//!
//! assert_eq!(table.num_events(), 2);
//! assert_eq!(table.samples_per_event(), 5);
//! assert_eq!(table.relative_times(), &[-1.0, -0.5, 0.0, 0.5, 1.0]);
//! assert_eq!(table.rows()[2].value(), Some(2.0));
//! ```

pub mod error;
pub mod etr;
pub mod response;
pub mod signal;
