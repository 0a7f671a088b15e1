//! Directional line-crossing counting for tracked objects.
//!
//! Draw a virtual boundary line across a video frame, feed the crate the
//! per-frame centroids an external tracker reports for each stable track
//! identifier, and it tallies confirmed entries and exits over the line
//! while rejecting tracker jitter, overshoot-and-retreat motion, and
//! duplicate counts from a single crossing.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use crosscount_rs::{
//!     BoundaryModel, BoundarySpec, CounterConfig, CrossingEngine, SharedCounters,
//! };
//!
//! let boundary = BoundaryModel::new(BoundarySpec::vertical(320.0), 640.0, 480.0)?;
//! let counters = Arc::new(SharedCounters::new());
//! let mut engine = CrossingEngine::new(boundary, CounterConfig::default(), counters.clone());
//!
//! // Per frame: feed (track_id, centroid) pairs from the tracker.
//! engine.update(1, 300.0, 200.0)?; // baseline
//! engine.update(1, 330.0, 200.0)?;
//! engine.update(1, 350.0, 200.0)?;
//! if let Some(event) = engine.update(1, 400.0, 200.0)? {
//!     println!("track {} crossed: {:?}", event.track_id, event.direction);
//! }
//!
//! assert_eq!(counters.snapshot().entries, 1);
//! # Ok::<(), crosscount_rs::CounterError>(())
//! ```

pub mod counter;
pub mod integration;

pub use counter::{
    BoundaryModel, BoundarySpec, CounterConfig, CounterError, CountsSnapshot, CrossingEngine,
    CrossingEvent, Direction, SharedCounters, Side,
};
pub use integration::{
    CountingPipeline, FrameObservations, ObservationBuilder, ObservationSource,
    TrackedObservation,
};
