//! Integration module for connecting tracking backends with the counter.
//!
//! This module provides the narrow capability interface between the counting
//! core and any detection-and-tracking stack: a backend only has to report
//! per-frame centroids with stable identifiers and the identifiers it has
//! lost.

mod builder;
mod observation;
mod pipeline;

pub use builder::ObservationBuilder;
pub use observation::{FrameObservations, ObservationSource, TrackedObservation};
pub use pipeline::CountingPipeline;
