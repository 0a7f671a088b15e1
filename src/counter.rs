mod boundary;
mod counts;
mod engine;
mod error;
mod track_state;

pub use boundary::{BoundaryModel, BoundarySpec, EDGE_MARGIN, MAX_ANGLE_DEG};
pub use counts::{CountsSnapshot, SharedCounters};
pub use engine::{CounterConfig, CrossingEngine, CrossingEvent};
pub use error::CounterError;
pub use track_state::{Direction, Side};
