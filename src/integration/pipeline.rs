//! CountingPipeline for combining a tracking backend with the counter.

use std::sync::Arc;

use crate::counter::{
    BoundaryModel, CounterConfig, CountsSnapshot, CrossingEngine, CrossingEvent, SharedCounters,
};

use super::ObservationSource;

/// A combined counter that bundles a tracking backend with a
/// [`CrossingEngine`].
///
/// This struct provides a convenient way to run end-to-end counting by
/// feeding raw frames to any `ObservationSource` and routing the resulting
/// observations through the engine.
pub struct CountingPipeline<S: ObservationSource> {
    source: S,
    engine: CrossingEngine,
}

impl<S: ObservationSource> CountingPipeline<S> {
    /// Create a new counting pipeline over a resolved boundary.
    pub fn new(
        source: S,
        boundary: BoundaryModel,
        config: CounterConfig,
        counters: Arc<SharedCounters>,
    ) -> Self {
        Self {
            source,
            engine: CrossingEngine::new(boundary, config, counters),
        }
    }

    /// Create a pipeline with the default confirmation thresholds.
    pub fn with_default_config(
        source: S,
        boundary: BoundaryModel,
        counters: Arc<SharedCounters>,
    ) -> Self {
        Self::new(source, boundary, CounterConfig::default(), counters)
    }

    /// Process a single frame and return the crossings it confirmed.
    ///
    /// Runs the tracking backend on the frame, feeds every observation to
    /// the engine in order, then applies the backend's track losses.
    /// Observations the engine rejects are logged and skipped; the frame
    /// keeps processing.
    ///
    /// # Arguments
    /// * `input` - Raw frame bytes
    /// * `width` - Frame width in pixels
    /// * `height` - Frame height in pixels
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<CrossingEvent>, S::Error> {
        let frame = self.source.observe(input, width, height)?;

        let mut events = Vec::new();
        for obs in &frame.tracked {
            match self.engine.update(obs.id, obs.x, obs.y) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(err) => CrossingEngine::skip_invalid(&err),
            }
        }
        for id in frame.lost {
            self.engine.notify_track_lost(id);
        }

        Ok(events)
    }

    /// Start a fresh counting session.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Current tallies, for overlay renderers and stats writers.
    pub fn snapshot_counts(&self) -> CountsSnapshot {
        self.engine.snapshot_counts()
    }

    /// Get a reference to the underlying tracking backend.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying tracking backend.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the underlying engine.
    pub fn engine(&self) -> &CrossingEngine {
        &self.engine
    }

    /// Get a mutable reference to the underlying engine.
    pub fn engine_mut(&mut self) -> &mut CrossingEngine {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::{BoundarySpec, Direction};
    use crate::integration::{FrameObservations, TrackedObservation};

    /// Replays a scripted sequence of frames.
    struct MockTracker {
        frames: Vec<FrameObservations>,
        cursor: usize,
    }

    impl MockTracker {
        fn new(frames: Vec<FrameObservations>) -> Self {
            Self { frames, cursor: 0 }
        }
    }

    impl ObservationSource for MockTracker {
        type Error = std::convert::Infallible;

        fn observe(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<FrameObservations, Self::Error> {
            let frame = self.frames.get(self.cursor).cloned().unwrap_or_default();
            self.cursor += 1;
            Ok(frame)
        }
    }

    fn vertical_pipeline(frames: Vec<FrameObservations>) -> CountingPipeline<MockTracker> {
        let boundary =
            BoundaryModel::new(BoundarySpec::vertical(320.0), 640.0, 480.0).unwrap();
        CountingPipeline::with_default_config(
            MockTracker::new(frames),
            boundary,
            Arc::new(SharedCounters::new()),
        )
    }

    fn frame(tracked: &[(u32, f32, f32)]) -> FrameObservations {
        tracked
            .iter()
            .map(|&(id, x, y)| TrackedObservation::new(id, x, y))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_pipeline_counts_a_crossing() {
        let mut pipeline = vertical_pipeline(vec![
            frame(&[(1, 300.0, 200.0)]),
            frame(&[(1, 325.0, 200.0)]),
            frame(&[(1, 330.0, 200.0)]),
            frame(&[(1, 400.0, 200.0)]),
        ]);

        let mut events = Vec::new();
        for _ in 0..4 {
            events.extend(pipeline.process_frame(&[], 640, 480).unwrap());
        }

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].direction, Direction::Entry);
        assert_eq!(pipeline.snapshot_counts().entries, 1);
    }

    #[test]
    fn test_pipeline_skips_invalid_observations() {
        // Track 2's NaN frame is dropped; track 1 still crosses.
        let mut pipeline = vertical_pipeline(vec![
            frame(&[(1, 300.0, 200.0), (2, 100.0, 100.0)]),
            frame(&[(1, 325.0, 200.0), (2, f32::NAN, 100.0)]),
            frame(&[(1, 330.0, 200.0)]),
            frame(&[(1, 400.0, 200.0)]),
        ]);

        for _ in 0..4 {
            pipeline.process_frame(&[], 640, 480).unwrap();
        }
        assert_eq!(pipeline.snapshot_counts().entries, 1);
    }

    #[test]
    fn test_pipeline_applies_track_losses() {
        let mut frames = vec![
            frame(&[(1, 300.0, 200.0)]),
            frame(&[(1, 325.0, 200.0)]),
        ];
        frames.push(FrameObservations::new(vec![], vec![1]));
        // Reappears deep on the right: brand-new baseline, no count.
        frames.push(frame(&[(1, 400.0, 200.0)]));
        frames.push(frame(&[(1, 450.0, 200.0)]));

        let mut pipeline = vertical_pipeline(frames);
        for _ in 0..5 {
            pipeline.process_frame(&[], 640, 480).unwrap();
        }
        assert_eq!(pipeline.snapshot_counts().entries, 0);
        assert_eq!(pipeline.engine().active_tracks(), 1);
    }
}
