/// The per-frame loop: poll, draw, advance, present, pace
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::clock::FramePacer;
use crate::config::SceneConfig;
use crate::geometry::Wireframe;
use crate::projection::Projection;
use crate::render::{Surface, WireframeRenderer};
use crate::transform::RotationAngles;

/// Loop lifecycle; `Stopped` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// What the windowing side reports between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The user closed the window or asked to quit
    Quit,
    /// Anything the loop does not react to
    Other,
}

/// The windowing, drawing and presentation collaborator.
///
/// A platform owns exactly one surface for its whole life. `shutdown`
/// releases it and is called once, when the loop stops.
pub trait Platform {
    type Surface: Surface;
    type Error;

    /// Next pending event, or `None` once the queue is drained. Never blocks.
    fn next_event(&mut self) -> Result<Option<PlatformEvent>, Self::Error>;

    fn surface(&mut self) -> &mut Self::Surface;

    /// Make everything drawn since the last present visible
    fn present(&mut self) -> Result<(), Self::Error>;

    fn shutdown(&mut self) -> Result<(), Self::Error>;
}

/// Totals reported when the loop finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Frames drawn and presented
    pub frames: u64,
}

/// Drives a wireframe through rotate, project, draw and present until quit
pub struct FrameLoop<P: Platform, C: FramePacer, const V: usize, const E: usize> {
    platform: P,
    pacer: C,
    wireframe: Wireframe<V, E>,
    projection: Projection,
    renderer: WireframeRenderer,
    spin: RotationAngles,
    angles: RotationAngles,
    state: LoopState,
    stats: FrameStats,
    fps_window_start: Instant,
    fps_window_frames: u32,
}

impl<P: Platform, C: FramePacer, const V: usize, const E: usize> FrameLoop<P, C, V, E> {
    /// Build a loop for `wireframe`, projecting onto the platform's surface size
    pub fn new(
        mut platform: P,
        pacer: C,
        wireframe: Wireframe<V, E>,
        config: &SceneConfig,
    ) -> Self {
        let surface = platform.surface();
        let projection = Projection::new(config.scale, surface.width(), surface.height());

        Self {
            platform,
            pacer,
            wireframe,
            projection,
            renderer: config.renderer(),
            spin: config.spin,
            angles: RotationAngles::zero(),
            state: LoopState::Running,
            stats: FrameStats::default(),
            fps_window_start: Instant::now(),
            fps_window_frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn angles(&self) -> RotationAngles {
        self.angles
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Run one iteration and report the state it left the loop in.
    ///
    /// A quit seen while draining events stops the loop before anything
    /// is drawn, so the last presented frame stays on screen. Once
    /// stopped, further calls do nothing.
    pub fn step(&mut self) -> Result<LoopState, P::Error> {
        if self.state == LoopState::Stopped {
            return Ok(LoopState::Stopped);
        }

        if self.drain_events()? {
            self.state = LoopState::Stopped;
            return Ok(self.state);
        }

        let points = self.projection.project_wireframe(&self.wireframe, &self.angles);
        self.renderer
            .draw_frame(self.platform.surface(), &self.wireframe, &points);

        self.angles = self.angles.advanced(&self.spin);

        self.platform.present()?;
        self.stats.frames += 1;
        self.track_frame_rate();

        self.pacer.wait();
        Ok(self.state)
    }

    /// Step until quit, then release the platform.
    ///
    /// The platform is shut down even when a step fails; the step's error
    /// wins over a shutdown error.
    pub fn run(mut self) -> Result<FrameStats, P::Error> {
        info!(
            vertices = V,
            edges = E,
            width = self.projection.width,
            height = self.projection.height,
            "frame loop starting"
        );

        let result = self.main_loop();
        self.state = LoopState::Stopped;
        let shutdown = self.platform.shutdown();

        result?;
        shutdown?;

        info!(frames = self.stats.frames, "frame loop stopped");
        Ok(self.stats)
    }

    fn main_loop(&mut self) -> Result<(), P::Error> {
        while self.step()? == LoopState::Running {}
        Ok(())
    }

    /// Empty the event queue; true if any event asked to quit
    fn drain_events(&mut self) -> Result<bool, P::Error> {
        let mut quit = false;
        while let Some(event) = self.platform.next_event()? {
            if event == PlatformEvent::Quit {
                quit = true;
            }
        }
        Ok(quit)
    }

    fn track_frame_rate(&mut self) {
        self.fps_window_frames += 1;
        let elapsed = self.fps_window_start.elapsed();
        if elapsed >= Duration::from_secs(1) {
            let fps = f64::from(self.fps_window_frames) / elapsed.as_secs_f64();
            debug!(fps = (fps * 10.0).round() / 10.0, angles = ?self.angles, "frame rate");
            self.fps_window_frames = 0;
            self.fps_window_start = Instant::now();
        }
    }
}
