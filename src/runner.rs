//! Frame loop
//!
//! One frame is: sample input → tick → present → pace. The loop owns every
//! collaborator the simulation is kept away from (input, renderer, audio,
//! clock) and is the only place that blocks.

use std::time::Duration;

use crate::audio::{AudioDevice, AudioManager};
use crate::platform::input::{Action, ActionSet, InputSnapshot, InputSource};
use crate::platform::time::Clock;
use crate::renderer::{Renderer, present_world};
use crate::settings::Settings;
use crate::sim::{FrameTime, GameEvent, World, tick};

/// Result of a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Running,
    Terminated,
}

/// Game instance holding the world and its collaborators
pub struct Game<I, R, A, C> {
    world: World,
    input: I,
    renderer: R,
    audio: AudioManager<A>,
    clock: C,
    settings: Settings,
    previous_held: ActionSet,
    last_frame_start: f64,
    // FPS tracking
    fps_window_start: f64,
    fps_frames: u32,
    fps: u32,
}

impl<I, R, A, C> Game<I, R, A, C>
where
    I: InputSource,
    R: Renderer,
    A: AudioDevice,
    C: Clock,
{
    /// Wire up the collaborators and start the music
    pub fn new(world: World, settings: Settings, input: I, renderer: R, device: A, clock: C) -> Self {
        let mut audio = AudioManager::new(device, &settings);
        audio.start_music();
        let now = clock.now();
        Self {
            world,
            input,
            renderer,
            audio,
            clock,
            settings,
            previous_held: ActionSet::EMPTY,
            last_frame_start: now,
            fps_window_start: now,
            fps_frames: 0,
            fps: 0,
        }
    }

    /// Run one frame
    pub fn run_frame(&mut self) -> FrameOutcome {
        let start = self.clock.now();
        let dt = (start - self.last_frame_start).max(0.0) as f32;
        self.last_frame_start = start;

        let held = self.input.poll(&self.world);
        let snapshot = InputSnapshot::from_transition(self.previous_held, held);
        self.previous_held = held;

        if snapshot.pressed(Action::ToggleMute) {
            self.audio.toggle_mute();
        }

        let events = tick(&mut self.world, &snapshot, FrameTime { dt, now: start });
        for event in &events {
            if *event == GameEvent::Fired {
                self.audio.on_fire();
            }
        }

        present_world(&self.world, self.audio.is_muted(), &mut self.renderer);

        self.pace(start);
        self.count_frame(start);

        if self.world.is_terminated() {
            FrameOutcome::Terminated
        } else {
            FrameOutcome::Running
        }
    }

    /// Run until the game terminates or `max_frames` frames have run.
    /// Returns the number of frames run.
    pub fn run(&mut self, max_frames: Option<u64>) -> u64 {
        let mut frames = 0;
        while max_frames.is_none_or(|max| frames < max) {
            frames += 1;
            if self.run_frame() == FrameOutcome::Terminated {
                log::info!(
                    "Run over after {} frames: {} kills",
                    frames,
                    self.world.ship.kills
                );
                break;
            }
        }
        frames
    }

    /// Sleep away the rest of the frame budget. Only a frame that finished
    /// inside its budget advances the paced-frame counter.
    fn pace(&mut self, start: f64) {
        let budget = self.world.tuning.pacing.frame_budget();
        let work = self.clock.now() - start;
        if work < budget {
            self.clock.sleep(Duration::from_secs_f64(budget - work));
            self.world.record_paced_frame();
        } else {
            log::trace!("Frame over budget: {:.4}s", work);
        }
    }

    fn count_frame(&mut self, start: f64) {
        if start - self.fps_window_start >= 1.0 {
            self.fps = self.fps_frames;
            self.fps_frames = 0;
            self.fps_window_start = start;
            if self.settings.show_fps {
                log::debug!("{} fps", self.fps);
            }
        }
        self.fps_frames += 1;
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &AudioManager<A> {
        &self.audio
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Frames counted in the last complete second
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
