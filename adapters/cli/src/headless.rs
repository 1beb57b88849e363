//! Windowless rendering backend that feeds scripted input and logs the HUD.

use std::{
    thread,
    time::{Duration, Instant},
};

use anyhow::Result as AnyResult;
use path_defence_core::TICKS_PER_SECOND;
use path_defence_rendering::{
    outcome_banner, FrameControl, FrameInput, Presentation, RenderingBackend, Scene,
};
use tracing::info;

use crate::scenario::Scenario;

/// How frames are spaced in wall-clock time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pacing {
    /// One frame every 1/60 s.
    Realtime,
    /// Frames back to back.
    Fast,
}

/// Backend that presents frames by logging them.
#[derive(Debug)]
pub(crate) struct HeadlessBackend {
    scenario: Scenario,
    pacing: Pacing,
    max_frames: u32,
    report_every: u32,
}

impl HeadlessBackend {
    /// Creates a backend that plays `scenario` for at most `max_frames` frames.
    pub(crate) fn new(
        scenario: Scenario,
        pacing: Pacing,
        max_frames: u32,
        report_every: u32,
    ) -> Self {
        Self {
            scenario,
            pacing,
            max_frames,
            report_every,
        }
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Presentation {
            window_title,
            mut scene,
            ..
        } = presentation;
        info!(title = %window_title, pacing = ?self.pacing, "presenting headless frames");

        let frame_duration = Duration::from_secs_f64(1.0 / f64::from(TICKS_PER_SECOND));
        let mut previous = Instant::now();
        let mut frame = 0;

        while frame < self.max_frames {
            let started = Instant::now();
            let delta = started.duration_since(previous);
            previous = started;

            let input = FrameInput {
                events: self.scenario.inputs_at(frame),
            };
            let control = update_scene(delta, input, &mut scene);
            frame += 1;

            if self.report_every > 0 && frame % self.report_every == 0 {
                info!(frame, "{}", hud_summary(&scene));
            }
            if control == FrameControl::Exit {
                break;
            }

            if self.pacing == Pacing::Realtime {
                let elapsed = started.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        }

        match scene.outcome.and_then(outcome_banner) {
            Some((banner, _)) => info!(frame, "{banner} {}", hud_summary(&scene)),
            None => info!(frame, "stopped {}", hud_summary(&scene)),
        }
        Ok(())
    }
}

fn hud_summary(scene: &Scene) -> String {
    let mut summary = scene.hud.lines().join("  ");
    summary.push_str(&format!(
        "  Towers: {}  Enemies: {}",
        scene.towers.len(),
        scene.enemies.len()
    ));
    summary
}
