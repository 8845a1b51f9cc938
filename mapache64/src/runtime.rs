//! # Lifecycle
//!
//! The console firmware drives a game through three hooks:
//!
//! 1. `reset` once at power-on,
//! 2. `do_logic` at the start of every 60 Hz frame,
//! 3. `fill_vram` right after, but only once the graphics unit is idle.
//!
//! On hardware that schedule lives in the console ROM. [`Runtime`] replays it
//! on a host so a [`Game`] can be exercised without one.

use log::{debug, info};

use crate::platform::{FrameClock, Platform};

pub trait Game {
    /// Run once before any frame.
    fn reset<P: Platform>(&mut self, platform: &mut P);

    /// Per-frame simulation.
    fn do_logic<P: Platform>(&mut self, platform: &mut P);

    /// Per-frame video buffer population.
    fn fill_vram<P: Platform>(&mut self, platform: &mut P);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Exit {
    /// The game halted the processor.
    Halted,
    /// All requested frames ran.
    FrameBudget,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub exit: Exit,
    /// Frames that reached `do_logic`.
    pub frames: u32,
    /// Total `gpu_idle` polls that came back busy.
    pub gpu_waits: u32,
}

pub struct Runtime {
    frames: u32,
}

impl Runtime {
    pub fn new(frames: u32) -> Self {
        Self { frames }
    }

    pub fn run<G, P>(&self, game: &mut G, platform: &mut P) -> RunReport
    where
        G: Game,
        P: Platform + FrameClock,
    {
        let mut report = RunReport {
            exit: Exit::FrameBudget,
            frames: 0,
            gpu_waits: 0,
        };

        game.reset(platform);
        if platform.is_halted() {
            info!("halted during reset");
            report.exit = Exit::Halted;
            return report;
        }

        while report.frames < self.frames {
            platform.wait_frame();
            report.frames += 1;

            game.do_logic(platform);
            if platform.is_halted() {
                report.exit = Exit::Halted;
                break;
            }

            while !platform.gpu_idle() {
                report.gpu_waits += 1;
            }

            game.fill_vram(platform);
            if platform.is_halted() {
                report.exit = Exit::Halted;
                break;
            }
        }

        debug!("{:?}", report);
        report
    }
}
