use log::debug;
use mapache64::{Game, Platform, mem::OUTPUT_SLOTS};

use crate::fibo::iterative_fibo;

/// Follow this template to implement your game.
#[derive(Debug, Default, Copy, Clone)]
pub struct Template;

impl Game for Template {
    /// Run once on startup.
    ///
    /// Dumps the first ten Fibonacci numbers into the output buffer, then stops
    /// the CPU so they can be inspected.
    fn reset<P: Platform>(&mut self, platform: &mut P) {
        for slot in 0..OUTPUT_SLOTS {
            platform.write_output(slot, iterative_fibo(slot as i16));
        }
        debug!("output buffer filled");

        platform.halt();
    }

    /// Run 60 times a second.
    fn do_logic<P: Platform>(&mut self, _platform: &mut P) {}

    /// Run after `do_logic`, once the GPU is idle.
    fn fill_vram<P: Platform>(&mut self, _platform: &mut P) {}
}
