use crate::mem;

/// What game code may ask of the machine it runs on.
///
/// The console implements this over real memory (`hardware::Hardware`);
/// the host implements it over a RAM image (`sim::SimPlatform`).
pub trait Platform {
    /// Store a 16-bit word, low byte first, at `addr`.
    fn write_word(&mut self, addr: u16, value: i16);

    /// Stop the processor for inspection.
    ///
    /// On the console this executes `BRK`. Once halted, no further
    /// lifecycle hooks are run.
    fn halt(&mut self);

    fn is_halted(&self) -> bool;

    /// Write `value` into output slot `slot`.
    ///
    /// Returns `false` and writes nothing if `slot` is past the buffer.
    fn write_output(&mut self, slot: usize, value: i16) -> bool {
        match mem::output_slot(slot) {
            Some(addr) => {
                self.write_word(addr, value);
                true
            }
            None => false,
        }
    }
}

/// Frame pacing provided by whatever schedules the hooks.
///
/// On the console the firmware owns this; only host runtimes implement it.
pub trait FrameClock {
    /// Block until the next 60 Hz frame.
    fn wait_frame(&mut self);

    /// Poll the graphics unit. `fill_vram` may only run once this is `true`.
    fn gpu_idle(&mut self) -> bool;
}
