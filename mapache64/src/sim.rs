//! # Host Simulation
//!
//! [`SimPlatform`] stands in for the console when the crate is built with the
//! `sim` feature. It keeps a flat 64 KiB RAM image so tests (and `m64sim`) can
//! read back whatever the game wrote, and it fakes the two things the console
//! firmware normally provides: frame pacing and the graphics-idle signal.
//!
//! ```ignore
//! let mut sim = SimPlatform::new(SimConfig::default());
//! Runtime::new(1).run(&mut Template, &mut sim);
//! assert_eq!(sim.read_word(OUTPUT_BUFFER), 0);
//! ```

use bit_field::BitField;
use log::{debug, info, warn};

use crate::mem::{self, Region};
use crate::platform::{FrameClock, Platform};

#[derive(Debug, Copy, Clone, Default)]
pub struct SimConfig {
    /// How many `gpu_idle` polls report busy after each frame starts.
    pub gpu_latency: u16,
}

pub struct SimPlatform {
    ram: [u8; 0x10000],
    config: SimConfig,
    halted: bool,
    frame: u32,
    gpu_busy: u16,
}

impl SimPlatform {
    pub fn new(config: SimConfig) -> Self {
        Self {
            ram: [0; 0x10000],
            config,
            halted: false,
            frame: 0,
            gpu_busy: 0,
        }
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    pub fn write_byte(&mut self, addr: u16, data: u8) {
        if Region::of(addr).is_reserved() {
            warn!("write into reserved memory at ${:04X}", addr);
        }
        self.ram[addr as usize] = data;
    }

    /// Little-endian word at `addr`. The high byte wraps to `$0000`.
    pub fn read_word(&self, addr: u16) -> i16 {
        let lo = self.read_byte(addr) as u16;
        let hi = self.read_byte(addr.wrapping_add(1)) as u16;
        (hi << 8 | lo) as i16
    }

    /// `count` consecutive words starting at `addr`, wrapping past `$FFFF`.
    pub fn words(&self, addr: u16, count: usize) -> impl Iterator<Item = i16> + '_ {
        (0..count).map(move |i| self.read_word(addr.wrapping_add((i as u16).wrapping_mul(mem::SLOT_WIDTH))))
    }

    /// The whole output buffer, slot 0 first.
    pub fn output(&self) -> [i16; mem::OUTPUT_SLOTS] {
        let mut out = [0; mem::OUTPUT_SLOTS];
        for (slot, word) in out.iter_mut().zip(self.words(mem::OUTPUT_BUFFER, mem::OUTPUT_SLOTS)) {
            *slot = word;
        }
        out
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn ram(&self) -> &[u8; 0x10000] {
        &self.ram
    }
}

impl Default for SimPlatform {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl Platform for SimPlatform {
    fn write_word(&mut self, addr: u16, value: i16) {
        let value = value as u16;
        self.write_byte(addr, value.get_bits(0..8) as u8);
        self.write_byte(addr.wrapping_add(1), value.get_bits(8..16) as u8);
    }

    fn halt(&mut self) {
        info!("halted at frame {}", self.frame);
        self.halted = true;
    }

    fn is_halted(&self) -> bool {
        self.halted
    }
}

impl FrameClock for SimPlatform {
    fn wait_frame(&mut self) {
        self.frame += 1;
        self.gpu_busy = self.config.gpu_latency;
    }

    fn gpu_idle(&mut self) -> bool {
        if self.gpu_busy == 0 {
            return true;
        }
        self.gpu_busy -= 1;
        debug!("gpu busy, {} polls left", self.gpu_busy);
        false
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::cell::RefCell;
    use std::string::{String, ToString};
    use std::sync::Once;
    use std::vec::Vec;

    use log::{Level, LevelFilter, Log, Metadata, Record};

    use super::*;

    /// Collects warnings logged on the current test thread.
    struct Warnings;

    std::thread_local! {
        static CAPTURED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    static WARNINGS: Warnings = Warnings;
    static INSTALL: Once = Once::new();

    impl Log for Warnings {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Warn
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                CAPTURED.with(|c| c.borrow_mut().push(record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    fn take_warnings() -> Vec<String> {
        INSTALL.call_once(|| {
            let _ = log::set_logger(&WARNINGS);
            log::set_max_level(LevelFilter::Warn);
        });
        CAPTURED.with(|c| c.take())
    }

    #[test]
    fn words_are_little_endian() {
        let mut sim = SimPlatform::default();
        sim.write_word(0x0300, 0x1234);
        assert_eq!(sim.read_byte(0x0300), 0x34);
        assert_eq!(sim.read_byte(0x0301), 0x12);
        assert_eq!(sim.read_word(0x0300), 0x1234);

        sim.write_word(0x0302, -1);
        assert_eq!(sim.read_byte(0x0302), 0xFF);
        assert_eq!(sim.read_byte(0x0303), 0xFF);
        assert_eq!(sim.read_word(0x0302), -1);
    }

    #[test]
    fn output_slots() {
        let mut sim = SimPlatform::default();
        assert!(sim.write_output(0, 7));
        assert!(sim.write_output(9, -2));
        assert!(!sim.write_output(10, 99));
        assert_eq!(sim.read_word(0x0200), 7);
        assert_eq!(sim.read_word(0x0212), -2);
        // slot 10 would have been $0214
        assert_eq!(sim.read_word(0x0214), 0);
        assert_eq!(sim.output()[9], -2);
    }

    #[test]
    fn gpu_latency_counts_down_per_frame() {
        let mut sim = SimPlatform::new(SimConfig { gpu_latency: 2 });
        assert!(sim.gpu_idle());

        sim.wait_frame();
        assert_eq!(sim.frame(), 1);
        assert!(!sim.gpu_idle());
        assert!(!sim.gpu_idle());
        assert!(sim.gpu_idle());

        sim.wait_frame();
        assert!(!sim.gpu_idle());
    }

    #[test]
    fn halt_latches() {
        let mut sim = SimPlatform::default();
        assert!(!sim.is_halted());
        sim.halt();
        assert!(sim.is_halted());
    }

    #[test]
    fn reserved_writes_warn_once_per_byte() {
        let mut sim = SimPlatform::default();
        take_warnings();

        sim.write_byte(0x0042, 1);
        sim.write_byte(0x01FF, 2);
        let warnings = take_warnings();
        assert_eq!(warnings.len(), 2, "{warnings:?}");
        assert!(warnings[0].contains("$0042"), "{}", warnings[0]);
        assert!(warnings[1].contains("$01FF"), "{}", warnings[1]);

        sim.write_word(0x00FE, -1);
        assert_eq!(take_warnings().len(), 2);

        sim.write_byte(0x0300, 3);
        sim.write_word(0x0200, 5);
        assert!(take_warnings().is_empty());

        // the write still lands
        assert_eq!(sim.read_byte(0x0042), 1);
    }

    #[test]
    fn words_wrap_past_top_of_memory() {
        let mut sim = SimPlatform::default();
        sim.write_word(0xFFFE, 11);
        sim.write_word(0x0000, -4);
        let words: Vec<i16> = sim.words(0xFFFE, 2).collect();
        assert_eq!(words, [11, -4]);
        assert_eq!(sim.words(0x0000, 0x10000).count(), 0x10000);
    }
}
