//! # m64-mpu
//!
//! An NMOS 6502 simulator for running Mapache64 programs on a host.
//!
//! Not cycle-exact at the bus level: each instruction reports its total cycle
//! count after it completes. Only documented opcodes are decoded.
//!
//! ```
//! use m64_mpu::{Bus, FlatRam, Mpu, MpuConfig, RESET_VECTOR, State};
//!
//! let mut ram = FlatRam::new();
//! ram.load(0x0600, &[0xA9, 0x2A, 0x8D, 0x00, 0x02, 0x00]).unwrap(); // LDA #42; STA $0200; BRK
//! ram.set_vector(RESET_VECTOR, 0x0600);
//!
//! let mut mpu = Mpu::new(MpuConfig::default());
//! mpu.reset(&mut ram);
//! mpu.run(&mut ram, 1_000).unwrap();
//!
//! assert_eq!(mpu.state(), State::Stopped);
//! assert_eq!(ram.read(0x0200), 42);
//! ```

#![no_std]

mod addressing;
mod instructions;
mod ram;

pub mod flags;
pub mod opcodes;

use core::fmt;

use log::{debug, info, trace, warn};

pub use addressing::Mode;
pub use flags::Status;
pub use opcodes::{Instruction, Op};
pub use ram::{FlatRam, LoadError};

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// The stack lives in page one; `sp` is the offset into it.
pub const STACK_BASE: u16 = 0x0100;

/// Anything the MPU can read and write.
pub trait Bus {
    fn read(&mut self, address: u16) -> u8;
    fn write(&mut self, address: u16, data: u8);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
    Running,
    /// Stopped by `BRK` (with [`MpuConfig::halt_on_brk`]). Only `reset` resumes.
    Stopped,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MpuConfig {
    /// Treat `BRK` as a stop-for-inspection instead of a software interrupt.
    pub halt_on_brk: bool,
    /// Charge the extra cycle for indexed reads and branches across pages.
    pub page_cross_cycles: bool,
}

impl Default for MpuConfig {
    fn default() -> Self {
        Self {
            halt_on_brk: true,
            page_cross_cycles: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    UnknownOpcode { opcode: u8, pc: u16 },
    CycleLimit { cycles: u64 },
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::UnknownOpcode { opcode, pc } => {
                write!(f, "unknown opcode ${:02X} at ${:04X}", opcode, pc)
            }
            ExecError::CycleLimit { cycles } => {
                write!(f, "still running after {} cycles", cycles)
            }
        }
    }
}

impl core::error::Error for ExecError {}

#[derive(Debug, Clone)]
pub struct Mpu {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub p: Status,
    pub pc: u16,

    state: State,
    config: MpuConfig,
    cycles: u64,
    // cycles owed by the instruction in flight beyond its base cost
    extra_cycles: u32,
}

impl Mpu {
    /// An MPU in its reset register state with `pc = 0`.
    ///
    /// Call [`Mpu::reset`] to load `pc` from the reset vector.
    pub fn new(config: MpuConfig) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFF,
            p: Status::UNUSED | Status::BREAK | Status::INTERRUPT,
            pc: 0,
            state: State::Running,
            config,
            cycles: 0,
            extra_cycles: 0,
        }
    }

    pub fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFF;
        self.p = Status::UNUSED | Status::BREAK | Status::INTERRUPT;
        self.pc = self.read_word(bus, RESET_VECTOR);
        self.state = State::Running;
        self.cycles = 0;
        debug!("reset, pc=${:04X}", self.pc);
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn config(&self) -> &MpuConfig {
        &self.config
    }

    /// Cycles since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Execute one instruction and return the cycles it took.
    ///
    /// A stopped MPU takes no cycles. On an unknown opcode, `pc` is left
    /// pointing at it.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, ExecError> {
        if self.state == State::Stopped {
            return Ok(0);
        }

        let pc = self.pc;
        let opcode = self.fetch(bus);
        let Some(instruction) = opcodes::decode(opcode) else {
            self.pc = pc;
            warn!("unknown opcode ${:02X} at ${:04X}", opcode, pc);
            return Err(ExecError::UnknownOpcode { opcode, pc });
        };

        self.extra_cycles = 0;
        let (operand, crossed) = self.resolve(bus, instruction.mode);
        if crossed && self.config.page_cross_cycles && instruction.op.pays_for_page_cross() {
            self.extra_cycles += 1;
        }
        self.execute(bus, instruction.op, operand);

        let cycles = instruction.cycles as u32 + self.extra_cycles;
        self.cycles += cycles as u64;
        trace!(
            "${:04X} {:?} {:?}  A={:02X} X={:02X} Y={:02X} SP={:02X} P={}",
            pc, instruction.op, operand, self.a, self.x, self.y, self.sp, self.p
        );

        Ok(cycles)
    }

    /// Step until the MPU stops.
    ///
    /// Returns the cycles spent, or [`ExecError::CycleLimit`] if it was still
    /// running after `max_cycles`.
    pub fn run<B: Bus>(&mut self, bus: &mut B, max_cycles: u64) -> Result<u64, ExecError> {
        let start = self.cycles;
        while self.state == State::Running {
            let spent = self.cycles - start;
            if spent >= max_cycles {
                return Err(ExecError::CycleLimit { cycles: spent });
            }
            self.step(bus)?;
        }
        Ok(self.cycles - start)
    }

    /// Non-maskable interrupt. Ignored while stopped.
    pub fn nmi<B: Bus>(&mut self, bus: &mut B) {
        if self.state == State::Running {
            self.interrupt(bus, NMI_VECTOR, false);
            self.cycles += 7;
        }
    }

    /// Maskable interrupt. Ignored while stopped or with `I` set.
    pub fn irq<B: Bus>(&mut self, bus: &mut B) {
        if self.state == State::Running && !self.p.contains(Status::INTERRUPT) {
            self.interrupt(bus, IRQ_VECTOR, false);
            self.cycles += 7;
        }
    }

    pub(crate) fn interrupt<B: Bus>(&mut self, bus: &mut B, vector: u16, brk: bool) {
        self.push_word(bus, self.pc);
        let mut pushed = self.p | Status::UNUSED;
        pushed.set(Status::BREAK, brk);
        self.push(bus, pushed.bits());
        self.p.insert(Status::INTERRUPT);
        self.pc = self.read_word(bus, vector);
        info!("interrupt via ${:04X} -> ${:04X}", vector, self.pc);
    }

    pub(crate) fn stop(&mut self) {
        self.state = State::Stopped;
    }

    #[inline(always)]
    pub(crate) fn fetch<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let data = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        data
    }

    #[inline(always)]
    pub(crate) fn fetch_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch(bus) as u16;
        let hi = self.fetch(bus) as u16;
        hi << 8 | lo
    }

    pub(crate) fn read_word<B: Bus>(&self, bus: &mut B, address: u16) -> u16 {
        let lo = bus.read(address) as u16;
        let hi = bus.read(address.wrapping_add(1)) as u16;
        hi << 8 | lo
    }

    #[inline(always)]
    pub(crate) fn push<B: Bus>(&mut self, bus: &mut B, data: u8) {
        bus.write(STACK_BASE | self.sp as u16, data);
        self.sp = self.sp.wrapping_sub(1);
    }

    #[inline(always)]
    pub(crate) fn pop<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(STACK_BASE | self.sp as u16)
    }

    pub(crate) fn push_word<B: Bus>(&mut self, bus: &mut B, data: u16) {
        self.push(bus, (data >> 8) as u8);
        self.push(bus, data as u8);
    }

    pub(crate) fn pop_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.pop(bus) as u16;
        let hi = self.pop(bus) as u16;
        hi << 8 | lo
    }

    #[inline(always)]
    pub(crate) fn nz_p(&mut self, value: u8) {
        self.p.set(Status::ZERO, value == 0);
        self.p.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    #[inline(always)]
    pub(crate) fn cnz_p(&mut self, carry: bool, value: u8) {
        self.p.set(Status::CARRY, carry);
        self.nz_p(value);
    }
}

impl fmt::Display for Mpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PC=${:04X} A=${:02X} X=${:02X} Y=${:02X} SP=${:02X} P={}",
            self.pc, self.a, self.x, self.y, self.sp, self.p
        )
    }
}
