use crate::{Bus, Mpu};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// `JMP ($xxxx)` only.
    Indirect,
    /// `($zz,X)`
    IndirectX,
    /// `($zz),Y`
    IndirectY,
    Relative,
}

/// What an instruction works on once its addressing mode is resolved.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Operand {
    Implied,
    Accumulator,
    Immediate(u8),
    Address(u16),
}

#[inline(always)]
pub(crate) const fn crosses_page(from: u16, to: u16) -> bool {
    from & 0xFF00 != to & 0xFF00
}

impl Mpu {
    /// Fetch operand bytes for `mode`.
    ///
    /// The flag is set when indexing moved the effective address into another
    /// page; the caller decides whether that costs a cycle.
    pub(crate) fn resolve<B: Bus>(&mut self, bus: &mut B, mode: Mode) -> (Operand, bool) {
        match mode {
            Mode::Implied => (Operand::Implied, false),
            Mode::Accumulator => (Operand::Accumulator, false),
            Mode::Immediate => (Operand::Immediate(self.fetch(bus)), false),
            Mode::ZeroPage => (Operand::Address(self.fetch(bus) as u16), false),
            Mode::ZeroPageX => {
                let zp = self.fetch(bus).wrapping_add(self.x);
                (Operand::Address(zp as u16), false)
            }
            Mode::ZeroPageY => {
                let zp = self.fetch(bus).wrapping_add(self.y);
                (Operand::Address(zp as u16), false)
            }
            Mode::Absolute => (Operand::Address(self.fetch_word(bus)), false),
            Mode::AbsoluteX => {
                let base = self.fetch_word(bus);
                let addr = base.wrapping_add(self.x as u16);
                (Operand::Address(addr), crosses_page(base, addr))
            }
            Mode::AbsoluteY => {
                let base = self.fetch_word(bus);
                let addr = base.wrapping_add(self.y as u16);
                (Operand::Address(addr), crosses_page(base, addr))
            }
            Mode::Indirect => {
                let ptr = self.fetch_word(bus);
                // NMOS bug: the high byte never carries into the next page
                let hi_ptr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                let lo = bus.read(ptr) as u16;
                let hi = bus.read(hi_ptr) as u16;
                (Operand::Address(hi << 8 | lo), false)
            }
            Mode::IndirectX => {
                let zp = self.fetch(bus).wrapping_add(self.x);
                (Operand::Address(read_zp_word(bus, zp)), false)
            }
            Mode::IndirectY => {
                let zp = self.fetch(bus);
                let base = read_zp_word(bus, zp);
                let addr = base.wrapping_add(self.y as u16);
                (Operand::Address(addr), crosses_page(base, addr))
            }
            Mode::Relative => {
                let offset = self.fetch(bus) as i8;
                let target = self.pc.wrapping_add(offset as i16 as u16);
                (Operand::Address(target), false)
            }
        }
    }
}

/// Pointer stored in page zero. `$FF` wraps to `$00` for the high byte.
pub(crate) fn read_zp_word<B: Bus>(bus: &mut B, zp: u8) -> u16 {
    let lo = bus.read(zp as u16) as u16;
    let hi = bus.read(zp.wrapping_add(1) as u16) as u16;
    hi << 8 | lo
}
