use bit_field::BitField;
use log::info;

use crate::addressing::{Operand, crosses_page};
use crate::opcodes::Op;
use crate::{Bus, IRQ_VECTOR, Mpu, Status};

impl Mpu {
    pub(crate) fn execute<B: Bus>(&mut self, bus: &mut B, op: Op, operand: Operand) {
        match op {
            Op::Lda => {
                self.a = self.load(bus, operand);
                self.nz_p(self.a);
            }
            Op::Ldx => {
                self.x = self.load(bus, operand);
                self.nz_p(self.x);
            }
            Op::Ldy => {
                self.y = self.load(bus, operand);
                self.nz_p(self.y);
            }
            Op::Sta => self.store(bus, operand, self.a),
            Op::Stx => self.store(bus, operand, self.x),
            Op::Sty => self.store(bus, operand, self.y),

            Op::Adc => {
                let data = self.load(bus, operand);
                if self.p.contains(Status::DECIMAL) {
                    self.adc_decimal(data);
                } else {
                    self.adc_binary(data);
                }
            }
            Op::Sbc => {
                let data = self.load(bus, operand);
                if self.p.contains(Status::DECIMAL) {
                    self.sbc_decimal(data);
                } else {
                    // a - m - !c == a + !m + c
                    self.adc_binary(!data);
                }
            }

            Op::And => {
                self.a &= self.load(bus, operand);
                self.nz_p(self.a);
            }
            Op::Ora => {
                self.a |= self.load(bus, operand);
                self.nz_p(self.a);
            }
            Op::Eor => {
                self.a ^= self.load(bus, operand);
                self.nz_p(self.a);
            }
            Op::Bit => {
                let data = self.load(bus, operand);
                self.p.set(Status::ZERO, self.a & data == 0);
                self.p.set(Status::NEGATIVE, data.get_bit(7));
                self.p.set(Status::OVERFLOW, data.get_bit(6));
            }

            Op::Cmp => self.compare(bus, operand, self.a),
            Op::Cpx => self.compare(bus, operand, self.x),
            Op::Cpy => self.compare(bus, operand, self.y),

            Op::Inc => self.modify(bus, operand, |_, data| data.wrapping_add(1)),
            Op::Dec => self.modify(bus, operand, |_, data| data.wrapping_sub(1)),
            Op::Asl => self.modify(bus, operand, |p, data| {
                p.set(Status::CARRY, data.get_bit(7));
                data << 1
            }),
            Op::Lsr => self.modify(bus, operand, |p, data| {
                p.set(Status::CARRY, data.get_bit(0));
                data >> 1
            }),
            Op::Rol => self.modify(bus, operand, |p, data| {
                let carry_in = p.contains(Status::CARRY) as u8;
                p.set(Status::CARRY, data.get_bit(7));
                data << 1 | carry_in
            }),
            Op::Ror => self.modify(bus, operand, |p, data| {
                let carry_in = p.contains(Status::CARRY) as u8;
                p.set(Status::CARRY, data.get_bit(0));
                data >> 1 | carry_in << 7
            }),

            Op::Inx => {
                self.x = self.x.wrapping_add(1);
                self.nz_p(self.x);
            }
            Op::Iny => {
                self.y = self.y.wrapping_add(1);
                self.nz_p(self.y);
            }
            Op::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.nz_p(self.x);
            }
            Op::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.nz_p(self.y);
            }

            Op::Tax => {
                self.x = self.a;
                self.nz_p(self.x);
            }
            Op::Tay => {
                self.y = self.a;
                self.nz_p(self.y);
            }
            Op::Txa => {
                self.a = self.x;
                self.nz_p(self.a);
            }
            Op::Tya => {
                self.a = self.y;
                self.nz_p(self.a);
            }
            Op::Tsx => {
                self.x = self.sp;
                self.nz_p(self.x);
            }
            Op::Txs => self.sp = self.x,

            Op::Pha => self.push(bus, self.a),
            Op::Php => self.push(bus, (self.p | Status::BREAK | Status::UNUSED).bits()),
            Op::Pla => {
                self.a = self.pop(bus);
                self.nz_p(self.a);
            }
            Op::Plp => {
                let pulled = self.pop(bus);
                self.set_p(pulled);
            }

            Op::Bcc => self.branch(operand, !self.p.contains(Status::CARRY)),
            Op::Bcs => self.branch(operand, self.p.contains(Status::CARRY)),
            Op::Bne => self.branch(operand, !self.p.contains(Status::ZERO)),
            Op::Beq => self.branch(operand, self.p.contains(Status::ZERO)),
            Op::Bpl => self.branch(operand, !self.p.contains(Status::NEGATIVE)),
            Op::Bmi => self.branch(operand, self.p.contains(Status::NEGATIVE)),
            Op::Bvc => self.branch(operand, !self.p.contains(Status::OVERFLOW)),
            Op::Bvs => self.branch(operand, self.p.contains(Status::OVERFLOW)),

            Op::Jmp => self.pc = address(operand),
            Op::Jsr => {
                // the pushed address is the last byte of the JSR itself
                self.push_word(bus, self.pc.wrapping_sub(1));
                self.pc = address(operand);
            }
            Op::Rts => self.pc = self.pop_word(bus).wrapping_add(1),
            Op::Rti => {
                let pulled = self.pop(bus);
                self.set_p(pulled);
                self.pc = self.pop_word(bus);
            }
            Op::Brk => {
                // BRK carries a padding byte
                self.pc = self.pc.wrapping_add(1);
                if self.config.halt_on_brk {
                    info!("BRK at ${:04X}, stopping", self.pc.wrapping_sub(2));
                    self.stop();
                } else {
                    self.interrupt(bus, IRQ_VECTOR, true);
                }
            }

            Op::Clc => self.p.remove(Status::CARRY),
            Op::Sec => self.p.insert(Status::CARRY),
            Op::Cld => self.p.remove(Status::DECIMAL),
            Op::Sed => self.p.insert(Status::DECIMAL),
            Op::Cli => self.p.remove(Status::INTERRUPT),
            Op::Sei => self.p.insert(Status::INTERRUPT),
            Op::Clv => self.p.remove(Status::OVERFLOW),
            Op::Nop => {}
        }
    }

    #[inline(always)]
    fn load<B: Bus>(&mut self, bus: &mut B, operand: Operand) -> u8 {
        match operand {
            Operand::Immediate(data) => data,
            Operand::Address(addr) => bus.read(addr),
            Operand::Accumulator => self.a,
            Operand::Implied => 0,
        }
    }

    #[inline(always)]
    fn store<B: Bus>(&mut self, bus: &mut B, operand: Operand, data: u8) {
        match operand {
            Operand::Address(addr) => bus.write(addr, data),
            Operand::Accumulator => self.a = data,
            Operand::Immediate(_) | Operand::Implied => {}
        }
    }

    /// Read-modify-write on memory or the accumulator. Sets N and Z from the result.
    fn modify<B: Bus>(&mut self, bus: &mut B, operand: Operand, f: impl FnOnce(&mut Status, u8) -> u8) {
        let data = self.load(bus, operand);
        let result = f(&mut self.p, data);
        self.store(bus, operand, result);
        self.nz_p(result);
    }

    fn compare<B: Bus>(&mut self, bus: &mut B, operand: Operand, register: u8) {
        let data = self.load(bus, operand);
        self.cnz_p(register >= data, register.wrapping_sub(data));
    }

    fn branch(&mut self, operand: Operand, taken: bool) {
        if !taken {
            return;
        }
        let target = address(operand);
        self.extra_cycles += 1;
        if self.config.page_cross_cycles && crosses_page(self.pc, target) {
            self.extra_cycles += 1;
        }
        self.pc = target;
    }

    /// `B` and the unused bit always read back as set.
    fn set_p(&mut self, pulled: u8) {
        self.p = Status::from_bits_retain(pulled) | Status::BREAK | Status::UNUSED;
    }

    fn adc_binary(&mut self, data: u8) {
        let carry = self.p.contains(Status::CARRY) as u16;
        let sum = self.a as u16 + data as u16 + carry;
        let result = sum as u8;

        self.p.set(Status::OVERFLOW, !(self.a ^ data) & (self.a ^ result) & 0x80 != 0);
        self.cnz_p(sum > 0xFF, result);
        self.a = result;
    }

    /// NMOS BCD add. N and Z come from the binary ALU result, before the
    /// decimal adjust, as on real silicon.
    fn adc_decimal(&mut self, data: u8) {
        let a = self.a as u16;
        let m = data as u16;
        let carry = self.p.contains(Status::CARRY) as u16;

        let mut half_carry = 0;
        let mut adjust_lo = 0;
        let mut adjust_hi = 0;

        let mut lo = (m & 0xF) + (a & 0xF) + carry;
        if lo > 9 {
            adjust_lo = 6;
            half_carry = 1;
        }
        let mut hi = ((m >> 4) & 0xF) + ((a >> 4) & 0xF) + half_carry;
        let decimal_carry = hi > 9;
        if decimal_carry {
            adjust_hi = 6;
        }

        lo &= 0xF;
        hi &= 0xF;
        let alu = (hi << 4 | lo) as u8;
        lo = (lo + adjust_lo) & 0xF;
        hi = (hi + adjust_hi) & 0xF;

        self.p.set(Status::ZERO, alu == 0);
        self.p.set(Status::NEGATIVE, alu.get_bit(7));
        self.p.set(Status::CARRY, decimal_carry);
        self.p.set(Status::OVERFLOW, !(self.a ^ data) & (self.a ^ alu) & 0x80 != 0);
        self.a = (hi << 4 | lo) as u8;
    }

    /// NMOS BCD subtract. Flags follow the binary result.
    fn sbc_decimal(&mut self, data: u8) {
        let a = self.a as u16;
        let inverted = (!data) as u16;
        let carry = self.p.contains(Status::CARRY) as u16;

        let mut half_carry = 1;
        let mut adjust_lo = 0;
        let mut adjust_hi = 0;

        let lo = (a & 0xF) + (inverted & 0xF) + carry;
        if lo <= 0xF {
            half_carry = 0;
            adjust_lo = 10;
        }
        let hi = ((a >> 4) & 0xF) + ((inverted >> 4) & 0xF) + half_carry;
        if hi <= 0xF {
            adjust_hi = 10 << 4;
        }

        let sum = a + inverted + carry;
        let decimal_carry = sum > 0xFF;
        let alu = sum & 0xFF;
        let lo = (alu + adjust_lo) & 0xF;
        let hi = ((alu + adjust_hi) >> 4) & 0xF;

        let alu = alu as u8;
        self.p.set(Status::ZERO, alu == 0);
        self.p.set(Status::NEGATIVE, alu.get_bit(7));
        self.p.set(Status::CARRY, decimal_carry);
        self.p.set(Status::OVERFLOW, (self.a ^ data) & (self.a ^ alu) & 0x80 != 0);
        self.a = (hi << 4 | lo) as u8;
    }
}

#[inline(always)]
fn address(operand: Operand) -> u16 {
    match operand {
        Operand::Address(addr) => addr,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use crate::{FlatRam, MpuConfig, RESET_VECTOR, State};

    use super::*;

    /// Runs `program` from $0600 up to its BRK.
    fn run(program: &[u8]) -> (Mpu, FlatRam) {
        let mut ram = FlatRam::new();
        ram.load(0x0600, program).unwrap();
        ram.set_vector(RESET_VECTOR, 0x0600);
        let mut mpu = Mpu::new(MpuConfig::default());
        mpu.reset(&mut ram);
        mpu.run(&mut ram, 10_000).unwrap();
        (mpu, ram)
    }

    #[test]
    fn lda_sets_flags() {
        let (mpu, _) = run(&[0xA9, 0x00, 0x00]);
        assert!(mpu.p.contains(Status::ZERO));
        assert!(!mpu.p.contains(Status::NEGATIVE));

        let (mpu, _) = run(&[0xA9, 0x80, 0x00]);
        assert_eq!(mpu.a, 0x80);
        assert!(mpu.p.contains(Status::NEGATIVE));
        assert!(!mpu.p.contains(Status::ZERO));
    }

    #[test]
    fn stx_and_ldy_through_memory() {
        // LDX #$42; STX $0300; LDY $0300
        let (mpu, mut ram) = run(&[0xA2, 0x42, 0x8E, 0x00, 0x03, 0xAC, 0x00, 0x03, 0x00]);
        assert_eq!(ram.read(0x0300), 0x42);
        assert_eq!(mpu.y, 0x42);
    }

    #[test]
    fn adc_binary_carry_and_overflow() {
        // CLC; LDA #$7F; ADC #$01
        let (mpu, _) = run(&[0x18, 0xA9, 0x7F, 0x69, 0x01, 0x00]);
        assert_eq!(mpu.a, 0x80);
        assert!(mpu.p.contains(Status::OVERFLOW));
        assert!(!mpu.p.contains(Status::CARRY));

        // SEC; LDA #$FF; ADC #$00
        let (mpu, _) = run(&[0x38, 0xA9, 0xFF, 0x69, 0x00, 0x00]);
        assert_eq!(mpu.a, 0x00);
        assert!(mpu.p.contains(Status::CARRY));
        assert!(mpu.p.contains(Status::ZERO));
        assert!(!mpu.p.contains(Status::OVERFLOW));
    }

    #[test]
    fn sbc_binary_borrow() {
        // SEC; LDA #$05; SBC #$06
        let (mpu, _) = run(&[0x38, 0xA9, 0x05, 0xE9, 0x06, 0x00]);
        assert_eq!(mpu.a, 0xFF);
        assert!(!mpu.p.contains(Status::CARRY));
        assert!(mpu.p.contains(Status::NEGATIVE));

        // SEC; LDA #$80; SBC #$01
        let (mpu, _) = run(&[0x38, 0xA9, 0x80, 0xE9, 0x01, 0x00]);
        assert_eq!(mpu.a, 0x7F);
        assert!(mpu.p.contains(Status::CARRY));
        assert!(mpu.p.contains(Status::OVERFLOW));
    }

    #[test]
    fn decimal_add() {
        // SED; CLC; LDA #$19; ADC #$28
        let (mpu, _) = run(&[0xF8, 0x18, 0xA9, 0x19, 0x69, 0x28, 0x00]);
        assert_eq!(mpu.a, 0x47);
        assert!(!mpu.p.contains(Status::CARRY));

        // SED; CLC; LDA #$99; ADC #$01
        let (mpu, _) = run(&[0xF8, 0x18, 0xA9, 0x99, 0x69, 0x01, 0x00]);
        assert_eq!(mpu.a, 0x00);
        assert!(mpu.p.contains(Status::CARRY));
    }

    #[test]
    fn decimal_subtract() {
        // SED; SEC; LDA #$47; SBC #$28
        let (mpu, _) = run(&[0xF8, 0x38, 0xA9, 0x47, 0xE9, 0x28, 0x00]);
        assert_eq!(mpu.a, 0x19);
        assert!(mpu.p.contains(Status::CARRY));

        // SED; SEC; LDA #$00; SBC #$01
        let (mpu, _) = run(&[0xF8, 0x38, 0xA9, 0x00, 0xE9, 0x01, 0x00]);
        assert_eq!(mpu.a, 0x99);
        assert!(!mpu.p.contains(Status::CARRY));
    }

    #[test]
    fn shifts_and_rotates() {
        // LDA #$81; ASL A
        let (mpu, _) = run(&[0xA9, 0x81, 0x0A, 0x00]);
        assert_eq!(mpu.a, 0x02);
        assert!(mpu.p.contains(Status::CARRY));

        // SEC; LDA #$01; ROR A
        let (mpu, _) = run(&[0x38, 0xA9, 0x01, 0x6A, 0x00]);
        assert_eq!(mpu.a, 0x80);
        assert!(mpu.p.contains(Status::CARRY));
        assert!(mpu.p.contains(Status::NEGATIVE));

        // LDA #$40; STA $10; SEC; ROL $10; LSR $10
        let (mpu, mut ram) = run(&[0xA9, 0x40, 0x85, 0x10, 0x38, 0x26, 0x10, 0x46, 0x10, 0x00]);
        assert_eq!(ram.read(0x0010), 0x40);
        assert!(mpu.p.contains(Status::CARRY));
    }

    #[test]
    fn inc_dec_memory_wrap() {
        // LDA #$FF; STA $10; INC $10; DEC $11
        let (mpu, mut ram) = run(&[0xA9, 0xFF, 0x85, 0x10, 0xE6, 0x10, 0xC6, 0x11, 0x00]);
        assert_eq!(ram.read(0x0010), 0x00);
        assert_eq!(ram.read(0x0011), 0xFF);
        assert!(mpu.p.contains(Status::NEGATIVE));
        assert!(!mpu.p.contains(Status::ZERO));
    }

    #[test]
    fn compare_sets_carry_and_zero() {
        // LDA #$10; CMP #$10
        let (mpu, _) = run(&[0xA9, 0x10, 0xC9, 0x10, 0x00]);
        assert!(mpu.p.contains(Status::CARRY));
        assert!(mpu.p.contains(Status::ZERO));

        // LDY #$01; CPY #$02
        let (mpu, _) = run(&[0xA0, 0x01, 0xC0, 0x02, 0x00]);
        assert!(!mpu.p.contains(Status::CARRY));
        assert!(mpu.p.contains(Status::NEGATIVE));
    }

    #[test]
    fn bit_copies_high_bits() {
        // LDA #$C0; STA $20; LDA #$01; BIT $20
        let (mpu, _) = run(&[0xA9, 0xC0, 0x85, 0x20, 0xA9, 0x01, 0x24, 0x20, 0x00]);
        assert!(mpu.p.contains(Status::ZERO));
        assert!(mpu.p.contains(Status::NEGATIVE));
        assert!(mpu.p.contains(Status::OVERFLOW));
    }

    #[test]
    fn jsr_rts_round_trip() {
        // JSR $0610; LDX #$01; BRK ... $0610: LDA #$AA; RTS
        let mut program = [0xEA; 0x14];
        program[..6].copy_from_slice(&[0x20, 0x10, 0x06, 0xA2, 0x01, 0x00]);
        program[0x10..0x13].copy_from_slice(&[0xA9, 0xAA, 0x60]);
        let (mpu, mut ram) = run(&program);

        assert_eq!(mpu.a, 0xAA);
        assert_eq!(mpu.x, 0x01);
        assert_eq!(mpu.sp, 0xFF);
        // return address pushed was $0602
        assert_eq!(ram.read(0x01FF), 0x06);
        assert_eq!(ram.read(0x01FE), 0x02);
    }

    #[test]
    fn stack_push_pull() {
        // LDA #$33; PHA; LDA #$00; PLA; PHP; PLP
        let (mpu, mut ram) = run(&[0xA9, 0x33, 0x48, 0xA9, 0x00, 0x68, 0x08, 0x28, 0x00]);
        assert_eq!(mpu.a, 0x33);
        assert_eq!(mpu.sp, 0xFF);
        // PHP overwrote the pushed accumulator
        assert_eq!(ram.read(0x01FF), (Status::UNUSED | Status::BREAK | Status::INTERRUPT).bits());
    }

    #[test]
    fn transfers() {
        // LDA #$80; TAX; TAY; LDX #$05; TXS; TSX; TYA
        let (mpu, _) = run(&[0xA9, 0x80, 0xAA, 0xA8, 0xA2, 0x05, 0x9A, 0xBA, 0x98, 0x00]);
        assert_eq!(mpu.sp, 0x05);
        assert_eq!(mpu.x, 0x05);
        assert_eq!(mpu.y, 0x80);
        assert_eq!(mpu.a, 0x80);
        assert!(mpu.p.contains(Status::NEGATIVE));
    }

    #[test]
    fn branch_cycles() {
        let mut ram = FlatRam::new();
        // $06FD: BEQ +1 (taken, crosses into $0700)
        ram.load(0x06FD, &[0xF0, 0x01]).unwrap();
        ram.set_vector(RESET_VECTOR, 0x06FD);
        let mut mpu = Mpu::new(MpuConfig::default());
        mpu.reset(&mut ram);
        mpu.p.insert(Status::ZERO);
        assert_eq!(mpu.step(&mut ram), Ok(4));
        assert_eq!(mpu.pc, 0x0700);

        // not taken
        mpu.reset(&mut ram);
        mpu.p.remove(Status::ZERO);
        assert_eq!(mpu.step(&mut ram), Ok(2));
        assert_eq!(mpu.pc, 0x06FF);
    }

    #[test]
    fn brk_as_interrupt() {
        let mut ram = FlatRam::new();
        ram.load(0x0600, &[0x00, 0xEA]).unwrap();
        ram.load(0x8000, &[0x40]).unwrap(); // RTI
        ram.set_vector(RESET_VECTOR, 0x0600);
        ram.set_vector(IRQ_VECTOR, 0x8000);
        let config = MpuConfig { halt_on_brk: false, ..Default::default() };
        let mut mpu = Mpu::new(config);
        mpu.reset(&mut ram);

        assert_eq!(mpu.step(&mut ram), Ok(7));
        assert_eq!(mpu.state(), State::Running);
        assert_eq!(mpu.pc, 0x8000);
        assert_ne!(ram.read(0x01FD) & Status::BREAK.bits(), 0);

        mpu.step(&mut ram).unwrap();
        assert_eq!(mpu.pc, 0x0602);
        assert_eq!(mpu.sp, 0xFF);
    }
}
