use core::fmt;

bitflags::bitflags! {
    /// Processor status register (`P`).
    ///
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// N V - B D I Z C
    /// ```
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct Status: u8 {
        const NEGATIVE  = 0b1000_0000;
        const OVERFLOW  = 0b0100_0000;
        /// Always reads as set.
        const UNUSED    = 0b0010_0000;
        /// Only meaningful in the copy pushed by `BRK`/`PHP`.
        const BREAK     = 0b0001_0000;
        const DECIMAL   = 0b0000_1000;
        const INTERRUPT = 0b0000_0100;
        const ZERO      = 0b0000_0010;
        const CARRY     = 0b0000_0001;
    }
}

impl fmt::Display for Status {
    /// `NV-BDIZC`, upper case when set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Status, char); 8] = [
            (Status::NEGATIVE, 'n'),
            (Status::OVERFLOW, 'v'),
            (Status::UNUSED, '-'),
            (Status::BREAK, 'b'),
            (Status::DECIMAL, 'd'),
            (Status::INTERRUPT, 'i'),
            (Status::ZERO, 'z'),
            (Status::CARRY, 'c'),
        ];
        for (flag, name) in NAMES {
            let c = if self.contains(flag) { name.to_ascii_uppercase() } else { name };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
