use core::fmt;

use crate::Bus;

/// Flat 64 KiB of RAM with no devices mapped.
#[derive(Clone)]
pub struct FlatRam {
    bytes: [u8; 0x10000],
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub origin: u16,
    pub len: usize,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes at ${:04X} run past $FFFF", self.len, self.origin)
    }
}

impl core::error::Error for LoadError {}

impl FlatRam {
    pub fn new() -> Self {
        Self { bytes: [0; 0x10000] }
    }

    /// Copy `program` to `origin`. Fails rather than wrapping past `$FFFF`.
    pub fn load(&mut self, origin: u16, program: &[u8]) -> Result<(), LoadError> {
        let start = origin as usize;
        let end = start + program.len();
        if end > self.bytes.len() {
            return Err(LoadError { origin, len: program.len() });
        }
        self.bytes[start..end].copy_from_slice(program);
        Ok(())
    }

    /// Point one of the vectors (`RESET_VECTOR` etc.) at `target`.
    pub fn set_vector(&mut self, vector: u16, target: u16) {
        self.bytes[vector as usize] = target as u8;
        self.bytes[vector.wrapping_add(1) as usize] = (target >> 8) as u8;
    }

    /// Little-endian word, for inspection.
    pub fn read_word(&self, address: u16) -> u16 {
        let lo = self.bytes[address as usize] as u16;
        let hi = self.bytes[address.wrapping_add(1) as usize] as u16;
        hi << 8 | lo
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for FlatRam {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FlatRam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlatRam").field("len", &self.bytes.len()).finish()
    }
}

impl Bus for FlatRam {
    #[inline(always)]
    fn read(&mut self, address: u16) -> u8 {
        self.bytes[address as usize]
    }

    #[inline(always)]
    fn write(&mut self, address: u16, data: u8) {
        self.bytes[address as usize] = data;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RESET_VECTOR;

    #[test]
    fn load_bounds() {
        let mut ram = FlatRam::new();
        assert!(ram.load(0xFFFE, &[1, 2]).is_ok());
        assert_eq!(ram.load(0xFFFF, &[1, 2]), Err(LoadError { origin: 0xFFFF, len: 2 }));
        assert_eq!(ram.read(0xFFFF), 2);
    }

    #[test]
    fn vectors_are_little_endian() {
        let mut ram = FlatRam::new();
        ram.set_vector(RESET_VECTOR, 0xC0DE);
        assert_eq!(ram.read(0xFFFC), 0xDE);
        assert_eq!(ram.read(0xFFFD), 0xC0);
        assert_eq!(ram.read_word(RESET_VECTOR), 0xC0DE);
    }
}
