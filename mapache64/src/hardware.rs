use core::panic::PanicInfo;

use volatile_register::RW;

use crate::platform::Platform;

unsafe extern "C" {
    /// Halt primitive from the console's support library. Freezes the CPU with `BRK`.
    pub unsafe fn stop();
}

#[panic_handler]
fn panic(_panic: &PanicInfo<'_>) -> ! {
    loop {}
}

/// The console itself.
///
/// Carries nothing but the halt latch, so each hook builds its own.
pub struct Hardware {
    halted: bool,
}

impl Hardware {
    /// # Safety
    /// The caller owns the memory it will write through this handle.
    pub const unsafe fn new() -> Self {
        Self { halted: false }
    }

    #[inline(always)]
    unsafe fn word_at(addr: u16) -> &'static RW<i16> {
        unsafe { &*(addr as *const RW<i16>) }
    }
}

impl Platform for Hardware {
    #[inline(always)]
    fn write_word(&mut self, addr: u16, value: i16) {
        // the 6502 has no alignment requirement, and both bytes land little-endian
        unsafe { Self::word_at(addr).write(value) };
    }

    #[inline(always)]
    fn halt(&mut self) {
        unsafe { stop() };
        self.halted = true;
    }

    fn is_halted(&self) -> bool {
        self.halted
    }
}
