//! Symbols the console firmware jumps to.

use mapache64::{Game, hardware::Hardware};

use crate::Template;

#[unsafe(no_mangle)]
extern "C" fn reset() {
    let mut console = unsafe { Hardware::new() };
    Template.reset(&mut console);
}

#[unsafe(no_mangle)]
extern "C" fn do_logic() {
    let mut console = unsafe { Hardware::new() };
    Template.do_logic(&mut console);
}

#[unsafe(no_mangle)]
extern "C" fn fill_vram() {
    let mut console = unsafe { Hardware::new() };
    Template.fill_vram(&mut console);
}
