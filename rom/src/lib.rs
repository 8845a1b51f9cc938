//! Game template. Fill in the hooks in [`template`].
#![no_std]

pub mod fibo;
pub mod template;

#[cfg(target_arch = "mos")]
mod entry;

pub use template::Template;
