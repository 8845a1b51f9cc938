//! # Mapache64 HAL
//!
//! Thin access layer between game code and the Mapache64 console.
//!
//! A game is a [`Game`](runtime::Game): three lifecycle hooks that the console
//! firmware calls on its own schedule. Hooks never touch hardware addresses
//! directly, they go through a [`Platform`](platform::Platform), so the same
//! game runs on the console and on a host.
//!
//! - [`mem`]: the fixed memory map (zero page, stack, output buffer)
//! - [`platform`]: the `Platform` and `FrameClock` capabilities
//! - `hardware`: the console backend (`target_arch = "mos"` only)
//! - `sim`: the host backend (`sim` feature)
//! - [`runtime`]: a host-side driver that calls the hooks like the console does

#![no_std]

pub mod mem;
pub mod platform;
pub mod runtime;

#[cfg(target_arch = "mos")]
pub mod hardware;

#[cfg(feature = "sim")]
pub mod sim;

pub use platform::{FrameClock, Platform};
pub use runtime::{Exit, Game, RunReport, Runtime};
