#![warn(missing_docs)]

//! A thin layer for driving GPIO lines on a Linux single-board computer
//! through the libgpiod command line tools (`gpiofind`, `gpioget`,
//! `gpioset`) instead of the character device or sysfs.
//!
//! Every operation on a [`Shim`] spawns a single process, waits for it, and
//! turns its exit status and output into a [`GpioResult`]. Process spawning
//! goes through the [`Executor`] trait so it can be swapped out in tests.

/// Chip and tool names, timing, and loading them from JSON.
pub mod config;

/// Error type shared by every operation.
pub mod error;

/// Running external tools.
pub mod exec;

/// Pins and the values they carry.
pub mod pin;

/// The operations themselves.
pub mod shim;

/// Fake executor emulating the tools in memory.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use config::{LookupStyle, ShimConfig};
pub use error::{GpioError, GpioResult};
pub use exec::{Execution, Executor, SystemExecutor};
pub use pin::{Direction, Edge, Pin, PinValue};
pub use shim::Shim;
