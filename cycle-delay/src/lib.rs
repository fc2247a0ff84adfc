//! Busy-wait delays measured in loop iterations.
//!
//! [`delay`] spins on a register counter that is decremented until it hits
//! zero. No sleep, timer or scheduler facility is involved, so the call never
//! yields the core and never fails.
//!
//! The argument is an *iteration count*, not a clock-cycle count. One
//! iteration is a decrement, a compare and a branch, and how many clock cycles
//! that takes depends on the pipeline. Callers that need a wall-clock delay
//! have to calibrate against a known clock themselves.
//!
//! Every loop variant is built so that the compiler cannot remove, merge or
//! hoist its iterations; see [`barrier`] and [`instructions`].

#![no_std]

use core::num::NonZeroU32;

pub mod backend;
pub mod barrier;
pub mod error;
pub mod instructions;

pub use backend::{Backend, Capabilities, CycleDelay, Delay};
pub use error::DelayError;

/// Number of loop iterations performed for a requested `cycles` value.
///
/// A request of zero still runs one decrement-and-test pass before falling
/// through.
#[inline]
pub const fn iterations(cycles: u32) -> NonZeroU32 {
    match NonZeroU32::new(cycles) {
        Some(n) => n,
        None => NonZeroU32::MIN,
    }
}

/// Spin for [`iterations(cycles)`](iterations) loop iterations on the calling
/// thread.
///
/// Uses the native loop of the target when one is compiled in, the portable
/// barrier loop otherwise.
#[inline]
pub fn delay(cycles: u32) {
    Backend::PREFERRED.spin(iterations(cycles));
}
