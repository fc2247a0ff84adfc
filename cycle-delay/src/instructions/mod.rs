//! Native decrement-and-branch loops, one per instruction set.
//!
//! Each loop is a single `asm!` block. Inline assembly is opaque to the
//! optimizer and is never marked `pure`, so it is emitted exactly once per call
//! and its iterations cannot be merged or removed.

use core::num::NonZeroU32;

#[cfg(target_arch = "aarch64")]
pub mod aarch64;
#[cfg(target_arch = "arm")]
pub mod arm;
#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
pub mod riscv;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod x86;

/// Whether a native loop exists for the target architecture.
pub const AVAILABLE: bool = cfg!(any(
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "arm",
    target_arch = "aarch64",
    target_arch = "riscv32",
    target_arch = "riscv64"
));

/// Spin for exactly `iterations` passes of the native loop.
#[inline]
pub fn spin(iterations: NonZeroU32) {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    x86::spin(iterations);

    #[cfg(target_arch = "aarch64")]
    aarch64::spin(iterations);

    #[cfg(target_arch = "arm")]
    arm::spin(iterations);

    #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
    riscv::spin(iterations);

    // no native loop here, `Backend::Native` is never selected on this target
    #[cfg(not(any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "arm",
        target_arch = "aarch64",
        target_arch = "riscv32",
        target_arch = "riscv64"
    )))]
    crate::barrier::spin(iterations);
}
