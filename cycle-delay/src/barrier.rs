//! Optimization barrier and the portable loop built on it.
//!
//! [`opaque`] hands a value to the compiler as if something unknown had read
//! and rewritten it. Routing the loop counter through it on every iteration
//! keeps each decrement alive even where no native loop exists.

use core::num::NonZeroU32;

/// Return `value` unchanged, hidden from the optimizer.
///
/// On targets with stable inline assembly this is an empty `asm!` block that
/// receives the address of `value` and is allowed to touch memory, so the
/// compiler has to store the value before it and reload it after. Other
/// targets use [`core::hint::black_box`].
#[inline(always)]
pub fn opaque<T>(mut value: T) -> T {
    #[cfg(any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "arm",
        target_arch = "aarch64",
        target_arch = "riscv32",
        target_arch = "riscv64"
    ))]
    // Safety: the block contains no instructions.
    unsafe {
        core::arch::asm!(
            "/* {0} */",
            in(reg) &mut value as *mut T,
            options(nostack, preserves_flags),
        );
    }

    #[cfg(not(any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "arm",
        target_arch = "aarch64",
        target_arch = "riscv32",
        target_arch = "riscv64"
    )))]
    {
        value = core::hint::black_box(value);
    }

    value
}

/// Spin for exactly `iterations` passes of a decrement loop written in Rust.
#[inline]
pub fn spin(iterations: NonZeroU32) {
    let mut counter = opaque(iterations.get());
    loop {
        counter = opaque(counter - 1);
        if counter == 0 {
            break;
        }
    }
}
