use core::{arch::asm, num::NonZeroU32};

/// `dec`/`jnz` on a 32-bit general purpose register.
#[inline]
pub fn spin(iterations: NonZeroU32) {
    // Safety: only the counter register and the flags are touched.
    unsafe {
        asm!(
            "2:",
            "dec {counter:e}",
            "jnz 2b",
            counter = inout(reg) iterations.get() => _,
            options(nomem, nostack),
        );
    }
}
