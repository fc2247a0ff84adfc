use core::{arch::asm, num::NonZeroU32};

/// `subs`/`b.ne` on a 32-bit `w` register.
#[inline]
pub fn spin(iterations: NonZeroU32) {
    // Safety: only the counter register and NZCV are touched.
    unsafe {
        asm!(
            "2:",
            "subs {counter:w}, {counter:w}, #1",
            "b.ne 2b",
            counter = inout(reg) iterations.get() => _,
            options(nomem, nostack),
        );
    }
}
