use core::{arch::asm, num::NonZeroU32};

#[inline]
pub fn spin(iterations: NonZeroU32) {
    // Safety: only the counter register and the APSR flags are touched.
    unsafe {
        asm!(
            "2:",
            "subs {counter}, {counter}, #1",
            "bne 2b",
            counter = inout(reg) iterations.get() => _,
            options(nomem, nostack),
        );
    }
}
