use core::{arch::asm, num::NonZeroU32};

/// `addi`/`bnez` on a full-width register. RISC-V has no flags, the branch
/// tests the counter itself.
#[inline]
pub fn spin(iterations: NonZeroU32) {
    // zero-extended so the upper half is defined on riscv64
    let counter = iterations.get() as usize;

    // Safety: only the counter register is touched.
    unsafe {
        asm!(
            "2:",
            "addi {counter}, {counter}, -1",
            "bnez {counter}, 2b",
            counter = inout(reg) counter => _,
            options(nomem, nostack, preserves_flags),
        );
    }
}
