use core::{fmt, num::NonZeroU32, str::FromStr};

use bitflags::bitflags;
use log::{debug, warn};

use crate::{barrier, error::DelayError, instructions, iterations};

bitflags! {
    /// Loop variants compiled in for the current target.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Capabilities : u8 {
        /// Architecture-specific `asm!` loop, see [`instructions`].
        const NATIVE_LOOP = 1 << 0;
        /// Portable loop around [`barrier::opaque`], present everywhere.
        const BARRIER_LOOP = 1 << 1;
    }
}

impl Capabilities {
    /// Capabilities of the target this crate was compiled for.
    pub const fn detect() -> Capabilities {
        if instructions::AVAILABLE {
            Capabilities::NATIVE_LOOP.union(Capabilities::BARRIER_LOOP)
        } else {
            Capabilities::BARRIER_LOOP
        }
    }
}

/// A decrement loop variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    Native,
    Barrier,
}

impl Backend {
    /// Variant used by [`crate::delay`] and [`CycleDelay::new`].
    ///
    /// The native loop if the target has one, unless the `force-barrier`
    /// feature is enabled.
    pub const PREFERRED: Backend =
        if instructions::AVAILABLE && !cfg!(feature = "force-barrier") {
            Backend::Native
        } else {
            Backend::Barrier
        };

    pub const fn capability(self) -> Capabilities {
        match self {
            Backend::Native => Capabilities::NATIVE_LOOP,
            Backend::Barrier => Capabilities::BARRIER_LOOP,
        }
    }

    /// Whether this variant is compiled in for the current target.
    pub const fn is_available(self) -> bool {
        Capabilities::detect().contains(self.capability())
    }

    pub const fn name(self) -> &'static str {
        match self {
            Backend::Native => "native",
            Backend::Barrier => "barrier",
        }
    }

    #[inline]
    pub(crate) fn spin(self, iterations: NonZeroU32) {
        match self {
            Backend::Native => instructions::spin(iterations),
            Backend::Barrier => barrier::spin(iterations),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = DelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Backend::Native, Backend::Barrier]
            .into_iter()
            .find(|backend| backend.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(DelayError::UnknownBackend)
    }
}

/// Anything that can busy-wait for a number of loop iterations.
pub trait Delay {
    fn delay(&self, cycles: u32);
}

/// Busy-wait delay bound to one loop variant.
///
/// Holds no counter state, copies can be handed to any number of threads.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CycleDelay {
    backend: Backend,
}

impl CycleDelay {
    /// Delay using [`Backend::PREFERRED`].
    pub fn new() -> CycleDelay {
        debug!("Delay backend: {} (preferred)", Backend::PREFERRED);
        CycleDelay {
            backend: Backend::PREFERRED,
        }
    }

    /// Delay using `backend`. Fails if the variant is not compiled in for the
    /// current target.
    pub fn with_backend(backend: Backend) -> Result<CycleDelay, DelayError> {
        if !backend.is_available() {
            warn!("Delay backend {} requested but not available", backend);
            return Err(DelayError::Unsupported(backend));
        }

        debug!("Delay backend: {}", backend);
        Ok(CycleDelay { backend })
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Spin for [`iterations(cycles)`](crate::iterations) iterations of the
    /// selected loop.
    #[inline]
    pub fn delay(&self, cycles: u32) {
        self.backend.spin(iterations(cycles));
    }
}

impl Default for CycleDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl Delay for CycleDelay {
    #[inline]
    fn delay(&self, cycles: u32) {
        CycleDelay::delay(self, cycles)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;

    #[test]
    fn parse_backend_names() {
        assert_eq!("native".parse(), Ok(Backend::Native));
        assert_eq!("Barrier".parse(), Ok(Backend::Barrier));
        assert_eq!(" NATIVE ".parse(), Ok(Backend::Native));
        assert_eq!("".parse::<Backend>(), Err(DelayError::UnknownBackend));
        assert_eq!("rdtsc".parse::<Backend>(), Err(DelayError::UnknownBackend));
    }

    #[test]
    fn display_matches_parse() {
        for backend in [Backend::Native, Backend::Barrier] {
            assert_eq!(backend.to_string().parse(), Ok(backend));
        }
    }

    #[test]
    fn unsupported_error_names_backend() {
        assert_eq!(
            DelayError::Unsupported(Backend::Native).to_string(),
            "Delay backend `native` is not available on this target"
        );
    }

    #[test]
    fn barrier_is_always_available() {
        assert!(Capabilities::detect().contains(Capabilities::BARRIER_LOOP));
        assert!(Backend::Barrier.is_available());
        assert_eq!(
            CycleDelay::with_backend(Backend::Barrier).map(|d| d.backend()),
            Ok(Backend::Barrier)
        );
    }

    #[test]
    fn native_follows_instruction_support() {
        assert_eq!(Backend::Native.is_available(), instructions::AVAILABLE);
        match CycleDelay::with_backend(Backend::Native) {
            Ok(delay) => assert_eq!(delay.backend(), Backend::Native),
            Err(err) => {
                assert!(!instructions::AVAILABLE);
                assert_eq!(err, DelayError::Unsupported(Backend::Native));
            }
        }
    }

    #[test]
    fn preferred_backend_is_available() {
        assert!(Backend::PREFERRED.is_available());
        assert_eq!(CycleDelay::new().backend(), Backend::PREFERRED);
        assert_eq!(CycleDelay::default(), CycleDelay::new());
    }

    #[test]
    fn preferred_honours_force_barrier() {
        if cfg!(feature = "force-barrier") {
            assert_eq!(Backend::PREFERRED, Backend::Barrier);
        } else if instructions::AVAILABLE {
            assert_eq!(Backend::PREFERRED, Backend::Native);
        }
    }

    #[test]
    fn cycle_delay_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CycleDelay>();
    }

    #[test]
    fn trait_object_delays() {
        let delay: &dyn Delay = &CycleDelay::new();
        delay.delay(0);
        delay.delay(16);
    }
}
