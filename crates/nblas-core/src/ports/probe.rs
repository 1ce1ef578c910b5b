//! Capability probe port.
//!
//! The probe is a minimal native routine invoked solely to report the host
//! CPU feature level. It is a hidden dependency of capability detection,
//! abstracted here so unit tests never have to load a real native artifact.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Reports the host CPU instruction-set tier as a numeric code.
#[cfg_attr(test, mockall::automock)]
pub trait CapabilityProbe: Send + Sync {
    /// Numeric flavor code (1 = SSE, 2 = SSE2, 3 = SSE3), or `None` when
    /// the probe itself failed. Both unknown codes and probe failure are
    /// treated as "no flavor" by the detector.
    fn flavor_code(&self) -> Option<i32>;
}

/// Probe returning a fixed code. Test double, also useful for embedders
/// that know their deployment hardware.
#[derive(Debug)]
pub struct FixedFlavorProbe {
    code: Option<i32>,
    calls: AtomicUsize,
}

impl FixedFlavorProbe {
    pub fn new(code: Option<i32>) -> Self {
        Self {
            code,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times the probe has been invoked. Lets tests assert the
    /// detector caches its result.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CapabilityProbe for FixedFlavorProbe {
    fn flavor_code(&self) -> Option<i32> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_probe_counts_invocations() {
        let probe = FixedFlavorProbe::new(Some(3));
        assert_eq!(probe.calls(), 0);
        assert_eq!(probe.flavor_code(), Some(3));
        assert_eq!(probe.flavor_code(), Some(3));
        assert_eq!(probe.calls(), 2);
    }

    #[test]
    fn mocked_probe_can_model_failure() {
        let mut probe = MockCapabilityProbe::new();
        probe.expect_flavor_code().return_const(None);
        assert_eq!(probe.flavor_code(), None);
    }
}
