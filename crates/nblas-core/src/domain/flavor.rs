//! CPU instruction-set flavors.

/// Instruction-set tier used to select among multiple builds of the same
/// native artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Sse,
    Sse2,
    Sse3,
}

impl Flavor {
    /// Map the numeric result of the native capability probe.
    ///
    /// Anything outside 1..=3 is treated as "no flavor" by callers.
    pub fn from_probe_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Sse),
            2 => Some(Self::Sse2),
            3 => Some(Self::Sse3),
            _ => None,
        }
    }

    /// Directory segment used in resource-bundle paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sse => "sse",
            Self::Sse2 => "sse2",
            Self::Sse3 => "sse3",
        }
    }
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_codes_map_to_tiers() {
        assert_eq!(Flavor::from_probe_code(1), Some(Flavor::Sse));
        assert_eq!(Flavor::from_probe_code(2), Some(Flavor::Sse2));
        assert_eq!(Flavor::from_probe_code(3), Some(Flavor::Sse3));
    }

    #[test]
    fn out_of_range_codes_are_unflavored() {
        assert_eq!(Flavor::from_probe_code(0), None);
        assert_eq!(Flavor::from_probe_code(4), None);
        assert_eq!(Flavor::from_probe_code(-1), None);
    }
}
