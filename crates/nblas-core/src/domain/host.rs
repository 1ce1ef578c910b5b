//! Host platform identification.
//!
//! The resource bundle layout keys artifacts by OS family and architecture,
//! so both are normalized exactly once and carried around as an immutable
//! [`HostProfile`].

/// Normalized operating-system family.
///
/// Every Windows variant collapses to [`OsFamily::Windows`]; the bundle
/// ships a single set of Windows artifacts regardless of version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Linux,
    MacOs,
    /// Anything else, carried verbatim as the directory segment.
    Other(String),
}

impl OsFamily {
    /// Normalize a raw OS identifier (e.g. `std::env::consts::OS`).
    pub fn from_os_name(os: &str) -> Self {
        let lowered = os.to_ascii_lowercase();
        if lowered.contains("windows") {
            Self::Windows
        } else if lowered == "linux" {
            Self::Linux
        } else if lowered == "macos" || lowered.contains("mac os") || lowered == "darwin" {
            Self::MacOs
        } else {
            Self::Other(os.to_string())
        }
    }

    /// Directory segment used in resource-bundle paths.
    pub fn dir_name(&self) -> &str {
        match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
            Self::MacOs => "Mac OS X",
            Self::Other(name) => name,
        }
    }

    /// Whether the dynamic loader on this family keeps loaded files locked
    /// for the lifetime of the loading process.
    ///
    /// Drives the cleanup-strategy choice: locked files cannot be deleted
    /// by the process that loaded them.
    pub fn locks_loaded_libraries(&self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// OS family plus raw architecture name, derived once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostProfile {
    /// Normalized OS family.
    pub os_family: OsFamily,
    /// Raw architecture identifier (e.g. `x86_64`, `aarch64`), kept
    /// unnormalized because the bundle layout uses it verbatim.
    pub arch_name: String,
}

impl HostProfile {
    /// Profile of the machine this process is running on.
    pub fn detect() -> Self {
        Self::from_raw(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Build a profile from raw identifiers (injectable for tests).
    pub fn from_raw(os: &str, arch: &str) -> Self {
        Self {
            os_family: OsFamily::from_os_name(os),
            arch_name: arch.to_string(),
        }
    }

    /// Whether the architecture belongs to the x86/x86_64 family.
    pub fn is_x86_family(&self) -> bool {
        matches!(
            self.arch_name.as_str(),
            "x86" | "x86_64" | "amd64" | "i386" | "i486" | "i586" | "i686"
        )
    }

    /// Whether the architecture is 64-bit x86 specifically.
    pub fn is_x86_64(&self) -> bool {
        matches!(self.arch_name.as_str(), "x86_64" | "amd64")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_variants_collapse_to_one_family() {
        assert_eq!(OsFamily::from_os_name("windows"), OsFamily::Windows);
        assert_eq!(OsFamily::from_os_name("Windows 11"), OsFamily::Windows);
        assert_eq!(OsFamily::from_os_name("Windows Server 2022"), OsFamily::Windows);
        assert_eq!(OsFamily::Windows.dir_name(), "Windows");
    }

    #[test]
    fn unknown_os_kept_verbatim() {
        let family = OsFamily::from_os_name("freebsd");
        assert_eq!(family, OsFamily::Other("freebsd".to_string()));
        assert_eq!(family.dir_name(), "freebsd");
    }

    #[test]
    fn only_windows_locks_loaded_libraries() {
        assert!(OsFamily::Windows.locks_loaded_libraries());
        assert!(!OsFamily::Linux.locks_loaded_libraries());
        assert!(!OsFamily::MacOs.locks_loaded_libraries());
    }

    #[test]
    fn x86_family_recognition() {
        assert!(HostProfile::from_raw("linux", "x86_64").is_x86_family());
        assert!(HostProfile::from_raw("linux", "i686").is_x86_family());
        assert!(HostProfile::from_raw("windows", "amd64").is_x86_64());
        assert!(!HostProfile::from_raw("linux", "aarch64").is_x86_family());
        assert!(!HostProfile::from_raw("linux", "x86").is_x86_64());
    }
}
