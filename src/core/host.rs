use sysinfo::System;

const DEBIAN_FAMILY: &[&str] = &[
    "debian",
    "ubuntu",
    "linuxmint",
    "pop",
    "raspbian",
    "elementary",
    "zorin",
    "kali",
    "neon",
    "pureos",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub distribution_id: String,
    pub os_version: Option<String>,
}

impl HostInfo {
    pub fn detect() -> Self {
        Self {
            distribution_id: System::distribution_id(),
            os_version: System::long_os_version(),
        }
    }

    /// Whether `dpkg`/`apt` can be expected on this host.
    pub fn is_debian_family(&self) -> bool {
        DEBIAN_FAMILY.contains(&self.distribution_id.to_ascii_lowercase().as_str())
    }

    pub fn log_summary(&self, system_packages_enabled: bool) {
        tracing::debug!(
            "Host: {} ({})",
            self.distribution_id,
            self.os_version.as_deref().unwrap_or("unknown version")
        );

        if system_packages_enabled && !self.is_debian_family() {
            tracing::warn!(
                "Host distribution '{}' is not Debian-based; dpkg/apt steps will likely fail \
                 (use --skip-system-packages to skip them)",
                self.distribution_id
            );
        }
    }
}
