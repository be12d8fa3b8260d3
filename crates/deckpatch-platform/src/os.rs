//! Operating system detection.

use once_cell::sync::Lazy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OS {
    Windows,
    Macos,
    Linux,
    Unknown,
}

static CURRENT: Lazy<OS> = Lazy::new(|| match std::env::consts::OS {
    "windows" => OS::Windows,
    "macos" => OS::Macos,
    "linux" => OS::Linux,
    _ => OS::Unknown,
});

impl OS {
    pub fn current() -> Self {
        *CURRENT
    }
}
