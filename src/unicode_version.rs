use crate::error::{Error, Result};
use std::{fmt, str::FromStr};

/// A Unicode version number such as `15.1.0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnicodeVersion {
    /// Major version.
    pub major: u8,
    /// Minor version.
    pub minor: u8,
    /// Update version.
    pub patch: u8,
}

impl UnicodeVersion {
    /// Creates a version from its components.
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        UnicodeVersion {
            major,
            minor,
            patch,
        }
    }

    /// The Unicode version of the normalization data compiled into this binary.
    pub fn normalization_data() -> Self {
        let (major, minor, patch) = unicode_normalization::UNICODE_VERSION;
        UnicodeVersion::new(major, minor, patch)
    }

    /// Returns `true` if classification for this version must rely on older
    /// normalization data than the version itself describes.
    pub fn exceeds_normalization_data(self) -> bool {
        self > Self::normalization_data()
    }
}

impl FromStr for UnicodeVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidVersion(s.to_owned());
        let mut parts = s.trim().split('.');
        let mut component = || -> Result<u8> {
            parts
                .next()
                .and_then(|part| part.parse::<u8>().ok())
                .ok_or_else(invalid)
        };
        let version = UnicodeVersion::new(component()?, component()?, component()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

impl fmt::Display for UnicodeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
