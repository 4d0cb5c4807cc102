use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// First host release shipping the plugin settings subsystem.
pub const SETTINGS_MIN_VERSION: HostVersion = HostVersion {
    major: 2,
    minor: 4,
    patch: 0,
    stage: Stage::Beta,
    stage_number: Some(1),
    pre: Some(Cow::Borrowed("b1")),
};

/// Release stage of a version, in ascending order.
///
/// Unrecognised tags rank below `dev`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Other,
    Dev,
    Alpha,
    Beta,
    ReleaseCandidate,
    Release,
    Patch,
}

impl Stage {
    fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "dev" => Stage::Dev,
            "a" | "alpha" => Stage::Alpha,
            "b" | "beta" => Stage::Beta,
            "rc" => Stage::ReleaseCandidate,
            "p" | "pl" => Stage::Patch,
            _ => Stage::Other,
        }
    }
}

/// Host platform version in `MAJOR.MINOR.PATCH[-TAG]` form, where `TAG` is a
/// stage name followed by an optional number (`b1`, `RC2`, `dev`, `pl1`).
///
/// Ordering follows the host's own version comparison: stages rank
/// `dev < a|alpha < b|beta < rc < release < p|pl` regardless of case, and the
/// stage number compares numerically, a missing number ranking lowest.
#[derive(Debug, Clone)]
pub struct HostVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    stage: Stage,
    stage_number: Option<u32>,
    pre: Option<Cow<'static, str>>,
}

impl HostVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            stage: Stage::Release,
            stage_number: None,
            pre: None,
        }
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidVersion(s.to_string());
        let trimmed = s.trim();

        let (core, tag) = match trimmed.split_once('-') {
            Some((core, tag)) => (core, Some(tag)),
            None => (trimmed, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }

        let parse_part = |part: &str| part.parse::<u32>().map_err(|_| invalid());

        let mut version = Self::new(
            parse_part(parts[0])?,
            parse_part(parts[1])?,
            parse_part(parts[2])?,
        );

        if let Some(tag) = tag {
            let split = tag
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(tag.len());
            let (name, number) = tag.split_at(split);
            if name.is_empty() {
                return Err(invalid());
            }

            version.stage = Stage::from_tag(name);
            version.stage_number = if number.is_empty() {
                None
            } else {
                Some(parse_part(number)?)
            };
            version.pre = Some(Cow::Owned(tag.to_string()));
        }

        Ok(version)
    }

    pub fn pre_release(&self) -> Option<&str> {
        self.pre.as_deref()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn supports_settings(&self) -> bool {
        *self >= SETTINGS_MIN_VERSION
    }
}

impl Ord for HostVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch, self.stage, self.stage_number).cmp(&(
            other.major,
            other.minor,
            other.patch,
            other.stage,
            other.stage_number,
        ))
    }
}

impl PartialEq for HostVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HostVersion {}

impl PartialOrd for HostVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for HostVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = self.pre_release() {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}
