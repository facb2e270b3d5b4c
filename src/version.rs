use std::fmt;

/// Which components to bump, and whether lower components are zeroed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct BumpFlags {
    pub major: bool,
    pub minor: bool,
    pub build: bool,
    pub revision: bool,
    pub reset: bool,
}

impl BumpFlags {
    pub fn any(&self) -> bool {
        self.major || self.minor || self.build || self.revision
    }
}

/// A four part `major.minor.build.revision` version.
///
/// Every component is non-negative and fits in an `i32`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AssemblyVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

const COMPONENT_MAX: u32 = i32::MAX as u32;

impl AssemblyVersion {
    pub fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        AssemblyVersion { major, minor, build, revision }
    }

    /// Parses exactly four dot separated decimal components.
    ///
    /// Returns `None` for anything else; callers treat that as "not a version"
    /// and leave the text alone.
    pub fn parse(text: &str) -> Option<Self> {
        let mut components = [0u32; 4];
        let mut parts = text.trim().split('.');
        for slot in components.iter_mut() {
            *slot = parse_component(parts.next()?)?;
        }
        if parts.next().is_some() {
            return None;
        }
        let [major, minor, build, revision] = components;
        Some(AssemblyVersion::new(major, minor, build, revision))
    }

    /// Applies the bump flags in the order revision, build, minor, major.
    ///
    /// Flags are cumulative: `-major -build` bumps both. A reset only zeroes
    /// components below the flag that triggered it. Returns `None` if a
    /// component would leave the `i32` range.
    pub fn bump(&self, flags: &BumpFlags) -> Option<Self> {
        let mut next = *self;
        if flags.revision {
            next.revision = increment(next.revision)?;
        }
        if flags.build {
            next.build = increment(next.build)?;
            if flags.reset {
                next.revision = 0;
            }
        }
        if flags.minor {
            next.minor = increment(next.minor)?;
            if flags.reset {
                next.build = 0;
                next.revision = 0;
            }
        }
        if flags.major {
            next.major = increment(next.major)?;
            if flags.reset {
                next.minor = 0;
                next.build = 0;
                next.revision = 0;
            }
        }
        Some(next)
    }
}

fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<u32>().ok().filter(|value| *value <= COMPONENT_MAX)
}

fn increment(component: u32) -> Option<u32> {
    component.checked_add(1).filter(|value| *value <= COMPONENT_MAX)
}

impl fmt::Display for AssemblyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.build, self.revision)
    }
}
