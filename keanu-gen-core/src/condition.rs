//! Condition axes for conditional compilation.
//!
//! Each axis is a closed enum whose values map to exactly one guard predicate
//! (`arch(arm64)`, `os(Linux)`, …). Named groupings are precomputed constant
//! slices over an axis and are looked up with [`ConditionAxis::group`].

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AxisKind
// ---------------------------------------------------------------------------

/// Identifies a condition axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Os,
    Arch,
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisKind::Os => write!(f, "os"),
            AxisKind::Arch => write!(f, "arch"),
        }
    }
}

// ---------------------------------------------------------------------------
// ConditionAxis
// ---------------------------------------------------------------------------

/// A named dimension of mutually exclusive compilation predicates.
pub trait ConditionAxis: Copy + Eq + 'static {
    /// Which axis this is.
    const KIND: AxisKind;

    /// Every value of the axis, in declaration order.
    fn all() -> &'static [Self];

    /// Named subsets of the axis.
    fn groups() -> &'static [(&'static str, &'static [Self])];

    /// The literal platform identifier, e.g. `arm64` or `macOS`.
    fn identifier(&self) -> &'static str;

    /// The guard fragment for this value, e.g. `arch(arm64)`.
    fn predicate(&self) -> String {
        format!("{}({})", Self::KIND, self.identifier())
    }

    /// Look up a named grouping.
    fn group(name: &str) -> Option<&'static [Self]> {
        Self::groups()
            .iter()
            .find(|(group_name, _)| *group_name == name)
            .map(|(_, values)| *values)
    }
}

// ---------------------------------------------------------------------------
// Architecture
// ---------------------------------------------------------------------------

/// CPU architecture families, identified by their platform names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Architecture {
    Arm32,
    Arm64,
    X86_32,
    X86_64,
}

impl Architecture {
    /// 32- and 64-bit ARM.
    pub const ARM: &'static [Architecture] = &[Architecture::Arm32, Architecture::Arm64];
    /// 32- and 64-bit x86.
    pub const X86: &'static [Architecture] = &[Architecture::X86_32, Architecture::X86_64];
}

impl ConditionAxis for Architecture {
    const KIND: AxisKind = AxisKind::Arch;

    fn all() -> &'static [Self] {
        &[
            Architecture::Arm32,
            Architecture::Arm64,
            Architecture::X86_32,
            Architecture::X86_64,
        ]
    }

    fn groups() -> &'static [(&'static str, &'static [Self])] {
        &[("ARM", Architecture::ARM), ("X86", Architecture::X86)]
    }

    fn identifier(&self) -> &'static str {
        match self {
            Architecture::Arm32 => "arm",
            Architecture::Arm64 => "arm64",
            Architecture::X86_32 => "i386",
            Architecture::X86_64 => "x86_64",
        }
    }
}

// ---------------------------------------------------------------------------
// OperatingSystem
// ---------------------------------------------------------------------------

/// Target operating systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatingSystem {
    Mac,
    Ios,
    Tv,
    Watch,
    Linux,
}

impl OperatingSystem {
    /// Every Apple platform.
    pub const APPLE: &'static [OperatingSystem] = &[
        OperatingSystem::Mac,
        OperatingSystem::Ios,
        OperatingSystem::Tv,
        OperatingSystem::Watch,
    ];
}

impl ConditionAxis for OperatingSystem {
    const KIND: AxisKind = AxisKind::Os;

    fn all() -> &'static [Self] {
        &[
            OperatingSystem::Mac,
            OperatingSystem::Ios,
            OperatingSystem::Tv,
            OperatingSystem::Watch,
            OperatingSystem::Linux,
        ]
    }

    fn groups() -> &'static [(&'static str, &'static [Self])] {
        &[("APPLE", OperatingSystem::APPLE)]
    }

    fn identifier(&self) -> &'static str {
        match self {
            OperatingSystem::Mac => "macOS",
            OperatingSystem::Ios => "iOS",
            OperatingSystem::Tv => "tvOS",
            OperatingSystem::Watch => "watchOS",
            OperatingSystem::Linux => "Linux",
        }
    }
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// A single value on any axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Os(OperatingSystem),
    Arch(Architecture),
}

impl Condition {
    /// The axis this value belongs to.
    pub fn axis(&self) -> AxisKind {
        match self {
            Condition::Os(_) => AxisKind::Os,
            Condition::Arch(_) => AxisKind::Arch,
        }
    }

    /// The guard fragment for this value.
    pub fn predicate(&self) -> String {
        match self {
            Condition::Os(os) => os.predicate(),
            Condition::Arch(arch) => arch.predicate(),
        }
    }
}

impl From<OperatingSystem> for Condition {
    fn from(os: OperatingSystem) -> Self {
        Condition::Os(os)
    }
}

impl From<Architecture> for Condition {
    fn from(arch: Architecture) -> Self {
        Condition::Arch(arch)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
