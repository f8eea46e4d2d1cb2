//! Validated wire values.
//!
//! Each type here has exactly one decode path and one encode path. Decoding
//! (from a string, or from JSON through serde) rejects anything outside the
//! legal set with a named [`ModelError`]; encoding always yields the canonical
//! wire string. Because serde is routed through the same `FromStr`/`as_str`
//! pair, request bodies and response bodies share one codec.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ModelError;

// ---------------------------------------------------------------------------
// Macro for closed string vocabularies.
// Generates: enum, ALL, as_str(), FromStr, TryFrom<String>, Into<String>, Display.
// ---------------------------------------------------------------------------
macro_rules! wire_enum {
    (
        $(#[$attr:meta])*
        $name:ident($kind:literal) {
            $(
                $(#[$vattr:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $(
                $(#[$vattr])*
                $variant,
            )+
        }

        impl $name {
            /// Every member of the vocabulary, in wire order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the canonical wire string.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(ModelError::InvalidEnumValue {
                        kind: $kind,
                        value: other.to_string(),
                        allowed: Self::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = ModelError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

wire_enum! {
    /// Comparison applied by a placement [`Constraint`](crate::Constraint).
    Operator("operator") {
        /// Attribute must equal the value.
        Eq => "EQ",
        /// Attribute must match the value as a regular expression.
        Like => "LIKE",
        /// Attribute must not match the value as a regular expression.
        Unlike => "UNLIKE",
    }
}

wire_enum! {
    /// Access mode of a [`Volume`](crate::Volume) mount.
    MountMode("mount mode") {
        /// Read-only.
        Ro => "RO",
        /// Read/write.
        Rw => "RW",
    }
}

wire_enum! {
    /// What the service does when a run fails.
    RestartPolicy("restart policy") {
        /// Never relaunch a failed run.
        Never => "NEVER",
        /// Relaunch a failed run until the active deadline expires.
        OnFailure => "ON_FAILURE",
    }
}

wire_enum! {
    /// How overlapping scheduled triggers for the same job are resolved.
    ConcurrencyPolicy("concurrency policy") {
        /// Start a new run even if one is still active.
        Allow => "ALLOW",
        /// Skip the trigger while a run is active.
        Forbid => "FORBID",
        /// Stop the active run and start a new one.
        Replace => "REPLACE",
    }
}

wire_enum! {
    /// Nested data the service can embed in a job response (`embed` query value).
    Embed("embed") {
        /// Aggregate success/failure counts.
        HistorySummary => "historySummary",
        /// Full finished-run history.
        History => "history",
        /// Runs currently in flight.
        ActiveRuns => "activeRuns",
        /// Schedules attached to the job.
        Schedules => "schedules",
    }
}

// ---------------------------------------------------------------------------
// Container path
// ---------------------------------------------------------------------------

static CONTAINER_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/[^/].*$").expect("container path pattern is valid")
});

/// An absolute, non-root path inside a container.
///
/// The only way to obtain a value is [`ContainerPath::new`] (or deserialising,
/// which calls it), so an instance always matches `^/[^/].*$`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContainerPath(String);

impl ContainerPath {
    /// Validates `path` and wraps it.
    pub fn new(path: impl Into<String>) -> Result<Self, ModelError> {
        let path = path.into();
        if CONTAINER_PATH.is_match(&path) {
            Ok(Self(path))
        } else {
            Err(ModelError::InvalidPath { path })
        }
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContainerPath {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContainerPath> for String {
    fn from(value: ContainerPath) -> Self {
        value.0
    }
}

impl FromStr for ContainerPath {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for ContainerPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
