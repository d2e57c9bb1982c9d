//! Target labels in the two forms generated rules use

use serde::{Serialize, Serializer};
use std::fmt;

/// A target identifier.
///
/// `Local` renders as `:name` and refers to the package being generated
/// (or to the repository root package). `Root` renders as `//:name` and is
/// a root-package target seen from another package. `Absolute` renders as
/// `//package:name`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    Local { name: String },
    Root { name: String },
    Absolute { package: String, name: String },
}

impl Label {
    pub fn local(name: impl Into<String>) -> Self {
        Label::Local { name: name.into() }
    }

    /// Label for `name` declared in `package`; the root package gets the
    /// local form
    pub fn in_package(package: &str, name: impl Into<String>) -> Self {
        if package.is_empty() {
            Label::local(name)
        } else {
            Label::Absolute {
                package: package.to_string(),
                name: name.into(),
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Label::Local { name } | Label::Root { name } | Label::Absolute { name, .. } => name,
        }
    }

    /// Rewrite a repository-relative label (where `Local` means the root
    /// package) for use inside `package`
    pub fn relative_to(self, package: &str) -> Self {
        match self {
            Label::Absolute { package: own, name } if own == package => Label::Local { name },
            Label::Local { name } if !package.is_empty() => Label::Root { name },
            other => other,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Local { name } => write!(f, ":{name}"),
            Label::Root { name } => write!(f, "//:{name}"),
            Label::Absolute { package, name } => write!(f, "//{package}:{name}"),
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
