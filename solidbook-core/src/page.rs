//! Page identifiers.
//!
//! Every page of the site is backed by exactly one markdown document. The
//! key doubles as the document's file stem (`srp.md`) in a content override
//! directory.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one page of the site and its markdown document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum PageKey {
    /// Landing page.
    Home,
    /// Overview of the five principles.
    Solid,
    /// Single Responsibility Principle.
    Srp,
    /// Open/Closed Principle.
    Ocp,
    /// Liskov Substitution Principle.
    Lsp,
    /// Interface Segregation Principle.
    Isp,
    /// Dependency Inversion Principle.
    Dip,
}

impl PageKey {
    /// All pages, in navigation order.
    pub const ALL: [Self; 7] = [
        Self::Home,
        Self::Solid,
        Self::Srp,
        Self::Ocp,
        Self::Lsp,
        Self::Isp,
        Self::Dip,
    ];

    /// The five principle pages.
    pub const PRINCIPLES: [Self; 5] = [Self::Srp, Self::Ocp, Self::Lsp, Self::Isp, Self::Dip];

    /// Lowercase key, also the document file stem.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Solid => "solid",
            Self::Srp => "srp",
            Self::Ocp => "ocp",
            Self::Lsp => "lsp",
            Self::Isp => "isp",
            Self::Dip => "dip",
        }
    }

    /// Closest key to a misspelled `input`, if any is reasonably close.
    #[must_use]
    pub fn suggest(input: &str) -> Option<Self> {
        let lower = input.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .map(|key| (key, strsim::jaro_winkler(&lower, key.as_str())))
            .filter(|(_, score)| *score >= 0.8)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(key, _)| key)
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page key '{0}'")]
pub struct UnknownPageKey(pub String);

impl FromStr for PageKey {
    type Err = UnknownPageKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == lower)
            .ok_or_else(|| UnknownPageKey(s.to_string()))
    }
}
