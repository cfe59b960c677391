//! Logical substitution slots.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A logical substitution slot with a stable identity across a run.
///
/// The set is closed: templates can only refer to these four slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placeholder {
    ModuleName,
    BinName,
    VendorName,
    Description,
}

impl Placeholder {
    /// Every placeholder, in the order the substitution engine processes them.
    ///
    /// Earlier placeholders are substituted first, so a value bound to
    /// `ModuleName` may be rewritten again by a later pass if it happens to
    /// contain a later placeholder's alias.
    pub const ALL: [Placeholder; 4] = [
        Placeholder::ModuleName,
        Placeholder::BinName,
        Placeholder::VendorName,
        Placeholder::Description,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModuleName => "module-name",
            Self::BinName => "bin-name",
            Self::VendorName => "vendor-name",
            Self::Description => "description",
        }
    }

    /// Index into per-placeholder tables laid out in [`Placeholder::ALL`] order.
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::ModuleName => 0,
            Self::BinName => 1,
            Self::VendorName => 2,
            Self::Description => 3,
        }
    }

    /// Literal forms recognised by existing templates.
    ///
    /// These must match the template repositories byte for byte.
    pub const fn standard_aliases(self) -> &'static [&'static str] {
        match self {
            Self::ModuleName => &["MODULE_NAME", "{{module_name}}"],
            Self::BinName => &["BIN_NAME", "{{bin_name}}"],
            Self::VendorName => &["IMG_VENDOR_NAME", "{{vendor_name}}"],
            Self::Description => &["IMG_DESCRIPTION", "{{description}}"],
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
