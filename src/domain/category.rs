//! Known transaction categories.
//!
//! Categories travel as free text; this taxonomy only maps the identifiers a
//! picker hands out to the display names the remote store persists.

use std::fmt;

/// A category from the built-in picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Food,
    Shopping,
    Transportation,
    Entertainment,
    Bills,
    Income,
    Other,
}

impl Category {
    /// Every category in picker order.
    pub const ALL: [Self; 7] = [
        Self::Food,
        Self::Shopping,
        Self::Transportation,
        Self::Entertainment,
        Self::Bills,
        Self::Income,
        Self::Other,
    ];

    /// Returns the picker identifier.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Shopping => "shopping",
            Self::Transportation => "transportation",
            Self::Entertainment => "entertainment",
            Self::Bills => "bills",
            Self::Income => "income",
            Self::Other => "other",
        }
    }

    /// Returns the display name, which is what gets persisted.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food & Drinks",
            Self::Shopping => "Shopping",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Bills => "Bills",
            Self::Income => "Income",
            Self::Other => "Other",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
