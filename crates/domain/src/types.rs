// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Identifies a line item within a single draft.
///
/// Ids are handed out by the draft store and are never reused, even after
/// the item is removed or the draft is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(u64);

impl LineItemId {
    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for LineItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a submitted offer.
///
/// Assigned locally by the tracker in the offline flow, or by the backend
/// once an offer has been posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferId(i64);

impl OfferId {
    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for OfferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The backend's outlet branch identifier (`outlet_branch_id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutletId(i64);

impl OutletId {
    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

/// The retail outlet an offer targets, as shown on its map pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outlet {
    /// Backend branch id, when known.
    pub id: Option<OutletId>,
    /// Display name (e.g. "بنده").
    pub name: String,
    /// Street-level location text.
    pub location: String,
    /// Neighborhood / district name.
    pub neighborhood: String,
}

impl Outlet {
    /// Creates an outlet description without a backend id.
    #[must_use]
    pub fn new(name: &str, location: &str, neighborhood: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            location: location.to_string(),
            neighborhood: neighborhood.to_string(),
        }
    }

    /// Attaches the backend branch id.
    #[must_use]
    pub const fn with_id(mut self, id: OutletId) -> Self {
        self.id = Some(id);
        self
    }

    /// Case-insensitive substring match against name or location.
    ///
    /// An empty needle matches every outlet.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle: String = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.location.to_lowercase().contains(&needle)
    }
}
