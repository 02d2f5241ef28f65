// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::line_item::{ProductLineItem, Totals};
use crate::offer_status::OfferStatus;
use crate::presentation::{OfferPresentation, PinState};
use crate::types::{OfferId, Outlet};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A finalized offer: an immutable product snapshot plus a mutable status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedOffer {
    pub id: OfferId,
    pub outlet: Outlet,
    /// Owned copy of the draft's items at submission time.
    pub items: Vec<ProductLineItem>,
    pub status: OfferStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub total_price: f64,
    pub total_quantity: u64,
    pub notes: Option<String>,
    pub valid_until: Option<String>,
}

impl SubmittedOffer {
    /// Creates a record from a snapshot of items and their totals.
    #[must_use]
    pub fn new(
        id: OfferId,
        outlet: Outlet,
        items: Vec<ProductLineItem>,
        totals: Totals,
        status: OfferStatus,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            outlet,
            items,
            status,
            created_at,
            total_price: totals.total_price,
            total_quantity: totals.total_quantity,
            notes: None,
            valid_until: None,
        }
    }

    /// Moves the offer to `status` if the lifecycle allows it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` and leaves the status
    /// unchanged if the transition is not permitted.
    pub fn transition_to(&mut self, status: OfferStatus) -> Result<(), DomainError> {
        self.status.validate_transition(status)?;
        self.status = status;
        Ok(())
    }

    #[must_use]
    pub const fn pin_state(&self) -> PinState {
        PinState::for_status(Some(self.status))
    }

    #[must_use]
    pub fn presentation(&self) -> OfferPresentation {
        OfferPresentation::for_status(Some(self.status))
    }
}
