// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::draft::DraftStore;
use crate::error::CoreError;
use crate::mock_history::mock_offers;
use crate::tracker::OfferTracker;
use nml_offers_domain::{Outlet, SubmittedOffer};
use time::OffsetDateTime;

/// Composition root owning the one draft and the one offer history of a
/// running app. Screens borrow what they need from here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppContext {
    pub draft: DraftStore,
    pub tracker: OfferTracker,
}

impl AppContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            draft: DraftStore::new(),
            tracker: OfferTracker::new(),
        }
    }

    /// A context seeded with the sample offer history.
    #[must_use]
    pub fn with_mock_history(now: OffsetDateTime) -> Self {
        Self {
            draft: DraftStore::new(),
            tracker: OfferTracker::from_offers(mock_offers(now)),
        }
    }

    /// Submits the draft for `outlet` and clears it.
    ///
    /// If `outlet` carries no backend id, the draft's outlet reference is
    /// used. On error the draft is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyOffer` if the draft has no items.
    pub fn submit_draft(&mut self, outlet: Outlet) -> Result<SubmittedOffer, CoreError> {
        self.submit_draft_at(outlet, OffsetDateTime::now_utc())
    }

    /// As [`Self::submit_draft`], with an explicit creation time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyOffer` if the draft has no items.
    pub fn submit_draft_at(
        &mut self,
        mut outlet: Outlet,
        now: OffsetDateTime,
    ) -> Result<SubmittedOffer, CoreError> {
        if outlet.id.is_none() {
            outlet.id = self.draft.outlet();
        }
        let offer: SubmittedOffer = self.tracker.submit_at(outlet, &self.draft, now)?;
        self.draft.clear();
        Ok(offer)
    }

    /// Abandons the offer being composed.
    pub fn cancel_draft(&mut self) {
        self.draft.clear();
    }
}
