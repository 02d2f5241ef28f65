// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::draft::DraftStore;
use crate::error::CoreError;
use nml_offers_domain::{
    DomainError, OfferId, OfferStatus, Outlet, PinState, ProductLineItem, SubmittedOffer,
    compute_totals,
};
use time::OffsetDateTime;

/// Query over the offer history.
///
/// Unset criteria match everything; set criteria must all match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferFilter {
    /// Exact status.
    pub status: Option<OfferStatus>,
    /// Derived map pin state.
    pub pin_state: Option<PinState>,
    /// Case-insensitive substring of the outlet name or location.
    pub search: Option<String>,
}

impl OfferFilter {
    /// A filter that matches every offer.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_status(mut self, status: OfferStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn with_pin_state(mut self, pin_state: PinState) -> Self {
        self.pin_state = Some(pin_state);
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    /// Returns true if `offer` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, offer: &SubmittedOffer) -> bool {
        self.status.is_none_or(|status| offer.status == status)
            && self
                .pin_state
                .is_none_or(|pin_state| offer.pin_state() == pin_state)
            && self
                .search
                .as_deref()
                .is_none_or(|needle| offer.outlet.matches_text(needle))
    }
}

/// History of submitted offers, most recent first.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferTracker {
    offers: Vec<SubmittedOffer>,
    next_id: i64,
}

impl OfferTracker {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offers: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates a history holding `offers` in the given (display) order.
    #[must_use]
    pub fn from_offers(offers: Vec<SubmittedOffer>) -> Self {
        let mut tracker: Self = Self::new();
        tracker.replace_all(offers);
        tracker
    }

    /// Submits the draft's current items for `outlet`, stamped with the
    /// current time. The new offer starts as `pending`.
    ///
    /// The draft itself is left as it is; see `AppContext::submit_draft`
    /// for submit-and-clear.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyOffer` if the draft has no items.
    pub fn submit(
        &mut self,
        outlet: Outlet,
        draft: &DraftStore,
    ) -> Result<SubmittedOffer, CoreError> {
        self.submit_at(outlet, draft, OffsetDateTime::now_utc())
    }

    /// As [`Self::submit`], with an explicit creation time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyOffer` if the draft has no items.
    pub fn submit_at(
        &mut self,
        outlet: Outlet,
        draft: &DraftStore,
        now: OffsetDateTime,
    ) -> Result<SubmittedOffer, CoreError> {
        self.submit_with_status(outlet, draft.items(), OfferStatus::Pending, now)
    }

    /// Records a snapshot of `items` with an explicit initial status.
    ///
    /// The items are deep-copied: later edits to the source cannot reach
    /// the stored record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyOffer` if `items` is empty.
    pub fn submit_with_status(
        &mut self,
        outlet: Outlet,
        items: &[ProductLineItem],
        status: OfferStatus,
        now: OffsetDateTime,
    ) -> Result<SubmittedOffer, CoreError> {
        if items.is_empty() {
            return Err(CoreError::DomainViolation(DomainError::EmptyOffer));
        }

        let snapshot: Vec<ProductLineItem> = items.to_vec();
        let totals = compute_totals(&snapshot);
        let offer: SubmittedOffer = SubmittedOffer::new(
            OfferId::new(self.next_id),
            outlet,
            snapshot,
            totals,
            status,
            now,
        );
        self.next_id += 1;
        self.offers.insert(0, offer.clone());
        Ok(offer)
    }

    /// Moves an offer along its lifecycle.
    ///
    /// # Errors
    ///
    /// Returns an error if no offer has this id or the lifecycle does not
    /// allow the transition. The offer is unchanged on error.
    pub fn update_status(&mut self, id: OfferId, status: OfferStatus) -> Result<(), CoreError> {
        let offer: &mut SubmittedOffer = self
            .offers
            .iter_mut()
            .find(|offer| offer.id == id)
            .ok_or(DomainError::OfferNotFound {
                offer_id: id.value(),
            })?;
        offer.transition_to(status)?;
        Ok(())
    }

    /// Offers matching `filter`, in storage order.
    #[must_use]
    pub fn list_offers(&self, filter: &OfferFilter) -> Vec<&SubmittedOffer> {
        self.offers
            .iter()
            .filter(|offer| filter.matches(offer))
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: OfferId) -> Option<&SubmittedOffer> {
        self.offers.iter().find(|offer| offer.id == id)
    }

    /// The most recent offer sent to the outlet with this name.
    #[must_use]
    pub fn latest_for_outlet(&self, outlet_name: &str) -> Option<&SubmittedOffer> {
        self.offers.iter().find(|offer| offer.outlet.name == outlet_name)
    }

    /// Pin state for an outlet, `no_offers` when nothing was sent to it.
    #[must_use]
    pub fn pin_state_for_outlet(&self, outlet_name: &str) -> PinState {
        PinState::for_status(self.latest_for_outlet(outlet_name).map(|offer| offer.status))
    }

    /// Replaces the whole history, e.g. with a page fetched from the backend.
    pub fn replace_all(&mut self, offers: Vec<SubmittedOffer>) {
        self.next_id = next_id_after(&offers).max(self.next_id);
        self.offers = offers;
    }

    /// Adds an offer created elsewhere (e.g. by the backend) as the most recent.
    pub fn insert_front(&mut self, offer: SubmittedOffer) {
        self.next_id = self.next_id.max(offer.id.value().saturating_add(1));
        self.offers.insert(0, offer);
    }

    #[must_use]
    pub fn offers(&self) -> &[SubmittedOffer] {
        &self.offers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

impl Default for OfferTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn next_id_after(offers: &[SubmittedOffer]) -> i64 {
    offers
        .iter()
        .map(|offer| offer.id.value().saturating_add(1))
        .max()
        .unwrap_or(1)
}
