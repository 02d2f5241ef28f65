// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Async owner of the offers fetched from the backend.
//!
//! Every fetch takes a ticket from a monotonic sequence. When a response
//! arrives it is applied only if no later fetch has started and no submit
//! has landed since; older responses are dropped. The state lock is never
//! held across a request.

use crate::backend::OffersBackend;
use crate::error::{ApiError, ApiResult};
use crate::request_response::{CreateOfferPayload, OfferFilters, SellingOffer};
use nml_offers::{DraftStore, OfferFilter, OfferTracker};
use nml_offers_domain::{DomainError, OutletId, PinState, SubmittedOffer};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// What happened to the result of a fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The offers replaced the tracker's contents.
    Applied { count: usize },
    /// The fetch failed; prior offers were kept and the error recorded.
    Failed(ApiError),
    /// A later fetch started before this one finished; the result was dropped.
    Superseded,
}

/// Point-in-time copy of the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    pub offers: Vec<SubmittedOffer>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
struct FeedState {
    tracker: OfferTracker,
    loading: bool,
    error: Option<String>,
    latest_request: u64,
}

impl FeedState {
    /// Invalidates every fetch in flight.
    const fn bump_sequence(&mut self) -> u64 {
        self.latest_request += 1;
        self.latest_request
    }
}

/// Clears `loading` if a fetch future is dropped before it settles.
struct LoadingGuard {
    state: Arc<Mutex<FeedState>>,
    ticket: u64,
    armed: bool,
}

impl LoadingGuard {
    const fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let ticket: u64 = self.ticket;
        if let Ok(mut state) = self.state.try_lock() {
            settle_abandoned(&mut state, ticket);
            return;
        }
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let state: Arc<Mutex<FeedState>> = Arc::clone(&self.state);
            drop(handle.spawn(async move {
                settle_abandoned(&mut *state.lock().await, ticket);
            }));
        }
    }
}

fn settle_abandoned(state: &mut FeedState, ticket: u64) {
    if state.latest_request == ticket {
        debug!(ticket, "Offers fetch abandoned");
        state.loading = false;
    }
}

/// Fetches and submits offers through a backend, keeping the results in
/// an [`OfferTracker`].
///
/// Clones share state.
#[derive(Debug, Clone)]
pub struct OfferFeed<B> {
    backend: B,
    state: Arc<Mutex<FeedState>>,
}

impl<B: OffersBackend> OfferFeed<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_tracker(backend, OfferTracker::new())
    }

    /// A feed that starts out showing `tracker`'s offers.
    #[must_use]
    pub fn with_tracker(backend: B, tracker: OfferTracker) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(FeedState {
                tracker,
                loading: false,
                error: None,
                latest_request: 0,
            })),
        }
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Fetches offers matching `filters` and applies them if this is still
    /// the most recent fetch.
    ///
    /// Dropping the future before it completes clears `loading` when no
    /// later fetch has started.
    pub async fn fetch_offers(&self, filters: &OfferFilters) -> FetchOutcome {
        let ticket: u64 = {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.error = None;
            state.bump_sequence()
        };
        let mut guard: LoadingGuard = LoadingGuard {
            state: Arc::clone(&self.state),
            ticket,
            armed: true,
        };

        let result: ApiResult<Vec<SellingOffer>> = self.backend.fetch_offers(filters).await;

        let mut state = self.state.lock().await;
        guard.disarm();
        if state.latest_request != ticket {
            debug!(
                ticket,
                latest = state.latest_request,
                "Dropping superseded offers response"
            );
            return FetchOutcome::Superseded;
        }
        state.loading = false;

        match result {
            Ok(offers) => {
                let offers: Vec<SubmittedOffer> =
                    offers.iter().map(SellingOffer::to_submitted_offer).collect();
                let count: usize = offers.len();
                state.tracker.replace_all(offers);
                info!(count, "Loaded offers");
                FetchOutcome::Applied { count }
            }
            Err(err) => {
                warn!(error = %err, "Failed to load offers");
                state.error = Some(err.to_string());
                FetchOutcome::Failed(err)
            }
        }
    }

    /// Sends the draft to the backend as a new offer.
    ///
    /// `outlet` overrides the draft's own outlet reference. On success the
    /// stored offer is put at the front of the feed, any fetch still in
    /// flight is superseded and the draft is cleared. On failure the draft
    /// is untouched and the error recorded.
    ///
    /// # Errors
    ///
    /// * `DomainError::MissingOutlet` if no outlet is known
    /// * `DomainError::EmptyOffer` or `DomainError::IncompleteLineItem` if
    ///   the draft cannot be sent as is
    /// * any backend error
    pub async fn submit_draft(
        &self,
        draft: &mut DraftStore,
        outlet: Option<OutletId>,
        notes: Option<String>,
        valid_until: Option<String>,
    ) -> ApiResult<SubmittedOffer> {
        let result: ApiResult<SellingOffer> =
            match Self::build_payload(draft, outlet, notes, valid_until) {
                Ok(payload) => self.backend.create_offer(&payload).await,
                Err(err) => Err(err),
            };

        let mut state = self.state.lock().await;
        match result {
            Ok(created) => {
                let offer: SubmittedOffer = created.to_submitted_offer();
                state.tracker.insert_front(offer.clone());
                let ticket: u64 = state.bump_sequence();
                state.loading = false;
                state.error = None;
                drop(state);
                debug!(ticket, "Submit superseded in-flight fetches");
                draft.clear();
                info!(offer_id = %offer.id, "Submitted draft");
                Ok(offer)
            }
            Err(err) => {
                warn!(error = %err, "Failed to submit draft");
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn build_payload(
        draft: &DraftStore,
        outlet: Option<OutletId>,
        notes: Option<String>,
        valid_until: Option<String>,
    ) -> ApiResult<CreateOfferPayload> {
        let outlet: OutletId = outlet
            .or_else(|| draft.outlet())
            .ok_or(DomainError::MissingOutlet)?;
        Ok(CreateOfferPayload::from_items(
            outlet,
            draft.items(),
            notes,
            valid_until,
        )?)
    }

    /// Current offers, loading flag and last error.
    pub async fn snapshot(&self) -> FeedSnapshot {
        let state = self.state.lock().await;
        FeedSnapshot {
            offers: state.tracker.offers().to_vec(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// Offers matching a local filter, without contacting the backend.
    pub async fn list_offers(&self, filter: &OfferFilter) -> Vec<SubmittedOffer> {
        let state = self.state.lock().await;
        state
            .tracker
            .list_offers(filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn pin_state_for_outlet(&self, outlet_name: &str) -> PinState {
        self.state.lock().await.tracker.pin_state_for_outlet(outlet_name)
    }
}
