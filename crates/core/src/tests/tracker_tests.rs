// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CoreError, DraftStore, OfferFilter, OfferTracker, mock_offers};
use nml_offers_domain::{
    DomainError, LineItemUpdate, OfferId, OfferStatus, Outlet, PinState, SubmittedOffer,
};

use super::helpers::{create_cake_draft, create_test_now, create_test_outlet};

fn create_mock_tracker() -> OfferTracker {
    OfferTracker::from_offers(mock_offers(create_test_now()))
}

#[test]
fn test_submit_rejects_empty_draft() {
    let mut tracker: OfferTracker = OfferTracker::new();
    let draft: DraftStore = DraftStore::new();

    let result = tracker.submit_at(create_test_outlet(), &draft, create_test_now());

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::EmptyOffer))
    );
    assert!(tracker.is_empty());
}

#[test]
fn test_submit_starts_pending_with_totals() {
    let mut tracker: OfferTracker = OfferTracker::new();
    let (draft, _, _) = create_cake_draft();

    let offer: SubmittedOffer = tracker
        .submit_at(create_test_outlet(), &draft, create_test_now())
        .unwrap();

    assert_eq!(offer.status, OfferStatus::Pending);
    assert_eq!(offer.total_price, 405.0);
    assert_eq!(offer.total_quantity, 15);
    assert_eq!(offer.created_at, create_test_now());
    assert_eq!(offer.items.len(), 2);
}

#[test]
fn test_snapshot_is_isolated_from_later_draft_edits() {
    let mut tracker: OfferTracker = OfferTracker::new();
    let (mut draft, marble, _) = create_cake_draft();

    let offer: SubmittedOffer = tracker
        .submit_at(create_test_outlet(), &draft, create_test_now())
        .unwrap();

    draft
        .update_product(marble, &LineItemUpdate::price(99.0))
        .unwrap();
    draft.remove_product(marble);

    let stored: &SubmittedOffer = tracker.get(offer.id).unwrap();
    assert_eq!(stored.items[0].price, Some(25.5));
    assert_eq!(stored.items.len(), 2);
    assert_eq!(stored.total_price, 405.0);
}

#[test]
fn test_history_is_most_recent_first() {
    let mut tracker: OfferTracker = OfferTracker::new();
    let (draft, _, _) = create_cake_draft();

    let first = tracker
        .submit_at(create_test_outlet(), &draft, create_test_now())
        .unwrap();
    let second = tracker
        .submit_at(
            Outlet::new("العثيم", "حي النزهة", "النزهة"),
            &draft,
            create_test_now(),
        )
        .unwrap();

    let ids: Vec<OfferId> = tracker
        .list_offers(&OfferFilter::all())
        .iter()
        .map(|offer| offer.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[test]
fn test_update_status_follows_lifecycle() {
    let mut tracker: OfferTracker = OfferTracker::new();
    let (draft, _, _) = create_cake_draft();
    let id: OfferId = tracker
        .submit_at(create_test_outlet(), &draft, create_test_now())
        .unwrap()
        .id;

    tracker.update_status(id, OfferStatus::Accepted).unwrap();
    tracker.update_status(id, OfferStatus::Preparing).unwrap();

    let result = tracker.update_status(id, OfferStatus::Rejected);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition { .. }
        ))
    ));
    assert_eq!(tracker.get(id).unwrap().status, OfferStatus::Preparing);
}

#[test]
fn test_update_status_unknown_offer() {
    let mut tracker: OfferTracker = OfferTracker::new();
    assert_eq!(
        tracker.update_status(OfferId::new(77), OfferStatus::Accepted),
        Err(CoreError::DomainViolation(DomainError::OfferNotFound {
            offer_id: 77
        }))
    );
}

#[test]
fn test_filter_by_status() {
    let tracker: OfferTracker = create_mock_tracker();

    let pending = tracker.list_offers(&OfferFilter::all().with_status(OfferStatus::Pending));

    let names: Vec<&str> = pending
        .iter()
        .map(|offer| offer.outlet.name.as_str())
        .collect();
    assert_eq!(names, vec!["العثيم", "الدانوب"]);
}

#[test]
fn test_filter_by_pin_state() {
    let tracker: OfferTracker = create_mock_tracker();

    let accepted = tracker.list_offers(&OfferFilter::all().with_pin_state(PinState::Accepted));
    let no_offers = tracker.list_offers(&OfferFilter::all().with_pin_state(PinState::NoOffers));

    assert_eq!(accepted.len(), 2);
    assert_eq!(no_offers.len(), 1);
    assert_eq!(no_offers[0].outlet.name, "بازار");
}

#[test]
fn test_search_matches_name_or_location() {
    let tracker: OfferTracker = create_mock_tracker();

    let by_name = tracker.list_offers(&OfferFilter::all().with_search("بنده"));
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].outlet.name, "بنده");

    let by_location = tracker.list_offers(&OfferFilter::all().with_search("التحلية"));
    assert_eq!(by_location.len(), 1);
    assert_eq!(by_location[0].outlet.name, "العثيم");

    assert_eq!(tracker.list_offers(&OfferFilter::all().with_search("")).len(), 5);
}

#[test]
fn test_search_is_case_insensitive() {
    let mut tracker: OfferTracker = OfferTracker::new();
    let (draft, _, _) = create_cake_draft();
    tracker
        .submit_at(
            Outlet::new("Panda Olaya", "King Fahd Road", "Olaya"),
            &draft,
            create_test_now(),
        )
        .unwrap();

    assert_eq!(tracker.list_offers(&OfferFilter::all().with_search("PANDA")).len(), 1);
    assert_eq!(tracker.list_offers(&OfferFilter::all().with_search("fahd")).len(), 1);
    assert!(tracker.list_offers(&OfferFilter::all().with_search("danube")).is_empty());
}

#[test]
fn test_combined_filters_must_all_match() {
    let tracker: OfferTracker = create_mock_tracker();
    let filter: OfferFilter = OfferFilter::all()
        .with_status(OfferStatus::Pending)
        .with_search("بنده");
    assert!(tracker.list_offers(&filter).is_empty());
}

#[test]
fn test_mock_history_totals() {
    let offers: Vec<SubmittedOffer> = mock_offers(create_test_now());
    let totals: Vec<f64> = offers.iter().map(|offer| offer.total_price).collect();
    assert_eq!(totals, vec![405.0, 480.0, 555.0, 468.0, 915.0]);
}

#[test]
fn test_pin_state_for_outlet() {
    let tracker: OfferTracker = create_mock_tracker();
    assert_eq!(tracker.pin_state_for_outlet("العثيم"), PinState::Processing);
    assert_eq!(tracker.pin_state_for_outlet("كارفور"), PinState::Accepted);
    assert_eq!(tracker.pin_state_for_outlet("unknown"), PinState::NoOffers);
}

#[test]
fn test_local_ids_continue_after_replace_all() {
    let mut tracker: OfferTracker = create_mock_tracker();
    let (draft, _, _) = create_cake_draft();

    let offer: SubmittedOffer = tracker
        .submit_at(create_test_outlet(), &draft, create_test_now())
        .unwrap();

    assert_eq!(offer.id, OfferId::new(6));
}
