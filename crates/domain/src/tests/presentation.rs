// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{OfferPresentation, OfferStatus, PinState, TimelineStep, timeline_for};
use std::str::FromStr;

fn completed_flags(steps: &[TimelineStep]) -> Vec<bool> {
    steps.iter().map(|step| step.completed).collect()
}

#[test]
fn test_pending_shows_waiting_banner() {
    assert_eq!(
        OfferPresentation::for_status(Some(OfferStatus::Pending)),
        OfferPresentation::AwaitingAcceptance
    );
}

#[test]
fn test_no_offer_and_rejected_show_send_prompt() {
    assert_eq!(
        OfferPresentation::for_status(None),
        OfferPresentation::SendOfferPrompt
    );
    assert_eq!(
        OfferPresentation::for_status(Some(OfferStatus::Rejected)),
        OfferPresentation::SendOfferPrompt
    );
}

#[test]
fn test_accepted_statuses_show_timeline() {
    let OfferPresentation::Timeline(steps) =
        OfferPresentation::for_status(Some(OfferStatus::OnSite))
    else {
        panic!("expected a timeline");
    };

    assert_eq!(steps.len(), 5);
    assert_eq!(completed_flags(&steps), vec![true, true, true, true, false]);
    assert_eq!(steps[0].label, "قبول العرض");
    assert_eq!(steps[4].label, "على الرف");
    assert_eq!(steps[4].key, "shelved");
}

#[test]
fn test_timeline_positions_start_at_one() {
    let positions: Vec<u8> = timeline_for(OfferStatus::Accepted)
        .iter()
        .map(|step| step.position)
        .collect();
    assert_eq!(positions, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_connector_completed_only_between_completed_steps() {
    let steps: Vec<TimelineStep> = timeline_for(OfferStatus::WithCourier);
    let lines: Vec<bool> = steps.iter().map(|step| step.line_completed).collect();
    assert_eq!(lines, vec![true, true, false, false, false]);
}

#[test]
fn test_shelved_completes_every_step() {
    let steps: Vec<TimelineStep> = timeline_for(OfferStatus::Shelved);
    assert!(steps.iter().all(|step| step.completed));
    assert!(!steps[4].line_completed);
}

#[test]
fn test_pin_state_relabels_status() {
    assert_eq!(
        PinState::for_status(Some(OfferStatus::Pending)),
        PinState::Processing
    );
    assert_eq!(
        PinState::for_status(Some(OfferStatus::Preparing)),
        PinState::Accepted
    );
    assert_eq!(
        PinState::for_status(Some(OfferStatus::Rejected)),
        PinState::NoOffers
    );
    assert_eq!(PinState::for_status(None), PinState::NoOffers);
}

#[test]
fn test_pin_state_colors_and_names() {
    assert_eq!(PinState::Accepted.color(), "#4CAF50");
    assert_eq!(PinState::Processing.color(), "#FF9800");
    assert_eq!(PinState::NoOffers.color(), "#F44336");
    assert_eq!(PinState::from_str("no_offers"), Ok(PinState::NoOffers));
    assert_eq!(PinState::NoOffers.as_str(), "no_offers");
}
