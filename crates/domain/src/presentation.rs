// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! How an offer's status is shown on the map and in the offers list.
//!
//! The map and list screens still speak the older three-value vocabulary
//! (`accepted`, `processing`, `no_offers`). That vocabulary is derived here
//! from [`OfferStatus`] and is never stored.

use crate::error::DomainError;
use crate::offer_status::OfferStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Map pin / list filter state of an outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinState {
    /// The outlet accepted an offer; fulfillment is under way or done.
    Accepted,
    /// An offer is waiting for the outlet's decision.
    Processing,
    /// Nothing live for this outlet; the agent may send an offer.
    NoOffers,
}

impl PinState {
    /// Derives the pin state for an outlet's latest offer, if any.
    #[must_use]
    pub const fn for_status(status: Option<OfferStatus>) -> Self {
        match status {
            Some(OfferStatus::Pending) => Self::Processing,
            Some(
                OfferStatus::Accepted
                | OfferStatus::Preparing
                | OfferStatus::WithCourier
                | OfferStatus::OnSite
                | OfferStatus::Shelved,
            ) => Self::Accepted,
            Some(OfferStatus::Rejected) | None => Self::NoOffers,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Processing => "processing",
            Self::NoOffers => "no_offers",
        }
    }

    /// Filter chip / marker color.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Accepted => "#4CAF50",
            Self::Processing => "#FF9800",
            Self::NoOffers => "#F44336",
        }
    }
}

impl FromStr for PinState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepted" => Ok(Self::Accepted),
            "processing" => Ok(Self::Processing),
            "no_offers" => Ok(Self::NoOffers),
            _ => Err(DomainError::InvalidOfferStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Static description of one fulfillment step.
struct StepDefinition {
    key: &'static str,
    label: &'static str,
}

const FULFILLMENT_STEPS: [StepDefinition; 5] = [
    StepDefinition {
        key: "offer_accepted",
        label: "قبول العرض",
    },
    StepDefinition {
        key: "preparing",
        label: "تجهيز الطلب",
    },
    StepDefinition {
        key: "with_courier",
        label: "مع المندوب",
    },
    StepDefinition {
        key: "on_site",
        label: "في الموقع",
    },
    StepDefinition {
        key: "shelved",
        label: "على الرف",
    },
];

/// One step of the fulfillment timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    /// Position in the timeline, starting at 1.
    pub position: u8,
    /// Stable key for icon lookup and translation.
    pub key: &'static str,
    /// Default (Arabic) label.
    pub label: &'static str,
    /// Whether the offer has reached this step.
    pub completed: bool,
    /// Whether the connector to the next step is drawn as completed.
    pub line_completed: bool,
}

/// What the offers list and pin modal render for an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "steps", rename_all = "snake_case")]
pub enum OfferPresentation {
    /// Five-step fulfillment timeline.
    Timeline(Vec<TimelineStep>),
    /// "Awaiting acceptance" banner, no timeline.
    AwaitingAcceptance,
    /// "Send an offer" call to action that opens the draft flow.
    SendOfferPrompt,
}

impl OfferPresentation {
    /// Chooses the presentation for an outlet's latest offer status.
    #[must_use]
    pub fn for_status(status: Option<OfferStatus>) -> Self {
        match status {
            Some(OfferStatus::Pending) => Self::AwaitingAcceptance,
            Some(OfferStatus::Rejected) | None => Self::SendOfferPrompt,
            Some(accepted) => Self::Timeline(timeline_for(accepted)),
        }
    }
}

/// Builds the five timeline steps with completion driven by `status`.
///
/// Statuses without a fulfillment stage produce a timeline with nothing
/// completed.
#[must_use]
pub fn timeline_for(status: OfferStatus) -> Vec<TimelineStep> {
    let reached: Option<usize> = status.fulfillment_stage();
    let is_done = |index: usize| reached.is_some_and(|stage| index <= stage);

    FULFILLMENT_STEPS
        .iter()
        .enumerate()
        .map(|(index, step)| TimelineStep {
            position: u8::try_from(index + 1).unwrap_or(u8::MAX),
            key: step.key,
            label: step.label,
            completed: is_done(index),
            line_completed: index + 1 < FULFILLMENT_STEPS.len()
                && is_done(index)
                && is_done(index + 1),
        })
        .collect()
}
