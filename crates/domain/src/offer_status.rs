// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Offer status tracking and transition logic.
//!
//! This module defines the canonical offer status vocabulary and the
//! permitted transitions between statuses. The backend only reports
//! `pending`, `accepted` and `rejected`; the remaining statuses are the
//! fulfillment stages that follow acceptance.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a submitted offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    /// Submitted, awaiting the outlet's decision
    #[serde(alias = "processing")]
    Pending,
    /// Outlet accepted the offer
    Accepted,
    /// Order is being prepared
    Preparing,
    /// Order handed over to the courier
    WithCourier,
    /// Order delivered to the outlet
    OnSite,
    /// Products placed on the shelf
    Shelved,
    /// Outlet declined the offer
    Rejected,
}

impl OfferStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Accepted,
        Self::Preparing,
        Self::WithCourier,
        Self::OnSite,
        Self::Shelved,
        Self::Rejected,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is the value used on the wire and in query parameters.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Preparing => "preparing",
            Self::WithCourier => "with_courier",
            Self::OnSite => "on_site",
            Self::Shelved => "shelved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// `processing` is accepted as the legacy name of `pending`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidOfferStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" | "processing" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "preparing" => Ok(Self::Preparing),
            "with_courier" => Ok(Self::WithCourier),
            "on_site" => Ok(Self::OnSite),
            "shelved" => Ok(Self::Shelved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidOfferStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Shelved | Self::Rejected)
    }

    /// Returns true once the outlet has accepted the offer, including every
    /// fulfillment stage after acceptance.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        self.fulfillment_stage().is_some()
    }

    /// Zero-based position in the fulfillment timeline, if the offer has one.
    #[must_use]
    pub const fn fulfillment_stage(&self) -> Option<usize> {
        match self {
            Self::Accepted => Some(0),
            Self::Preparing => Some(1),
            Self::WithCourier => Some(2),
            Self::OnSite => Some(3),
            Self::Shelved => Some(4),
            Self::Pending | Self::Rejected => None,
        }
    }

    /// The only statuses reachable from this one.
    #[must_use]
    pub const fn successors(&self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Accepted, Self::Rejected],
            Self::Accepted => &[Self::Preparing],
            Self::Preparing => &[Self::WithCourier],
            Self::WithCourier => &[Self::OnSite],
            Self::OnSite => &[Self::Shelved],
            Self::Shelved | Self::Rejected => &[],
        }
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        if self.successors().contains(&new_status) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by offer lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for OfferStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        for status in OfferStatus::ALL {
            let s = status.as_str();
            match OfferStatus::parse_str(s) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_legacy_processing_parses_as_pending() {
        assert_eq!(
            OfferStatus::from_str("processing").ok(),
            Some(OfferStatus::Pending)
        );
    }

    #[test]
    fn test_invalid_status_string() {
        assert!(OfferStatus::parse_str("no_offers").is_err());
        assert!(OfferStatus::parse_str("Accepted").is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!OfferStatus::Pending.is_terminal());
        assert!(!OfferStatus::Accepted.is_terminal());
        assert!(!OfferStatus::OnSite.is_terminal());
        assert!(OfferStatus::Shelved.is_terminal());
        assert!(OfferStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_every_listed_edge_is_valid() {
        for from in OfferStatus::ALL {
            for to in from.successors() {
                assert!(
                    from.validate_transition(*to).is_ok(),
                    "{from} -> {to} should be allowed"
                );
            }
        }
    }

    #[test]
    fn test_every_unlisted_edge_is_rejected() {
        for from in OfferStatus::ALL {
            for to in OfferStatus::ALL {
                if from.successors().contains(&to) {
                    continue;
                }
                assert!(
                    from.validate_transition(to).is_err(),
                    "{from} -> {to} should be rejected"
                );
            }
        }
    }

    #[test]
    fn test_fulfillment_cannot_skip_stages() {
        assert!(
            OfferStatus::Accepted
                .validate_transition(OfferStatus::OnSite)
                .is_err()
        );
        assert!(
            OfferStatus::Pending
                .validate_transition(OfferStatus::Preparing)
                .is_err()
        );
    }

    #[test]
    fn test_terminal_error_reason() {
        match OfferStatus::Rejected.validate_transition(OfferStatus::Accepted) {
            Err(DomainError::InvalidStatusTransition { reason, .. }) => {
                assert_eq!(reason, "cannot transition from terminal state");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(OfferStatus::WithCourier.to_string(), "with_courier");
        assert_eq!(OfferStatus::OnSite.to_string(), "on_site");
    }

    #[test]
    fn test_fulfillment_stage_order() {
        let stages: Vec<usize> = OfferStatus::ALL
            .iter()
            .filter_map(OfferStatus::fulfillment_stage)
            .collect();
        assert_eq!(stages, vec![0, 1, 2, 3, 4]);
    }
}
