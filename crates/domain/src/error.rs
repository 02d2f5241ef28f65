// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Quantity must be at least one.
    InvalidQuantity {
        /// The rejected quantity.
        quantity: i64,
    },
    /// Unit price must be a finite, non-negative amount.
    InvalidPrice {
        /// The rejected price.
        price: f64,
    },
    /// Commission rate must be a finite percentage between 0 and 100.
    InvalidCommission {
        /// The rejected commission rate.
        commission: f64,
    },
    /// Status string is not part of the offer vocabulary.
    InvalidOfferStatus {
        /// The unrecognized status.
        status: String,
    },
    /// A status change that the offer lifecycle does not allow.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was refused.
        reason: String,
    },
    /// No submitted offer carries this id.
    OfferNotFound {
        /// The requested offer id.
        offer_id: i64,
    },
    /// An offer must contain at least one line item.
    EmptyOffer,
    /// A line item lacks a field the backend requires.
    IncompleteLineItem {
        /// The line item's display name.
        name: String,
        /// The missing field.
        field: &'static str,
    },
    /// The draft has no outlet to send the offer to.
    MissingOutlet,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuantity { quantity } => {
                write!(f, "Invalid quantity: {quantity}. Must be at least 1")
            }
            Self::InvalidPrice { price } => {
                write!(f, "Invalid price: {price}. Must be a non-negative amount")
            }
            Self::InvalidCommission { commission } => {
                write!(
                    f,
                    "Invalid commission: {commission}. Must be between 0 and 100"
                )
            }
            Self::InvalidOfferStatus { status } => {
                write!(f, "Invalid offer status: '{status}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot change offer status from {from} to {to}: {reason}")
            }
            Self::OfferNotFound { offer_id } => write!(f, "Offer {offer_id} not found"),
            Self::EmptyOffer => write!(f, "An offer must contain at least one product"),
            Self::IncompleteLineItem { name, field } => {
                write!(f, "Product '{name}' is missing its {field}")
            }
            Self::MissingOutlet => write!(f, "No outlet selected for this offer"),
        }
    }
}

impl std::error::Error for DomainError {}
