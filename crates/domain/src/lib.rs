// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod line_item;
mod offer;
mod offer_status;
mod presentation;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use line_item::{
    DEFAULT_COMMISSION, DEFAULT_QUANTITY, LineItemUpdate, NewLineItem, ProductLineItem, Totals,
    compute_totals,
};
pub use offer::SubmittedOffer;
pub use offer_status::OfferStatus;
pub use presentation::{OfferPresentation, PinState, TimelineStep, timeline_for};
pub use types::{LineItemId, OfferId, Outlet, OutletId};
pub use validation::{
    validate_commission, validate_price, validate_quantity, validate_submittable,
};
