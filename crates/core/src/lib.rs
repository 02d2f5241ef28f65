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

mod context;
mod draft;
mod error;
mod mock_history;
mod tracker;

#[cfg(test)]
mod tests;

pub use context::AppContext;
pub use draft::{DraftStore, UpdateOutcome};
pub use error::CoreError;
pub use mock_history::mock_offers;
pub use tracker::{OfferFilter, OfferTracker};
