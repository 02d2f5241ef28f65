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
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

//! Client side of the NML supplier-app backend.
//!
//! [`ApiClient`] talks to the REST surface, [`OfferFeed`] keeps fetched
//! offers in an [`nml_offers::OfferTracker`] and drops stale responses.

mod backend;
mod client;
mod config;
mod error;
mod feed;
mod phone;
mod request_response;
mod token;

#[cfg(test)]
mod tests;

pub use backend::OffersBackend;
pub use client::ApiClient;
pub use config::{API_PREFIX, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ApiError, ApiResult};
pub use feed::{FeedSnapshot, FetchOutcome, OfferFeed};
pub use phone::{format_phone_for_api, format_phone_for_display, is_valid_saudi_phone};
pub use request_response::{
    ApiEnvelope, AuthResponse, CreateOfferPayload, CreateOfferProduct, DEFAULT_PER_PAGE,
    ErrorBody, LogoutResponse, MAX_PER_PAGE, NamedRef, OfferFilters, OfferProductSummary,
    OtpRequestPayload, OtpRequestResponse, OtpVerifyPayload, OutletBranch, PaginatedEnvelope,
    PaginationMeta, Product, ProductFilters, ProductPage, SellingOffer, SellingOfferProduct, Sku,
    SupplierAgent, UserRole, UserType,
};
pub use token::TokenHolder;
