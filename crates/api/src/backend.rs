// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::request_response::{CreateOfferPayload, OfferFilters, SellingOffer};
use std::future::Future;

/// The offer endpoints the feed depends on.
pub trait OffersBackend: Send + Sync {
    /// Lists offers matching `filters`.
    fn fetch_offers(
        &self,
        filters: &OfferFilters,
    ) -> impl Future<Output = ApiResult<Vec<SellingOffer>>> + Send;

    /// Creates an offer and returns the stored record.
    fn create_offer(
        &self,
        payload: &CreateOfferPayload,
    ) -> impl Future<Output = ApiResult<SellingOffer>> + Send;
}

impl OffersBackend for ApiClient {
    fn fetch_offers(
        &self,
        filters: &OfferFilters,
    ) -> impl Future<Output = ApiResult<Vec<SellingOffer>>> + Send {
        self.list_offers(filters)
    }

    fn create_offer(
        &self,
        payload: &CreateOfferPayload,
    ) -> impl Future<Output = ApiResult<SellingOffer>> + Send {
        Self::create_offer(self, payload)
    }
}
