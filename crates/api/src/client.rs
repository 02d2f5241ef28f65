// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP client for the supplier-app backend.

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::phone::format_phone_for_api;
use crate::request_response::{
    ApiEnvelope, AuthResponse, CreateOfferPayload, ErrorBody, LogoutResponse, OfferFilters,
    OtpRequestPayload, OtpRequestResponse, OtpVerifyPayload, PaginatedEnvelope, Product,
    ProductFilters, ProductPage, SellingOffer, UserType,
};
use crate::token::TokenHolder;
use nml_offers_domain::OfferId;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

const OFFERS_PATH: &str = "/selling-offers";
const PRODUCTS_PATH: &str = "/products";
const AUTH_PATH: &str = "/auth";

/// Client for the offers, products and auth endpoints.
///
/// Cheap to clone; clones share the connection pool and the token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    token: TokenHolder,
}

impl ApiClient {
    /// Creates a client with an empty token holder.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        Self::with_token_holder(config, TokenHolder::new())
    }

    /// Creates a client that reads and writes `token`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the HTTP client cannot be built.
    pub fn with_token_holder(config: ClientConfig, token: TokenHolder) -> ApiResult<Self> {
        let mut headers: HeaderMap = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http: reqwest::Client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            config,
            token,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub const fn token(&self) -> &TokenHolder {
        &self.token
    }

    // -- selling offers -----------------------------------------------------

    /// `GET /selling-offers`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` for a partial geographic filter
    /// (nothing is sent), or any transport/server error.
    pub async fn list_offers(&self, filters: &OfferFilters) -> ApiResult<Vec<SellingOffer>> {
        let query = filters.query_pairs()?;
        let request = self
            .http
            .get(self.config.endpoint(OFFERS_PATH))
            .query(&query);
        let envelope: ApiEnvelope<Vec<SellingOffer>> = self.send(request).await?;
        let offers: Vec<SellingOffer> = envelope.into_data()?;
        debug!(count = offers.len(), "Fetched selling offers");
        Ok(offers)
    }

    /// `GET /selling-offers/{id}`.
    ///
    /// # Errors
    ///
    /// Returns any transport or server error.
    pub async fn get_offer(&self, id: OfferId) -> ApiResult<SellingOffer> {
        let request = self
            .http
            .get(self.config.endpoint(&format!("{OFFERS_PATH}/{id}")));
        let envelope: ApiEnvelope<SellingOffer> = self.send(request).await?;
        envelope.into_data()
    }

    /// `POST /selling-offers`.
    ///
    /// # Errors
    ///
    /// Returns any transport or server error.
    pub async fn create_offer(&self, payload: &CreateOfferPayload) -> ApiResult<SellingOffer> {
        let request = self
            .http
            .post(self.config.endpoint(OFFERS_PATH))
            .json(payload);
        let envelope: ApiEnvelope<SellingOffer> = self.send(request).await?;
        let offer: SellingOffer = envelope.into_data()?;
        info!(
            offer_id = offer.id,
            outlet_branch_id = offer.outlet_branch_id,
            total_amount = offer.total_amount,
            "Created selling offer"
        );
        Ok(offer)
    }

    // -- products -----------------------------------------------------------

    /// `GET /products`, one page.
    ///
    /// # Errors
    ///
    /// Returns any transport or server error.
    pub async fn list_products(&self, filters: &ProductFilters) -> ApiResult<ProductPage> {
        let request = self
            .http
            .get(self.config.endpoint(PRODUCTS_PATH))
            .query(&filters.query_pairs());
        let envelope: PaginatedEnvelope<Product> = self.send(request).await?;
        Ok(ProductPage {
            products: envelope.data,
            pagination: envelope.pagination,
        })
    }

    /// `GET /products/{id}`.
    ///
    /// # Errors
    ///
    /// Returns any transport or server error.
    pub async fn get_product(&self, id: i64) -> ApiResult<Product> {
        let request = self
            .http
            .get(self.config.endpoint(&format!("{PRODUCTS_PATH}/{id}")));
        let envelope: ApiEnvelope<Product> = self.send(request).await?;
        envelope.into_data()
    }

    // -- auth ---------------------------------------------------------------

    /// `POST /auth/request-otp`. The phone number is normalized first.
    ///
    /// # Errors
    ///
    /// Returns any transport or server error.
    pub async fn request_otp(
        &self,
        phone: &str,
        user_type: UserType,
    ) -> ApiResult<OtpRequestResponse> {
        let payload: OtpRequestPayload = OtpRequestPayload {
            phone: format_phone_for_api(phone),
            user_type,
        };
        let request = self
            .http
            .post(self.config.endpoint(&format!("{AUTH_PATH}/request-otp")))
            .json(&payload);
        self.send(request).await
    }

    /// `POST /auth/verify-otp`. On success the access token is stored.
    ///
    /// # Errors
    ///
    /// Returns any transport or server error; the token is left unchanged.
    pub async fn verify_otp(
        &self,
        phone: &str,
        otp: &str,
        user_type: UserType,
    ) -> ApiResult<AuthResponse> {
        let payload: OtpVerifyPayload = OtpVerifyPayload {
            phone: format_phone_for_api(phone),
            otp: otp.to_string(),
            user_type,
        };
        let request = self
            .http
            .post(self.config.endpoint(&format!("{AUTH_PATH}/verify-otp")))
            .json(&payload);
        let response: AuthResponse = self.send(request).await?;
        self.token.set(&response.access_token);
        info!(agent_id = response.user.id, "Signed in");
        Ok(response)
    }

    /// `POST /auth/logout`. The local token is cleared whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns any transport or server error.
    pub async fn logout(&self) -> ApiResult<LogoutResponse> {
        let request = self
            .http
            .post(self.config.endpoint(&format!("{AUTH_PATH}/logout")));
        let result: ApiResult<LogoutResponse> = self.send(request).await;
        self.token.clear();
        result
    }

    /// Attaches the bearer token, sends, and decodes the body as `T`.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let request: RequestBuilder = match self.token.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status: StatusCode = response.status();
        let body = response.bytes().await?;

        if status == StatusCode::UNAUTHORIZED {
            warn!("Backend rejected credentials, clearing token");
            self.token.clear();
            return Err(ApiError::Unauthorized {
                message: error_message(&body, status),
            });
        }
        if !status.is_success() {
            let message: String = error_message(&body, status);
            warn!(status = status.as_u16(), %message, "Backend returned an error");
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

/// The backend's `message`, or the status reason when the body is not an
/// error envelope.
fn error_message(body: &[u8], status: StatusCode) -> String {
    serde_json::from_slice::<ErrorBody>(body).map_or_else(
        |_| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string()
        },
        |err| err.message,
    )
}
