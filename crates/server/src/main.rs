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

mod mock_backend;
mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use mock_backend::{MockBackend, MockError, OfferQuery, ProductQuery};
use nml_offers_api::{
    API_PREFIX, ApiEnvelope, AuthResponse, CreateOfferPayload, ErrorBody, LogoutResponse,
    OtpRequestPayload, OtpRequestResponse, OtpVerifyPayload, PaginatedEnvelope, Product,
    SellingOffer,
};
use nml_offers_domain::OfferStatus;
use serde::{Deserialize, Serialize};
use session::SessionAgent;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// NML Offers mock backend - in-memory stand-in for the supplier-app API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    backend: Arc<Mutex<MockBackend>>,
}

impl AppState {
    fn new(backend: MockBackend) -> Self {
        Self {
            backend: Arc::new(Mutex::new(backend)),
        }
    }
}

/// Query parameters of `GET /selling-offers`.
#[derive(Debug, Default, Deserialize)]
struct OffersQueryParams {
    status: Option<String>,
    outlet_branch_id: Option<i64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    radius: Option<f64>,
}

/// Query parameters of `GET /products`. `is_active` arrives as 0 or 1.
#[derive(Debug, Default, Deserialize)]
struct ProductsQueryParams {
    page: Option<u32>,
    per_page: Option<u32>,
    search: Option<String>,
    is_active: Option<u8>,
}

/// Body of `POST /selling-offers/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StatusChangeRequest {
    status: OfferStatus,
}

/// HTTP error wrapper that renders the backend's error envelope.
struct HttpError {
    status: StatusCode,
    body: ErrorBody,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<MockError> for HttpError {
    fn from(err: MockError) -> Self {
        let status: StatusCode = match err {
            MockError::NotFound { .. } => StatusCode::NOT_FOUND,
            MockError::Conflict(_) => StatusCode::CONFLICT,
            MockError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self {
            status,
            body: err.to_body(),
        }
    }
}

impl TryFrom<OffersQueryParams> for OfferQuery {
    type Error = HttpError;

    fn try_from(params: OffersQueryParams) -> Result<Self, Self::Error> {
        let status: Option<OfferStatus> = params
            .status
            .as_deref()
            .map(str::parse::<OfferStatus>)
            .transpose()
            .map_err(|err| HttpError {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                body: ErrorBody::new(&err.to_string()).with_field_error("status", "invalid"),
            })?;
        Ok(Self {
            status,
            outlet_branch_id: params.outlet_branch_id,
            latitude: params.latitude,
            longitude: params.longitude,
            radius: params.radius,
        })
    }
}

impl From<ProductsQueryParams> for ProductQuery {
    fn from(params: ProductsQueryParams) -> Self {
        Self {
            page: params.page,
            per_page: params.per_page,
            search: params.search,
            is_active: params.is_active.map(|flag| flag != 0),
        }
    }
}

// -- auth ------------------------------------------------------------------

async fn handle_request_otp(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<OtpRequestPayload>,
) -> Result<Json<OtpRequestResponse>, HttpError> {
    info!(phone = %req.phone, user_type = ?req.user_type, "Handling request-otp");
    let backend = app_state.backend.lock().await;
    Ok(Json(backend.request_otp(&req.phone, OffsetDateTime::now_utc())?))
}

async fn handle_verify_otp(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<OtpVerifyPayload>,
) -> Result<Json<AuthResponse>, HttpError> {
    info!(phone = %req.phone, "Handling verify-otp");
    let mut backend = app_state.backend.lock().await;
    Ok(Json(backend.verify_otp(&req.phone, &req.otp)?))
}

async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAgent,
) -> Json<LogoutResponse> {
    app_state.backend.lock().await.logout(&session.token);
    info!(agent_id = session.agent.id, "Logged out");
    Json(LogoutResponse {
        success: true,
        message: String::from("Logged out successfully"),
    })
}

// -- selling offers ----------------------------------------------------------

async fn handle_list_offers(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionAgent,
    Query(params): Query<OffersQueryParams>,
) -> Result<Json<ApiEnvelope<Vec<SellingOffer>>>, HttpError> {
    let query: OfferQuery = OfferQuery::try_from(params)?;
    let offers: Vec<SellingOffer> = app_state.backend.lock().await.list_offers(&query)?;
    info!(count = offers.len(), "Listed selling offers");
    Ok(Json(ApiEnvelope::ok(
        "Selling offers retrieved successfully",
        offers,
    )))
}

async fn handle_get_offer(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionAgent,
    Path(offer_id): Path<i64>,
) -> Result<Json<ApiEnvelope<SellingOffer>>, HttpError> {
    let offer: SellingOffer = app_state.backend.lock().await.get_offer(offer_id)?;
    Ok(Json(ApiEnvelope::ok(
        "Selling offer retrieved successfully",
        offer,
    )))
}

async fn handle_create_offer(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAgent,
    Json(payload): Json<CreateOfferPayload>,
) -> Result<(StatusCode, Json<ApiEnvelope<SellingOffer>>), HttpError> {
    info!(
        agent_id = session.agent.id,
        outlet_branch_id = payload.outlet_branch_id,
        lines = payload.products.len(),
        "Handling create selling offer"
    );
    let offer: SellingOffer = app_state
        .backend
        .lock()
        .await
        .create_offer(&payload, OffsetDateTime::now_utc())?;
    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::ok("Selling offer created successfully", offer)),
    ))
}

/// Drives an offer through its lifecycle, standing in for the outlet and
/// the courier.
async fn handle_update_offer_status(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionAgent,
    Path(offer_id): Path<i64>,
    Json(req): Json<StatusChangeRequest>,
) -> Result<Json<ApiEnvelope<SellingOffer>>, HttpError> {
    let offer: SellingOffer = app_state
        .backend
        .lock()
        .await
        .update_status(offer_id, req.status, OffsetDateTime::now_utc())
        .inspect_err(|err| warn!(offer_id, error = %err, "Status change refused"))?;
    Ok(Json(ApiEnvelope::ok("Selling offer status updated", offer)))
}

// -- products ----------------------------------------------------------------

async fn handle_list_products(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionAgent,
    Query(params): Query<ProductsQueryParams>,
) -> Json<PaginatedEnvelope<Product>> {
    let query: ProductQuery = ProductQuery::from(params);
    Json(app_state.backend.lock().await.list_products(&query))
}

async fn handle_get_product(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionAgent,
    Path(product_id): Path<i64>,
) -> Result<Json<ApiEnvelope<Product>>, HttpError> {
    let product: Product = app_state.backend.lock().await.get_product(product_id)?;
    Ok(Json(ApiEnvelope::ok(
        "Product retrieved successfully",
        product,
    )))
}

/// Builds the application router with all endpoints under the API prefix.
fn build_router(app_state: AppState) -> Router {
    let routes: Router<AppState> = Router::new()
        .route("/auth/request-otp", post(handle_request_otp))
        .route("/auth/verify-otp", post(handle_verify_otp))
        .route("/auth/logout", post(handle_logout))
        .route(
            "/selling-offers",
            get(handle_list_offers).post(handle_create_offer),
        )
        .route("/selling-offers/{offer_id}", get(handle_get_offer))
        .route(
            "/selling-offers/{offer_id}/status",
            post(handle_update_offer_status),
        )
        .route("/products", get(handle_list_products))
        .route("/products/{product_id}", get(handle_get_product));

    Router::new().nest(API_PREFIX, routes).with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing NML Offers mock backend");

    let app_state: AppState = AppState::new(MockBackend::seeded(OffsetDateTime::now_utc()));
    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
