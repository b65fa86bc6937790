//! HTTP handlers for Hangar server.

use actix_web::{HttpResponse, Responder, delete, error, get, post, web};
use hangar_core::{
    HangarError, PageRequest, ShipFilter, ShipOrder, ShipQuery, ShipService, ShipType, ShipUpdate,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::openapi::ApiDoc;
use crate::validation::{
    CreateShipRequest, parse_ship_id, timestamp_from_millis, validate_create, validate_update,
};

#[derive(Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Ship catalog operations.
    pub ships: ShipService,
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// Query parameters shared by the listing and count endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShipListParams {
    /// Name substring.
    pub name: Option<String>,
    /// Planet substring.
    pub planet: Option<String>,
    /// Exact ship type.
    pub ship_type: Option<ShipType>,
    /// Produced strictly after this epoch-millisecond timestamp.
    pub after: Option<i64>,
    /// Produced strictly before this epoch-millisecond timestamp.
    pub before: Option<i64>,
    /// Exact used status.
    pub is_used: Option<bool>,
    /// Minimum speed.
    pub min_speed: Option<f64>,
    /// Maximum speed.
    pub max_speed: Option<f64>,
    /// Minimum crew size.
    pub min_crew_size: Option<i32>,
    /// Maximum crew size.
    pub max_crew_size: Option<i32>,
    /// Minimum rating.
    pub min_rating: Option<f64>,
    /// Maximum rating.
    pub max_rating: Option<f64>,
    /// Sort key (listing only).
    pub order: Option<ShipOrder>,
    /// Zero-based page number (listing only).
    pub page_number: Option<u32>,
    /// Page size (listing only).
    pub page_size: Option<u32>,
}

impl ShipListParams {
    /// Filter described by the parameters.
    pub fn filter(&self) -> Result<ShipFilter, String> {
        Ok(ShipFilter {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type,
            after: self
                .after
                .map(|millis| timestamp_from_millis("after", millis))
                .transpose()?,
            before: self
                .before
                .map(|millis| timestamp_from_millis("before", millis))
                .transpose()?,
            is_used: self.is_used,
            min_speed: finite("minSpeed", self.min_speed)?,
            max_speed: finite("maxSpeed", self.max_speed)?,
            min_crew_size: self.min_crew_size,
            max_crew_size: self.max_crew_size,
            min_rating: finite("minRating", self.min_rating)?,
            max_rating: finite("maxRating", self.max_rating)?,
        })
    }

    /// Full listing query described by the parameters.
    pub fn query(&self) -> Result<ShipQuery, String> {
        Ok(ShipQuery {
            filter: self.filter()?,
            order: self.order,
            page: PageRequest {
                page_number: self.page_number,
                page_size: self.page_size,
            },
        })
    }
}

fn finite(field: &str, value: Option<f64>) -> Result<Option<f64>, String> {
    match value {
        Some(number) if !number.is_finite() => Err(format!("{field} must be a finite number")),
        _ => Ok(value),
    }
}

/// Register the ship routes and extractor error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let response = bad_request(format!("invalid query: {err}"));
        error::InternalError::from_response(err, response).into()
    }))
    .app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = bad_request(format!("invalid body: {err}"));
        error::InternalError::from_response(err, response).into()
    }))
    .service(count_ships)
    .service(list_ships)
    .service(create_ship)
    .service(get_ship)
    .service(update_ship)
    .service(delete_ship)
    .service(openapi_json);
}

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        message: message.into(),
    })
}

fn error_response(err: &HangarError) -> HttpResponse {
    let body = ErrorResponse {
        message: err.to_string(),
    };
    match err {
        HangarError::NotFound(id) => {
            log::debug!("ship {id} not found");
            HttpResponse::NotFound().json(body)
        }
        HangarError::PreconditionViolation(message) => {
            log::warn!("rejected ship request: {message}");
            HttpResponse::BadRequest().json(body)
        }
        HangarError::Store(message) => {
            log::error!("ship store failure: {message}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, HttpResponse>
where
    F: FnOnce() -> hangar_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    match web::block(task).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(error_response(&err)),
        Err(err) => {
            log::error!("ship task failed: {err}");
            Err(HttpResponse::InternalServerError().json(ErrorResponse {
                message: format!("ship task failed: {err}"),
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/rest/ships",
    params(ShipListParams),
    responses(
        (status = 200, description = "Page of matching ships", body = [hangar_core::Ship]),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships")]
/// List ships matching the filter, sorted and paged.
pub async fn list_ships(
    state: web::Data<AppState>,
    params: web::Query<ShipListParams>,
) -> impl Responder {
    let query = match params.query() {
        Ok(query) => query,
        Err(message) => return bad_request(message),
    };
    let ships = state.ships.clone();
    match run_blocking(move || ships.list(&query)).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(response) => response,
    }
}

#[utoipa::path(
    get,
    path = "/rest/ships/count",
    params(ShipListParams),
    responses(
        (status = 200, description = "Number of matching ships", body = u64),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/count")]
/// Count ships matching the filter.
pub async fn count_ships(
    state: web::Data<AppState>,
    params: web::Query<ShipListParams>,
) -> impl Responder {
    let filter = match params.filter() {
        Ok(filter) => filter,
        Err(message) => return bad_request(message),
    };
    let ships = state.ships.clone();
    match run_blocking(move || ships.count(&filter)).await {
        Ok(count) => HttpResponse::Ok().json(count),
        Err(response) => response,
    }
}

#[utoipa::path(
    get,
    path = "/rest/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Ship record", body = hangar_core::Ship),
        (status = 400, description = "Invalid identifier", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/{id}")]
/// Fetch a ship by identifier.
pub async fn get_ship(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = match parse_ship_id(&path.into_inner()) {
        Ok(id) => id,
        Err(message) => return bad_request(message),
    };
    let ships = state.ships.clone();
    match run_blocking(move || ships.get(id)).await {
        Ok(ship) => HttpResponse::Ok().json(ship),
        Err(response) => response,
    }
}

#[utoipa::path(
    post,
    path = "/rest/ships",
    request_body = CreateShipRequest,
    responses(
        (status = 200, description = "Created ship", body = hangar_core::Ship),
        (status = 400, description = "Invalid ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships")]
/// Create a ship. The rating is derived, never taken from the request.
pub async fn create_ship(
    state: web::Data<AppState>,
    payload: web::Json<CreateShipRequest>,
) -> impl Responder {
    let draft = match validate_create(payload.into_inner()) {
        Ok(draft) => draft,
        Err(message) => return bad_request(message),
    };
    let ships = state.ships.clone();
    match run_blocking(move || ships.create(draft)).await {
        Ok(ship) => {
            log::info!("created ship {} ({})", ship.id, ship.name);
            HttpResponse::Ok().json(ship)
        }
        Err(response) => response,
    }
}

#[utoipa::path(
    post,
    path = "/rest/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    request_body = ShipUpdate,
    responses(
        (status = 200, description = "Updated ship", body = hangar_core::Ship),
        (status = 400, description = "Invalid update", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships/{id}")]
/// Partially update a ship; absent fields keep their stored values.
pub async fn update_ship(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ShipUpdate>,
) -> impl Responder {
    let id = match parse_ship_id(&path.into_inner()) {
        Ok(id) => id,
        Err(message) => return bad_request(message),
    };
    let update = payload.into_inner();
    if let Err(message) = validate_update(&update) {
        return bad_request(message);
    }
    let ships = state.ships.clone();
    match run_blocking(move || ships.update(id, update)).await {
        Ok(ship) => {
            log::info!("updated ship {}", ship.id);
            HttpResponse::Ok().json(ship)
        }
        Err(response) => response,
    }
}

#[utoipa::path(
    delete,
    path = "/rest/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Ship deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[delete("/rest/ships/{id}")]
/// Permanently delete a ship.
pub async fn delete_ship(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = match parse_ship_id(&path.into_inner()) {
        Ok(id) => id,
        Err(message) => return bad_request(message),
    };
    let ships = state.ships.clone();
    match run_blocking(move || ships.delete(id)).await {
        Ok(()) => {
            log::info!("deleted ship {id}");
            HttpResponse::Ok().finish()
        }
        Err(response) => response,
    }
}

#[utoipa::path(
    get,
    path = "/rest/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document")
    ),
    tag = "system"
)]
#[get("/rest/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
