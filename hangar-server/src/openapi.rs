//! OpenAPI document for the Hangar server.

use utoipa::OpenApi;

use hangar_core::{Ship, ShipOrder, ShipType, ShipUpdate};

use crate::routes::ErrorResponse;
use crate::validation::CreateShipRequest;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::list_ships,
        crate::routes::count_ships,
        crate::routes::get_ship,
        crate::routes::create_ship,
        crate::routes::update_ship,
        crate::routes::delete_ship,
        crate::routes::openapi_json
    ),
    components(
        schemas(
            Ship,
            ShipType,
            ShipOrder,
            ShipUpdate,
            CreateShipRequest,
            ErrorResponse
        )
    ),
    tags(
        (name = "ships", description = "Ship catalog"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the Hangar server.
pub struct ApiDoc;
