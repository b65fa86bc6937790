//! HTTP client for the Hangar REST API.

use crate::CliResult;
use hangar_core::{Criterion, Ship, ShipDraft, ShipFilter, ShipId, ShipQuery, ShipUpdate};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// Server used when neither `--server-url` nor `HANGAR_API_URL` is given.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// A non-success response from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Message from the error body, or the raw body.
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "server returned {}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Typed access to the `/rest/ships` endpoints.
pub struct HangarClient {
    http: Client,
    base_url: String,
}

impl HangarClient {
    /// Create a client for the server at `server_url`.
    pub fn new(server_url: &str) -> CliResult<Self> {
        Ok(Self {
            http: Client::new(),
            base_url: normalize_server_url(server_url)?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetch one page of ships matching `query`.
    pub async fn list(&self, query: &ShipQuery) -> CliResult<Vec<Ship>> {
        let mut params = filter_params(&query.filter);
        if let Some(order) = query.order {
            params.push(("order", order.as_str().to_string()));
        }
        if let Some(page_number) = query.page.page_number {
            params.push(("pageNumber", page_number.to_string()));
        }
        if let Some(page_size) = query.page.page_size {
            params.push(("pageSize", page_size.to_string()));
        }
        let request = self.http.get(self.url("/rest/ships")).query(&params);
        read_json(request).await
    }

    /// Count ships matching `filter`.
    pub async fn count(&self, filter: &ShipFilter) -> CliResult<usize> {
        let request = self
            .http
            .get(self.url("/rest/ships/count"))
            .query(&filter_params(filter));
        read_json(request).await
    }

    /// Fetch a single ship.
    pub async fn get(&self, id: ShipId) -> CliResult<Ship> {
        read_json(self.http.get(self.url(&format!("/rest/ships/{id}")))).await
    }

    /// Create a ship from `draft`.
    pub async fn create(&self, draft: &ShipDraft) -> CliResult<Ship> {
        read_json(self.http.post(self.url("/rest/ships")).json(draft)).await
    }

    /// Apply a partial update to a ship.
    pub async fn update(&self, id: ShipId, update: &ShipUpdate) -> CliResult<Ship> {
        let request = self
            .http
            .post(self.url(&format!("/rest/ships/{id}")))
            .json(update);
        read_json(request).await
    }

    /// Delete a ship.
    pub async fn delete(&self, id: ShipId) -> CliResult<()> {
        send(self.http.delete(self.url(&format!("/rest/ships/{id}")))).await?;
        Ok(())
    }
}

fn normalize_server_url(server_url: &str) -> CliResult<String> {
    let trimmed = server_url.trim();
    if trimmed.is_empty() {
        return Err("server url is required".into());
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Encode a filter as query parameters, one per active criterion.
fn filter_params(filter: &ShipFilter) -> Vec<(&'static str, String)> {
    filter
        .criteria()
        .into_iter()
        .map(|criterion| match criterion {
            Criterion::NameContains(name) => ("name", name),
            Criterion::PlanetContains(planet) => ("planet", planet),
            Criterion::ShipType(ship_type) => ("shipType", ship_type.as_str().to_string()),
            Criterion::After(after) => ("after", after.timestamp_millis().to_string()),
            Criterion::Before(before) => ("before", before.timestamp_millis().to_string()),
            Criterion::IsUsed(is_used) => ("isUsed", is_used.to_string()),
            Criterion::MinSpeed(min) => ("minSpeed", min.to_string()),
            Criterion::MaxSpeed(max) => ("maxSpeed", max.to_string()),
            Criterion::MinCrewSize(min) => ("minCrewSize", min.to_string()),
            Criterion::MaxCrewSize(max) => ("maxCrewSize", max.to_string()),
            Criterion::MinRating(min) => ("minRating", min.to_string()),
            Criterion::MaxRating(max) => ("maxRating", max.to_string()),
        })
        .collect()
}

async fn send(request: RequestBuilder) -> CliResult<Response> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|error| error.message)
        .unwrap_or(body);
    Err(Box::new(ApiError {
        status: status.as_u16(),
        message,
    }))
}

async fn read_json<T: DeserializeOwned>(request: RequestBuilder) -> CliResult<T> {
    Ok(send(request).await?.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::{ApiError, HangarClient, filter_params, normalize_server_url};
    use chrono::{TimeZone, Utc};
    use hangar_core::{
        PageRequest, ShipDraft, ShipFilter, ShipOrder, ShipQuery, ShipType, ShipUpdate,
    };
    use httpmock::prelude::*;
    use serde_json::json;

    fn ship_json(id: i64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "planet": "Mars",
            "shipType": "MILITARY",
            "prodDate": Utc.with_ymd_and_hms(2995, 6, 15, 0, 0, 0).unwrap().timestamp_millis(),
            "isUsed": false,
            "speed": 0.82,
            "crewSize": 617,
            "rating": 2.62
        })
    }

    #[test]
    fn normalize_server_url_trims_trailing_slash() {
        assert_eq!(
            normalize_server_url(" http://hangar.test/ ").unwrap(),
            "http://hangar.test"
        );
        assert!(normalize_server_url("  ").is_err());
    }

    #[test]
    fn filter_params_cover_present_fields_only() {
        let filter = ShipFilter {
            planet: Some("Mars".to_string()),
            ship_type: Some(ShipType::Merchant),
            after: Some(Utc.timestamp_millis_opt(1_000).unwrap()),
            is_used: Some(true),
            max_crew_size: Some(50),
            ..ShipFilter::default()
        };
        assert_eq!(
            filter_params(&filter),
            vec![
                ("planet", "Mars".to_string()),
                ("shipType", "MERCHANT".to_string()),
                ("after", "1000".to_string()),
                ("isUsed", "true".to_string()),
                ("maxCrewSize", "50".to_string()),
            ]
        );
        assert!(filter_params(&ShipFilter::default()).is_empty());
    }

    #[tokio::test]
    async fn list_sends_filter_order_and_page() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/ships")
                    .query_param("planet", "Mars")
                    .query_param("order", "SPEED")
                    .query_param("pageNumber", "1")
                    .query_param("pageSize", "2");
                then.status(200)
                    .json_body(json!([ship_json(4, "Orion II"), ship_json(1, "Orion III")]));
            })
            .await;

        let client = HangarClient::new(&server.base_url()).unwrap();
        let query = ShipQuery {
            filter: ShipFilter {
                planet: Some("Mars".to_string()),
                ..ShipFilter::default()
            },
            order: Some(ShipOrder::Speed),
            page: PageRequest::new(1, 2),
        };
        let ships = client.list(&query).await.expect("list");

        mock.assert_async().await;
        let names: Vec<_> = ships.iter().map(|ship| ship.name.as_str()).collect();
        assert_eq!(names, vec!["Orion II", "Orion III"]);
    }

    #[tokio::test]
    async fn count_parses_number() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/ships/count")
                    .query_param("shipType", "MILITARY");
                then.status(200).json_body(json!(7));
            })
            .await;

        let client = HangarClient::new(&server.base_url()).unwrap();
        let filter = ShipFilter {
            ship_type: Some(ShipType::Military),
            ..ShipFilter::default()
        };
        assert_eq!(client.count(&filter).await.expect("count"), 7);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_maps_error_body_to_api_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/ships/99");
                then.status(404)
                    .json_body(json!({ "message": "ship 99 not found" }));
            })
            .await;

        let client = HangarClient::new(&server.base_url()).unwrap();
        let err = client.get(99).await.expect_err("missing ship");
        let api_error = err.downcast_ref::<ApiError>().expect("api error");
        assert_eq!(
            api_error,
            &ApiError {
                status: 404,
                message: "ship 99 not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn create_posts_camel_case_draft() {
        let server = MockServer::start_async().await;
        let prod_date = Utc.with_ymd_and_hms(2995, 6, 15, 0, 0, 0).unwrap();
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/ships").json_body(json!({
                    "name": "Orion III",
                    "planet": "Mars",
                    "shipType": "MILITARY",
                    "prodDate": prod_date.timestamp_millis(),
                    "speed": 0.82,
                    "crewSize": 617
                }));
                then.status(200).json_body(ship_json(1, "Orion III"));
            })
            .await;

        let client = HangarClient::new(&server.base_url()).unwrap();
        let draft = ShipDraft {
            name: "Orion III".to_string(),
            planet: "Mars".to_string(),
            ship_type: ShipType::Military,
            prod_date,
            is_used: None,
            speed: 0.82,
            crew_size: 617,
        };
        let ship = client.create(&draft).await.expect("create");

        mock.assert_async().await;
        assert_eq!(ship.id, 1);
        assert_eq!(ship.rating, 2.62);
    }

    #[tokio::test]
    async fn update_posts_only_present_fields() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/ships/1")
                    .json_body(json!({ "speed": 0.5, "isUsed": true }));
                then.status(200).json_body(ship_json(1, "Orion III"));
            })
            .await;

        let client = HangarClient::new(&server.base_url()).unwrap();
        let update = ShipUpdate {
            speed: Some(0.5),
            is_used: Some(true),
            ..ShipUpdate::default()
        };
        client.update(1, &update).await.expect("update");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_accepts_empty_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/rest/ships/3");
                then.status(200);
            })
            .await;

        let client = HangarClient::new(&server.base_url()).unwrap();
        client.delete(3).await.expect("delete");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept_verbatim() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/rest/ships/3");
                then.status(500).body("boom");
            })
            .await;

        let client = HangarClient::new(&server.base_url()).unwrap();
        let err = client.delete(3).await.expect_err("server error");
        assert_eq!(err.to_string(), "server returned 500: boom");
    }
}
