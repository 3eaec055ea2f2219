//! The remote, read-only index.
//!
//! Two endpoints, each fetched once per view session. No retry, no
//! client-side timeout and no cancellation: a caller that loses interest in a
//! request simply drops its result.

use crate::config::BrowserConfig;
use crate::errors::{BrowserError, BrowserResult};
use reqwest::StatusCode;
use schema::{CatalogRecord, RecordId};
use serde_json::Value;
use std::future::Future;
use tracing::debug;

/// Anything that can serve the full index and single records.
pub trait CatalogSource {
    /// `GET /pokemon`
    fn fetch_all(&self) -> impl Future<Output = BrowserResult<Vec<CatalogRecord>>> + Send;

    /// `GET /pokemon/{id}`
    fn fetch_one(&self, id: RecordId) -> impl Future<Output = BrowserResult<CatalogRecord>> + Send;
}

/// `CatalogSource` backed by the HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    config: BrowserConfig,
}

impl HttpCatalogSource {
    pub fn new(config: BrowserConfig) -> BrowserResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Body of a successful GET. `id` is the record asked for, if any.
    async fn get_text(&self, url: &str, id: Option<RecordId>) -> BrowserResult<String> {
        debug!(url, "fetching");
        let response = self.client.get(url).send().await?;
        check_status(response.status(), id)?;
        Ok(response.text().await?)
    }
}

impl CatalogSource for HttpCatalogSource {
    async fn fetch_all(&self) -> BrowserResult<Vec<CatalogRecord>> {
        let body = self.get_text(&self.config.list_url(), None).await?;
        decode_list(&body)
    }

    async fn fetch_one(&self, id: RecordId) -> BrowserResult<CatalogRecord> {
        let body = self.get_text(&self.config.record_url(id), Some(id)).await?;
        decode_record(id, &body)
    }
}

/// Rejects non-success responses before their body is decoded.
///
/// A `404` for a single record is `NotFound`; every other failure status is a
/// transport error carrying the status line.
pub fn check_status(status: StatusCode, id: Option<RecordId>) -> BrowserResult<()> {
    match (status, id) {
        (status, _) if status.is_success() => Ok(()),
        (StatusCode::NOT_FOUND, Some(id)) => Err(BrowserError::NotFound(id)),
        (status, _) => Err(BrowserError::Transport(format!("HTTP {}", status))),
    }
}

/// Decodes the body of `GET /pokemon`. Anything but a JSON array is rejected.
pub fn decode_list(body: &str) -> BrowserResult<Vec<CatalogRecord>> {
    let value: Value = serde_json::from_str(body)?;
    if !value.is_array() {
        return Err(BrowserError::InvalidPayload(
            "expected a list of Pokémon".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| BrowserError::InvalidPayload(e.to_string()))
}

/// Decodes the body of `GET /pokemon/{id}`.
///
/// The API answers unknown ids with `200` and a `{"status": 404, "message":
/// ...}` object, which maps to `NotFound`.
pub fn decode_record(id: RecordId, body: &str) -> BrowserResult<CatalogRecord> {
    let value: Value = serde_json::from_str(body)?;
    let Some(object) = value.as_object() else {
        return Err(BrowserError::InvalidPayload(
            "expected a single Pokémon".to_string(),
        ));
    };

    if !object.contains_key("pokedex_id") && object.contains_key("status") {
        return Err(BrowserError::NotFound(id));
    }

    serde_json::from_value(value).map_err(|e| BrowserError::InvalidPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const LIST_BODY: &str = r#"[
        { "pokedex_id": 0, "name": { "fr": "MissingNo.", "en": "MissingNo.", "jp": "けつばん" }, "types": null },
        { "pokedex_id": 1, "name": { "fr": "Bulbizarre", "en": "Bulbasaur", "jp": "フシギダネ" },
          "types": [ { "name": "Plante", "image": "plante.png" } ] }
    ]"#;

    #[test]
    fn test_decode_list() {
        let records = decode_list(LIST_BODY).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_placeholder());
        assert_eq!(records[1].types[0].label, "Plante");
    }

    #[test]
    fn test_decode_list_rejects_non_array() {
        let err = decode_list(r#"{ "status": 500, "message": "oops" }"#).unwrap_err();
        assert!(matches!(err, BrowserError::InvalidPayload(_)));
    }

    #[test]
    fn test_decode_list_rejects_non_json() {
        let err = decode_list("<html>Bad gateway</html>").unwrap_err();
        assert!(matches!(err, BrowserError::Parse(_)));
    }

    #[test]
    fn test_decode_empty_list() {
        assert!(decode_list("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_record() {
        let body = r#"{ "pokedex_id": 25, "name": { "fr": "Pikachu", "en": "Pikachu", "jp": "ピカチュウ" } }"#;
        let record = decode_record(25, body).unwrap();
        assert_eq!(record.id, 25);
        assert_eq!(record.display_name(), "Pikachu");
    }

    #[test]
    fn test_decode_record_not_found_shape() {
        let body = r#"{ "status": 404, "message": "Impossible de trouver le Pokémon" }"#;
        assert_eq!(decode_record(9999, body).unwrap_err(), BrowserError::NotFound(9999));
    }

    #[test]
    fn test_decode_record_rejects_array() {
        let err = decode_record(1, "[]").unwrap_err();
        assert!(matches!(err, BrowserError::InvalidPayload(_)));
    }

    #[test]
    fn test_decode_record_missing_name_is_invalid() {
        let err = decode_record(1, r#"{ "pokedex_id": 1 }"#).unwrap_err();
        assert!(matches!(err, BrowserError::InvalidPayload(_)));
    }

    #[rstest]
    #[case::ok_list(StatusCode::OK, None, Ok(()))]
    #[case::ok_record(StatusCode::OK, Some(25), Ok(()))]
    #[case::missing_record(StatusCode::NOT_FOUND, Some(9999), Err(BrowserError::NotFound(9999)))]
    #[case::missing_list(
        StatusCode::NOT_FOUND,
        None,
        Err(BrowserError::Transport("HTTP 404 Not Found".to_string()))
    )]
    #[case::server_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(1),
        Err(BrowserError::Transport("HTTP 500 Internal Server Error".to_string()))
    )]
    #[case::bad_gateway(
        StatusCode::BAD_GATEWAY,
        None,
        Err(BrowserError::Transport("HTTP 502 Bad Gateway".to_string()))
    )]
    fn test_check_status(
        #[case] status: StatusCode,
        #[case] id: Option<RecordId>,
        #[case] expected: BrowserResult<()>,
    ) {
        assert_eq!(check_status(status, id), expected);
    }
}
