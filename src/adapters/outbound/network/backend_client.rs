use crate::ports::outbound::{ShipmentRepository, VesselPositionRepository};
use crate::shared::error::AtlasError;
use crate::shared::Result;
use crate::shipment_tracking::domain::{RawShipmentRecord, VesselPosition, VesselTrackPoint};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

const SHIPMENTS_TABLE: &str = "registros";
const POSITIONS_TABLE: &str = "vessel_positions";
const HISTORY_TABLE: &str = "vessel_position_history";

/// Rows requested per page when paging through shipments.
const PAGE_SIZE: usize = 1000;
/// Cap on history points per request.
const HISTORY_LIMIT: usize = 1000;

/// BackendClient adapter reading shipments and positions over the backend's
/// REST interface
///
/// Queries follow PostgREST conventions: `column=op.value` filters,
/// `select`, `order`, `limit` and `offset` parameters, and the API key sent
/// both as `apikey` and as a bearer token. Requests are not retried; a
/// failure ends the operation that triggered it.
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl BackendClient {
    /// Creates a client for the backend at `base_url`
    ///
    /// # Errors
    /// Returns an error if the URL is not http(s) or the HTTP client cannot
    /// be built
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(AtlasError::Validation {
                message: format!(
                    "backend URL must start with http:// or https:// (got '{}')",
                    base_url
                ),
            }
            .into());
        }

        let user_agent = format!("shipment-atlas/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn table_url(&self, table: &str, query: &str) -> String {
        format!("{}/rest/v1/{}?{}", self.base_url, table, query)
    }

    /// Query for one page of live shipments, newest reference first.
    fn shipments_query(offset: usize) -> String {
        format!(
            "select=*&deleted_at=is.null&ref_asli=not.is.null&order=ref_asli.desc,id.desc&limit={}&offset={}",
            PAGE_SIZE, offset
        )
    }

    /// PostgREST `in.(...)` filter with each name quoted and URL-encoded.
    fn in_filter(column: &str, values: &[String]) -> String {
        let quoted: Vec<String> = values
            .iter()
            .map(|v| format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
            .collect();
        format!(
            "{}=in.{}",
            column,
            urlencoding::encode(&format!("({})", quoted.join(",")))
        )
    }

    fn positions_query(vessel_names: &[String]) -> String {
        format!(
            "select=vessel_name,last_lat,last_lon,last_position_at,last_api_call_at&{}",
            Self::in_filter("vessel_name", vessel_names)
        )
    }

    fn history_query(vessel_names: &[String]) -> String {
        format!(
            "select=vessel_name,lat,lon,position_at&{}&order=position_at.asc&limit={}",
            Self::in_filter("vessel_name", vessel_names),
            HISTORY_LIMIT
        )
    }

    async fn get_rows<T: DeserializeOwned>(&self, table: &str, query: &str) -> Result<Vec<T>> {
        let backend_error = |details: String| -> anyhow::Error {
            AtlasError::BackendRequest {
                resource: table.to_string(),
                details,
            }
            .into()
        };

        let mut request = self.client.get(self.table_url(table, query));
        if let Some(key) = &self.api_key {
            request = request
                .header("apikey", key)
                .header("Authorization", format!("Bearer {}", key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| backend_error(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(backend_error(format!(
                "status {}{}",
                status,
                if body.is_empty() {
                    String::new()
                } else {
                    format!(": {}", body.chars().take(200).collect::<String>())
                }
            )));
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| backend_error(format!("unexpected response body: {}", e)))
    }
}

#[async_trait]
impl ShipmentRepository for BackendClient {
    async fn fetch_shipments(&self) -> Result<Vec<RawShipmentRecord>> {
        let mut rows = Vec::new();
        loop {
            let page: Vec<RawShipmentRecord> = self
                .get_rows(SHIPMENTS_TABLE, &Self::shipments_query(rows.len()))
                .await?;
            let page_len = page.len();
            rows.extend(page);
            if page_len < PAGE_SIZE {
                break;
            }
        }
        Ok(rows)
    }
}

#[async_trait]
impl VesselPositionRepository for BackendClient {
    async fn fetch_positions(&self, vessel_names: &[String]) -> Result<Vec<VesselPosition>> {
        if vessel_names.is_empty() {
            return Ok(Vec::new());
        }
        self.get_rows(POSITIONS_TABLE, &Self::positions_query(vessel_names))
            .await
    }

    async fn fetch_track_history(
        &self,
        vessel_names: &[String],
    ) -> Result<Vec<VesselTrackPoint>> {
        if vessel_names.is_empty() {
            return Ok(Vec::new());
        }
        self.get_rows(HISTORY_TABLE, &Self::history_query(vessel_names))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_url() {
        let err = BackendClient::new("ftp://example.com", None)
            .err()
            .unwrap()
            .to_string();
        assert!(err.contains("http:// or https://"));
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let client = BackendClient::new("https://db.example.com/", None).unwrap();
        assert_eq!(
            client.table_url("registros", "select=*"),
            "https://db.example.com/rest/v1/registros?select=*"
        );
    }

    #[test]
    fn test_shipments_query_excludes_deleted() {
        let query = BackendClient::shipments_query(2000);
        assert!(query.contains("deleted_at=is.null"));
        assert!(query.contains("ref_asli=not.is.null"));
        // Pages need a total order, references alone repeat
        assert!(query.contains("&order=ref_asli.desc,id.desc&"));
        assert!(query.ends_with("limit=1000&offset=2000"));
    }

    #[test]
    fn test_in_filter_quotes_and_encodes() {
        let filter = BackendClient::in_filter(
            "vessel_name",
            &["MSC ANNA".to_string(), "CAP SAN \"X\"".to_string()],
        );
        assert_eq!(
            filter,
            "vessel_name=in.%28%22MSC%20ANNA%22%2C%22CAP%20SAN%20%5C%22X%5C%22%22%29"
        );
    }

    #[test]
    fn test_history_query_is_ordered_and_limited() {
        let query = BackendClient::history_query(&["MSC ANNA".to_string()]);
        assert!(query.starts_with("select=vessel_name,lat,lon,position_at&vessel_name=in."));
        assert!(query.ends_with("&order=position_at.asc&limit=1000"));
    }

    #[tokio::test]
    async fn test_empty_name_list_skips_request() {
        let client = BackendClient::new("http://127.0.0.1:9", None).unwrap();
        assert!(client.fetch_positions(&[]).await.unwrap().is_empty());
        assert!(client.fetch_track_history(&[]).await.unwrap().is_empty());
    }
}
