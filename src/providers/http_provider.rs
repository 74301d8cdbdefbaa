use crate::core::{Dataset, DatasetProvider};
use crate::providers::util::with_retry;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Response;
use tracing::debug;

const RETRIES: usize = 3;
const RETRY_DELAY_MS: u64 = 500;

/// Fetches `countries.json` from a URL.
pub struct HttpDatasetProvider {
    url: String,
}

impl HttpDatasetProvider {
    pub fn new(url: &str) -> Self {
        HttpDatasetProvider {
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl DatasetProvider for HttpDatasetProvider {
    async fn fetch_dataset(&self) -> Result<Dataset> {
        debug!("Requesting country dataset from {}", self.url);

        let client = reqwest::Client::builder()
            .user_agent("cashdrag/1.0")
            .build()?;
        let response = with_retry(
            || async {
                client
                    .get(&self.url)
                    .send()
                    .await
                    .and_then(Response::error_for_status)
            },
            RETRIES,
            RETRY_DELAY_MS,
        )
        .await
        .with_context(|| format!("Dataset request to {} failed", self.url))?;

        let response_text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text from {}", self.url))?;

        if response_text.trim().is_empty() {
            return Err(anyhow!("Received empty dataset from {}", self.url));
        }

        let dataset = Dataset::from_json(&response_text)
            .with_context(|| format!("Failed to parse dataset from {}", self.url))?;
        debug!("Fetched {} countries", dataset.countries.len());
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn request_count(mock_server: &MockServer) -> usize {
        mock_server
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }

    async fn create_dataset_mock_server(mock_response: &str, status_code: u16) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/countries.json"))
            .respond_with(ResponseTemplate::new(status_code).set_body_string(mock_response))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_successful_dataset_fetch() {
        let mock_response = r#"{
            "source": "IMF data.imf.org",
            "countries": [{
                "id": "GB", "name": "United Kingdom", "currencyCode": "GBP", "currencySymbol": "£",
                "cpi": {"latest": 138.2, "latestDate": "2025-M05", "previous": 133.9, "previousDate": "2024-M05"},
                "rate": {"value": 4.25, "date": "2025-M05"}
            }]
        }"#;
        let mock_server = create_dataset_mock_server(mock_response, 200).await;
        let provider = HttpDatasetProvider::new(&format!("{}/countries.json", mock_server.uri()));

        let dataset = provider.fetch_dataset().await.unwrap();
        assert_eq!(dataset.source.as_deref(), Some("IMF data.imf.org"));
        assert_eq!(dataset.find("gb").unwrap().currency_symbol(), "£");
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let mock_server = create_dataset_mock_server("Not found", 404).await;
        let provider = HttpDatasetProvider::new(&format!("{}/countries.json", mock_server.uri()));

        let err = provider.fetch_dataset().await.unwrap_err();
        assert!(format!("{err:#}").contains("404"));
        // Client errors are final
        assert_eq!(request_count(&mock_server).await, 1);
    }

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let mock_server = create_dataset_mock_server("Service unavailable", 503).await;
        let provider = HttpDatasetProvider::new(&format!("{}/countries.json", mock_server.uri()));

        let err = provider.fetch_dataset().await.unwrap_err();
        assert!(format!("{err:#}").contains("503"));
        assert_eq!(request_count(&mock_server).await, RETRIES + 1);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/countries.json"))
            .respond_with(ResponseTemplate::new(502))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/countries.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"countries": [{"id": "JP", "name": "Japan", "inflation": 3.0}]}"#),
            )
            .mount(&mock_server)
            .await;
        let provider = HttpDatasetProvider::new(&format!("{}/countries.json", mock_server.uri()));

        let dataset = provider.fetch_dataset().await.unwrap();
        assert_eq!(dataset.find("JP").unwrap().name, "Japan");
        assert_eq!(request_count(&mock_server).await, 2);
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let mock_server = create_dataset_mock_server("<html></html>", 200).await;
        let provider = HttpDatasetProvider::new(&format!("{}/countries.json", mock_server.uri()));

        let err = provider.fetch_dataset().await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse dataset"));
    }
}
