//! HTTP fetcher implementation
//!
//! Builds the shared HTTP client and performs one GET per seed page.
//! There are no retries: a page gets a single attempt, and any failure is
//! classified and reported back to the caller, never propagated as fatal.

use reqwest::Client;
use std::time::Duration;

/// Result of a single-attempt fetch
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched the page body
    Success {
        /// Page body content
        body: String,
    },

    /// The server answered with a non-success status
    HttpStatus {
        /// The HTTP status code
        status: u16,
    },

    /// Network error (connection refused, timeout, body read failure)
    Network {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client shared by all fetch workers
///
/// # Arguments
///
/// * `user_agent` - User agent header value for every request
/// * `timeout_secs` - Per-request timeout in seconds
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str, timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once and classifies the outcome
///
/// Redirects are followed by the client; the caller keeps using the request
/// URL as the page key regardless of where the redirect chain ended.
pub async fn fetch_page(client: &Client, url: &str) -> FetchOutcome {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();

            if !status.is_success() {
                return FetchOutcome::HttpStatus {
                    status: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchOutcome::Success { body },
                Err(e) => FetchOutcome::Network {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            if e.is_timeout() {
                FetchOutcome::Network {
                    error: "Request timeout".to_string(),
                }
            } else if e.is_connect() {
                FetchOutcome::Network {
                    error: "Connection refused".to_string(),
                }
            } else {
                FetchOutcome::Network {
                    error: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client("TestBot/1.0", 30);
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let client = build_http_client("TestBot/1.0", 5).unwrap();
        let outcome = fetch_page(&client, &format!("{}/", server.uri())).await;

        match outcome {
            FetchOutcome::Success { body } => assert_eq!(body, "<html></html>"),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client("TestBot/1.0", 5).unwrap();
        let outcome = fetch_page(&client, &format!("{}/missing", server.uri())).await;

        match outcome {
            FetchOutcome::HttpStatus { status } => assert_eq!(status, 404),
            other => panic!("expected http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_network_error() {
        // Nothing listens on this port
        let client = build_http_client("TestBot/1.0", 1).unwrap();
        let outcome = fetch_page(&client, "http://127.0.0.1:9/").await;
        assert!(matches!(outcome, FetchOutcome::Network { .. }));
    }
}
