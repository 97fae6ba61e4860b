//! Private REST client for OpenAudio appliance communication
//!
//! This crate provides a minimal blocking JSON client specifically designed
//! for talking to the OpenAudio REST API. It knows nothing about the shape of
//! the API itself: callers hand it a host and a path and get back typed JSON
//! or a [`RestError`].

mod error;

pub use error::RestError;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A minimal JSON client for the appliance REST API
#[derive(Debug, Clone)]
pub struct RestClient {
    agent: ureq::Agent,
}

impl RestClient {
    /// Create a new REST client with default configuration
    pub fn new() -> Self {
        Self::with_timeouts(Duration::from_secs(5), Duration::from_secs(10))
    }

    /// Create a client with explicit connect and read timeouts
    pub fn with_timeouts(connect: Duration, read: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(connect)
                .timeout_read(read)
                .timeout_write(read)
                .build(),
        }
    }

    /// Issue a GET and decode the JSON body
    ///
    /// # Arguments
    /// * `host` - Appliance address, `ip` or `ip:port`
    /// * `path` - Path below the host, without a leading slash
    pub fn get_json<T: DeserializeOwned>(&self, host: &str, path: &str) -> Result<T, RestError> {
        let url = build_url(host, path);
        tracing::trace!("GET {}", url);

        let response = self.agent.get(&url).call().map_err(map_ureq_error)?;
        decode(ensure_success(response)?)
    }

    /// Issue a PUT with a JSON body and decode the JSON response
    pub fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        host: &str,
        path: &str,
        body: &B,
    ) -> Result<T, RestError> {
        let response = self.put(host, path, body)?;
        decode(response)
    }

    /// Issue a PUT with a JSON body, ignoring whatever the appliance sends back
    pub fn put_json_discard<B: Serialize>(
        &self,
        host: &str,
        path: &str,
        body: &B,
    ) -> Result<(), RestError> {
        self.put(host, path, body).map(|_| ())
    }

    fn put<B: Serialize>(&self, host: &str, path: &str, body: &B) -> Result<ureq::Response, RestError> {
        let url = build_url(host, path);
        tracing::trace!("PUT {}", url);

        let response = self
            .agent
            .put(&url)
            .send_json(body)
            .map_err(map_ureq_error)?;
        ensure_success(response)
    }
}

impl Default for RestClient {
    fn default() -> Self {
        Self::new()
    }
}

fn build_url(host: &str, path: &str) -> String {
    format!("http://{}/{}", host, path.trim_start_matches('/'))
}

fn ensure_success(response: ureq::Response) -> Result<ureq::Response, RestError> {
    // ureq only reports 4xx/5xx as errors
    match response.status() {
        200..=299 => Ok(response),
        status => Err(RestError::Status(status)),
    }
}

fn decode<T: DeserializeOwned>(response: ureq::Response) -> Result<T, RestError> {
    response
        .into_json::<T>()
        .map_err(|e| RestError::Parse(e.to_string()))
}

fn map_ureq_error(error: ureq::Error) -> RestError {
    match error {
        ureq::Error::Status(code, _) => RestError::Status(code),
        ureq::Error::Transport(transport) => RestError::Network(transport.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ids {
        device_ids: Vec<String>,
    }

    #[test]
    fn test_rest_client_creation() {
        let _client = RestClient::new();
        let _default_client = RestClient::default();
    }

    #[test]
    fn test_build_url_strips_leading_slash() {
        assert_eq!(
            build_url("192.168.1.10", "/api/v3/zones"),
            "http://192.168.1.10/api/v3/zones"
        );
        assert_eq!(
            build_url("192.168.1.10:8080", "api/v3/zones"),
            "http://192.168.1.10:8080/api/v3/zones"
        );
    }

    #[test]
    fn test_get_json_decodes_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/v3/devices/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"device_ids": ["amp-1"]}"#)
            .create();

        let client = RestClient::new();
        let ids: Ids = client.get_json(&server.host_with_port(), "api/v3/devices/").unwrap();

        assert_eq!(ids.device_ids, vec!["amp-1".to_string()]);
        mock.assert();
    }

    #[test]
    fn test_get_json_maps_error_status() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("GET", "/api/v3/zones").with_status(503).create();

        let client = RestClient::new();
        let result: Result<Ids, _> = client.get_json(&server.host_with_port(), "api/v3/zones");

        match result.unwrap_err() {
            RestError::Status(code) => assert_eq!(code, 503),
            other => panic!("Expected RestError::Status, got {:?}", other),
        }
    }

    #[test]
    fn test_get_json_reports_bad_body_as_parse_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/api/v3/zones")
            .with_status(200)
            .with_body("not json")
            .create();

        let client = RestClient::new();
        let result: Result<Ids, _> = client.get_json(&server.host_with_port(), "api/v3/zones");

        assert!(matches!(result, Err(RestError::Parse(_))));
    }

    #[test]
    fn test_put_json_discard_sends_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("PUT", "/api/v3/zones/amp-1-z1/volume")
            .match_body(mockito::Matcher::JsonString(r#"{"volume": 40}"#.to_string()))
            .with_status(200)
            .create();

        let client = RestClient::new();
        client
            .put_json_discard(
                &server.host_with_port(),
                "api/v3/zones/amp-1-z1/volume",
                &serde_json::json!({ "volume": 40 }),
            )
            .unwrap();

        mock.assert();
    }

    #[test]
    fn test_unreachable_host_is_network_error() {
        let client = RestClient::with_timeouts(Duration::from_millis(200), Duration::from_millis(200));
        // Port 9 (discard) on localhost is closed on any sane test host
        let result: Result<Ids, _> = client.get_json("127.0.0.1:9", "api/v3/devices/");

        assert!(matches!(result, Err(RestError::Network(_))));
    }
}
