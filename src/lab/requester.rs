//! HTTP client for the lab sensor endpoints.
//!
//! This module provides the [`LabRequester`] struct querying the light and
//! wifi endpoints configured in the `lab` section of the configuration.

use log::{debug, info};
use mockall::automock;
use reqwest::Client;
use serde_json::Value;

use crate::{
    config::{Lab, Sensor},
    lab::{LabError, SensorKind, status::parse_status},
};

/// HTTP client for requesting the lab sensors.
///
/// # Examples
///
/// ```no_run
/// let requester = LabRequester::new(&config.lab);
/// let lights_on = requester.get_status(SensorKind::Light).await.unwrap();
/// ```
pub struct LabRequester {
    /// Light sensor endpoint
    light: Sensor,
    /// Wifi sensor endpoint
    wifi: Sensor,
    /// HTTP client
    client: Client,
}

/// Trait for reading the lab sensors.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait Requester {
    /// Returns `true` if the sensor reports the lab as occupied.
    async fn get_status(&self, sensor: SensorKind) -> Result<bool, LabError>;
}

impl LabRequester {
    /// Create a new [LabRequester] from the `lab` configuration section.
    pub fn new(lab: &Lab) -> Self {
        LabRequester {
            light: lab.light.clone(),
            wifi: lab.wifi.clone(),
            client: Client::new(),
        }
    }

    fn sensor(&self, sensor: SensorKind) -> &Sensor {
        match sensor {
            SensorKind::Light => &self.light,
            SensorKind::Wifi => &self.wifi,
        }
    }
}

impl Requester for LabRequester {
    /// Request the sensor endpoint and read its boolean-like field.
    ///
    /// The endpoint returns a json object such as:
    /// ```json
    /// { "state": "on" }
    /// ```
    async fn get_status(&self, sensor: SensorKind) -> Result<bool, LabError> {
        let Sensor { url, field } = self.sensor(sensor);
        info!("request {} sensor", sensor);
        debug!("request {}", url);

        let body: Value = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("response from {} -> {}", url, body);

        parse_status(&body, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_lab(url: &str) -> Lab {
        Lab {
            light: Sensor {
                url: format!("{}/light", url),
                field: "state".to_owned(),
            },
            wifi: Sensor {
                url: format!("{}/wifi", url),
                field: "connected".to_owned(),
            },
        }
    }

    #[tokio::test]
    async fn test_get_light_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/light")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"state": "on"}"#)
            .create_async()
            .await;

        let requester = LabRequester::new(&create_lab(&server.url()));
        let status = requester.get_status(SensorKind::Light).await.unwrap();

        assert!(status);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_wifi_status_uses_its_field() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/wifi")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"state": true, "connected": 0}"#)
            .create_async()
            .await;

        let requester = LabRequester::new(&create_lab(&server.url()));
        let status = requester.get_status(SensorKind::Wifi).await.unwrap();

        assert!(!status);
    }

    #[tokio::test]
    async fn test_get_status_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/light")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"unexpected": "value"}"#)
            .create_async()
            .await;

        let requester = LabRequester::new(&create_lab(&server.url()));
        let result = requester.get_status(SensorKind::Light).await;

        assert!(matches!(result, Err(LabError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_get_status_not_json() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/light")
            .with_status(200)
            .with_body("lights are on")
            .create_async()
            .await;

        let requester = LabRequester::new(&create_lab(&server.url()));
        let result = requester.get_status(SensorKind::Light).await;

        assert!(matches!(result, Err(LabError::Request(_))));
    }

    #[tokio::test]
    async fn test_get_status_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/wifi")
            .with_status(500)
            .create_async()
            .await;

        let requester = LabRequester::new(&create_lab(&server.url()));
        let result = requester.get_status(SensorKind::Wifi).await;

        assert!(matches!(result, Err(LabError::Request(_))));
    }
}
