//! Lab occupancy sensors.
//!
//! The lab exposes two HTTP endpoints answering a GET request with a JSON
//! object. Each response carries a single boolean-like field telling whether
//! the lab looks occupied:
//!
//! - the **light** sensor reports whether the lab lights are on
//! - the **wifi** sensor reports whether someone is connected to the lab wifi
//!
//! # Modules
//!
//! - `requester` - HTTP client querying the sensor endpoints
//! - `status` - Interpretation of the boolean-like JSON field
//!
//! # Examples
//!
//! ```no_run
//! use dankbot::lab::{LabRequester, Requester, SensorKind};
//!
//! # async fn example(lab: &dankbot::config::Lab) {
//! let requester = LabRequester::new(lab);
//! match requester.get_status(SensorKind::Light).await {
//!     Ok(on) => println!("lights on: {on}"),
//!     Err(e) => println!("sensor error: {e}"),
//! }
//! # }
//! ```

use std::fmt;

mod requester;
mod status;

pub use crate::lab::requester::{LabRequester, Requester};
#[cfg(test)]
pub use crate::lab::requester::MockRequester;

/// The sensors the lab exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Lab lights
    Light,
    /// Lab wifi
    Wifi,
}

impl SensorKind {
    /// Parses a `lab` command argument into a sensor.
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "light" => Some(SensorKind::Light),
            "wifi" => Some(SensorKind::Wifi),
            _ => None,
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SensorKind::Light => write!(f, "light"),
            SensorKind::Wifi => write!(f, "wifi"),
        }
    }
}

/// Errors that can occur while reading a sensor.
#[derive(Debug)]
pub enum LabError {
    /// The HTTP request failed or the body was not JSON.
    Request(reqwest::Error),
    /// The JSON body does not carry a boolean-like value in the expected field.
    Malformed(String),
}

impl fmt::Display for LabError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LabError::Request(e) => write!(f, "request failed: {e}"),
            LabError::Malformed(reason) => write!(f, "malformed response: {reason}"),
        }
    }
}

impl std::error::Error for LabError {}

impl From<reqwest::Error> for LabError {
    fn from(e: reqwest::Error) -> Self {
        LabError::Request(e)
    }
}
