//! Lab command handler.
//!
//! Tells whether someone is in the lab using its sensors:
//!
//! - `lab` - both the light and the wifi sub-replies, in that order
//! - `lab light` - the light sub-reply only
//! - `lab wifi` - the wifi sub-reply only
//!
//! Sensor failures are reported in the sub-reply of the failing sensor.

use futures::join;
use log::{debug, warn};

use crate::{
    commands::{
        CommandResult,
        markdown_response::{format_lab_status, format_unknown_lab_sensor},
    },
    lab::{LabError, Requester, SensorKind},
};

/// Reads the requested sensors and returns one reply per sensor.
pub async fn handle_lab<R: Requester>(requester: &R, arg: Option<&str>) -> CommandResult {
    debug!("handling lab command, sensor: {:?}", arg);

    let responses = match arg {
        None => {
            let (light, wifi) = join!(
                requester.get_status(SensorKind::Light),
                requester.get_status(SensorKind::Wifi)
            );
            vec![
                sub_reply(SensorKind::Light, light),
                sub_reply(SensorKind::Wifi, wifi),
            ]
        }
        Some(arg) => match SensorKind::from_arg(arg) {
            Some(sensor) => vec![sub_reply(sensor, requester.get_status(sensor).await)],
            None => vec![format_unknown_lab_sensor(arg)],
        },
    };

    CommandResult { responses }
}

fn sub_reply(sensor: SensorKind, status: Result<bool, LabError>) -> String {
    if let Err(e) = &status {
        warn!("failed to read the {} sensor: {}", sensor, e);
    }
    format_lab_status(sensor, &status)
}
