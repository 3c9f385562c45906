//! # Device: worker holding the last reading of one device.
//!
//! One worker exists per (group id, device id). It is spawned by its
//! [`Group`](crate::Group) and addressed directly by callers through the
//! [`DeviceRef`] returned at registration; the group is not on the data path.
//!
//! ## Rules
//! - `RecordTemperature` overwrites unconditionally; no range validation.
//! - `ReadTemperature` answers `None` until a value has been recorded.
//! - No failure states: a worker either runs or has stopped.

use async_trait::async_trait;

use super::messages::{DeviceMsg, DeviceRef, RespondTemperature, TemperatureRecorded};
use crate::core::{Actor, Context};
use crate::error::AskError;
use crate::ids::{DeviceId, GroupId};

/// Device worker state.
pub struct Device {
    group_id: GroupId,
    device_id: DeviceId,
    last_temperature: Option<f64>,
}

impl Device {
    /// Creates a worker with no reading.
    pub fn new(group_id: impl Into<GroupId>, device_id: impl Into<DeviceId>) -> Self {
        Self {
            group_id: group_id.into(),
            device_id: device_id.into(),
            last_temperature: None,
        }
    }
}

#[async_trait]
impl Actor for Device {
    type Msg = DeviceMsg;

    fn name(&self) -> String {
        format!("device:{}/{}", self.group_id, self.device_id)
    }

    async fn handle(&mut self, msg: DeviceMsg, _ctx: &mut Context<Self>) {
        match msg {
            DeviceMsg::RecordTemperature {
                request_id,
                value,
                reply_to,
            } => {
                self.last_temperature = Some(value);
                reply_to.tell(TemperatureRecorded { request_id });
            }
            DeviceMsg::ReadTemperature {
                request_id,
                reply_to,
            } => {
                reply_to.tell(RespondTemperature {
                    request_id,
                    value: self.last_temperature,
                });
            }
        }
    }
}

impl DeviceRef {
    /// Records `value` and waits for the acknowledgement.
    pub async fn record_temperature(
        &self,
        request_id: u64,
        value: f64,
    ) -> Result<TemperatureRecorded, AskError> {
        self.ask_timeout(self.default_timeout(), |reply_to| {
            DeviceMsg::RecordTemperature {
                request_id,
                value,
                reply_to,
            }
        })
        .await
    }

    /// Reads the last recorded value.
    pub async fn read_temperature(&self, request_id: u64) -> Result<RespondTemperature, AskError> {
        self.ask_timeout(self.default_timeout(), |reply_to| {
            DeviceMsg::ReadTemperature {
                request_id,
                reply_to,
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::System;
    use crate::testkit::Probe;
    use std::time::Duration;

    const WITHIN: Duration = Duration::from_secs(3);

    #[tokio::test]
    async fn test_reply_with_empty_reading_if_no_temperature_is_known() {
        let system = System::builder(Config::default()).build();
        let device = system.spawn(Device::new("group", "device"));

        let reply = device.read_temperature(42).await.unwrap();
        assert_eq!(reply.request_id, 42);
        assert_eq!(reply.value, None);
    }

    #[tokio::test]
    async fn test_reply_with_latest_temperature_reading() {
        let system = System::builder(Config::default()).build();
        let device = system.spawn(Device::new("group", "device"));
        let mut recorded = Probe::new();
        let mut read = Probe::new();

        device
            .tell(DeviceMsg::RecordTemperature {
                request_id: 1,
                value: 24.0,
                reply_to: recorded.reply_to(),
            })
            .unwrap();
        assert_eq!(recorded.expect_msg(WITHIN).await.request_id, 1);

        device
            .tell(DeviceMsg::ReadTemperature {
                request_id: 2,
                reply_to: read.reply_to(),
            })
            .unwrap();
        let reply = read.expect_msg(WITHIN).await;
        assert_eq!(reply.request_id, 2);
        assert_eq!(reply.value, Some(24.0));

        device.record_temperature(3, 55.0).await.unwrap();
        let reply = device.read_temperature(4).await.unwrap();
        assert_eq!(reply, RespondTemperature { request_id: 4, value: Some(55.0) });
    }

    #[tokio::test]
    async fn test_accepts_any_value_without_validation() {
        let system = System::builder(Config::default()).build();
        let device = system.spawn(Device::new("group", "device"));

        device.record_temperature(0, -273.15).await.unwrap();
        device.record_temperature(1, 1.0e9).await.unwrap();
        assert_eq!(device.read_temperature(2).await.unwrap().value, Some(1.0e9));
    }

    #[tokio::test]
    async fn test_stopped_device_rejects_requests() {
        let system = System::builder(Config::default()).build();
        let device = system.spawn(Device::new("group", "device"));
        assert_eq!(device.name(), "device:group/device");

        device.stop();
        let watched = device.clone();
        crate::testkit::await_assert(WITHIN, Duration::from_millis(10), move || {
            let terminated = watched.is_terminated();
            async move { if terminated { Ok(()) } else { Err("still running") } }
        })
        .await
        .unwrap();

        let err = device.read_temperature(0).await.unwrap_err();
        assert_eq!(err.as_label(), "ask_stopped");
    }
}
