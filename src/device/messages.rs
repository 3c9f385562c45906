//! Device worker message types.

use super::actor::Device;
use crate::core::{ActorRef, ReplyTo};

/// Handle to a running device worker.
pub type DeviceRef = ActorRef<Device>;

/// Mailbox of a device worker.
#[derive(Debug)]
pub enum DeviceMsg {
    /// Overwrite the stored reading and acknowledge.
    RecordTemperature {
        /// Caller correlation id, echoed in the reply.
        request_id: u64,
        /// New reading; stored as-is.
        value: f64,
        /// Where to send [`TemperatureRecorded`].
        reply_to: ReplyTo<TemperatureRecorded>,
    },

    /// Read the stored reading.
    ReadTemperature {
        /// Caller correlation id, echoed in the reply.
        request_id: u64,
        /// Where to send [`RespondTemperature`].
        reply_to: ReplyTo<RespondTemperature>,
    },
}

/// Acknowledgement of [`DeviceMsg::RecordTemperature`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRecorded {
    pub request_id: u64,
}

/// Reply to [`DeviceMsg::ReadTemperature`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RespondTemperature {
    pub request_id: u64,
    /// `None` until the first reading is recorded.
    pub value: Option<f64>,
}
