//! # Device workers.
//!
//! - [`Device`] - the worker actor holding one reading
//! - [`DeviceMsg`] - its mailbox type, with replies [`TemperatureRecorded`] and [`RespondTemperature`]
//! - [`DeviceRef`] - handle to a running worker, with typed ask helpers

mod actor;
mod messages;

pub use actor::Device;
pub use messages::{DeviceMsg, DeviceRef, RespondTemperature, TemperatureRecorded};
