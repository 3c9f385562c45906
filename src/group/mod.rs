//! # Device groups.
//!
//! - [`Group`] - registry actor owning the device workers of one group id
//! - [`GroupMsg`] - its mailbox type, with request [`RequestTrackDevice`] and
//!   replies [`DeviceRegistered`] and [`ReplyDeviceList`]
//! - [`GroupRef`] - handle to a running group, with typed ask helpers

mod actor;
mod messages;

pub use actor::Group;
pub use messages::{DeviceRegistered, GroupMsg, GroupRef, ReplyDeviceList, RequestTrackDevice};
