//! Group registry message types.

use std::collections::HashSet;

use super::actor::Group;
use crate::core::{ActorRef, ReplyTo, Terminated};
use crate::device::DeviceRef;
use crate::ids::{DeviceId, GroupId};

/// Handle to a running group registry.
pub type GroupRef = ActorRef<Group>;

/// Request to track a device, addressed to a group by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTrackDevice {
    pub group_id: GroupId,
    pub device_id: DeviceId,
}

impl RequestTrackDevice {
    pub fn new(group_id: impl Into<GroupId>, device_id: impl Into<DeviceId>) -> Self {
        Self {
            group_id: group_id.into(),
            device_id: device_id.into(),
        }
    }
}

/// Reply to a successful [`RequestTrackDevice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRegistered {
    /// Handle to the (new or existing) worker.
    pub device: DeviceRef,
}

/// Reply to [`GroupMsg::DeviceList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyDeviceList {
    /// Echo of the request's correlation id.
    pub request_id: u64,
    /// Ids of devices known to be live when the request was processed.
    pub ids: HashSet<DeviceId>,
}

/// Mailbox of a group registry.
#[derive(Debug)]
pub enum GroupMsg {
    /// Register a device (idempotent). Requests for another group id are
    /// dropped without a reply.
    TrackDevice {
        request: RequestTrackDevice,
        reply_to: ReplyTo<DeviceRegistered>,
    },

    /// Snapshot of the live device ids.
    DeviceList {
        request_id: u64,
        reply_to: ReplyTo<ReplyDeviceList>,
    },

    /// A watched worker stopped; delivered by the runtime.
    WorkerTerminated(Terminated),
}

impl From<Terminated> for GroupMsg {
    fn from(terminated: Terminated) -> Self {
        GroupMsg::WorkerTerminated(terminated)
    }
}
