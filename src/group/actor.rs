//! # Group: per-group registry of device workers.
//!
//! The group owns the mapping `DeviceId -> DeviceRef` for one group id. It
//! creates workers on demand, answers membership queries, and drops workers
//! from the mapping once the runtime reports their termination.
//!
//! ## Architecture
//! ```text
//! caller ── TrackDevice(group, device) ──► Group mailbox
//!                                              │
//!   group id mismatch  ────────────────────────┼─► dropped (TrackIgnored event, no reply)
//!   live worker mapped ────────────────────────┼─► reply existing DeviceRef
//!   otherwise ─► ctx.spawn(Device) ─► ctx.watch ┴─► insert ─► reply new DeviceRef
//!
//! caller ── DeviceList(request_id) ──► reply { request_id, ids }
//!
//! worker exits ─► runtime ─► WorkerTerminated(Terminated) ─► Group mailbox ─► remove entry
//! ```
//!
//! ## Rules
//! - The group is the **only** writer of its mapping; all three events go
//!   through the same mailbox and are handled one at a time.
//! - At most **one** worker per device id; repeated tracking returns the same handle.
//! - A worker is watched **before** its handle is handed out.
//! - Once a termination is processed, no later `DeviceList` includes that device.
//! - Notifications for workers no longer in the mapping are ignored.

use std::collections::HashMap;

use async_trait::async_trait;

use super::messages::{
    DeviceRegistered, GroupMsg, GroupRef, ReplyDeviceList, RequestTrackDevice,
};
use crate::core::{Actor, ActorId, Context, ReplyTo, Terminated};
use crate::device::{Device, DeviceRef};
use crate::error::AskError;
use crate::events::{Event, EventKind};
use crate::ids::{DeviceId, GroupId};

/// Device registry for one group id.
pub struct Group {
    group_id: GroupId,
    devices: HashMap<DeviceId, DeviceRef>,
    by_actor: HashMap<ActorId, DeviceId>,
}

impl Group {
    /// Creates an empty registry for `group_id`.
    pub fn new(group_id: impl Into<GroupId>) -> Self {
        Self {
            group_id: group_id.into(),
            devices: HashMap::new(),
            by_actor: HashMap::new(),
        }
    }

    fn track(
        &mut self,
        request: RequestTrackDevice,
        reply_to: ReplyTo<DeviceRegistered>,
        ctx: &mut Context<Self>,
    ) {
        if request.group_id != self.group_id {
            ctx.bus().publish(
                Event::new(EventKind::TrackIgnored)
                    .with_group(self.group_id.clone())
                    .with_device(request.device_id)
                    .with_reason(request.group_id),
            );
            return;
        }

        let stale = match self.devices.get(&request.device_id) {
            Some(existing) => match existing.exit_reason() {
                None => {
                    reply_to.tell(DeviceRegistered {
                        device: existing.clone(),
                    });
                    return;
                }
                // Exited, notification still queued behind this request.
                Some(reason) => Some((existing.id(), reason)),
            },
            None => None,
        };
        if let Some((actor_id, reason)) = stale {
            self.forget(actor_id, reason.as_label(), ctx);
        }

        let device = ctx.spawn(Device::new(self.group_id.clone(), request.device_id.clone()));
        ctx.watch(&device);
        self.by_actor.insert(device.id(), request.device_id.clone());
        self.devices.insert(request.device_id.clone(), device.clone());

        ctx.bus().publish(
            Event::new(EventKind::DeviceRegistered)
                .with_group(self.group_id.clone())
                .with_device(request.device_id)
                .with_actor(device.name()),
        );
        reply_to.tell(DeviceRegistered { device });
    }

    fn reply_device_list(&self, request_id: u64, reply_to: ReplyTo<ReplyDeviceList>) {
        reply_to.tell(ReplyDeviceList {
            request_id,
            ids: self.devices.keys().cloned().collect(),
        });
    }

    /// Removes the entry owned by `actor_id`, if it is still the mapped worker.
    fn forget(&mut self, actor_id: ActorId, reason: &str, ctx: &Context<Self>) {
        let Some(device_id) = self.by_actor.remove(&actor_id) else {
            return;
        };
        if self
            .devices
            .get(&device_id)
            .is_some_and(|mapped| mapped.id() == actor_id)
        {
            self.devices.remove(&device_id);
        }
        ctx.bus().publish(
            Event::new(EventKind::DeviceRemoved)
                .with_group(self.group_id.clone())
                .with_device(device_id)
                .with_reason(reason),
        );
    }
}

#[async_trait]
impl Actor for Group {
    type Msg = GroupMsg;

    fn name(&self) -> String {
        format!("group:{}", self.group_id)
    }

    async fn handle(&mut self, msg: GroupMsg, ctx: &mut Context<Self>) {
        match msg {
            GroupMsg::TrackDevice { request, reply_to } => self.track(request, reply_to, ctx),
            GroupMsg::DeviceList {
                request_id,
                reply_to,
            } => self.reply_device_list(request_id, reply_to),
            GroupMsg::WorkerTerminated(Terminated { id, reason, .. }) => {
                self.forget(id, reason.as_label(), ctx)
            }
        }
    }
}

impl GroupRef {
    /// Tracks a device and returns its worker handle.
    ///
    /// `Ok(None)` means the group dropped the request without replying, which
    /// is what happens when `group_id` is not this group's id.
    pub async fn track_device(
        &self,
        group_id: impl Into<GroupId>,
        device_id: impl Into<DeviceId>,
    ) -> Result<Option<DeviceRef>, AskError> {
        let request = RequestTrackDevice::new(group_id, device_id);
        let res = self
            .ask_timeout(self.default_timeout(), |reply_to| GroupMsg::TrackDevice {
                request,
                reply_to,
            })
            .await;
        match res {
            Ok(DeviceRegistered { device }) => Ok(Some(device)),
            Err(AskError::NoReply { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Lists the live device ids.
    pub async fn device_list(&self, request_id: u64) -> Result<ReplyDeviceList, AskError> {
        self.ask_timeout(self.default_timeout(), |reply_to| GroupMsg::DeviceList {
            request_id,
            reply_to,
        })
        .await
    }
}
