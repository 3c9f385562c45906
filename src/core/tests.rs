use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::*;
use crate::config::Config;
use crate::error::RuntimeError;
use crate::events::EventKind;
use crate::testkit::{Probe, await_assert};

const WITHIN: Duration = Duration::from_secs(3);
const INTERVAL: Duration = Duration::from_millis(10);

fn system() -> Arc<System> {
    System::builder(Config::default()).build()
}

async fn wait_terminated<A: Actor>(actor: &ActorRef<A>) {
    let watched = actor.clone();
    await_assert(WITHIN, INTERVAL, move || {
        let terminated = watched.is_terminated();
        async move { if terminated { Ok(()) } else { Err("still running") } }
    })
    .await
    .unwrap();
}

/// Records every message it handles into a probe; panics on `Boom`.
struct Echo {
    name: &'static str,
    out: ReplyTo<String>,
}

enum EchoMsg {
    Say(&'static str),
    Boom,
    StopSelf,
}

#[async_trait]
impl Actor for Echo {
    type Msg = EchoMsg;

    fn name(&self) -> String {
        self.name.to_string()
    }

    async fn handle(&mut self, msg: EchoMsg, ctx: &mut Context<Self>) {
        match msg {
            EchoMsg::Say(s) => self.out.tell(s.to_string()),
            EchoMsg::Boom => panic!("boom"),
            EchoMsg::StopSelf => ctx.stop(),
        }
    }

    async fn stopped(&mut self, _ctx: &mut Context<Self>) {
        self.out.tell(format!("{} stopped", self.name));
    }
}

/// Watches targets on request and reports notifications.
struct Watcher {
    out: ReplyTo<Terminated>,
}

enum WatcherMsg {
    Watch(ActorRef<Echo>),
    Unwatch(ActorRef<Echo>, ReplyTo<bool>),
    Spawn(ReplyTo<ActorRef<Echo>>, ReplyTo<String>),
    WhoAmI(ReplyTo<(ActorId, bool)>),
    Down(Terminated),
}

impl From<Terminated> for WatcherMsg {
    fn from(t: Terminated) -> Self {
        WatcherMsg::Down(t)
    }
}

#[async_trait]
impl Actor for Watcher {
    type Msg = WatcherMsg;

    fn name(&self) -> String {
        "watcher".to_string()
    }

    async fn handle(&mut self, msg: WatcherMsg, ctx: &mut Context<Self>) {
        match msg {
            WatcherMsg::Watch(target) => ctx.watch(&target),
            WatcherMsg::Unwatch(target, reply_to) => reply_to.tell(ctx.unwatch(&target)),
            WatcherMsg::Spawn(reply_to, out) => {
                let child = ctx.spawn(Echo { name: "child", out });
                reply_to.tell(child);
            }
            WatcherMsg::WhoAmI(reply_to) => {
                reply_to.tell((ctx.myself().id(), ctx.token().is_cancelled()))
            }
            WatcherMsg::Down(t) => self.out.tell(t),
        }
    }
}

/// Never finishes `started` within any test grace period.
struct Stuck;

#[async_trait]
impl Actor for Stuck {
    type Msg = ();

    fn name(&self) -> String {
        "stuck".to_string()
    }

    async fn started(&mut self, _ctx: &mut Context<Self>) {
        tokio::time::sleep(Duration::from_secs(3600)).await;
    }

    async fn handle(&mut self, _msg: (), _ctx: &mut Context<Self>) {}
}

#[tokio::test]
async fn test_messages_are_handled_in_order_before_stop() {
    let system = system();
    let mut out = Probe::new();
    let echo = system.spawn(Echo {
        name: "echo",
        out: out.reply_to(),
    });

    echo.tell(EchoMsg::Say("a")).unwrap();
    echo.tell(EchoMsg::Say("b")).unwrap();
    echo.stop();

    assert_eq!(out.expect_msg(WITHIN).await, "a");
    assert_eq!(out.expect_msg(WITHIN).await, "b");
    assert_eq!(out.expect_msg(WITHIN).await, "echo stopped");
    out.expect_no_msg(Duration::from_millis(50)).await;

    wait_terminated(&echo).await;
    let err = echo.tell(EchoMsg::Say("after")).unwrap_err();
    assert_eq!(err.as_label(), "send_stopped");
}

#[tokio::test]
async fn test_context_exposes_own_handle_and_token() {
    let system = system();
    let downs = Probe::new();
    let watcher = system.spawn(Watcher {
        out: downs.reply_to(),
    });

    let (id, cancelled) = watcher.ask(WatcherMsg::WhoAmI).await.unwrap();
    assert_eq!(id, watcher.id());
    assert!(!cancelled);
    assert!(id.as_u64() > 0);
    assert_eq!(id.to_string(), format!("#{}", id.as_u64()));
}

#[tokio::test]
async fn test_watcher_is_notified_with_reason() {
    let system = system();
    let mut downs = Probe::new();
    let out = Probe::new();
    let watcher = system.spawn(Watcher {
        out: downs.reply_to(),
    });
    let target = system.spawn(Echo {
        name: "target",
        out: out.reply_to(),
    });

    watcher.tell(WatcherMsg::Watch(target.clone())).unwrap();
    target.tell(EchoMsg::StopSelf).unwrap();

    let t = downs.expect_msg(WITHIN).await;
    assert_eq!(t.id, target.id());
    assert_eq!(&*t.name, "target");
    assert_eq!(t.reason, ExitReason::Stopped);
    downs.expect_no_msg(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn test_watch_after_termination_notifies_immediately() {
    let system = system();
    let mut downs = Probe::new();
    let out = Probe::new();
    let target = system.spawn(Echo {
        name: "target",
        out: out.reply_to(),
    });
    target.stop();
    wait_terminated(&target).await;

    let watcher = system.spawn(Watcher {
        out: downs.reply_to(),
    });
    watcher.tell(WatcherMsg::Watch(target.clone())).unwrap();
    assert_eq!(downs.expect_msg(WITHIN).await.id, target.id());
}

#[tokio::test]
async fn test_unwatch_suppresses_notification() {
    let system = system();
    let mut downs = Probe::new();
    let out = Probe::new();
    let mut unwatched = Probe::new();
    let watcher = system.spawn(Watcher {
        out: downs.reply_to(),
    });
    let target = system.spawn(Echo {
        name: "target",
        out: out.reply_to(),
    });

    watcher.tell(WatcherMsg::Watch(target.clone())).unwrap();
    watcher
        .tell(WatcherMsg::Unwatch(target.clone(), unwatched.reply_to()))
        .unwrap();
    assert!(unwatched.expect_msg(WITHIN).await);

    target.stop();
    wait_terminated(&target).await;
    downs.expect_no_msg(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn test_panic_is_reported_to_watchers_and_bus() {
    let system = system();
    let mut events = system.subscribe();
    let mut downs = Probe::new();
    let out = Probe::new();
    let watcher = system.spawn(Watcher {
        out: downs.reply_to(),
    });
    let target = system.spawn(Echo {
        name: "fragile",
        out: out.reply_to(),
    });

    watcher.tell(WatcherMsg::Watch(target.clone())).unwrap();
    target.tell(EchoMsg::Boom).unwrap();

    let t = downs.expect_msg(WITHIN).await;
    assert_eq!(t.reason, ExitReason::Panicked("boom".into()));
    assert_eq!(t.reason.to_string(), "panicked: boom");

    let ev = loop {
        let ev = events.recv().await.unwrap();
        if ev.kind == EventKind::ActorPanicked {
            break ev;
        }
    };
    assert_eq!(ev.actor.as_deref(), Some("fragile"));
    assert_eq!(ev.reason.as_deref(), Some("boom"));
    assert_eq!(system.live(), vec!["watcher".to_string()]);
}

#[tokio::test]
async fn test_children_are_cancelled_when_parent_stops() {
    let system = system();
    let downs = Probe::new();
    let mut children = Probe::new();
    let mut out = Probe::new();
    let parent = system.spawn(Watcher {
        out: downs.reply_to(),
    });

    parent
        .tell(WatcherMsg::Spawn(children.reply_to(), out.reply_to()))
        .unwrap();
    let child = children.expect_msg(WITHIN).await;
    assert_eq!(system.live(), vec!["child".to_string(), "watcher".to_string()]);

    parent.stop();
    assert_eq!(out.expect_msg(WITHIN).await, "child stopped");
    wait_terminated(&child).await;
    wait_terminated(&parent).await;
}

#[tokio::test]
async fn test_shutdown_within_grace() {
    let system = system();
    let mut events = system.subscribe();
    let out = Probe::new();
    let echo = system.spawn(Echo {
        name: "echo",
        out: out.reply_to(),
    });

    system.shutdown().await.unwrap();
    assert!(echo.is_terminated());
    assert_eq!(system.live_count(), 0);

    let mut kinds = Vec::new();
    while let Ok(ev) = events.try_recv() {
        kinds.push(ev.kind);
    }
    assert!(kinds.contains(&EventKind::ShutdownRequested));
    assert!(kinds.contains(&EventKind::ActorStopped));
    assert_eq!(kinds.last(), Some(&EventKind::AllStoppedWithin));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_reports_stuck_actors_after_grace() {
    let cfg = Config {
        grace: Duration::from_millis(100),
        ..Config::default()
    };
    let system = System::builder(cfg).build();
    system.spawn(Stuck);

    match system.shutdown().await {
        Err(RuntimeError::GraceExceeded { grace, stuck }) => {
            assert_eq!(grace, Duration::from_millis(100));
            assert_eq!(stuck, vec!["stuck".to_string()]);
        }
        other => panic!("expected GraceExceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ask_reports_no_reply_when_request_is_dropped() {
    let system = system();
    let out = Probe::new();
    let echo = system.spawn(Echo {
        name: "echo",
        out: out.reply_to(),
    });

    // The builder drops the reply channel before the request is even sent.
    let res: Result<(), _> = echo.ask(|_reply_to| EchoMsg::Say("ignored")).await;
    assert_eq!(res.unwrap_err().as_label(), "ask_no_reply");
}
