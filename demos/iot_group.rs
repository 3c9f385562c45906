//! End-to-end walk through a device group with the built-in `LogWriter`.
//!
//! ```text
//! RUST_LOG=debug cargo run --example iot_group --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use devicegroup::{Config, Group, LogWriter, Subscribe, System};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = Config {
        grace: Duration::from_secs(5),
        ..Config::default()
    };
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let system = System::builder(cfg).with_subscribers(subs).build();

    let group = system.spawn(Group::new("floor-1"));

    let mut sensors = Vec::new();
    for (request_id, name) in ["thermo-1", "thermo-2", "thermo-3"].into_iter().enumerate() {
        if let Some(sensor) = group.track_device("floor-1", name).await? {
            sensor.record_temperature(request_id as u64, 20.0 + request_id as f64).await?;
            sensors.push(sensor);
        }
    }

    // Addressed to another group: dropped without a reply.
    let ignored = group.track_device("floor-2", "thermo-9").await?;
    tracing::info!(ignored = ignored.is_none(), "mis-addressed request");

    for (i, sensor) in sensors.iter().enumerate() {
        let reading = sensor.read_temperature(100 + i as u64).await?;
        tracing::info!(device = sensor.name(), value = ?reading.value, "reading");
    }

    sensors[0].stop();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let listed = group.device_list(200).await?;
    let mut ids: Vec<_> = listed.ids.iter().map(|id| id.as_str().to_owned()).collect();
    ids.sort();
    tracing::info!(request_id = listed.request_id, ?ids, "active devices");

    system.shutdown().await?;
    Ok(())
}
