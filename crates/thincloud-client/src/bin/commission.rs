//! Commissioning walkthrough.
//!
//! Connects with the configured device credentials, publishes a
//! commissioning request, and prints the assigned device id. Useful for
//! verifying broker credentials and topic permissions outside firmware:
//!
//! ```text
//! commission <deviceType> <physicalId> <requestId> [config.yaml]
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use thincloud_client::client;
use thincloud_client::config;
use thincloud_client::dispatch::{Dispatcher, InboundHandler};
use thincloud_core::envelope::{self, CommissioningResponse};
use thincloud_core::error::Result;

struct CommissioningSink {
    tx: mpsc::Sender<CommissioningResponse>,
}

#[async_trait]
impl InboundHandler for CommissioningSink {
    async fn handle(&self, _topic: &str, payload: Bytes) -> Result<()> {
        let resp = envelope::commissioning_response(&payload)?;
        let _ = self.tx.send(resp).await;
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut args = std::env::args().skip(1);
    let (Some(device_type), Some(physical_id), Some(request_id)) =
        (args.next(), args.next(), args.next())
    else {
        eprintln!("usage: commission <deviceType> <physicalId> <requestId> [config.yaml]");
        std::process::exit(2);
    };
    let config_path = args.next().unwrap_or_else(|| "thincloud.yaml".to_string());

    let cfg = match config::load_from_file(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, path = %config_path, "configuration error");
            std::process::exit(1);
        }
    };

    let (tc, driver) = client::connect(&cfg).expect("session setup failed");

    let dispatcher = Arc::new(Dispatcher::new());
    let (tx, mut rx) = mpsc::channel(1);

    let response_topic = tc
        .subscribe_to_commissioning_response(&request_id, &device_type, &physical_id)
        .await
        .expect("subscribe failed");
    dispatcher.register(response_topic, Arc::new(CommissioningSink { tx }));

    tc.send_commissioning_request(Some(&request_id), &device_type, &physical_id)
        .await
        .expect("commissioning request failed");
    info!(%device_type, %physical_id, %request_id, "commissioning request sent");

    let driver_task = tokio::spawn(driver.run(Arc::clone(&dispatcher)));

    tokio::select! {
        Some(resp) = rx.recv() => {
            match resp.device_id {
                Some(device_id) => {
                    info!(status = resp.status_code, %device_id, "commissioned");
                    println!("{device_id}");
                }
                None => {
                    error!(status = resp.status_code, "commissioning rejected");
                    std::process::exit(1);
                }
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted");
        }
    }

    driver_task.abort();
}
