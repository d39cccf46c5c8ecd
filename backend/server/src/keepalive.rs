//! # Keep Alive
//!
//! Free hosting tiers suspend idle services after ~15 minutes. A background task pings our own
//! public `/health` endpoint every 14 minutes so the countdown keeps running.
//!
//! - Fire and forget, nothing reads the result.
//! - A failed or timed out ping is logged and retried on the next tick only.
//! - Never touches the reveal gate.
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::{
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};
use tracing::{debug, info, warn};

use crate::{config::Config, utils::health_url};

pub fn spawn_keepalive(config: &Config) -> Option<JoinHandle<()>> {
    let Some(base) = config.keepalive_url.as_deref() else {
        info!("No public URL configured, keep alive disabled");
        return None;
    };

    let client = match Client::builder().timeout(config.keepalive_timeout).build() {
        Ok(client) => client,
        Err(e) => {
            warn!("Failed to build keep alive client: {e}");
            return None;
        }
    };

    let url = health_url(base);
    let period = config.keepalive_interval;
    info!("Keep alive pinging {url} every {}s", period.as_secs());

    Some(tokio::spawn(run(client, url, period)))
}

async fn run(client: Client, url: String, period: Duration) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // first tick completes immediately, the server just started
    ticker.tick().await;

    loop {
        ticker.tick().await;

        match ping(&client, &url).await {
            Ok(status) if status.is_success() => debug!("Keep alive ping ok ({status})"),
            Ok(status) => warn!("Keep alive ping returned {status}"),
            Err(e) => warn!("Keep alive ping failed: {e}"),
        }
    }
}

pub async fn ping(client: &Client, url: &str) -> Result<StatusCode, reqwest::Error> {
    let response = client.get(url).send().await?;

    Ok(response.status())
}
