//! # Watcher
//!
//! Terminal twin of the frontend countdown.
//!
//! 1. Optionally restart the investigation and/or force the reveal.
//! 2. Poll `/api/status` and draw the countdown until the timer hits zero.
//! 3. Ask `/api/top10`. The server decides, so a LOCKED answer just means poll again.
//! 4. Print the ranked case files once OPEN.
use std::time::Duration;

use anyhow::{Context, Result, bail};
use bank::payloads::{AckResponse, StatusResponse, Top10Response};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::time::sleep;

pub mod models;
pub mod utils;

use models::Endpoints;
use utils::{format_case_file, format_clock};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Options {
    pub url: String,
    pub restart: bool,
    pub force: bool,
    pub poll_secs: u64,
    pub max_polls: u32,
}

pub async fn watch(options: &Options) -> Result<()> {
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let endpoints = Endpoints::new(&options.url);
    let poll = Duration::from_secs(options.poll_secs);

    if options.restart {
        let ack: AckResponse = post_json(&client, &endpoints.restart()).await?;
        match ack.new_reveal_time {
            Some(time) => println!("{} (reveal at {})", ack.message, time.format("%H:%M:%S")),
            None => println!("{}", ack.message),
        }
    }

    if options.force {
        let ack: AckResponse = post_json(&client, &endpoints.force_reveal()).await?;
        println!("{}", ack.message);
    }

    for _ in 0..options.max_polls {
        countdown(&client, &endpoints, poll).await?;

        println!("ACCESSING CASE FILES...");
        match get_json::<Top10Response>(&client, &endpoints.top10()).await? {
            Top10Response::Open { data, message } => {
                println!("\n{message}\n");
                for (index, case) in data.iter().enumerate() {
                    println!("{}\n", format_case_file(index + 1, case));
                }
                return Ok(());
            }
            Top10Response::Locked { message } => {
                println!("{message}");
                sleep(poll).await;
            }
        }
    }

    bail!(
        "Case files still sealed after {} attempts",
        options.max_polls
    )
}

async fn countdown(client: &Client, endpoints: &Endpoints, poll: Duration) -> Result<()> {
    let mut status: StatusResponse = get_json(client, &endpoints.status()).await?;
    if status.is_revealed || status.time_remaining == 0 {
        return Ok(());
    }

    let pb = ProgressBar::new(status.time_remaining);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.yellow} {msg} [{bar:40.yellow/white}]")?
            .progress_chars("=> "),
    );

    while !status.is_revealed && status.time_remaining > 0 {
        if status.time_remaining > pb.length().unwrap_or(0) {
            // restarted by someone else
            pb.set_length(status.time_remaining);
        }

        pb.set_position(pb.length().unwrap_or(0) - status.time_remaining);
        pb.set_message(format!("SEALED {}", format_clock(status.time_remaining)));

        sleep(poll).await;
        status = get_json(client, &endpoints.status()).await?;
    }

    pb.finish_with_message("TIME UP");
    Ok(())
}

async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    client
        .get(url)
        .send()
        .await
        .with_context(|| format!("GET {url} failed"))?
        .error_for_status()?
        .json()
        .await
        .with_context(|| format!("Unexpected response from {url}"))
}

async fn post_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    client
        .post(url)
        .send()
        .await
        .with_context(|| format!("POST {url} failed"))?
        .error_for_status()?
        .json()
        .await
        .with_context(|| format!("Unexpected response from {url}"))
}
