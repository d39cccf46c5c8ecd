use clap::Parser;
use watcher::{Options, watch};

#[derive(Parser, Debug)]
#[command(author, version, about = "Follow the case file countdown from a terminal")]
struct Args {
    /// Base URL of the detective server
    #[arg(long, env = "DETECTIVE_URL", default_value = "http://127.0.0.1:5000")]
    url: String,

    /// Restart the investigation before watching
    #[arg(long)]
    restart: bool,

    /// Force reveal the case files
    #[arg(long)]
    force: bool,

    /// Seconds between status polls
    #[arg(long, default_value_t = 1)]
    poll_secs: u64,

    /// Give up after this many LOCKED answers once the timer hits zero
    #[arg(long, default_value_t = 10)]
    max_polls: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    watch(&Options {
        url: args.url,
        restart: args.restart,
        force: args.force,
        poll_secs: args.poll_secs.max(1),
        max_polls: args.max_polls.max(1),
    })
    .await
}
