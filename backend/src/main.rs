use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::start_server()
        .await
        .context("Detective server failed")
}
