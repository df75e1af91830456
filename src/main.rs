use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hc_recent_access_lib::run(hc_recent_access_lib::cli::Args::parse()).await
}
