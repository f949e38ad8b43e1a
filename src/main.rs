use tokio::io::BufReader;

mod config;
mod console;
mod db;
mod error;
mod menu;
mod records;

use crate::config::AppConfig;
use crate::console::Console;
use crate::records::PgRecordStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries the menu; diagnostics go to stderr
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "health_manager=warn,sqlx=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = AppConfig::from_env()?;
    let db = db::connect(&config).await?;

    let mut store = PgRecordStore::new(db);
    let mut console = Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    let result = menu::run(&mut console, &mut store).await;
    store.close().await;

    result
}
