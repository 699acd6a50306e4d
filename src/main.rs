//! Random Worker Service Entry Point
//!
//! Initializes configuration, storage and services, then serves HTTP.

use random_worker::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run().await
}
