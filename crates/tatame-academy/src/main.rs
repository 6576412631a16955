//! Academy node binary
//!
//! The Tatame academy daemon: student records, attendance tracking, and
//! promotion progress behind an HTTP API.

use tatame_academy::{AcademyConfig, AcademyNode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "academy_node=info,tatame=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting academy node");

    let config = AcademyConfig::default();

    let node = AcademyNode::new(config).await?;
    node.run().await?;

    Ok(())
}
