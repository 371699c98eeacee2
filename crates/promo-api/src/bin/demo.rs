//! # promo-demo
//!
//! Prices a cart and prints the receipt.
//!
//! ```bash
//! promo-demo                      # built-in T-Shirt + Hat scenario
//! promo-demo scenario.toml        # `items` and `campaigns` from a file
//! ```

use promo_api::demo::{render_receipt, DemoScenario};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let (items, campaigns) = match std::env::args().nth(1) {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?;
            info!("Loaded scenario from {}", path);
            DemoScenario::from_toml(&content)?.into_parts()
        }
        None => DemoScenario::reference(),
    };

    let result = DemoScenario::run(&items, &campaigns);
    print!("{}", render_receipt(&result));

    Ok(())
}
