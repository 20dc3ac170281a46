//! Demo window for driftfield.
//!
//! Run with: `cargo run --release -- [config.json]`
//!
//! Set `RUST_LOG=driftfield=debug` to watch resize decisions.

use driftfield::prelude::*;

fn main() -> Result<(), BackdropError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ParticleConfig::load(&path)?,
        None => ParticleConfig::default(),
    };

    Backdrop::new()
        .with_title("driftfield")
        .with_config(config)
        .with_headline("driftfield")
        .run()
}
