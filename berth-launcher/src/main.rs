//! Host binary: open the container at an installation root, report what it
//! holds, and shut it down.
//!
//! ```bash
//! berth-launcher /opt/berth
//! ```

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use berth_launcher::Launcher;

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    info!("Starting berth-launcher v{}", env!("CARGO_PKG_VERSION"));

    let installation_root = std::env::args()
        .nth(1)
        .context("usage: berth-launcher <installation-root>")?;

    let launcher = Launcher::new(&installation_root)
        .with_context(|| format!("Failed to load launch configuration from {installation_root}"))?;
    info!(
        "Loaded {} launch arguments from {:?}",
        launcher.config().len(),
        launcher.installation_root()
    );

    let mut running = launcher.open().context("Failed to start the container")?;

    if let Ok(registry) = running.bundle_registry() {
        info!("Container holds {} modules:", registry.module_count());
        for module in registry.modules() {
            info!("  {} v{} ({})", module.name, module.version, module.id);
        }
    }

    running.close().context("Failed to shut the container down")?;
    info!("Done");
    Ok(())
}
