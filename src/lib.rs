pub mod audio;
pub mod error;
pub mod input;
pub mod messages;
pub mod presenter;
pub mod runner;
pub mod settings;
pub mod utils;
pub mod wheel;

use anyhow::Context;

use audio::{ChimeSound, Sound};
use input::ChannelEventSource;
use messages::RngSource;
use presenter::{Stage, TerminalPresenter};
use runner::WheelRunner;
use settings::SettingsStore;
use wheel::WheelController;

pub use error::WheelError;

pub fn run() -> anyhow::Result<()> {
    // Reads RUST_LOG; PRIZEWHEEL_DEBUG=1 lowers the default to debug
    utils::logging::init();

    log::info!("Prize wheel starting up...");

    let store = SettingsStore::from_env()?;
    let settings = store.settings().clone();
    log::info!(
        "Loaded {} messages from {}",
        settings.messages.len(),
        store.path().display()
    );

    let config = settings
        .to_config()
        .with_context(|| format!("Invalid wheel settings in {}", store.path().display()))?;

    let sound: Option<Box<dyn Sound>> = if settings.sound.enabled {
        Some(Box::new(ChimeSound::new(settings.sound.file.clone())))
    } else {
        None
    };

    let controller = WheelController::new(config, Box::new(RngSource::from_entropy()), sound)?;

    let (tx, events) = ChannelEventSource::channel();
    input::spawn_stdin_reader(tx).context("Failed to start input reader")?;

    let presenter = TerminalPresenter::new(
        std::io::stdout(),
        settings.wheel_text.clone(),
        settings.colors.clone(),
    );
    let mut runner = WheelRunner::new(
        controller,
        Box::new(events),
        presenter,
        Stage::new(settings.colors),
    );

    println!("Press Enter to spin, stop, or reset. Type q then Enter to quit.");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build runtime")?;
    runtime.block_on(runner.run())?;

    println!();
    log::info!("Prize wheel shut down after {} frames", runner.frames());
    Ok(())
}
