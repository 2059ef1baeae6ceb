use clap::Args;
use focusbar_core::error::Result;
use focusbar_core::storage::data_dir;
use focusbar_core::{
    Clock, Config, Driver, NullSoundPlayer, Renderer, SoundPlayer, SystemClock, TimerSettings,
};
use tokio::time::{Instant, MissedTickBehavior};

use crate::render::TerminalBar;
use crate::sound::CommandSoundPlayer;

#[derive(Args)]
pub struct RunArgs {
    /// Do not play any alarm sounds
    #[arg(long)]
    pub silent: bool,
}

pub fn run(args: RunArgs) -> Result<()> {
    // Invalid configuration is fatal before anything is drawn.
    let config = Config::load()?;
    let settings = config.timer_settings()?;

    let sound: Box<dyn SoundPlayer> = if args.silent || !config.sounds.enabled {
        Box::new(NullSoundPlayer)
    } else {
        Box::new(CommandSoundPlayer::new(&config.sounds, &data_dir()?))
    };
    let renderer = TerminalBar::new(&config.bar)?;
    let driver = Driver::new(settings, SystemClock, renderer, sound);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(driver, settings))?;
    Ok(())
}

/// Run both cadences on one task until Ctrl-C.
async fn drive<C, R, S>(
    mut driver: Driver<C, R, S>,
    settings: TimerSettings,
) -> std::io::Result<()>
where
    C: Clock,
    R: Renderer,
    S: SoundPlayer,
{
    driver.start();

    let mut ticks = tokio::time::interval(settings.tick_interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut checks = tokio::time::interval(settings.schedule_check_interval);
    checks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // Both intervals complete immediately once; startup already evaluated.
    ticks.tick().await;
    checks.tick().await;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut last_tick = Instant::now();
    loop {
        tokio::select! {
            _ = ticks.tick() => {
                let now = Instant::now();
                driver.on_tick(now - last_tick);
                last_tick = now;
            }
            _ = checks.tick() => {
                driver.on_schedule_check();
            }
            result = &mut shutdown => {
                tracing::info!("shutting down");
                return result;
            }
        }
    }
}
