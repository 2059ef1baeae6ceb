use clap::{Subcommand, ValueEnum};
use focusbar_core::error::Result;
use focusbar_core::storage::data_dir;
use focusbar_core::{AlarmKind, Config, SoundPlayer};

use crate::sound::{resolve_asset, CommandSoundPlayer};

#[derive(Clone, Copy, ValueEnum)]
pub enum AlarmArg {
    CycleEnd,
    SoonWarning,
}

impl From<AlarmArg> for AlarmKind {
    fn from(arg: AlarmArg) -> Self {
        match arg {
            AlarmArg::CycleEnd => AlarmKind::CycleEnd,
            AlarmArg::SoonWarning => AlarmKind::SoonWarning,
        }
    }
}

#[derive(Subcommand)]
pub enum SoundAction {
    /// Play an alarm once
    Test {
        #[arg(value_enum, default_value = "cycle-end")]
        kind: AlarmArg,
    },
    /// Show where the alarm assets resolve to
    Paths,
}

pub fn run(action: SoundAction) -> Result<()> {
    let config = Config::load()?;
    let base_dir = data_dir()?;

    match action {
        SoundAction::Test { kind } => {
            let mut player = CommandSoundPlayer::new(&config.sounds, &base_dir);
            player.play(kind.into());
            println!("played");
        }
        SoundAction::Paths => {
            let resolve = |p: &str| {
                resolve_asset(std::path::Path::new(p), &base_dir)
                    .map(|found| found.display().to_string())
            };
            let report = serde_json::json!({
                "alarm": resolve(&config.sounds.alarm_path),
                "soon": resolve(&config.sounds.soon_path),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
