//! Alarm playback through an external audio player.
//!
//! Fallback chain: configured asset via a player command, then the terminal
//! bell, then silence. Every failure is logged and swallowed.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use focusbar_core::storage::SoundsConfig;
use focusbar_core::{AlarmKind, SoundPlayer};

/// Players probed in order when none is configured.
const DEFAULT_PLAYERS: &[&str] = &["paplay", "aplay", "afplay"];

pub struct CommandSoundPlayer {
    alarm_path: PathBuf,
    soon_path: PathBuf,
    player: Option<String>,
    base_dir: PathBuf,
}

impl CommandSoundPlayer {
    pub fn new(config: &SoundsConfig, base_dir: &Path) -> Self {
        let player = config.player.trim();
        Self {
            alarm_path: PathBuf::from(&config.alarm_path),
            soon_path: PathBuf::from(&config.soon_path),
            player: (!player.is_empty()).then(|| player.to_string()),
            base_dir: base_dir.to_path_buf(),
        }
    }

    fn asset(&self, kind: AlarmKind) -> &Path {
        match kind {
            AlarmKind::CycleEnd => &self.alarm_path,
            AlarmKind::SoonWarning => &self.soon_path,
        }
    }

    fn spawn_player(&self, asset: &Path) -> io::Result<()> {
        let candidates: Vec<&str> = match &self.player {
            Some(player) => vec![player.as_str()],
            None => DEFAULT_PLAYERS.to_vec(),
        };

        for player in candidates {
            let spawned = Command::new(player)
                .arg(asset)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();
            match spawned {
                Ok(mut child) => {
                    tracing::debug!(player, asset = %asset.display(), "playing alarm");
                    // Reap the player off the caller's thread.
                    std::thread::spawn(move || {
                        let _ = child.wait();
                    });
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e),
            }
        }
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            "no audio player available",
        ))
    }
}

impl SoundPlayer for CommandSoundPlayer {
    fn play(&mut self, kind: AlarmKind) {
        let configured = self.asset(kind);
        let Some(asset) = resolve_asset(configured, &self.base_dir) else {
            tracing::warn!(path = %configured.display(), ?kind, "alarm sound not found, using bell");
            ring_bell(kind);
            return;
        };
        if let Err(e) = self.spawn_player(&asset) {
            tracing::warn!(error = %e, ?kind, "cannot play alarm sound, using bell");
            ring_bell(kind);
        }
    }
}

/// Locate `path`: absolute as given, otherwise relative to `base_dir`, then
/// to the working directory.
pub fn resolve_asset(path: &Path, base_dir: &Path) -> Option<PathBuf> {
    if path.is_absolute() {
        return path.exists().then(|| path.to_path_buf());
    }
    [base_dir.join(path), path.to_path_buf()]
        .into_iter()
        .find(|candidate| candidate.exists())
}

/// Number of bells for the synthesized fallback tone.
fn bell_count(kind: AlarmKind) -> usize {
    match kind {
        AlarmKind::CycleEnd => 1,
        AlarmKind::SoonWarning => 2,
    }
}

fn ring_bell(kind: AlarmKind) {
    let bells = "\x07".repeat(bell_count(kind));
    let mut out = io::stdout();
    if let Err(e) = out.write_all(bells.as_bytes()).and_then(|_| out.flush()) {
        tracing::warn!(error = %e, "cannot ring terminal bell");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_to_base_dir_first() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sounds")).unwrap();
        std::fs::write(dir.path().join("sounds/alarm.wav"), b"RIFF").unwrap();

        let found = resolve_asset(Path::new("sounds/alarm.wav"), dir.path());
        assert_eq!(found, Some(dir.path().join("sounds/alarm.wav")));
    }

    #[test]
    fn missing_asset_resolves_to_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve_asset(Path::new("sounds/definitely-missing.wav"), dir.path()),
            None
        );
        assert_eq!(
            resolve_asset(&dir.path().join("nope.wav"), Path::new("/")),
            None
        );
    }

    #[test]
    fn absolute_asset_is_used_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("soon.wav");
        std::fs::write(&path, b"RIFF").unwrap();
        assert_eq!(resolve_asset(&path, Path::new("/elsewhere")), Some(path));
    }

    #[test]
    fn soon_warning_rings_twice() {
        assert_eq!(bell_count(AlarmKind::CycleEnd), 1);
        assert_eq!(bell_count(AlarmKind::SoonWarning), 2);
    }

    #[test]
    fn missing_player_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = SoundsConfig {
            player: "focusbar-no-such-player".into(),
            ..SoundsConfig::default()
        };
        let player = CommandSoundPlayer::new(&config, dir.path());
        let err = player.spawn_player(Path::new("x.wav")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
