use std::env::temp_dir;
use std::future::Future;

use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use bytes::Bytes;
use tokio::fs;
use tokio::process::Command;
use tracing::debug;
use tracing::info;
use uuid::Uuid;

pub trait AudioPlayer: Send + Sync {
    /// Resolves once the audio has finished playing.
    fn play(&self, audio: Bytes) -> impl Future<Output = Result<()>> + Send;
}

/// Plays mpeg audio by handing a temp file to an external player program.
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for CommandPlayer {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            CommandPlayer {
                program: "afplay".to_string(),
                args: vec![],
            }
        } else {
            CommandPlayer {
                program: "ffplay".to_string(),
                args: ["-nodisp", "-autoexit", "-loglevel", "quiet"].map(String::from).to_vec(),
            }
        }
    }
}

impl CommandPlayer {
    /// Builds a player from `[program, args...]`.
    pub fn from_command(command: &[String]) -> Result<Self> {
        let (program, args) = command.split_first().context("player command must not be empty")?;
        Ok(CommandPlayer {
            program: program.to_string(),
            args: args.to_vec(),
        })
    }

    async fn run(&self, file: &str) -> Result<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(file)
            .status()
            .await
            .with_context(|| format!("failed to start audio player, program={}", self.program))?;
        if !status.success() {
            return Err(anyhow!("audio player failed, program={}, status={status}", self.program));
        }
        Ok(())
    }
}

impl AudioPlayer for CommandPlayer {
    async fn play(&self, audio: Bytes) -> Result<()> {
        let temp_file = temp_dir().join(format!("{}.mp3", Uuid::now_v7()));
        fs::write(&temp_file, &audio).await?;
        let file = temp_file.to_string_lossy().to_string();
        info!("play audio file, file={file}, size={}", audio.len());

        let result = self.run(&file).await;

        if let Err(err) = fs::remove_file(&temp_file).await {
            debug!("failed to remove audio file, file={file}, error={err}");
        }
        result
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn player(program: &str, args: &[&str]) -> CommandPlayer {
        CommandPlayer {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn play_waits_for_successful_player() {
        // `test -s <file>` passes only if the audio was written before the player ran
        let player = player("test", &["-s"]);

        player.play(Bytes::from_static(b"ID3mpeg")).await.unwrap();
    }

    #[tokio::test]
    async fn play_reports_player_failure() {
        let player = player("false", &[]);

        let error = player.play(Bytes::from_static(b"ID3mpeg")).await.unwrap_err();

        assert!(error.to_string().contains("audio player failed"), "error={error}");
    }

    #[tokio::test]
    async fn play_reports_missing_player() {
        let player = player("vaani-no-such-player", &[]);

        let error = player.play(Bytes::from_static(b"ID3mpeg")).await.unwrap_err();

        assert!(error.to_string().contains("failed to start audio player"), "error={error}");
    }

    #[test]
    fn from_command_splits_program_and_args() {
        let command = ["mpg123", "-q"].map(String::from);

        let player = CommandPlayer::from_command(&command).unwrap();

        assert_eq!(player.program, "mpg123");
        assert_eq!(player.args, vec!["-q".to_string()]);
        assert!(CommandPlayer::from_command(&[]).is_err());
    }
}
