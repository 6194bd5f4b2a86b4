use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use command::speak::Speak;
use command::translate::Translate;
use command::voices::Voices;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod command;
mod config;

#[derive(Parser)]
#[command(author, version)]
#[command(about = "english to hindi translation and speech")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
#[command(arg_required_else_help(true))]
pub enum Command {
    #[command(about = "translate english text to hindi")]
    Translate(Translate),
    #[command(about = "speak text")]
    Speak(Speak),
    #[command(about = "list elevenlabs voices")]
    Voices(Voices),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().compact().with_line_number(true).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Translate(command) => command.execute().await,
        Command::Speak(command) => command.execute().await,
        Command::Voices(command) => command.execute().await,
    }
}
