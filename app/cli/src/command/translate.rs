use anyhow::Result;
use clap::Args;
use translate::TranslationClient;
use translate::prepare_text;
use translate::validate_text;

#[derive(Args)]
pub struct Translate {
    #[arg(long, help = "english text")]
    text: String,

    #[arg(long, help = "send text as is, without cleaning", default_value_t = false)]
    raw: bool,
}

impl Translate {
    pub async fn execute(&self) -> Result<()> {
        let text = if self.raw { self.text.clone() } else { prepare_text(&self.text) };
        validate_text(&text)?;

        let translated_text = TranslationClient::default().translate(&text).await?;
        println!("{translated_text}");
        Ok(())
    }
}
