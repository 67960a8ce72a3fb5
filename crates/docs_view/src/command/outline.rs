use super::load_document;
use anyhow::Result;
use clap::Parser;
use docs_view_core::config::Config;
use docs_view_core::extract_outline;
use std::path::PathBuf;

/// Print the heading outline as JSON, one `{level, text, id}` object per heading.
#[derive(Parser, Debug, Clone)]
pub struct Outline {
    /// Pretty-print the JSON.
    #[clap(long)]
    pretty: bool,

    /// Document locations tried in order.
    candidates: Vec<PathBuf>,
}

impl Outline {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let document = load_document(&self.candidates, config).await;
        let outline = extract_outline(&document.text, &config.render);

        let json = if self.pretty {
            serde_json::to_string_pretty(&outline)?
        } else {
            serde_json::to_string(&outline)?
        };
        println!("{json}");

        Ok(())
    }
}
