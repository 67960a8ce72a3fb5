use super::load_document;
use anyhow::{Context, Result};
use clap::Parser;
use docs_view_core::config::Config;
use docs_view_core::render_page;
use std::io::Write;
use std::path::PathBuf;

/// Render the document into a standalone HTML page.
#[derive(Parser, Debug, Clone)]
pub struct Render {
    /// Write the page to this file instead of stdout.
    #[clap(long, short)]
    output: Option<PathBuf>,

    /// Page title, overrides `document.title` of the config.
    #[clap(long)]
    title: Option<String>,

    /// Document locations tried in order.
    candidates: Vec<PathBuf>,
}

impl Render {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let document = load_document(&self.candidates, config).await;
        let title = self.title.as_deref().unwrap_or(&config.document.title);

        let page = render_page(&document.text, &config.render, title);

        match &self.output {
            Some(output) => {
                tokio::fs::write(output, &page)
                    .await
                    .with_context(|| format!("failed to write {}", output.display()))?;
                tracing::info!(output = %output.display(), bytes = page.len(), "Wrote page");
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(page.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}
