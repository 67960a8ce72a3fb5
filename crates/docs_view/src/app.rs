use crate::{command, logging};
use anyhow::Result;
use clap::Parser;
use docs_view_core::config::load_config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub enum RunCmd {
    /// Render the document into a standalone HTML page with a navigation sidebar.
    #[clap(name = "render")]
    Render(command::render::Render),
    /// Print the heading outline of the document as JSON.
    #[clap(name = "outline")]
    Outline(command::outline::Outline),
}

/// Options shared by every command.
#[derive(Parser, Debug)]
pub struct Args {
    /// Write logs to this file instead of stderr.
    #[clap(long)]
    pub log: Option<PathBuf>,

    /// Specify the path of the config file.
    #[clap(long)]
    pub config_file: Option<PathBuf>,
}

impl RunCmd {
    pub async fn run(self, args: Args) -> Result<()> {
        let loaded = load_config(args.config_file);

        let log_path = args
            .log
            .or_else(|| std::env::var_os("DOCS_VIEW_LOG_PATH").map(PathBuf::from))
            .or_else(|| loaded.config.log.log_file.clone());
        let _guard = logging::init(log_path, &loaded.config.log)?;

        if let Some(err) = &loaded.maybe_error {
            tracing::warn!(
                file = ?loaded.file_path,
                %err,
                "Ignoring config file, using the defaults"
            );
        } else if let Some(file) = &loaded.file_path {
            tracing::debug!(file = %file.display(), "Loaded config");
        }

        match self {
            Self::Render(render) => render.run(&loaded.config).await,
            Self::Outline(outline) => outline.run(&loaded.config).await,
        }
    }
}
