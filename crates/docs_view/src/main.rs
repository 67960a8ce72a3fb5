mod app;
mod command;
mod logging;

use app::{Args, RunCmd};
use clap::Parser;

#[derive(Parser, Debug)]
pub enum Cmd {
    /// Display the current version.
    #[clap(name = "version")]
    Version,

    #[clap(flatten)]
    Run(RunCmd),
}

#[derive(Parser, Debug)]
#[clap(name = "docs-view", disable_version_flag = true)]
pub struct DocsView {
    #[clap(flatten)]
    pub args: Args,

    #[clap(subcommand)]
    pub cmd: Cmd,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let docs_view = DocsView::parse();

    match docs_view.cmd {
        Cmd::Version => {
            println!("docs-view {}", env!("CARGO_PKG_VERSION"));
        }
        Cmd::Run(run_cmd) => {
            if let Err(e) = run_cmd.run(docs_view.args).await {
                eprintln!("error: {e:?}");
                std::process::exit(1);
            }
        }
    }
}
