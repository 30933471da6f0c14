use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "selmenu")]
#[command(version)]
#[command(about = "A pager with a right-click Copy menu for selected text", long_about = None)]
pub struct Cli {
    /// File to open. Reads stdin when omitted and stdin is not a terminal.
    pub file: Option<PathBuf>,

    /// Skip the system clipboard and always copy through the terminal
    #[arg(long)]
    pub no_system_clipboard: bool,

    /// Write logs here instead of ~/.selmenu/selmenu.log
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
