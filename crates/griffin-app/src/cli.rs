use clap::Parser;

/// Griffin: one window, many chart tabs.
#[derive(Parser, Debug)]
#[command(name = "griffin", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Do not restore or save tabs; every launch starts empty.
    #[arg(long)]
    pub ephemeral: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
