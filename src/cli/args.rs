use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "salaam-clock",
    version,
    about = "Prayer times for Makkah and Medina with a live next-prayer countdown"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print today's prayer times and the countdown to the next prayer
    Times {
        /// City (makkah or medina); defaults to the configured one
        #[arg(long)]
        city: Option<String>,
    },
    /// Print only the next prayer and the time remaining, one line
    Next {
        /// City (makkah or medina); defaults to the configured one
        #[arg(long)]
        city: Option<String>,
    },
    /// Show the active configuration and where it lives
    Config,
}
