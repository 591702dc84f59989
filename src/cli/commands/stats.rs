use clap::{Args, Subcommand};

#[derive(Args)]
pub struct StatsCommands {
    #[command(subcommand)]
    pub command: StatsSubcommands,
}

#[derive(Subcommand)]
pub enum StatsSubcommands {
    /// DeepL translation usage logs
    Deepl {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        #[arg(short, long)]
        limit: Option<u32>,
    },
}
