use clap::{Args, Subcommand};

#[derive(Args)]
pub struct AuthCommands {
    #[command(subcommand)]
    pub command: AuthSubcommands,
}

#[derive(Subcommand)]
pub enum AuthSubcommands {
    /// Log in and store the token pair in the config file
    Login {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Log out and forget the stored tokens
    Logout,
    /// Show the configured backend and whether tokens are stored
    Status {
        /// Also refresh the token pair to check it is still accepted
        #[arg(long)]
        check: bool,
    },
}
