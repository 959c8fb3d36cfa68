//! Auth Config

use clap::Args;

/// Identity provider settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Seed the credential table with the demo account
    #[arg(
        long,
        env = "SEED_DEMO_ACCOUNT",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub seed_demo_account: bool,
}
