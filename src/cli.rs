use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Default)]
#[command(name = "plutus-export")]
#[command(about = "Export Plutus rewards and card statements as delimited text", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(long = "token", global = true, help = "Bearer token to authenticate with")]
    pub token: Option<String>,

    #[arg(
        long = "credentials-file",
        global = true,
        help = "JSON dump of the web app's local storage holding \"id_token\""
    )]
    pub credentials_file: Option<String>,

    #[arg(
        short = 'o',
        long = "output-dir",
        global = true,
        help = "Directory the export files are written to"
    )]
    pub output_dir: Option<String>,

    #[arg(long = "stdout", global = true, help = "Print the export instead of saving it")]
    pub stdout: bool,

    #[arg(
        short = 's',
        long = "separator",
        global = true,
        help = "Field separator (default: |)"
    )]
    pub separator: Option<String>,

    #[arg(
        long = "quote",
        global = true,
        help = "Quote cells that contain the separator, quotes or newlines"
    )]
    pub quote: bool,

    #[arg(
        long = "fail-on-status",
        global = true,
        help = "Treat non-2xx responses as errors before decoding"
    )]
    pub fail_on_status: bool,

    #[arg(long = "rewards-endpoint", global = true, help = "Override the rewards URL")]
    pub rewards_endpoint: Option<String>,

    #[arg(long = "graphql-endpoint", global = true, help = "Override the GraphQL URL")]
    pub graphql_endpoint: Option<String>,

    #[arg(short = 'v', long = "verbose", global = true, help = "Print diagnostics to stderr")]
    pub verbose: bool,

    #[arg(long = "config-init", help = "Write an example config file and exit")]
    pub config_init: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Export reward (pluton) transactions
    Rewards(RewardArgs),
    /// Export card statement transactions
    Statements(StatementArgs),
    /// Export rewards, then statements
    All(AllArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RewardArgs {
    #[arg(
        long = "chainreport",
        help = "Also write the rewards in ChainReport import format"
    )]
    pub chainreport: bool,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct AllArgs {
    #[command(flatten)]
    pub rewards: RewardArgs,

    #[command(flatten)]
    pub statements: StatementArgs,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct StatementArgs {
    #[arg(long = "from", help = "First day to include (YYYY-MM-DD)")]
    pub from: Option<NaiveDate>,

    #[arg(long = "to", help = "Last day to include (YYYY-MM-DD)")]
    pub to: Option<NaiveDate>,

    #[arg(long = "type", help = "Only statements of this transaction type")]
    pub transaction_type: Option<String>,
}
