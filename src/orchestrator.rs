use crate::api::{PlutusClient, StatementFilter};
use crate::cli::{Command, RewardArgs, StatementArgs};
use crate::config::Config;
use crate::error::Result;
use crate::export::{ExportSummary, Exporter};
use crate::output::{DirectorySink, OutputSink, StdoutSink};
use crate::ui::{display_saved, trace};

pub struct OrchestratorContext {
    pub config: Config,
    pub command: Command,
}

impl From<&StatementArgs> for StatementFilter {
    fn from(args: &StatementArgs) -> Self {
        Self {
            from: args.from,
            to: args.to,
            transaction_type: args.transaction_type.clone(),
        }
    }
}

/// Run the requested export(s), stopping at the first failure
pub async fn run(context: OrchestratorContext) -> Result<Vec<ExportSummary>> {
    let config = context.config;

    trace(
        config.verbose,
        &format!(
            "Endpoints: rewards={} graphql={}",
            config.endpoints.rewards, config.endpoints.graphql
        ),
    );

    let client = PlutusClient::new(config.credentials.clone().into_store(), config.endpoints.clone())?
        .fail_on_status(config.fail_on_status)
        .verbose(config.verbose);

    let sink: Box<dyn OutputSink> = if config.to_stdout {
        Box::new(StdoutSink::stdout().with_labels(writes_several(&context.command)))
    } else {
        Box::new(DirectorySink::new(config.output_dir.clone()))
    };

    let exporter = Exporter::new(&client, sink.as_ref(), config.format.clone()).verbose(config.verbose);

    let mut summaries = Vec::new();
    match &context.command {
        Command::Rewards(args) => {
            summaries.extend(export_rewards(&exporter, args).await?);
        }
        Command::Statements(args) => {
            summaries.push(exporter.export_statements(&args.into()).await?);
        }
        Command::All(args) => {
            summaries.extend(export_rewards(&exporter, &args.rewards).await?);
            summaries.push(exporter.export_statements(&(&args.statements).into()).await?);
        }
    }

    for summary in &summaries {
        display_saved(&summary.destination, summary.rows);
    }

    Ok(summaries)
}

async fn export_rewards(exporter: &Exporter<'_>, args: &RewardArgs) -> Result<Vec<ExportSummary>> {
    if args.chainreport {
        exporter.export_rewards_with_chainreport().await
    } else {
        Ok(vec![exporter.export_rewards().await?])
    }
}

/// Whether the command produces more than one table
pub fn writes_several(command: &Command) -> bool {
    match command {
        Command::Rewards(args) => args.chainreport,
        Command::Statements(_) => false,
        Command::All(_) => true,
    }
}
