pub mod chainreport;
pub mod delimited;
pub mod table;

pub use chainreport::{convert_rewards, ChainreportReport, CHAINREPORT_FILENAME};
pub use delimited::{DelimitedFormat, Quoting, DEFAULT_SEPARATOR};
pub use table::{derive_columns, render_value, CellPolicy, Fill, Table};

use crate::api::{PlutusClient, Record, StatementFilter};
use crate::error::Result;
use crate::output::{OutputSink, CSV_MIME};
use crate::ui::{trace, warn};

pub const REWARDS_FILENAME: &str = "plutus-rewards.csv";
pub const STATEMENTS_FILENAME: &str = "plutus-statements.csv";

/// Nested transaction objects carried by every reward; not exported
pub const REWARDS_EXCLUDED_FIELDS: [&str; 2] = ["fiat_transaction", "contis_transaction"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub destination: String,
    pub rows: usize,
}

pub fn rewards_table(rewards: &[Record]) -> Result<Table> {
    Table::from_records(
        "rewards",
        rewards,
        &REWARDS_EXCLUDED_FIELDS,
        &CellPolicy::strict(),
    )
}

pub fn statements_table(statements: &[Record]) -> Result<Table> {
    Table::from_records("statements", statements, &[], &CellPolicy::lenient())
}

/// Fetches a data set, flattens it and hands it to a sink
pub struct Exporter<'a> {
    client: &'a PlutusClient,
    sink: &'a dyn OutputSink,
    format: DelimitedFormat,
    verbose: bool,
}

impl<'a> Exporter<'a> {
    pub fn new(client: &'a PlutusClient, sink: &'a dyn OutputSink, format: DelimitedFormat) -> Self {
        Self {
            client,
            sink,
            format,
            verbose: false,
        }
    }

    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    pub async fn export_rewards(&self) -> Result<ExportSummary> {
        let rewards = self.client.fetch_rewards().await?;
        let table = rewards_table(&rewards)?;
        self.emit(REWARDS_FILENAME, &table)
    }

    /// Rewards table plus its ChainReport conversion, from a single fetch.
    ///
    /// Both files are built before either is saved, so a conversion failure
    /// leaves nothing behind.
    pub async fn export_rewards_with_chainreport(&self) -> Result<Vec<ExportSummary>> {
        let rewards = self.client.fetch_rewards().await?;
        let table = rewards_table(&rewards)?;
        let report = convert_rewards(&rewards)?;
        let converted = report.render()?;

        if report.unknown > 0 {
            warn(&format!(
                "{} rewards have an unknown type and were written as ERROR",
                report.unknown
            ));
        }
        trace(
            self.verbose,
            &format!("Skipped {} rewards without a type", report.skipped),
        );

        let plain = self.emit(REWARDS_FILENAME, &table)?;
        let destination = self.sink.save(CHAINREPORT_FILENAME, &converted, CSV_MIME)?;
        Ok(vec![
            plain,
            ExportSummary {
                destination,
                rows: report.rows.len(),
            },
        ])
    }

    pub async fn export_statements(&self, filter: &StatementFilter) -> Result<ExportSummary> {
        let statements = self.client.fetch_statements(filter).await?.into_records();
        let table = statements_table(&statements)?;
        self.emit(STATEMENTS_FILENAME, &table)
    }

    fn emit(&self, filename: &str, table: &Table) -> Result<ExportSummary> {
        trace(
            self.verbose,
            &format!("Columns: {}", table.columns().join(", ")),
        );
        let content = self.format.render(&table.to_rows())?;
        let destination = self.sink.save(filename, &content, CSV_MIME)?;
        Ok(ExportSummary {
            destination,
            rows: table.len(),
        })
    }
}
