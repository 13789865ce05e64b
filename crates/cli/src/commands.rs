//! CLI commands module

use crate::output::OutputFormatter;
use solrnav_core::{Options, Result, SolrClient, SolrError, Transport};

pub mod admin;
pub mod count;
pub mod delete;
pub mod get;
pub mod post;
pub mod search;

pub use admin::*;
pub use count::*;
pub use delete::*;
pub use get::*;
pub use post::*;
pub use search::*;

/// What a command runs against
pub struct CommandContext<T> {
    pub client: SolrClient<T>,
    pub output: OutputFormatter,
}

impl<T: Transport> CommandContext<T> {
    pub fn new(client: SolrClient<T>, output: OutputFormatter) -> Self {
        Self { client, output }
    }
}

/// Base trait for CLI commands
pub trait CliCommand {
    /// Execute the command
    fn execute<T: Transport>(&self, ctx: &mut CommandContext<T>) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;

    /// Validate command arguments
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Common command execution wrapper
pub fn execute_command<C: CliCommand, T: Transport>(
    command: &C,
    ctx: &mut CommandContext<T>,
) -> Result<()> {
    tracing::debug!("Executing command: {}", command.name());

    command.validate()?;
    command.execute(ctx)?;

    tracing::debug!("Command {} completed successfully", command.name());
    Ok(())
}

/// Parse repeated `key=value` arguments into Solr options
pub fn parse_options(pairs: &[String]) -> Result<Options> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| {
                    SolrError::validation(format!("Option must look like key=value: {}", pair))
                })
        })
        .collect()
}

/// Parse repeated facet arguments: `field` or `field=order|Title`
pub fn parse_facets(facets: &[String]) -> Vec<(String, String)> {
    facets
        .iter()
        .map(|facet| match facet.split_once('=') {
            Some((field, display)) => (field.to_string(), display.to_string()),
            None => (facet.clone(), facet.clone()),
        })
        .collect()
}
