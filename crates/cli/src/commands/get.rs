//! Get command for single-document lookups

use crate::commands::{parse_options, CliCommand, CommandContext};
use clap::Args;
use solrnav_core::{GetParams, Result, SolrError, Transport};

/// Fetch a single document by id or by query
///
/// # Examples
///
/// ```bash
/// solrnav get 00009565
/// solrnav get --query 'isbn:"9780141439518"' --fl id,title
/// ```
#[derive(Args, Debug, Clone, Default)]
pub struct GetArgs {
    /// Document id
    #[arg(value_name = "ID", conflicts_with = "query")]
    pub id: Option<String>,

    /// Query that must match exactly one document
    #[arg(short, long)]
    pub query: Option<String>,

    /// Fields to fetch, comma separated
    #[arg(long, value_delimiter = ',')]
    pub fl: Vec<String>,

    /// Extra Solr parameter as `key=value`; repeatable
    #[arg(short = 'O', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,
}

impl GetArgs {
    fn params(&self) -> Result<GetParams> {
        let mut params = match (&self.id, &self.query) {
            (Some(id), None) => GetParams::for_id(id),
            (None, Some(query)) => GetParams::new(query.clone(), Vec::new(), Default::default()),
            _ => {
                return Err(SolrError::validation(
                    "Provide either a document id or --query",
                ))
            }
        };
        params.fl = self.fl.clone();
        params.options = parse_options(&self.options)?;
        Ok(params)
    }
}

impl CliCommand for GetArgs {
    fn execute<T: Transport>(&self, ctx: &mut CommandContext<T>) -> Result<()> {
        let params = self.params()?;
        match ctx.client.get(&params)? {
            Some(doc) => ctx.output.document(&doc),
            None => {
                tracing::info!("No document matched {}", params.q);
                ctx.output.warning(&format!("No document found for {}", params.q))
            }
        }
    }

    fn name(&self) -> &'static str {
        "get"
    }

    fn validate(&self) -> Result<()> {
        self.params().map(|_| ())
    }
}
