//! Search command
//!
//! Runs a faceted search and renders documents, facets and paging links.
//! A navigation link printed by a previous search can be passed back with
//! `--link` to follow it.

use crate::commands::{parse_facets, parse_options, CliCommand, CommandContext};
use clap::Args;
use solrnav_core::{parse_query_values, Result, SolrError, Transport};

/// Search the Solr core
///
/// # Examples
///
/// ```bash
/// # Plain text search
/// solrnav search "george washington"
///
/// # Facet on subject and filter on one of its values
/// solrnav search george --facet subject=1|Subject --fq "subject|history"
///
/// # Follow the `next:` link printed by a previous search
/// solrnav search --link "q=george&fq=subject|history&start=10&" --facet subject
///
/// # Newest first
/// solrnav search george --sort "year desc"
///
/// # Pass options through to Solr
/// solrnav search george -O defType=edismax -O "qf=title authorsAll"
/// ```
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Query text; the configured default query is used when omitted
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Navigation link from a previous search (`q=...&fq=field|value&start=...`)
    #[arg(long, value_name = "QUERY_STRING")]
    pub link: Option<String>,

    /// Filter as `field|value`; repeatable
    #[arg(long = "fq", value_name = "FIELD|VALUE")]
    pub filters: Vec<String>,

    /// Facet field as `field` or `field=order|Title`; repeatable
    #[arg(long = "facet", value_name = "FACET")]
    pub facets: Vec<String>,

    /// Fields to fetch, comma separated
    #[arg(long, value_delimiter = ',')]
    pub fl: Vec<String>,

    /// Sort clause, e.g. "year desc"
    #[arg(long)]
    pub sort: Option<String>,

    /// Number of rows to return
    #[arg(short = 'n', long)]
    pub rows: Option<usize>,

    /// Offset of the first row
    #[arg(short = 's', long)]
    pub start: Option<usize>,

    /// Extra Solr parameter as `key=value`; repeatable
    #[arg(short = 'O', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,
}

impl CliCommand for SearchArgs {
    fn execute<T: Transport>(&self, ctx: &mut CommandContext<T>) -> Result<()> {
        let mut values = self
            .link
            .as_deref()
            .map(parse_query_values)
            .unwrap_or_default();

        if let Some(query) = &self.query {
            values.insert("q".to_string(), vec![query.clone()]);
        }
        if let Some(sort) = &self.sort {
            values.insert("sort".to_string(), vec![sort.clone()]);
        }
        if let Some(rows) = self.rows {
            values.insert("rows".to_string(), vec![rows.to_string()]);
        }
        if let Some(start) = self.start {
            values.insert("start".to_string(), vec![start.to_string()]);
        }
        values
            .entry("fq".to_string())
            .or_default()
            .extend(self.filters.iter().cloned());

        let params = ctx
            .client
            .search_params_from_query_values(
                &values,
                parse_options(&self.options)?,
                parse_facets(&self.facets),
            )
            .with_fl(self.fl.iter().cloned());

        tracing::info!("Searching for '{}'", params.q);
        let response = ctx.client.search(params)?;

        if response.is_empty() && ctx.output.format() == crate::OutputFormat::Pretty {
            ctx.output.warning(&format!("No documents found for '{}'", response.q))?;
        }
        ctx.output.search_response(&response)
    }

    fn name(&self) -> &'static str {
        "search"
    }

    fn validate(&self) -> Result<()> {
        if self.rows == Some(0) {
            return Err(SolrError::validation(
                "rows must be greater than 0; use `count` for totals",
            ));
        }

        parse_options(&self.options)?;

        for filter in &self.filters {
            if filter.matches('|').count() != 1 {
                return Err(SolrError::validation(format!(
                    "Filter must look like field|value: {}",
                    filter
                )));
            }
        }

        Ok(())
    }
}
