//! Post command for adding or replacing documents

use crate::commands::{CliCommand, CommandContext};
use clap::Args;
use solrnav_core::{DocumentData, Result, SolrError, Transport};
use std::io::Read;
use std::path::PathBuf;

/// Add or replace documents from a JSON file and commit
///
/// The file holds one JSON object or an array of objects. Use `-` to read
/// from standard input.
///
/// # Examples
///
/// ```bash
/// solrnav post docs.json
/// echo '{"id": "1", "title": "George"}' | solrnav post -
/// ```
#[derive(Args, Debug, Clone)]
pub struct PostArgs {
    /// JSON file with the documents, or `-` for stdin
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl PostArgs {
    fn read_input(&self) -> Result<String> {
        if self.file.as_os_str() == "-" {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            Ok(content)
        } else {
            Ok(std::fs::read_to_string(&self.file)?)
        }
    }
}

/// Documents from a JSON object or array of objects, keeping field order
pub fn parse_documents(content: &str) -> Result<Vec<DocumentData>> {
    match content.trim_start().chars().next() {
        Some('[') => Ok(serde_json::from_str(content)?),
        Some('{') => Ok(vec![serde_json::from_str(content)?]),
        _ => Err(SolrError::validation(
            "Expected a JSON object or an array of objects",
        )),
    }
}

impl CliCommand for PostArgs {
    fn execute<T: Transport>(&self, ctx: &mut CommandContext<T>) -> Result<()> {
        let docs = parse_documents(&self.read_input()?)?;
        if docs.is_empty() {
            return ctx.output.warning("Nothing to post");
        }

        ctx.client.post(&docs)?;
        tracing::info!("Posted {} documents", docs.len());
        ctx.output.success(&format!("Posted {} document(s)", docs.len()))
    }

    fn name(&self) -> &'static str {
        "post"
    }

    fn validate(&self) -> Result<()> {
        if self.file.as_os_str() != "-" && !self.file.is_file() {
            return Err(SolrError::validation(format!(
                "File does not exist: {}",
                self.file.display()
            )));
        }
        Ok(())
    }
}
