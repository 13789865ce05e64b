//! Delete command

use crate::commands::{CliCommand, CommandContext};
use clap::Args;
use solrnav_core::{Result, SolrError, Transport};

/// Delete documents by id and commit
#[derive(Args, Debug, Clone, Default)]
pub struct DeleteArgs {
    /// Ids of the documents to delete
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}

impl CliCommand for DeleteArgs {
    fn execute<T: Transport>(&self, ctx: &mut CommandContext<T>) -> Result<()> {
        ctx.client.delete(&self.ids)?;
        tracing::info!("Deleted {} documents", self.ids.len());
        ctx.output
            .success(&format!("Deleted {} document(s)", self.ids.len()))
    }

    fn name(&self) -> &'static str {
        "delete"
    }

    fn validate(&self) -> Result<()> {
        if self.ids.is_empty() || self.ids.iter().any(|id| id.trim().is_empty()) {
            return Err(SolrError::validation("Document ids cannot be empty"));
        }
        Ok(())
    }
}
