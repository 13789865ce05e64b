//! Count command

use crate::commands::{CliCommand, CommandContext};
use clap::Args;
use solrnav_core::{Result, Transport};

/// Print the number of documents in the core
#[derive(Args, Debug, Clone, Default)]
pub struct CountArgs {}

impl CliCommand for CountArgs {
    fn execute<T: Transport>(&self, ctx: &mut CommandContext<T>) -> Result<()> {
        let count = ctx.client.count()?;
        ctx.output.count(count)
    }

    fn name(&self) -> &'static str {
        "count"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::execute_command;
    use crate::commands::tests::{context, last_request};
    use crate::config::OutputFormat;

    #[test]
    fn test_count() {
        let body = r#"{"response": {"numFound": 321, "start": 0, "docs": []}}"#;
        let (mut ctx, buffer) = context(OutputFormat::Json, 200, body);
        execute_command(&CountArgs {}, &mut ctx).unwrap();

        assert!(last_request(&ctx).url.ends_with("/select?q=%2A&rows=0&"));
        let value: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(value["count"], 321);
    }

    #[test]
    fn test_count_http_error() {
        let (mut ctx, buffer) = context(OutputFormat::Pretty, 503, "unavailable");
        assert!(execute_command(&CountArgs {}, &mut ctx).is_err());
        assert!(buffer.contents().is_empty());
    }
}
