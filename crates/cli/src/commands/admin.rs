//! Admin command for cores and collections
//!
//! Standalone servers are managed by core; pass `--cloud` to manage
//! SolrCloud collections instead.

use crate::commands::{parse_options, CliCommand, CommandContext};
use clap::{Args, Subcommand};
use solrnav_core::{CoreSettings, Result, SolrError, Transport};

/// Manage cores or collections on the Solr server
///
/// Requests go to the Solr root, i.e. the core URL without the core name.
///
/// # Examples
///
/// ```bash
/// # List the cores of a standalone server
/// solrnav admin list
///
/// # Create a core from an existing instance directory
/// solrnav admin create books --instance-dir books
///
/// # Create a SolrCloud collection with two shards
/// solrnav admin --cloud create films -P numShards=2
///
/// # Unload a core and remove its files
/// solrnav admin delete books
/// ```
#[derive(Args, Debug, Clone)]
pub struct AdminArgs {
    /// Manage SolrCloud collections instead of standalone cores
    #[arg(long)]
    pub cloud: bool,

    #[command(subcommand)]
    pub action: AdminAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AdminAction {
    /// List cores or collections
    List,

    /// Create a core or collection
    Create {
        /// Core or collection name
        name: String,

        /// Instance directory of a new core
        #[arg(long)]
        instance_dir: Option<String>,

        /// solrconfig.xml of a new core
        #[arg(long = "solr-config")]
        config: Option<String>,

        /// Schema file of a new core
        #[arg(long)]
        schema: Option<String>,

        /// Data directory of a new core
        #[arg(long)]
        data_dir: Option<String>,

        /// Collection parameter as `key=value`; repeatable
        #[arg(short = 'P', long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// Unload a core or delete a collection
    Delete {
        /// Core or collection name
        name: String,

        /// Leave the core's instance directory on disk
        #[arg(long)]
        keep_instance_dir: bool,
    },
}

impl CliCommand for AdminArgs {
    fn execute<T: Transport>(&self, ctx: &mut CommandContext<T>) -> Result<()> {
        let kind = if self.cloud { "collection" } else { "core" };

        match &self.action {
            AdminAction::List => {
                let names = if self.cloud {
                    ctx.client.list_collections()?
                } else {
                    ctx.client.list_cores()?
                };
                ctx.output.names(&names)
            }
            AdminAction::Create {
                name,
                instance_dir,
                config,
                schema,
                data_dir,
                params,
            } => {
                if self.cloud {
                    ctx.client.create_collection(name, &parse_options(params)?)?;
                } else {
                    let settings = CoreSettings {
                        instance_dir: instance_dir.clone(),
                        config: config.clone(),
                        schema: schema.clone(),
                        data_dir: data_dir.clone(),
                        ..CoreSettings::new(name.as_str())
                    };
                    ctx.client.create_core(&settings)?;
                }
                ctx.output.success(&format!("Created {} {}", kind, name))
            }
            AdminAction::Delete {
                name,
                keep_instance_dir,
            } => {
                if self.cloud {
                    ctx.client.delete_collection(name)?;
                } else {
                    ctx.client.unload_core(name, !keep_instance_dir)?;
                }
                ctx.output.success(&format!("Deleted {} {}", kind, name))
            }
        }
    }

    fn name(&self) -> &'static str {
        "admin"
    }

    fn validate(&self) -> Result<()> {
        match &self.action {
            AdminAction::List => Ok(()),
            AdminAction::Create {
                name,
                instance_dir,
                config,
                schema,
                data_dir,
                params,
            } => {
                check_name(name)?;
                if self.cloud {
                    let core_only = [instance_dir, config, schema, data_dir];
                    if core_only.iter().any(|v| v.is_some()) {
                        return Err(SolrError::validation(
                            "Core paths do not apply to collections; use --param",
                        ));
                    }
                    parse_options(params)?;
                } else if !params.is_empty() {
                    return Err(SolrError::validation(
                        "--param only applies to collections; add --cloud",
                    ));
                }
                Ok(())
            }
            AdminAction::Delete { name, .. } => check_name(name),
        }
    }
}

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SolrError::validation("Name cannot be empty"));
    }
    Ok(())
}
