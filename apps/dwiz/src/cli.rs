//! Command line interface definition

use clap::{Parser, Subcommand};
use dwiz_types::{ArtifactKey, ColorChoice, Component, Flow};
use std::path::PathBuf;

/// dwiz - component version selection for the deployment wizard
#[derive(Parser)]
#[command(name = "dwiz")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Component version selection for the deployment wizard")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable structured debug logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Deployment service base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the recommended versions and whether the wizard can proceed
    #[command(alias = "v")]
    Versions {
        /// Wizard flow
        #[arg(long, value_enum, default_value = "install")]
        flow: Flow,

        /// Pick an artifact instead of the recommendation (COMPONENT=KEY)
        #[arg(long = "select", value_name = "COMPONENT=KEY", value_parser = parse_choice)]
        choices: Vec<Choice>,

        /// Components counted in the size estimate
        #[arg(long, value_delimiter = ',', value_name = "COMPONENTS")]
        active: Option<Vec<Component>>,
    },

    /// List every installable artifact per component
    #[command(alias = "ls")]
    Catalog {
        /// Wizard flow used for the default picks
        #[arg(long, value_enum, default_value = "install")]
        flow: Flow,
    },

    /// Manage drafts left by interrupted wizard runs
    #[command(subcommand)]
    Drafts(DraftsCommands),

    /// Show connection parameters of an existing cluster
    Connection {
        /// Cluster name
        cluster: String,
    },
}

/// Draft management commands
#[derive(Subcommand)]
pub enum DraftsCommands {
    /// List draft deployments
    List,

    /// Delete a draft deployment
    Discard {
        /// Draft name
        name: String,
    },
}

/// A `COMPONENT=KEY` selection
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    pub component: Component,
    pub key: ArtifactKey,
}

fn parse_choice(value: &str) -> Result<Choice, String> {
    let (component, key) = value
        .split_once('=')
        .ok_or_else(|| format!("expected COMPONENT=KEY, got '{value}'"))?;
    Ok(Choice {
        component: component.parse().map_err(|e| format!("{e}"))?,
        key: key.parse().map_err(|e| format!("{e}"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        let choice = parse_choice("core=4.2.1.0-1.el7-9f1c").unwrap();
        assert_eq!(choice.component, Component::Core);
        assert_eq!(choice.key.version, "4.2.1.0");
        assert_eq!(choice.key.release.as_deref(), Some("1.el7"));

        assert!(parse_choice("core").is_err());
        assert!(parse_choice("engine=4.2.1.0-1-9f1c").is_err());
        assert!(parse_choice("core=9f1c").is_err());
    }

    #[test]
    fn test_cli_parses_versions() {
        let cli = Cli::try_parse_from([
            "dwiz",
            "--json",
            "versions",
            "--flow",
            "upgrade",
            "--active",
            "manager,agent",
        ])
        .unwrap();
        assert!(cli.global.json);
        match cli.command {
            Commands::Versions { flow, active, .. } => {
                assert_eq!(flow, Flow::UpgradeOnly);
                assert_eq!(active, Some(vec![Component::Manager, Component::Agent]));
            }
            _ => panic!("expected versions"),
        }
    }
}
