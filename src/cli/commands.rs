//! Command dispatch

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, error, info, instrument};

use crate::application::{balance_factor_line, ApplicationError, TreeDisplay};
use crate::cli::args::{Cli, Commands, ConfigCommands, KeyArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::BalancedTree;
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::{InfraError, ServiceContainer};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, run with --help for usage".to_string(),
        ));
    };

    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { command } => cmd_config(cli, command),
        Commands::Print { input } => {
            let container = container(cli)?;
            let tree = build_tree(&read_keys(input, container.fs.as_ref())?);
            print!(
                "{}",
                balance_factor_line(&tree, &container.settings.print.separator)
            );
            Ok(())
        }
        Commands::Tree { input } => {
            let container = container(cli)?;
            let tree = build_tree(&read_keys(input, container.fs.as_ref())?);
            output::info(&tree.to_tree_string());
            Ok(())
        }
        Commands::Dot {
            input,
            output: dot_path,
            render,
        } => {
            let container = container(cli)?;
            let tree = build_tree(&read_keys(input, container.fs.as_ref())?);
            let service = container.render_service();
            if *render {
                let rendered = service
                    .visualize(&tree, dot_path)
                    .map_err(InfraError::from)?;
                output::action("Wrote", &rendered.dot_path.display());
                output::action("Rendered", &rendered.image_path.display());
            } else {
                let written = service
                    .write_dot(&tree, dot_path)
                    .map_err(InfraError::from)?;
                output::action("Wrote", &written.display());
            }
            Ok(())
        }
        Commands::Check { input } => {
            let container = container(cli)?;
            cmd_check(&read_keys(input, container.fs.as_ref())?)
        }
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| CliError::from(InfraError::io("determine current directory", e))),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let dir = project_dir(cli)?;
    let settings = Settings::load(Some(&dir)).map_err(InfraError::from)?;
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    Ok(ServiceContainer::new(load_settings(cli)?))
}

/// Keys from `--file` (whitespace separated) followed by the positional keys.
#[instrument(level = "debug", skip(fs))]
fn read_keys(input: &KeyArgs, fs: &dyn FileSystem) -> CliResult<Vec<String>> {
    let mut keys = Vec::new();
    if let Some(path) = &input.file {
        let content = fs
            .read_to_string(path)
            .map_err(|e| InfraError::io(format!("read keys from {}", path.display()), e))?;
        keys.extend(content.split_whitespace().map(str::to_string));
    }
    keys.extend(input.keys.iter().cloned());

    if keys.is_empty() {
        output::warning("no keys given, the tree is empty");
    }
    Ok(keys)
}

fn build_tree(keys: &[String]) -> BalancedTree {
    let tree: BalancedTree = keys.iter().map(String::as_str).collect();
    info!(
        "Inserted {} keys: {} nodes, height {}",
        keys.len(),
        tree.len(),
        tree.height()
    );
    tree
}

/// Inserts keys one by one and validates the whole tree after each insert.
#[instrument(level = "debug", skip(keys))]
fn cmd_check(keys: &[String]) -> CliResult<()> {
    let mut tree = BalancedTree::new();
    for (step, key) in keys.iter().enumerate() {
        tree.insert(key.as_str());
        tree.validate().map_err(|e| {
            error!(step = step + 1, key = %key, "invariant broken after insert");
            InfraError::from(ApplicationError::from(e))
        })?;
    }

    output::success(&format!(
        "{} inserts, {} nodes, height {}: order, balance, heights and parent links hold",
        keys.len(),
        tree.len(),
        tree.height()
    ));
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml().map_err(InfraError::from)?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("Global", &path.display()),
                None => output::warning("no global config directory on this platform"),
            }
            output::action("Local", &local_config_path(&project_dir(cli)?).display());
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
