//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command, which executes the tests at a
//! position and reports the outcomes reconciled onto the position tree.
//!
//! 此模块实现 `run` 命令，执行某个位置的测试，并报告协调到位置树上的结果。

use anyhow::{Context, Result};
use colored::*;
use std::{env, path::PathBuf};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    cli::commands::{load_config, load_tree, GlobalOptions},
    core::{
        adapter::MinitestAdapter,
        models::{PositionKind, Tree},
    },
    infra::{command, t},
    reporting::{
        console::{print_failure_details, print_summary},
        json::{render_run_report, RunReport},
    },
};

/// Executes the run command with the provided arguments.
///
/// # Arguments
/// * `options` - Global CLI options
/// * `tree_path` - Path to the position tree JSON
/// * `position` - Id of the position to run
/// * `config_path` - Path to the adapter configuration file
/// * `json` - Print a JSON report instead of the console summary
///
/// # Returns
/// An error when the run could not be performed or any test failed
pub async fn execute(
    options: &GlobalOptions,
    tree_path: PathBuf,
    position: String,
    config_path: PathBuf,
    json: bool,
) -> Result<()> {
    let (config, locale) = load_config(options, &config_path, json)?;
    let tree = load_tree(&tree_path)?;
    let adapter = MinitestAdapter::new(config);

    let spec = adapter
        .build_spec_for(&tree, &position)
        .context("Failed to build the run request")?;
    let cwd = env::current_dir().context("Failed to resolve the working directory")?;

    if !json {
        let display = shlex::try_join(spec.command.iter().map(String::as_str))
            .unwrap_or_else(|_| spec.command.join(" "));
        println!("{}", t!("running_command", locale = &locale, command = display).blue());
    }

    let stop_token = setup_signal_handler(&locale);

    let execution = tokio::select! {
        biased;
        _ = stop_token.cancelled() => {
            println!("{}", t!("run_cancelled", locale = &locale).yellow());
            remove_results_file(&spec.context.results_path);
            anyhow::bail!("Run cancelled.");
        }
        res = command::execute(&spec, &cwd) => match res {
            Ok(execution) => execution,
            Err(e) => {
                remove_results_file(&spec.context.results_path);
                return Err(e).context("Failed to execute the test runner");
            }
        },
    };

    let results = adapter.results(&spec);
    remove_results_file(&spec.context.results_path);

    let expected = expected_test_count(&tree, &position);
    let any_failed = results.values().any(|outcome| outcome.is_failed());

    if json {
        let report = RunReport {
            command: &spec.command,
            exit_code: execution.status.code(),
            results: &results,
        };
        println!("{}", render_run_report(&report)?);
    } else {
        println!(
            "{}",
            t!("runner_exit_status", locale = &locale, status = execution.status).dimmed()
        );
        print_summary(&results, expected, &locale);
        print_failure_details(&results, &locale);
    }

    if any_failed {
        anyhow::bail!(t!("tests_failed", locale = &locale).to_string());
    }
    Ok(())
}

/// Number of test positions inside the selected subtree.
fn expected_test_count(tree: &Tree, position: &str) -> usize {
    tree.find(position)
        .map(|subtree| {
            subtree
                .iter()
                .filter(|p| p.kind == PositionKind::Test)
                .count()
        })
        .unwrap_or(0)
}

fn remove_results_file(path: &std::path::Path) {
    if let Err(e) = std::fs::remove_file(path) {
        debug!(path = %path.display(), "failed to remove results file: {e}");
    }
}

/// Sets up a signal handler that cancels the in-flight run on Ctrl-C.
fn setup_signal_handler(locale: &str) -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", t!("shutdown_signal", locale = &locale).yellow());
            token_clone.cancel();
        }
    });

    token
}
