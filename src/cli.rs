// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::{env, path::PathBuf};

use crate::infra::t;

pub mod commands;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    let pos = args.iter().position(|arg| arg == "--lang")?;
    args.get(pos + 1).cloned()
}

fn tree_arg(locale: &str) -> Arg {
    Arg::new("tree")
        .short('t')
        .long("tree")
        .help(t!("arg_tree", locale = locale).to_string())
        .value_name("TREE")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn position_arg(locale: &str) -> Arg {
    Arg::new("position")
        .short('p')
        .long("position")
        .help(t!("arg_position", locale = locale).to_string())
        .value_name("ID")
        .required(true)
        .action(ArgAction::Set)
}

fn config_arg(locale: &str) -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .help(t!("arg_config", locale = locale).to_string())
        .value_name("CONFIG")
        .default_value(crate::core::config::CONFIG_FILE_NAME)
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn build_cli(locale: &str) -> Command {
    Command::new("minitest-adapter")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cmd_run_about", locale = locale).to_string())
                .arg(tree_arg(locale))
                .arg(position_arg(locale))
                .arg(config_arg(locale))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help(t!("arg_json", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("spec")
                .about(t!("cmd_spec_about", locale = locale).to_string())
                .arg(tree_arg(locale))
                .arg(position_arg(locale))
                .arg(config_arg(locale)),
        )
        .subcommand(
            Command::new("parse")
                .about(t!("cmd_parse_about", locale = locale).to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("arg_output", locale = locale).to_string())
                        .value_name("OUTPUT")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(tree_arg(locale))
                .arg(position_arg(locale).required(false)),
        )
        .subcommand(
            Command::new("root")
                .about(t!("cmd_root_about", locale = locale).to_string())
                .arg(
                    Arg::new("dir")
                        .long("dir")
                        .help(t!("arg_dir", locale = locale).to_string())
                        .value_name("DIR")
                        .default_value(".")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(config_arg(locale)),
        )
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let explicit_language = pre_parse_language();
    let language = crate::resolve_locale(
        &explicit_language
            .clone()
            .or_else(sys_locale::get_locale)
            .unwrap_or_else(|| "en".to_string()),
    );
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();
    let options = commands::GlobalOptions {
        language,
        explicit_language: explicit_language.is_some(),
    };

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            // Required and defaulted arguments are always present.
            let tree = run_matches.get_one::<PathBuf>("tree").cloned().unwrap_or_default();
            let position = run_matches.get_one::<String>("position").cloned().unwrap_or_default();
            let config = run_matches.get_one::<PathBuf>("config").cloned().unwrap_or_default();
            let json = run_matches.get_flag("json");

            commands::run::execute(&options, tree, position, config, json).await?;
        }
        Some(("spec", spec_matches)) => {
            let tree = spec_matches.get_one::<PathBuf>("tree").cloned().unwrap_or_default();
            let position = spec_matches.get_one::<String>("position").cloned().unwrap_or_default();
            let config = spec_matches.get_one::<PathBuf>("config").cloned().unwrap_or_default();

            commands::spec::execute(&options, tree, position, config)?;
        }
        Some(("parse", parse_matches)) => {
            let output = parse_matches.get_one::<PathBuf>("output").cloned().unwrap_or_default();
            let tree = parse_matches.get_one::<PathBuf>("tree").cloned().unwrap_or_default();
            let position = parse_matches.get_one::<String>("position").cloned();

            commands::parse::execute(output, tree, position)?;
        }
        Some(("root", root_matches)) => {
            let dir = root_matches.get_one::<PathBuf>("dir").cloned().unwrap_or_default();
            let config = root_matches.get_one::<PathBuf>("config").cloned().unwrap_or_default();

            commands::root::execute(&options, dir, config)?;
        }
        _ => {
            // Clap has already printed help when no subcommand is given.
        }
    }
    Ok(())
}
