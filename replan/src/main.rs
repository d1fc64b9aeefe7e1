//! Retargeting CLI for recorded procedure files.
//!
//! Operates on schema-validated JSON files in the v1 transport form
//! `(operations, arg_ids, result_ids, promise_out_id)`, rebinding
//! argument/result ids or the owning worker without re-recording the
//! operations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use replan::core::bindings::audit_bindings;
use replan::core::procedure::Procedure;
use replan::exit_codes;
use replan::io::config::{ReplanConfig, load_config};
use replan::io::store::{load_procedure, save_procedure};
use replan::logging;
use replan::term::Id;

const DEFAULT_CONFIG_PATH: &str = ".replan/config.toml";

#[derive(Parser)]
#[command(name = "replan", version, about = "Retarget recorded procedure files")]
struct Cli {
    /// Config file (default: `.replan/config.toml`).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a summary of a procedure file.
    Show { file: PathBuf },
    /// Check a procedure file: schema, decode, binding audit.
    Validate { file: PathBuf },
    /// Rebind argument and result ids to new values, positionally.
    Rebind {
        file: PathBuf,
        /// New argument ids, comma-separated (digits = numeric id).
        #[arg(long, value_delimiter = ',')]
        args: Vec<String>,
        /// New result ids, comma-separated.
        #[arg(long, value_delimiter = ',')]
        results: Vec<String>,
        /// Write here instead of rewriting `file` in place.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rebind every occurrence of one worker id to another.
    Rehome {
        file: PathBuf,
        /// Worker id to replace.
        #[arg(long)]
        from: String,
        /// Worker id to substitute.
        #[arg(long)]
        to: String,
        /// Write here instead of rewriting `file` in place.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let cfg = load_config(&config_path).context("load config")?;

    match cli.command {
        Command::Show { file } => cmd_show(&file),
        Command::Validate { file } => cmd_validate(&file, &cfg),
        Command::Rebind {
            file,
            args,
            results,
            output,
        } => cmd_rebind(&file, &args, &results, output.as_deref(), &cfg),
        Command::Rehome {
            file,
            from,
            to,
            output,
        } => cmd_rehome(&file, &from, &to, output.as_deref(), &cfg),
    }
}

fn cmd_show(file: &Path) -> Result<i32> {
    let procedure = load_procedure(file)?;
    println!("{procedure}");
    println!("arg_ids: {}", render_ids(&procedure.arg_ids));
    println!("result_ids: {}", render_ids(&procedure.result_ids));
    match &procedure.promise_out_id {
        Some(id) => println!("promise_out_id: {id}"),
        None => println!("promise_out_id: -"),
    }
    Ok(exit_codes::OK)
}

fn cmd_validate(file: &Path, cfg: &ReplanConfig) -> Result<i32> {
    let procedure = load_procedure(file)?;
    let findings = audit_bindings(&procedure);
    if findings.is_empty() {
        println!("ok");
        return Ok(exit_codes::OK);
    }
    for finding in &findings {
        eprintln!("{finding}");
    }
    if cfg.strict_bindings {
        bail!("binding audit failed with {} finding(s)", findings.len());
    }
    Ok(exit_codes::FINDINGS)
}

fn cmd_rebind(
    file: &Path,
    args: &[String],
    results: &[String],
    output: Option<&Path>,
    cfg: &ReplanConfig,
) -> Result<i32> {
    let mut procedure = load_procedure(file)?;
    let arg_ids: Vec<Id> = args.iter().map(|raw| Id::parse(raw)).collect();
    let result_ids: Vec<Id> = results.iter().map(|raw| Id::parse(raw)).collect();
    procedure.update_args(&arg_ids, result_ids);
    save(file, output, &procedure, cfg)?;
    println!("{procedure}");
    Ok(exit_codes::OK)
}

fn cmd_rehome(
    file: &Path,
    from: &str,
    to: &str,
    output: Option<&Path>,
    cfg: &ReplanConfig,
) -> Result<i32> {
    let mut procedure = load_procedure(file)?;
    procedure.update_worker_ids(&Id::parse(from), &Id::parse(to));
    save(file, output, &procedure, cfg)?;
    println!("{procedure}");
    Ok(exit_codes::OK)
}

fn save(
    file: &Path,
    output: Option<&Path>,
    procedure: &Procedure,
    cfg: &ReplanConfig,
) -> Result<()> {
    let target = output.unwrap_or(file);
    save_procedure(target, procedure, cfg.pretty)
}

fn render_ids(ids: &[Id]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
