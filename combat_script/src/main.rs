//! CLI entry point for combat_script.
//! Usage: cargo run -p combat_script -- compile scripts/farm.txt --format ron

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use combat_data::validate_script;
use combat_script::{
    Compilation, CompileOptions, Compiler, Settings, compile_script_to_ron, compile_script_to_toml, render_script,
};
use log::info;

#[derive(Parser)]
#[command(author, version, about = "Compile raid combat scripts.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a script to TOML or RON.
    Compile(CompileArgs),
    /// Compile a script and report dropped lines and resolved raid plans.
    Check(CheckArgs),
    /// Print the canonical form of a script.
    Fmt {
        /// Script to format.
        file: PathBuf,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Script to compile.
    file: PathBuf,
    /// Fail on unrecognized top-level lines.
    #[arg(long)]
    strict: bool,
    /// TOML settings file with `strict` and `[defaults]`.
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
}

#[derive(Args)]
struct CompileArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Write output here instead of stdout.
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Toml)]
    format: OutputFormat,
}

#[derive(Args)]
struct CheckArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Toml,
    Ron,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Compile(args) => run_compile(&args),
        Commands::Check(args) => run_check(&args),
        Commands::Fmt { file } => run_fmt(&file),
    }
}

fn run_compile(args: &CompileArgs) -> Result<()> {
    let settings = load_settings(args.source.settings.as_deref())?;
    let compilation = compile_file(&args.source, &settings)?;
    let text = match args.format {
        OutputFormat::Toml => compile_script_to_toml(&compilation.script).context("serializing script to TOML")?,
        OutputFormat::Ron => compile_script_to_ron(&compilation.script).context("serializing script to RON")?,
    };
    match &args.out {
        Some(out) => {
            fs::write(out, text).with_context(|| format!("writing '{}'", out.display()))?;
            info!("wrote {} raid(s) to '{}'", compilation.script.len(), out.display());
        },
        None => println!("{text}"),
    }
    Ok(())
}

fn run_check(args: &CheckArgs) -> Result<()> {
    let settings = load_settings(args.source.settings.as_deref())?;
    let compilation = compile_file(&args.source, &settings)?;

    for line in &compilation.discarded {
        println!("discarded line {}: '{}'", line.number, line.text);
    }
    for plan in compilation.script.plans(&settings.defaults) {
        let summons = if plan.summons.is_empty() {
            "-".to_string()
        } else {
            plan.summons.join(", ")
        };
        println!(
            "raid {}: url {} | summons {} | repeat {} | {} turn(s)",
            plan.id,
            plan.url.unwrap_or("-"),
            summons,
            plan.repeat,
            plan.turns.len()
        );
    }

    let problems = validate_script(&compilation.script);
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("invalid: {problem}");
        }
        bail!("{} validation problem(s) in '{}'", problems.len(), args.source.file.display());
    }
    Ok(())
}

fn run_fmt(file: &Path) -> Result<()> {
    let source = read_source(file)?;
    let compilation = Compiler::default()
        .compile(&source)
        .with_context(|| format!("compiling '{}'", file.display()))?;
    print!("{}", render_script(&compilation.script));
    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Ok(Settings::load(path)?),
        None => Ok(Settings::default()),
    }
}

fn compile_file(args: &SourceArgs, settings: &Settings) -> Result<Compilation> {
    let options = CompileOptions {
        strict: args.strict || settings.strict,
    };
    let source = read_source(&args.file)?;
    Compiler::new(options)
        .compile(&source)
        .with_context(|| format!("compiling '{}'", args.file.display()))
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading script '{}'", path.display()))
}
