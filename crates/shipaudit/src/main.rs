use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn};

use shipaudit_core::{
    AuditPlan, IssueFilter, read_table, render_csv_for_table, render_tsv_for_table, run_audit,
};
use shipaudit_domain::{Table, validate_schema};
use shipaudit_types::{ConfigFile, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, Defaults, FailOn};

mod config_loader;
mod env_expand;
mod presets;

use config_loader::{DEFAULT_CONFIG_PATH, load_config};
use presets::Preset;

#[derive(Parser)]
#[command(name = "shipaudit")]
#[command(about = "Audit shipment records for weight mismatches and SLA violations", long_about = None)]
struct Cli {
    /// Enable verbose (info-level) logging to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a shipments CSV and write the issues report.
    Audit(Box<AuditArgs>),

    /// Check that a shipments CSV has every required column.
    Validate(ValidateArgs),

    /// Print the effective configuration (built-in + optional config file).
    Config(ConfigArgs),

    /// Initialize a new shipaudit.toml configuration file.
    Init(InitArgs),
}

#[derive(Parser, Debug, Default)]
struct AuditArgs {
    /// Path to a config file. If omitted, uses ./shipaudit.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shipments CSV to audit (`-` reads stdin).
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Where to write the issues-only CSV report.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Where to write the full audited dataset as CSV.
    #[arg(long)]
    full_output: Option<PathBuf>,

    /// Where to write the JSON receipt.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Where to write a Markdown summary.
    #[arg(long)]
    md: Option<PathBuf>,

    /// Where to write the issues-only report as TSV.
    #[arg(long)]
    tsv: Option<PathBuf>,

    /// Where to write the filtered view as CSV.
    #[arg(long)]
    view: Option<PathBuf>,

    /// Weight differences at or below this many kg are not issues.
    #[arg(long, allow_negative_numbers = true)]
    tolerance: Option<f64>,

    /// When to exit with code 2.
    #[arg(long, value_enum)]
    fail_on: Option<FailOnArg>,

    /// Show every row in the view, not only issues.
    #[arg(long)]
    all_rows: bool,

    /// Leave weight mismatches out of the view.
    #[arg(long)]
    no_weight: bool,

    /// Leave SLA violations out of the view.
    #[arg(long)]
    no_sla: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Path to a config file. If omitted, uses ./shipaudit.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shipments CSV to check (`-` reads stdin).
    #[arg(long, short)]
    input: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Path to a config file. If omitted, uses ./shipaudit.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
    format: ConfigFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ConfigFormat {
    Toml,
    Json,
}

#[derive(Parser, Debug)]
struct InitArgs {
    /// Configuration preset to use.
    ///
    /// Available presets:
    /// - minimal: Built-in defaults (default)
    /// - strict: Fail on any issue, also write the full dataset
    #[arg(long, short, value_enum, default_value_t = Preset::Minimal)]
    preset: Preset,

    /// Output path for the configuration file.
    #[arg(long, short, default_value = DEFAULT_CONFIG_PATH)]
    output: PathBuf,

    /// Overwrite an existing configuration file.
    #[arg(long, short)]
    force: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FailOnArg {
    Issue,
    Never,
}

impl From<FailOnArg> for FailOn {
    fn from(v: FailOnArg) -> Self {
        match v {
            FailOnArg::Issue => FailOn::Issue,
            FailOnArg::Never => FailOn::Never,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("input file not found: {}", .0.display())]
struct InputNotFoundError(PathBuf);

/// Audit settings after layering CLI flags over the config file.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    input: PathBuf,
    output: PathBuf,
    full_output: Option<PathBuf>,
    weight_tolerance_kg: f64,
    fail_on: FailOn,
    filter: IssueFilter,
}

fn main() -> std::process::ExitCode {
    match run_with_args(std::env::args_os()) {
        Ok(code) => std::process::ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("{err:?}");
            std::process::ExitCode::from(1)
        }
    }
}

fn run_with_args<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    init_logging(cli.verbose, cli.debug);

    match cli.command {
        Commands::Audit(args) => cmd_audit(*args),
        Commands::Validate(args) => {
            cmd_validate(args)?;
            Ok(0)
        }
        Commands::Config(args) => {
            cmd_config(args)?;
            Ok(0)
        }
        Commands::Init(args) => {
            cmd_init(args)?;
            Ok(0)
        }
    }
}

/// Initialize tracing/logging based on CLI flags.
fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}

fn resolve_settings(args: &AuditArgs, defaults: &Defaults) -> Settings {
    let path_or = |flag: &Option<PathBuf>, cfg: &Option<String>, fallback: &str| {
        flag.clone()
            .or_else(|| cfg.as_deref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(fallback))
    };

    Settings {
        input: path_or(&args.input, &defaults.input, DEFAULT_INPUT_PATH),
        output: path_or(&args.output, &defaults.output, DEFAULT_OUTPUT_PATH),
        full_output: args
            .full_output
            .clone()
            .or_else(|| defaults.full_output.as_deref().map(PathBuf::from)),
        weight_tolerance_kg: args
            .tolerance
            .or(defaults.weight_tolerance_kg)
            .unwrap_or(0.0),
        fail_on: args
            .fail_on
            .map(FailOn::from)
            .or(defaults.fail_on)
            .unwrap_or_default(),
        filter: IssueFilter {
            only_issues: !args.all_rows && defaults.only_issues.unwrap_or(true),
            include_weight: !args.no_weight && defaults.include_weight.unwrap_or(true),
            include_sla: !args.no_sla && defaults.include_sla.unwrap_or(true),
        },
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn load_table(path: &Path) -> Result<Table> {
    if is_stdin(path) {
        debug!("Reading shipments from stdin");
        return read_table(io::stdin().lock()).context("read shipments from stdin");
    }

    if !path.exists() {
        return Err(InputNotFoundError(path.to_path_buf()).into());
    }

    info!("Reading shipments from: {}", path.display());
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    read_table(BufReader::new(file)).with_context(|| format!("read {}", path.display()))
}

fn cmd_audit(args: AuditArgs) -> Result<i32> {
    let cfg = load_config(args.config.clone())?;
    let settings = resolve_settings(&args, &cfg.defaults);
    debug!("Effective audit settings: {:?}", settings);

    let table = load_table(&settings.input)?;
    let source = settings.input.display().to_string();

    let plan = AuditPlan {
        source: source.clone(),
        weight_tolerance_kg: settings.weight_tolerance_kg,
        fail_on: settings.fail_on,
        filter: settings.filter,
    };

    let run = run_audit(&plan, &table).with_context(|| format!("audit {source}"))?;

    if run.view.is_empty() {
        warn!("No rows match the selected filters");
    }

    write_text(&settings.output, &render_csv_for_table(&run.report.issues))?;

    if let Some(path) = &settings.full_output {
        write_text(path, &render_csv_for_table(&run.report.audited))?;
    }
    if let Some(path) = &args.json {
        write_json(path, &run.receipt)?;
    }
    if let Some(path) = &args.md {
        write_text(path, &run.markdown)?;
    }
    if let Some(path) = &args.tsv {
        write_text(path, &render_tsv_for_table(&run.report.issues))?;
    }
    if let Some(path) = &args.view {
        write_text(path, &render_csv_for_table(&run.view))?;
    }

    println!("Audit completed.");
    println!("Issues found: {}", run.receipt.counts.issues);
    println!("Report saved to: {}", settings.output.display());

    Ok(run.exit_code)
}

fn cmd_validate(args: ValidateArgs) -> Result<()> {
    let input = match args.input {
        Some(p) => p,
        None => {
            let cfg = load_config(args.config)?;
            PathBuf::from(
                cfg.defaults
                    .input
                    .unwrap_or_else(|| DEFAULT_INPUT_PATH.to_string()),
            )
        }
    };

    let table = load_table(&input)?;
    validate_schema(&table).with_context(|| format!("validate {}", input.display()))?;

    println!(
        "{}: OK ({} row(s), {} column(s))",
        input.display(),
        table.len(),
        table.columns().len()
    );
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> Result<()> {
    let cfg: ConfigFile = load_config(args.config)?;

    let text = match args.format {
        ConfigFormat::Toml => toml::to_string_pretty(&cfg).context("serialize config as TOML")?,
        ConfigFormat::Json => {
            serde_json::to_string_pretty(&cfg).context("serialize config as JSON")? + "\n"
        }
    };
    print!("{text}");
    Ok(())
}

fn cmd_init(args: InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        bail!(
            "Configuration file '{}' already exists (use --force to overwrite)",
            output_path.display()
        );
    }

    write_text(output_path, &args.preset.generate())?;

    println!(
        "Created {} with '{}' preset.",
        output_path.display(),
        args.preset.name()
    );
    println!();
    println!("Next steps:");
    println!(
        "  1. Point `input` in {} at your shipments CSV",
        output_path.display()
    );
    println!("  2. Run 'shipaudit audit' to audit it");

    Ok(())
}

fn write_json(path: &Path, value: &impl serde::Serialize) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(value).context("serialize receipt")?;
    bytes.push(b'\n');
    create_parent_dir(path)?;
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    create_parent_dir(path)?;
    std::fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir {}", parent.display()))?;
    }
    Ok(())
}
