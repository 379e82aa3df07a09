use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use looksmith_core::{Config, Report, Severity, CONFIG_FILE_NAME};
use looksmith_dbt::{apply_catalog_types, select_models, validate_manifest, Catalog, DbtProject, Manifest};
use looksmith_engine::{Generator, LookmlFile, Translation};

/// looksmith - Generate LookML views and explores from dbt models
#[derive(Parser)]
#[command(name = "looksmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: looksmith.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Write a JSON run report to this path
    #[arg(long, global = true)]
    report: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate LookML files from dbt artifacts
    Generate(RunArgs),

    /// Run the translation without writing LookML files
    Check(RunArgs),
}

/// Flags shared by every command; each overrides the config file
#[derive(Args, Debug, Default, Clone)]
struct RunArgs {
    /// Directory containing dbt_project.yml
    #[arg(long)]
    project_dir: Option<PathBuf>,

    /// Directory containing manifest.json and catalog.json
    #[arg(long)]
    target_dir: Option<PathBuf>,

    /// Directory to write LookML files to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Only translate models with this tag
    #[arg(long)]
    tag: Option<String>,

    /// Connection name for generated explores (default: dbt project name)
    #[arg(long)]
    connection: Option<String>,
}

impl RunArgs {
    fn apply(self, mut config: Config) -> Config {
        if let Some(project_dir) = self.project_dir {
            config.project_dir = project_dir;
        }
        if let Some(target_dir) = self.target_dir {
            config.target_dir = target_dir;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if self.tag.is_some() {
            config.tag = self.tag;
        }
        if self.connection.is_some() {
            config.connection = self.connection;
        }
        config
    }
}

/// Everything one run produced
struct RunOutput {
    translation: Translation,
    report: Report,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = load_config(cli.config.as_deref())?;

    let (output, write) = match cli.command {
        Commands::Generate(args) => {
            let config = args.apply(config);
            let output = run(&config)?;
            write_lookml(&config, &output.translation)?;
            (output, true)
        }
        Commands::Check(args) => {
            let config = args.apply(config);
            (run(&config)?, false)
        }
    };

    if let Some(path) = &cli.report {
        output
            .report
            .save_to_file(path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        eprintln!("{} {}", "Report saved to:".green(), path.display());
    }

    print_report_summary(&output.report, write);
    Ok(())
}

/// Install the stderr log subscriber
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Load the explicit config file, else looksmith.toml if present, else defaults
fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path).with_context(|| format!("Invalid config {}", path.display()));
    }

    let default_path = Path::new(CONFIG_FILE_NAME);
    if default_path.exists() {
        return Config::from_file(default_path)
            .with_context(|| format!("Invalid config {}", default_path.display()));
    }

    tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
    Ok(Config::default())
}

/// Load, validate, merge, select and translate
fn run(config: &Config) -> Result<RunOutput> {
    let manifest_path = config.manifest_path();
    tracing::info!("Loading manifest from {}", manifest_path.display());
    let manifest = Manifest::from_file(&manifest_path).with_context(|| {
        format!(
            "Could not read {}. Run 'dbt docs generate' first.",
            manifest_path.display()
        )
    })?;

    let catalog_path = config.catalog_path();
    tracing::info!("Loading catalog from {}", catalog_path.display());
    let catalog = Catalog::from_file(&catalog_path).with_context(|| {
        format!(
            "Could not read {}. Run 'dbt docs generate' first.",
            catalog_path.display()
        )
    })?;

    let connection = match &config.connection {
        Some(connection) => connection.clone(),
        None => {
            let project_path = config.project_file_path();
            DbtProject::from_file(&project_path)
                .with_context(|| format!("Could not read dbt project {}", project_path.display()))?
                .name
        }
    };

    let validated = validate_manifest(&manifest).context("Invalid manifest")?;
    let dialect = validated.dialect;
    tracing::info!("Translating models for dialect {}", dialect);

    let selected = select_models(validated.into_models(), config.tag.as_deref());
    if let Some(tag) = &config.tag {
        tracing::info!("Selected {} models tagged '{}'", selected.len(), tag);
    }

    let typed = apply_catalog_types(selected, &catalog, dialect);

    let generator = Generator::new(dialect, connection).with_include(config.include.clone());
    let translation = generator.translate(&typed.models);

    let mut report = Report::from_diagnostics(typed.diagnostics);
    for diagnostic in translation.diagnostics() {
        report.add_diagnostic(diagnostic.clone());
    }
    report.record_output(
        translation.models.len(),
        translation.models.len(),
        translation.explore_count(),
    );

    Ok(RunOutput { translation, report })
}

/// Write views to `<output>/views/` and model files to `<output>/`
fn write_lookml(config: &Config, translation: &Translation) -> Result<()> {
    let views_dir = config.views_dir();
    std::fs::create_dir_all(&views_dir)
        .with_context(|| format!("Failed to create {}", views_dir.display()))?;

    let views = translation.view_files();
    for file in &views {
        write_file(&views_dir, file)?;
    }
    tracing::info!("Generated {} lookml views in {}", views.len(), views_dir.display());

    let models = translation.model_files();
    for file in &models {
        write_file(&config.output_dir, file)?;
    }
    tracing::info!(
        "Generated {} lookml models in {}",
        models.len(),
        config.output_dir.display()
    );

    Ok(())
}

fn write_file(dir: &Path, file: &LookmlFile) -> Result<()> {
    let path = dir.join(&file.filename);
    std::fs::write(&path, &file.contents)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Print report summary to stdout
fn print_report_summary(report: &Report, wrote_files: bool) {
    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "LookML Generation Report".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    println!("Version: {}", report.version);
    println!("Timestamp: {}", report.timestamp);
    println!();

    println!("{}", "Summary:".bold());
    println!("  Models translated: {}", report.summary.models_translated);
    if wrote_files {
        println!("  Views written:     {}", report.summary.views_generated);
        println!("  Explores written:  {}", report.summary.explores_generated);
    }

    if report.has_warnings() {
        println!("  Warnings: {}", format!("{}", report.summary.warnings).yellow());
    } else {
        println!("  Warnings: {}", format!("{}", report.summary.warnings).green());
    }

    println!("  Info:     {}", report.summary.info);
    println!();

    if report.diagnostics.is_empty() {
        println!("{}", "✓ No issues found!".green().bold());
    } else {
        println!("{}", "Diagnostics:".bold());
        for diag in &report.diagnostics {
            let severity_str = match diag.severity {
                Severity::Warn => "WARN".yellow().bold(),
                Severity::Info => "INFO".cyan(),
            };

            println!("  [{}] {}: {}", severity_str, diag.code, diag.message);
            if let Some(model) = &diag.model {
                println!("    model: {}", model);
            }
        }
    }

    println!();
    println!("{}", "=".repeat(60).bright_blue());
}
