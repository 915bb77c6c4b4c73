use anyhow::{Context, Result};
use changelog2version::{
    Changelog2VersionConfig, SyncReport, VersionSynchronizer, init_logging,
};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "changelog2version")]
#[command(
    version,
    about = "update a version file from the latest changelog release",
    long_about = None
)]
struct Cli {
    /// path to the changelog
    #[arg(
        long = "changelog_file",
        visible_alias = "changelog-file",
        default_value = "changelog.md"
    )]
    changelog_file: PathBuf,

    /// path to the version file, created if missing
    #[arg(
        long = "version_file",
        visible_alias = "version-file",
        required_unless_present = "print"
    )]
    version_file: Option<PathBuf>,

    /// version file type (py, c, json), inferred from the extension if omitted
    #[arg(long = "version_file_type", visible_alias = "version-file-type")]
    version_file_type: Option<String>,

    /// suffix appended to the changelog version, e.g. -rc.1
    #[arg(
        long = "additional_version_info",
        visible_alias = "additional-version-info",
        allow_hyphen_values = true
    )]
    additional_version_info: Option<String>,

    /// configuration file (defaults to ./changelog2version.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// fail on changelog format errors
    #[arg(long)]
    strict: bool,

    /// only verify the version file, exit non-zero if it is out of date
    #[arg(long)]
    check: bool,

    /// print the resolved version
    #[arg(long)]
    print: bool,

    /// output format (json or human)
    #[arg(short, long, default_value = "human")]
    format: OutputFormat,

    /// enable verbose diagnostic output
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Json,
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            _ => Err(format!(
                "invalid output format: {}, use 'json' or 'human'",
                s
            )),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = load_config(&cli)?;
    let synchronizer =
        VersionSynchronizer::new(config).context("invalid changelog configuration")?;

    match &cli.version_file {
        Some(version_file) => handle_version_file(&cli, &synchronizer, version_file),
        None => handle_print(&cli, &synchronizer),
    }
}

fn load_config(cli: &Cli) -> Result<Changelog2VersionConfig> {
    let mut config = match &cli.config {
        Some(path) => Changelog2VersionConfig::load_from_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => Changelog2VersionConfig::discover(".").context("failed to load configuration")?,
    };

    if cli.strict {
        config.strict = true;
    }
    if let Some(info) = &cli.additional_version_info {
        config.additional_version_info = Some(info.clone());
    }

    debug!(?config, "effective configuration");
    Ok(config)
}

fn handle_version_file(
    cli: &Cli,
    synchronizer: &VersionSynchronizer,
    version_file: &Path,
) -> Result<()> {
    // resolved before the changelog is read so an unknown type never touches the file
    let file_type = synchronizer.resolve_file_type(cli.version_file_type.as_deref(), version_file)?;

    let result = if cli.check {
        synchronizer.check(&cli.changelog_file, version_file, file_type)
    } else {
        synchronizer.sync(&cli.changelog_file, version_file, file_type)
    };
    let report = result.with_context(|| {
        format!(
            "failed to synchronize {} from {}",
            version_file.display(),
            cli.changelog_file.display()
        )
    })?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Human => {
            if cli.print {
                println!("{}", report.version);
            } else if cli.debug {
                display_report(&report, cli.check);
            }
        }
    }

    if !report.up_to_date {
        anyhow::bail!(
            "{} declares {}, changelog requires {}",
            report.version_file.display(),
            report.previous_version.as_deref().unwrap_or("no version"),
            report.version
        );
    }

    Ok(())
}

fn handle_print(cli: &Cli, synchronizer: &VersionSynchronizer) -> Result<()> {
    let release = synchronizer
        .latest_release(&cli.changelog_file)
        .with_context(|| format!("failed to read {}", cli.changelog_file.display()))?;
    let version = synchronizer.resolve_version(&release)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "changelog_file": cli.changelog_file,
                "version": version,
                "release": release,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => println!("{}", version),
    }

    Ok(())
}

fn display_report(report: &SyncReport, check: bool) {
    let action = if check { "checked" } else { "synchronized" };
    println!(
        "{} {} ({}) from {}",
        action,
        report.version_file.display(),
        report.version_file_type,
        report.changelog_file.display()
    );
    println!(
        "  latest release: {} ({})",
        report.release.version, report.release.date
    );
    println!("  version: {}", report.version);
    println!(
        "  previous: {}",
        report.previous_version.as_deref().unwrap_or("none")
    );
    println!("  changed: {}", report.changed);

    if !report.issues.is_empty() {
        println!("  issues:");
        for issue in &report.issues {
            println!("    {}", issue);
        }
    }
}
