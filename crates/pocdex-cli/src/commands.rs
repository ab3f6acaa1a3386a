//! CLI command implementations.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pocdex_core::{IndexConfig, PocIndex, CONFIG_FILE_NAME};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Index settings given on the command line. Each one set here wins over
/// the config file.
#[derive(Debug, Default)]
pub struct IndexOverrides {
    pub root: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub base_url: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub follow_symlinks: bool,
    pub respect_ignore: bool,
    pub sort: bool,
}

/// Loads the config file (explicit, or `./pocdex.json` when present) and
/// applies the command-line overrides on top.
pub fn resolve_config(config_path: Option<&Path>, overrides: IndexOverrides) -> Result<IndexConfig> {
    let discovered = Path::new(CONFIG_FILE_NAME);
    let mut config = match config_path {
        Some(path) => IndexConfig::load(path)?,
        None if discovered.is_file() => IndexConfig::load(discovered)?,
        None => IndexConfig::default(),
    };

    if let Some(root) = overrides.root {
        config.root = root;
    }
    if let Some(output) = overrides.output {
        config.output = output;
    }
    if let Some(base_url) = overrides.base_url {
        config.base_url = base_url;
    }
    if let Some(prefix) = overrides.prefix {
        config.prefix = prefix;
    }
    if let Some(suffix) = overrides.suffix {
        config.suffix = suffix;
    }
    config.follow_symlinks |= overrides.follow_symlinks;
    config.respect_ignore |= overrides.respect_ignore;
    config.sort |= overrides.sort;

    if config.suffix.is_empty() {
        return Err("suffix must not be empty".into());
    }

    debug!("Resolved config: {:?}", config);
    Ok(config)
}

/// Write a default config file into `path`.
pub fn init(path: &Path) -> Result<()> {
    let config_path = path.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    fs::create_dir_all(path)?;
    fs::write(&config_path, IndexConfig::default().to_pretty_json()?)?;

    println!("{} Wrote {}", "✓".green(), config_path.display());
    println!("  Run {} to build the index", "pocdex index".cyan());

    Ok(())
}

/// Walk the repository and write the index.
pub fn index(config_path: Option<&Path>, overrides: IndexOverrides) -> Result<()> {
    let config = resolve_config(config_path, overrides)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message("Scanning files...");

    let summary = pocdex_walker::run(&config);
    spinner.finish_and_clear();
    let summary = summary?;

    let collided = summary.files_matched - summary.distinct;
    let collision_msg = if collided > 0 {
        format!(" ({} duplicate identifiers replaced)", collided)
    } else {
        String::new()
    };
    println!(
        "{} Indexed {} files into {} entries{} in {}ms",
        "✓".green(),
        summary.files_matched.to_string().cyan(),
        summary.distinct.to_string().cyan(),
        collision_msg.dimmed(),
        summary.duration_ms
    );

    if summary.files_matched == 0 {
        eprintln!("\n{} Nothing matched. Check:", "⚠ Warning:".yellow());
        eprintln!(
            "  - File names start with '{}' and end with '{}'",
            config.prefix, config.suffix
        );
        eprintln!("  - {} is the repository checkout", config.root.display());
    }

    Ok(())
}

/// Print the URL recorded for `id`.
pub fn lookup(id: &str, index_path: &Path) -> Result<()> {
    let index = PocIndex::load(index_path)?;
    match index.get(id) {
        Some(url) => {
            println!("{}", url);
            Ok(())
        }
        None => Err(format!("no entry for '{}' in {}", id, index_path.display()).into()),
    }
}

/// Groups identifiers by their second dash-separated field, which is the
/// year for CVE identifiers.
pub fn year_buckets(index: &PocIndex) -> BTreeMap<String, usize> {
    let mut buckets = BTreeMap::new();
    for (id, _) in index.iter() {
        let bucket = id
            .split('-')
            .nth(1)
            .filter(|year| !year.is_empty() && year.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or("other");
        *buckets.entry(bucket.to_string()).or_insert(0) += 1;
    }
    buckets
}

/// Show entry counts of a saved index.
pub fn stats(index_path: &Path) -> Result<()> {
    let index = PocIndex::load(index_path)?;

    println!("{}", "📊 Index Status".cyan().bold());
    println!();
    println!("  {} {}", "File:".dimmed(), index_path.display());
    println!("  {} {}", "Entries:".dimmed(), index.len());

    let buckets = year_buckets(&index);
    if !buckets.is_empty() {
        println!();
        for (year, count) in &buckets {
            println!("  {:>6} {}", year, count.to_string().cyan());
        }
    }

    Ok(())
}
