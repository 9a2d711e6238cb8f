use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

// Import from intake-core
use intake_core::{
    evaluate_spec, EngineConfig, ExtractionEngine, FieldResult, FileStorage, ModeKind,
    RuleStorage,
};

// Import CLI utilities
use intake_cli::{AdhocSpec, StoreLocator};

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Build, save and apply field-extraction rules for vendor manifest lines")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to custom config file (YAML format)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory holding saved rule sets (overrides INTAKE_STORE and the config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate every configured field against an input line
    Extract {
        /// Manifest line or catalog title to parse
        input: String,
    },

    /// Evaluate a single ad-hoc spec against an input line
    Try {
        #[command(flatten)]
        spec: AdhocSpec,

        /// Manifest line or catalog title to parse
        input: String,
    },

    /// Compile the enabled fields and save them as a vendor rule set
    Save {
        /// Vendor identity the rule set is stored under
        #[arg(long)]
        vendor: String,

        /// Optional subcategory narrowing the rule set
        #[arg(long)]
        subcategory: Option<String>,
    },

    /// Apply a saved vendor rule set to an input line
    Apply {
        #[arg(long)]
        vendor: String,

        #[arg(long)]
        subcategory: Option<String>,

        /// Manifest line or catalog title to parse
        input: String,
    },

    /// List saved rule sets
    List,

    /// Show extraction modes and their parameters
    Modes,

    /// Print the effective configuration as YAML
    ShowConfig,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("❌ {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "intake_core=debug,intake=debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Load config using the same fallback pattern everywhere
    let config = EngineConfig::load_with_fallback(cli.config.as_deref());

    match &cli.command {
        Command::Extract { input } => {
            let engine = ExtractionEngine::from_config(&config);
            let results = engine.evaluate_all(input);
            print_results(&results, cli.json)
        }
        Command::Try { spec, input } => {
            let spec = spec.to_spec()?;
            let (pattern, result) = evaluate_spec(&spec, input);
            let results = [FieldResult {
                field: spec.mode.kind().to_string(),
                key: "value".to_string(),
                pattern,
                result,
            }];
            print_results(&results, cli.json)
        }
        Command::Save {
            vendor,
            subcategory,
        } => {
            let subcategory = subcategory.as_deref();
            if let Some(sc) = subcategory {
                if !config.is_known_subcategory(sc) {
                    println!("⚠️  '{sc}' is not a known subcategory, saving anyway");
                }
            }

            let engine = ExtractionEngine::from_config(&config);
            let rule_set = engine.to_rule_set(vendor, subcategory)?;
            let storage = open_storage(&cli, &config)?;
            let path = storage.store_rule_set(&rule_set)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rule_set)?);
            } else {
                println!(
                    "💾 Saved {} patterns for '{}' to: {}",
                    rule_set.patterns.len(),
                    rule_set.file_stem(),
                    path.display()
                );
            }
            Ok(())
        }
        Command::Apply {
            vendor,
            subcategory,
            input,
        } => {
            let storage = open_storage(&cli, &config)?;
            let rule_set = storage
                .get_rule_set(vendor, subcategory.as_deref())?
                .ok_or_else(|| {
                    anyhow!(
                        "No rule set saved for '{}' in {}",
                        intake_core::rule_set::rule_file_stem(vendor, subcategory.as_deref()),
                        storage.root().display()
                    )
                })?;

            if !cli.json {
                println!("📋 Using rule set: {} ({})", rule_set.file_stem(), rule_set.id);
            }
            print_results(&rule_set.apply(input), cli.json)
        }
        Command::List => {
            let storage = open_storage(&cli, &config)?;
            let rule_sets = storage.list_rule_sets()?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rule_sets)?);
                return Ok(());
            }

            if rule_sets.is_empty() {
                println!("📭 No rule sets in {}", storage.root().display());
            }
            for rule_set in &rule_sets {
                let keys: Vec<&str> = rule_set.patterns.iter().map(|p| p.key.as_str()).collect();
                println!(
                    "📋 {}: {} (saved {})",
                    rule_set.file_stem(),
                    keys.join(", "),
                    rule_set.created_at.format("%Y-%m-%d %H:%M")
                );
            }
            Ok(())
        }
        Command::Modes => {
            show_modes();
            Ok(())
        }
        Command::ShowConfig => {
            print!("{}", config.to_yaml()?);
            Ok(())
        }
    }
}

fn open_storage(cli: &Cli, config: &EngineConfig) -> Result<FileStorage> {
    let locator = StoreLocator::new()?;
    let root = locator.resolve(cli.store.as_deref(), &config.storage);
    debug!("Rule store: {}", root.display());
    FileStorage::new(root)
}

fn print_results(results: &[FieldResult], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    for row in results {
        match &row.pattern {
            None => println!("⏭️  {}: disabled", row.field),
            Some(pattern) => {
                println!("🧩 {}", row.field);
                println!("   Regex: {pattern}");
                match &row.result.diagnostic {
                    Some(diagnostic) => println!("   ⚠️  invalid pattern: {diagnostic}"),
                    None if row.result.value.is_empty() => println!("   → (no match)"),
                    None => println!("   → {}", row.result.value),
                }
            }
        }
    }
    Ok(())
}

fn show_modes() {
    println!("\n📋 Extraction Modes:");
    for kind in ModeKind::ALL {
        let params = match kind {
            ModeKind::Regex => "--before <text> --after <text>   shortest run between two literals",
            ModeKind::Split => "--delimiter <text> --index <1-50>   n-th delimited field",
            ModeKind::Prefix => "--anchor <text>   everything after the anchor",
            ModeKind::Suffix => "--anchor <text>   everything before the first anchor",
            ModeKind::FullRegex => "--pattern <regex>   your own pattern with one capture group",
        };
        println!("  {:<11} {}", kind.label(), params);
    }

    println!("\n📝 Usage Examples:");
    println!("  intake try -m split -d ' - ' -i 2 'A - B - C'");
    println!("  intake try -m regex --before 'SKU:' --after ';' 'Name SKU:12345; more'");
    println!("  intake extract -c intake.yaml 'Acme - Gummies 10pk - Edible'");
    println!("  intake save -c intake.yaml --vendor 'Acme Farms' --subcategory Edible");
    println!("  intake apply --vendor 'Acme Farms' --subcategory Edible 'Acme - Gummies 10pk - Edible'");
}
