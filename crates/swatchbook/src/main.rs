//! Command-line entry point.
//!
//! CLI applications here are single-threaded: parse args, run one
//! handler, print, exit. Every command is a full unit of work — one
//! registry build or one token sync — and safe to re-run.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use console::style;

use swatchbook::sheet::{generate, JsonFileSink, NodeSink};
use swatchbook::{build_sync_payload, rename_map, DesignToolClient};
use swatchbook_registry::{assemble, AssembleOptions, ComponentRegistry, RegistryCache};
use swatchbook_style::SemanticPalette;

#[derive(Debug, Parser)]
#[command(name = "swatchbook", version, about = "Design-system registry builds and variant sheets")]
struct Cli {
    /// Theme file supplying the semantic color table.
    #[arg(long, global = true)]
    theme: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct RemoteArgs {
    /// Design tool API base URL.
    #[arg(long, env = "SWATCHBOOK_API_URL")]
    api_url: String,

    /// Target file key.
    #[arg(long, env = "SWATCHBOOK_FILE_KEY")]
    file_key: String,

    /// API token.
    #[arg(long, env = "SWATCHBOOK_TOKEN", hide_env_values = true)]
    token: String,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the component registry from source files.
    Build {
        /// Directory containing component source files.
        #[arg(long, default_value = "src/components")]
        components: PathBuf,

        /// Registry document to write.
        #[arg(long, default_value = "registry.json")]
        out: PathBuf,

        /// Extraction cache file.
        #[arg(long, default_value = ".swatchbook-cache.json")]
        cache: PathBuf,

        /// Import path prefix for registry entries.
        #[arg(long, default_value = "@/components/ui")]
        import_prefix: String,
    },

    /// Generate variant-sheet scene documents from a built registry.
    Sheets {
        /// Registry document to read.
        #[arg(long, default_value = "registry.json")]
        registry: PathBuf,

        /// Only generate this component.
        #[arg(long)]
        component: Option<String>,

        /// Directory to write scene documents into.
        #[arg(long, default_value = "sheets")]
        out: PathBuf,
    },

    /// Push the semantic palette to the design tool's variables API.
    Sync {
        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Fetch and print the remote variables document.
    Fetch {
        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Print the rename/migration map between remote and local tokens.
    Renames {
        #[command(flatten)]
        remote: RemoteArgs,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Some(theme) = &cli.theme {
        SemanticPalette::install_from_file(theme)
            .with_context(|| format!("failed to install theme {}", theme.display()))?;
    }

    match cli.command {
        Command::Build {
            components,
            out,
            cache,
            import_prefix,
        } => build(components, out, cache, import_prefix),
        Command::Sheets {
            registry,
            component,
            out,
        } => sheets(registry, component, out),
        Command::Sync { remote } => sync(remote),
        Command::Fetch { remote } => fetch(remote),
        Command::Renames { remote } => renames(remote),
    }
}

fn build(
    components: PathBuf,
    out: PathBuf,
    cache_path: PathBuf,
    import_prefix: String,
) -> anyhow::Result<()> {
    let options = AssembleOptions {
        components_dir: components,
        import_prefix,
    };
    let mut cache = RegistryCache::load(&cache_path);
    let (registry, stats) = assemble(&options, &mut cache, SemanticPalette::global())?;
    cache.save()?;
    std::fs::write(&out, registry.to_pretty_json()?)
        .with_context(|| format!("failed to write {}", out.display()))?;

    println!(
        "{} {} components ({} cached, {} extracted, {} skipped) -> {}",
        style("built").green().bold(),
        registry.components.len(),
        stats.hits,
        stats.misses,
        stats.skipped,
        out.display()
    );
    Ok(())
}

fn sheets(registry_path: PathBuf, component: Option<String>, out: PathBuf) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&registry_path)
        .with_context(|| format!("failed to read {}", registry_path.display()))?;
    let registry: ComponentRegistry =
        serde_json::from_str(&content).context("registry document is not valid")?;

    let selected: Vec<_> = match &component {
        Some(name) => match registry.components.get(name) {
            Some(schema) => vec![schema],
            None => bail!("component '{name}' is not in the registry"),
        },
        None => registry.components.values().collect(),
    };

    let mut sink = JsonFileSink::new(&out);
    for schema in &selected {
        let sheet = generate(schema);
        let cells = sheet.sections.first().map_or(0, |s| s.nodes.len());
        sink.emit(&sheet)?;
        println!(
            "{} {} ({} cells) -> {}",
            style("sheet").cyan().bold(),
            schema.name,
            cells,
            sink.path_for(&schema.name).display()
        );
    }
    Ok(())
}

fn sync(remote: RemoteArgs) -> anyhow::Result<()> {
    let client = DesignToolClient::new(remote.api_url, remote.file_key, remote.token);
    let existing = client.fetch_variables()?;
    let payload = build_sync_payload(SemanticPalette::global(), &existing);
    client.push_variables(&payload)?;

    let created = payload
        .variables
        .iter()
        .filter(|op| op.name.is_some())
        .count();
    println!(
        "{} {} color variables (purged {} remote)",
        style("synced").green().bold(),
        created,
        payload.variables.len() - created
    );
    Ok(())
}

fn fetch(remote: RemoteArgs) -> anyhow::Result<()> {
    let client = DesignToolClient::new(remote.api_url, remote.file_key, remote.token);
    let doc = client.fetch_variables()?;
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn renames(remote: RemoteArgs) -> anyhow::Result<()> {
    let client = DesignToolClient::new(remote.api_url, remote.file_key, remote.token);
    let doc = client.fetch_variables()?;
    let map = rename_map(SemanticPalette::global(), &doc);
    if map.is_empty() {
        println!("no renames detected");
        return Ok(());
    }
    for (remote_name, local_name) in map {
        println!("{remote_name} -> {local_name}");
    }
    Ok(())
}
