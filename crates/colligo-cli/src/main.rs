//! Colligo CLI - hybrid search over heritage collections

use clap::{Parser, Subcommand};
use colligo_core::config::Config;
use colligo_core::domain::{
    Dataset, EntityKind, HeritageObject, ProvenanceEvent, SearchOptions, SearchResult, SortBy,
    SortOrder,
};
use colligo_core::graph::{GraphSource, SparqlClient, mapping};
use colligo_core::index::{SearchBackend, SearchIndexClient};
use colligo_core::service::CollectionService;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Parser)]
#[command(name = "colligo")]
#[command(author, version, about = "Hybrid search over heritage collections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Search one entity kind
    Search {
        /// Entity kind (datasets, heritage-objects, provenance-events)
        kind: String,

        /// Search text; omit for a match-all search
        query: Option<String>,

        /// Result offset for paging
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Result page size
        #[arg(long, default_value_t = 10)]
        limit: u32,

        /// Sort field (relevance, name, date-created)
        #[arg(long, default_value = "relevance")]
        sort: String,

        /// Sort direction (asc, desc)
        #[arg(long, default_value = "desc")]
        order: String,

        /// Facet filter as facet=value; repeat to select more values
        #[arg(long = "filter", value_name = "FACET=VALUE")]
        filters: Vec<String>,
    },

    /// Fetch entities by identifier
    Get {
        /// Entity kind (datasets, heritage-objects, provenance-events)
        kind: String,

        /// One or more entity identifiers (absolute IRIs)
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// List entity kinds and their facets
    Kinds,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Run health check against both backends
    Doctor,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Reset configuration to defaults
    Reset,
    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("colligo_core=info".parse()?)
                .add_directive("colligo_cli=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            kind,
            query,
            offset,
            limit,
            sort,
            order,
            filters,
        } => {
            cmd_search(
                &kind,
                query.as_deref(),
                offset,
                limit,
                &sort,
                &order,
                &filters,
                cli.format,
                cli.quiet,
            )
            .await
        }

        Commands::Get { kind, ids } => cmd_get(&kind, &ids, cli.format, cli.quiet).await,

        Commands::Kinds => cmd_kinds(),

        Commands::Config { action } => cmd_config(action, cli.quiet),

        Commands::Doctor => cmd_doctor(cli.quiet).await,
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

#[allow(clippy::too_many_arguments)]
async fn cmd_search(
    kind: &str,
    query: Option<&str>,
    offset: u32,
    limit: u32,
    sort: &str,
    order: &str,
    raw_filters: &[String],
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let kind: EntityKind = kind.parse()?;
    let sort_by = SortBy::from_str(sort).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid sort field '{}'. Valid fields: relevance, name, date-created.",
            sort
        )
    })?;
    let sort_order = SortOrder::from_str(order).ok_or_else(|| {
        anyhow::anyhow!("Invalid sort order '{}'. Valid orders: asc, desc.", order)
    })?;
    let filters = parse_filters(raw_filters)?;

    let config = Config::load()?;
    let service = CollectionService::from_config(&config)?;

    let mut options = SearchOptions::new()
        .with_offset(offset)
        .with_limit(limit)
        .with_sort(sort_by, sort_order);
    if let Some(query) = query {
        options = options.with_query(query);
    }
    for (facet, values) in filters {
        options = options.with_filter(facet, values);
    }

    match kind {
        EntityKind::Dataset => {
            let result = service.search::<Dataset>(&options).await?;
            render_search_result(&result, format, quiet)
        }
        EntityKind::HeritageObject => {
            let result = service.search::<HeritageObject>(&options).await?;
            render_search_result(&result, format, quiet)
        }
        EntityKind::ProvenanceEvent => {
            let result = service.search::<ProvenanceEvent>(&options).await?;
            render_search_result(&result, format, quiet)
        }
    }
}

async fn cmd_get(
    kind: &str,
    ids: &[String],
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let kind: EntityKind = kind.parse()?;
    let config = Config::load()?;
    let service = CollectionService::from_config(&config)?;

    match kind {
        EntityKind::Dataset => {
            let records = service.get_by_ids::<Dataset>(ids).await?;
            render_records(&records, ids, format, quiet)
        }
        EntityKind::HeritageObject => {
            let records = service.get_by_ids::<HeritageObject>(ids).await?;
            render_records(&records, ids, format, quiet)
        }
        EntityKind::ProvenanceEvent => {
            let records = service.get_by_ids::<ProvenanceEvent>(ids).await?;
            render_records(&records, ids, format, quiet)
        }
    }
}

fn cmd_kinds() -> anyhow::Result<()> {
    println!("Entity kinds:");
    for kind in EntityKind::all() {
        let facets: Vec<&str> = mapping::facets_for(*kind).iter().map(|f| f.name).collect();
        if facets.is_empty() {
            println!("  {} (no facets)", kind);
        } else {
            println!("  {} (facets: {})", kind, facets.join(", "));
        }
    }
    Ok(())
}

fn cmd_config(action: ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if !quiet {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let items = config.list()?;
            for (key, value) in items {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if !quiet {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

async fn cmd_doctor(quiet: bool) -> anyhow::Result<()> {
    if !quiet {
        println!("Colligo Health Check");
        println!("====================");
        println!();
    }

    let mut all_ok = true;

    // Check configuration
    let config = match Config::load() {
        Ok(config) => {
            if !quiet {
                println!("[OK] Configuration: Valid");
            }
            Some(config)
        }
        Err(e) => {
            all_ok = false;
            if !quiet {
                println!("[!!] Configuration: Error - {}", e);
            }
            None
        }
    };

    // Check config file location
    if !quiet {
        match Config::config_path() {
            Ok(path) => {
                if path.exists() {
                    println!("[OK] Config file: {}", path.display());
                } else {
                    println!("[--] Config file: {} (using defaults)", path.display());
                }
            }
            Err(e) => {
                println!("[!!] Config file: Error - {}", e);
            }
        }
    }

    if let Some(config) = config {
        // Probe the graph store with an empty CONSTRUCT
        match SparqlClient::builder(&config.graph.endpoint)
            .with_timeout_secs(config.graph.timeout_secs)
            .build()
        {
            Ok(client) => match client.construct("CONSTRUCT {} WHERE {}").await {
                Ok(_) => {
                    if !quiet {
                        println!("[OK] Graph store: {}", config.graph.endpoint);
                    }
                }
                Err(e) => {
                    all_ok = false;
                    warn!(endpoint = %config.graph.endpoint, error = %e, "graph store check failed");
                    if !quiet {
                        println!("[!!] Graph store: {}", e);
                    }
                }
            },
            Err(e) => {
                all_ok = false;
                if !quiet {
                    println!("[!!] Graph store: {}", e);
                }
            }
        }

        // Probe the search index with a one-hit match-all
        match SearchIndexClient::builder(&config.search.endpoint)
            .with_timeout_secs(config.search.timeout_secs)
            .build()
        {
            Ok(client) => {
                let options = SearchOptions::new().with_limit(1);
                match client.search(EntityKind::Dataset, &options).await {
                    Ok(response) => {
                        if !quiet {
                            println!(
                                "[OK] Search index: {} ({} datasets)",
                                config.search.endpoint,
                                response.total()
                            );
                        }
                    }
                    Err(e) => {
                        all_ok = false;
                        warn!(endpoint = %config.search.endpoint, error = %e, "search index check failed");
                        if !quiet {
                            println!("[!!] Search index: {}", e);
                        }
                    }
                }
            }
            Err(e) => {
                all_ok = false;
                if !quiet {
                    println!("[!!] Search index: {}", e);
                }
            }
        }
    }

    // Summary
    if !quiet {
        println!();
        if all_ok {
            println!("All checks passed!");
        } else {
            println!("Some checks failed. See above for details.");
        }
    }

    Ok(())
}

// ============================================================================
// Output Helpers
// ============================================================================

fn parse_filters(raw: &[String]) -> anyhow::Result<BTreeMap<String, Vec<String>>> {
    let mut filters: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for item in raw {
        let (facet, value) = item.split_once('=').ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid filter '{}'. Use facet=value, e.g. owners=https://example.org/org/1",
                item
            )
        })?;
        filters
            .entry(facet.to_string())
            .or_default()
            .push(value.to_string());
    }
    Ok(filters)
}

fn render_search_result<T: Serialize>(
    result: &SearchResult<T>,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Text => {
            if !quiet {
                println!(
                    "Found {} results (showing {} from offset {}):",
                    result.total_count,
                    result.entities.len(),
                    result.offset
                );
            }
            for (i, entity) in result.entities.iter().enumerate() {
                let value = serde_json::to_value(entity)?;
                let id = value.get("id").and_then(|v| v.as_str()).unwrap_or("?");
                let rank = result.offset as usize + i + 1;
                match value.get("name").and_then(|v| v.as_str()) {
                    Some(name) => println!("  {}. {} ({})", rank, name, id),
                    None => println!("  {}. {}", rank, id),
                }
            }
            if !quiet && !result.filters.is_empty() {
                println!();
                println!("Filters:");
                for (facet, values) in &result.filters {
                    println!("  {}:", facet);
                    for value in values.iter().take(5) {
                        let label = value.name.as_deref().unwrap_or(&value.id);
                        println!("    {} ({})", label, value.total_count);
                    }
                    if values.len() > 5 {
                        println!("    ... and {} more", values.len() - 5);
                    }
                }
            }
        }
    }
    Ok(())
}

fn render_records<T: Serialize>(
    records: &[T],
    requested: &[String],
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    if requested.len() == 1 && records.is_empty() {
        return Err(anyhow::anyhow!(
            "Entity '{}' not found. Check the identifier, or search with `colligo search`.",
            requested[0]
        ));
    }

    match format {
        OutputFormat::Json => {
            if requested.len() == 1 {
                println!("{}", serde_json::to_string_pretty(&records[0])?);
            } else {
                println!("{}", serde_json::to_string_pretty(records)?);
            }
        }
        OutputFormat::Text => {
            for record in records {
                let value = serde_json::to_value(record)?;
                let id = value.get("id").and_then(|v| v.as_str()).unwrap_or("?");
                match value.get("name").and_then(|v| v.as_str()) {
                    Some(name) => println!("{} ({})", name, id),
                    None => println!("{}", id),
                }
            }
            if !quiet {
                if records.len() < requested.len() {
                    println!();
                    println!(
                        "Found {} of {} requested entities.",
                        records.len(),
                        requested.len()
                    );
                }
                println!("Use --format json for full records.");
            }
        }
    }
    Ok(())
}
