use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use shelf_catalog::{
    Catalog, CatalogConfig, Condition, Edition, SearchHit, TracingObserver,
    observability::{LogFormat, init_logging},
};

/// Command-line arguments for the catalog demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log every catalog change
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs and search results as JSON
    #[arg(long)]
    json: bool,

    /// Path to a JSON catalog configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keyword to search for after the walkthrough (title or author, exact match)
    #[arg(short, long)]
    query: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let format = if args.json { LogFormat::Json } else { LogFormat::Pretty };
    init_logging(format, if args.verbose { "info" } else { "warn" });

    let config = match &args.config {
        Some(path) => CatalogConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => CatalogConfig::default(),
    };

    let catalog = Catalog::with_config(config);
    catalog.register_observer(Arc::new(TracingObserver));

    walkthrough(&catalog, args.json)?;

    let queries = if args.query.is_empty() {
        vec!["Moby Dick".to_string(), "Herbert".to_string()]
    } else {
        args.query
    };
    for query in &queries {
        print_hits(query, &catalog.search(query), args.json)?;
    }

    Ok(())
}

/// Stock the catalog and move copies through a typical day at the desk
fn walkthrough(catalog: &Catalog, json: bool) -> Result<()> {
    let dune = Edition::new("Dune", ["Herbert"], 1965)?;
    let dune_messiah = Edition::new("Dune Messiah", ["Herbert"], 1969)?;
    let moby_1851 = Edition::new("Moby Dick", ["Melville"], 1851)?;
    let moby_2001 = Edition::new("Moby Dick", ["Melville"], 2001)?;
    let good_omens = Edition::new("Good Omens", ["Pratchett", "Gaiman"], 1990)?;

    let dune_copy = catalog.acquire(&dune);
    let messiah_copy = catalog.acquire(&dune_messiah);
    let old_moby = catalog.acquire(&moby_1851);
    let new_moby = catalog.acquire(&moby_2001);
    let omens_copy = catalog.acquire(&good_omens);
    catalog.acquire(&good_omens);

    if !json {
        println!("{}", "Catalog Walkthrough".green().bold());
        println!("=====================================\n");
        println!("Stocked {} copies", catalog.len());
    }

    catalog.checkout(&dune_copy)?;
    catalog.checkout(&new_moby)?;
    catalog.checkout(&omens_copy)?;

    // A second loan of the same copy is refused
    if let Err(e) = catalog.checkout(&dune_copy) {
        if !json {
            println!("{} {e}", "Refused:".yellow());
        }
    }

    catalog.checkin(&omens_copy)?;
    omens_copy.set_condition(Condition::Damaged);

    // Borrowed and never returned
    catalog.lose(&new_moby)?;
    // Vanished from the shelf, and the records have caught up
    catalog.lose(&messiah_copy)?;
    catalog.write_off(&messiah_copy)?;

    if !json {
        println!("\n{}", catalog.report());
        println!("Old Moby Dick on the shelf: {}", catalog.is_available(&old_moby));
        println!("Good Omens returned: {}", omens_copy.condition().get_description());
        println!("{} history records", catalog.history().len());
    }

    Ok(())
}

/// Print search results as coloured text or JSON
fn print_hits(query: &str, hits: &[SearchHit], json: bool) -> Result<()> {
    if json {
        let line = serde_json::json!({ "query": query, "hits": hits });
        println!("{}", serde_json::to_string(&line)?);
        return Ok(());
    }

    println!("\n{} {}", "Search:".cyan().bold(), query);
    if hits.is_empty() {
        println!("  {}", "no matches".dimmed());
    }
    for hit in hits {
        let availability = format!("{}/{} on shelf", hit.available, hit.total);
        let availability =
            if hit.available > 0 { availability.green() } else { availability.red() };
        println!("  {}  {}", hit.edition, availability);
    }
    Ok(())
}
