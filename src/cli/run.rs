use crate::cli::RunArgs;
use crate::config::Config;
use crate::contract::PromptConfig;
use crate::input::read_locations;
use crate::output::{folder_name, write_summary, OutputLayout};
use crate::places::{GooglePlaces, Pacer};
use crate::provider::OllamaVision;
use crate::runner::{LocationStatus, Orchestrator};
use anyhow::{bail, Context};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

pub async fn execute(args: RunArgs) -> anyhow::Result<()> {
    info!("Loading config from {:?}", args.config);
    let mut config = Config::load_or_default(&args.config)?;

    // Apply CLI overrides
    if let Some(model) = args.model {
        config.model.name = model;
    }
    if let Some(profile) = args.profile {
        config.profile = profile;
    }
    if let Some(select_count) = args.select_count {
        config.select_count = select_count;
    }
    if let Some(max_candidates) = args.max_candidates {
        config.max_candidates = max_candidates;
    }

    config.validate()?;
    let prompt = config.prompt_config()?;

    let locations = read_locations(&args.csv, &args.column)
        .with_context(|| format!("Could not load locations from {:?}", args.csv))?;
    if locations.is_empty() {
        bail!("No locations found in column '{}' of {:?}", args.column, args.csv);
    }
    info!("Loaded {} locations", locations.len());

    if args.dry_run {
        info!("DRY RUN - no network calls will be made");
        print_execution_plan(&config, &prompt, &locations, &args.output_dir);
        return Ok(());
    }

    let Some(api_key) = args.api_key.or_else(|| config.places.api_key.clone()) else {
        bail!("No Google Places API key: pass --api-key or set GOOGLE_PLACES_API_KEY");
    };

    let model = OllamaVision::new(&config.model)?;
    if args.skip_preflight {
        warn!("Skipping model preflight check");
    } else {
        model.preflight().await.with_context(|| {
            format!(
                "Vision model '{}' is not ready at {} (try `ollama pull {}`)",
                config.model.name, config.model.endpoint, config.model.name
            )
        })?;
        info!("Model {} is ready", config.model.name);
    }

    // One pacer for every Places call: search, details and photos
    let pacer = Arc::new(Pacer::new(Duration::from_millis(config.request_delay_ms)));
    let places = Arc::new(GooglePlaces::new(&config.places, api_key, pacer)?);

    let layout = OutputLayout::new(args.output_dir.clone());
    layout.prepare()?;
    info!("Output will be written to {:?}", layout.root());

    let orchestrator = Orchestrator::new(config, places.clone(), places, Arc::new(model))?;
    let report = orchestrator.run(&locations, &layout).await;

    match write_summary(&layout, &report) {
        Ok(path) => info!("Wrote summary: {}", path.display()),
        Err(e) => warn!("Failed to write summary: {}", e),
    }

    let totals = report.totals();
    info!(
        "Completed in {:.1}s: {} of {} locations curated, {} photos selected from {} downloaded",
        report.total_duration.as_secs_f64(),
        totals.count(LocationStatus::Curated),
        totals.locations,
        totals.photos_selected,
        totals.photos_downloaded
    );

    if let Some(halt) = &report.halted {
        error!(
            "Run halted at '{}': {} ({} locations not attempted)",
            halt.location,
            halt.reason,
            totals.count(LocationStatus::NotAttempted)
        );
        std::process::exit(1);
    }

    Ok(())
}

fn print_execution_plan(
    config: &Config,
    prompt: &PromptConfig,
    locations: &[String],
    output_dir: &Path,
) {
    println!("\n=== Execution Plan ===\n");
    println!("Output dir: {:?}", output_dir);
    println!(
        "Model: {} at {}",
        config.model.name, config.model.endpoint
    );
    println!(
        "Profile: {} ({})",
        prompt.profile(),
        prompt.categories().join(", ")
    );
    println!(
        "Per location: download up to {}, keep {}",
        config.max_candidates, config.select_count
    );
    if let Some(region) = &config.bias.region {
        println!("Search bias: {}", region);
    }

    println!("\nLocations:");
    for location in locations {
        println!("  - {} -> {}", location, folder_name(location));
    }
    println!();
}
