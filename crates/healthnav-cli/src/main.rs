use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use healthnav_api::ApiClient;
use healthnav_core::models::{Provider, RecentSearch, SearchQuery};
use healthnav_core::{
    AddOutcome, BackendClient, CompareManager, Config, DataSources, QualityLevel, SavedManager,
    SourceState,
};
use healthnav_store::SetStore;

#[derive(Parser)]
#[command(name = "healthnav")]
#[command(version, about = "Provider and hospital search from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Search providers by symptom, radius, specialty and quality
    Search {
        /// Symptom, condition or name fragment to match
        #[arg(long, default_value = "")]
        symptom: String,
        /// Search radius in miles (defaults from config)
        #[arg(long)]
        radius: Option<f64>,
        /// Specialty filter; repeat for several (any match wins)
        #[arg(long = "specialty")]
        specialties: Vec<String>,
        /// Minimum HCAHPS score
        #[arg(long, default_value_t = 0)]
        min_hcahps: u8,
        /// Let the backend run the search instead of filtering locally
        #[arg(long)]
        remote: bool,
    },
    /// Manage the comparison set (max 3 providers)
    Compare {
        #[command(subcommand)]
        action: CompareAction,
    },
    /// Manage saved providers
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },
    /// Recent search history
    Recent {
        #[command(subcommand)]
        action: RecentAction,
    },
    /// List nearby pharmacies
    Pharmacies,
    /// List hospitals
    Hospitals,
    /// Backend connectivity status
    Status {
        /// Keep probing at the configured interval
        #[arg(long)]
        watch: bool,
    },
}

#[derive(clap::Subcommand)]
enum CompareAction {
    /// Add a provider by id
    Add { id: String },
    /// Remove a provider by id
    Remove { id: String },
    /// Empty the comparison set
    Clear,
    /// Show the current comparison set
    List,
    /// Show the compared provider with the best HCAHPS score
    Best,
}

#[derive(clap::Subcommand)]
enum SavedAction {
    /// Save a provider by id
    Add { id: String },
    /// Remove a saved provider by id
    Remove { id: String },
    /// Show saved providers
    List,
}

#[derive(clap::Subcommand)]
enum RecentAction {
    /// Show recent searches, newest first
    List,
    /// Remove one entry by id
    Remove { id: String },
    /// Forget all recent searches
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "healthnav=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Everything is constructed once here and passed down - no globals
    let config = Config::load()?;
    let store = Arc::new(SetStore::open(&state_db_path()?)?);
    let backend = BackendClient::new(ApiClient::with_base_url(config.api_url.clone()));
    let sources = DataSources::new(Box::new(backend), &config);
    let mut compare = CompareManager::new(Arc::clone(&store));
    let mut saved = SavedManager::new(Arc::clone(&store));

    match cli.command {
        Commands::Search {
            symptom,
            radius,
            specialties,
            min_hcahps,
            remote,
        } => {
            let query = SearchQuery {
                symptom,
                radius: radius.unwrap_or(config.default_radius),
                specialties,
                min_hcahps,
            };

            tracing::info!(
                "Searching for \"{}\" within {} miles",
                query.symptom,
                query.radius
            );
            let results = if remote {
                sources.search_remote(&query).await
            } else {
                sources.search(&query).await
            };

            if results.using_mock_data {
                print_demo_banner();
            }

            if query.has_filters() {
                let id = chrono::Utc::now().timestamp_millis().to_string();
                saved.add_recent_search(RecentSearch::from_query(id, &query))?;
            }

            if results.data.is_empty() {
                println!("No providers match those filters.");
            }
            for provider in &results.data {
                print_provider(provider);
            }
        }

        Commands::Compare { action } => match action {
            CompareAction::Add { id } => {
                let fetched = sources.provider_by_id(&id).await;
                if fetched.using_mock_data {
                    print_demo_banner();
                }
                let provider = fetched
                    .data
                    .with_context(|| format!("no provider with id {}", id))?;
                match compare.add(provider)? {
                    AddOutcome::Added => println!("Added {} to comparison.", id),
                    AddOutcome::AlreadyPresent => println!("{} is already being compared.", id),
                    AddOutcome::Full => {
                        println!("Comparison set is full ({} max). Remove one first.",
                            healthnav_core::MAX_COMPARE)
                    }
                }
            }
            CompareAction::Remove { id } => {
                compare.remove(&id)?;
                println!("Removed {} from comparison.", id);
            }
            CompareAction::Clear => {
                compare.clear()?;
                println!("Comparison cleared.");
            }
            CompareAction::List => {
                if compare.is_empty() {
                    println!("Nothing being compared.");
                }
                for provider in compare.providers() {
                    print_provider(provider);
                }
            }
            CompareAction::Best => match compare.best_match() {
                Some(best) => {
                    println!("Best match by HCAHPS score:");
                    print_provider(best);
                }
                None => println!("Nothing being compared."),
            },
        },

        Commands::Saved { action } => match action {
            SavedAction::Add { id } => {
                let fetched = sources.provider_by_id(&id).await;
                if fetched.using_mock_data {
                    print_demo_banner();
                }
                let provider = fetched
                    .data
                    .with_context(|| format!("no provider with id {}", id))?;
                saved.save(provider)?;
                println!("Saved {}.", id);
            }
            SavedAction::Remove { id } => {
                saved.unsave(&id)?;
                println!("Removed {} from saved providers.", id);
            }
            SavedAction::List => {
                if saved.providers().is_empty() {
                    println!("No saved providers.");
                }
                for provider in saved.providers() {
                    print_provider(provider);
                }
            }
        },

        Commands::Recent { action } => match action {
            RecentAction::List => {
                if saved.recent_searches().is_empty() {
                    println!("No recent searches.");
                }
                for search in saved.recent_searches() {
                    let specialties = if search.specialties.is_empty() {
                        "any specialty".to_string()
                    } else {
                        search.specialties.join(", ")
                    };
                    println!(
                        "{}  \"{}\"  {} mi, {}, min score {}  ({})",
                        search.id,
                        search.symptom,
                        search.radius,
                        specialties,
                        search.min_hcahps,
                        search.timestamp.format("%Y-%m-%d %H:%M"),
                    );
                }
            }
            RecentAction::Remove { id } => {
                saved.remove_recent_search(&id)?;
                println!("Removed search {}.", id);
            }
            RecentAction::Clear => {
                saved.clear_recent_searches()?;
                println!("Recent searches cleared.");
            }
        },

        Commands::Pharmacies => {
            let fetched = sources.pharmacies();
            if fetched.using_mock_data {
                print_demo_banner();
            }
            for pharmacy in &fetched.data {
                let hours = pharmacy.hours.as_deref().unwrap_or("hours unknown");
                let badge = if pharmacy.is_24_hour { " [24h]" } else { "" };
                println!(
                    "{}  {}{}  {} - {} ({})",
                    pharmacy.id, pharmacy.name, badge, pharmacy.address, pharmacy.city, hours,
                );
            }
        }

        Commands::Hospitals => {
            let fetched = sources.hospitals().await;
            if fetched.using_mock_data {
                print_demo_banner();
            }
            for hospital in &fetched.data {
                let level = QualityLevel::from_score(hospital.hcahps_score);
                let emergency = if hospital.emergency_services { ", ER" } else { "" };
                println!(
                    "{}  {}  HCAHPS {} ({}){}",
                    hospital.id, hospital.name, hospital.hcahps_score, level, emergency,
                );
            }
        }

        Commands::Status { watch } => {
            print_status(&sources).await;
            if watch {
                let mut ticker = tokio::time::interval(std::time::Duration::from_secs(
                    config.probe_interval_secs.max(1),
                ));
                ticker.tick().await; // first tick fires immediately
                loop {
                    ticker.tick().await;
                    tracing::debug!("Probing backend health");
                    print_status(&sources).await;
                }
            }
        }
    }

    Ok(())
}

async fn print_status(sources: &DataSources) {
    let status = sources.backend_status().await;
    if status.is_online {
        println!(
            "Backend: online (graphdb: {}, mongodb: {})",
            status.graphdb_connected, status.mongodb_connected
        );
    } else {
        println!("Backend: {} - demo data will be served", status.status);
    }

    let availability = sources.refresh().await;
    println!(
        "Data domains - providers: {}, hospitals: {}, specialties: {}",
        state_label(availability.providers),
        state_label(availability.hospitals),
        state_label(availability.specialties),
    );
}

fn state_label(state: SourceState) -> &'static str {
    match state {
        SourceState::Unknown => "unknown",
        SourceState::Online => "online",
        SourceState::Offline => "offline",
    }
}

fn print_provider(provider: &Provider) {
    let score = match provider.hcahps_score {
        Some(score) => format!("HCAHPS {} ({})", score, QualityLevel::from_score(score)),
        None => "HCAHPS n/a".to_string(),
    };
    let distance = match provider.distance {
        Some(d) => format!("{:.1} mi", d),
        None => "distance n/a".to_string(),
    };
    println!(
        "{}  {}  [{}]  {}  {}",
        provider.id,
        provider.name,
        provider.specialties.join(", "),
        score,
        distance,
    );
    if let Some(hospital) = &provider.hospital_name {
        println!("          {}", hospital);
    }
}

fn print_demo_banner() {
    tracing::warn!("Backend unavailable, serving bundled demo data");
    println!("! Backend unavailable - showing demo data");
}

fn state_db_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .context("Could not find data directory")?
        .join("healthnav");
    Ok(data_dir.join("state.db"))
}
