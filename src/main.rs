use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::filter::Directive;

use artifact_quests::config::{Config, DEFAULT_LOG_FILTER};
use artifact_quests::scenario::Scenario;
use artifact_quests::{ArtifactCatalog, QuestDispatcher, QuestTypeRegistry};

// ============================================================================
// App State
// ============================================================================

struct AppState {
    catalog: Arc<ArtifactCatalog>,
    dispatcher: QuestDispatcher,
}

impl AppState {
    fn new(config: &Config) -> Self {
        // Load artifact catalog from TOML files
        let mut catalog = ArtifactCatalog::new();
        if let Err(e) = catalog.load_from_directory(&config.data_dir) {
            error!("Failed to load artifact catalog: {}", e);
        }

        // Register quest types from TOML files
        let mut registry = QuestTypeRegistry::new();
        if let Err(e) = registry.load_from_directory(&config.data_dir) {
            error!("Failed to load quest registry: {}", e);
        }
        registry.validate_artifacts(&catalog);

        Self {
            catalog: Arc::new(catalog),
            dispatcher: QuestDispatcher::new(Arc::new(registry)),
        }
    }
}

fn init_tracing(filter: &str) {
    let directive = filter
        .parse::<Directive>()
        .or_else(|_| DEFAULT_LOG_FILTER.parse::<Directive>());
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = directive {
        env_filter = env_filter.add_directive(directive);
    }

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

#[tokio::main]
async fn main() {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load_or_default(config_path.as_deref());

    // Initialize logging
    init_tracing(
        config
            .as_ref()
            .map(|c| c.log_filter.as_str())
            .unwrap_or(DEFAULT_LOG_FILTER),
    );

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(&config);
    info!(
        "Ready: {} artifacts, {} quest types",
        state.catalog.len(),
        state.dispatcher.registry().len()
    );

    let Some(scenario_path) = config.scenario.as_ref() else {
        warn!("No scenario configured, nothing to run");
        return;
    };

    let scenario = match Scenario::load(scenario_path) {
        Ok(scenario) => scenario,
        Err(e) => {
            error!("Failed to load scenario: {}", e);
            std::process::exit(1);
        }
    };

    match scenario.run(&state.dispatcher, state.catalog.as_ref()).await {
        Ok(report) => {
            let handled = report.outcomes.iter().filter(|(_, h)| *h).count();
            info!(
                "Scenario finished: {}/{} actions handled, {} reward(s) granted",
                handled,
                report.outcomes.len(),
                report.grants.len()
            );
            for grant in &report.grants {
                info!("{} received '{}'", grant.player_id, grant.template.name);
            }
        }
        Err(e) => {
            error!("Scenario failed: {}", e);
            std::process::exit(1);
        }
    }
}
