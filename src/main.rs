//! Options Chain Viewer Server
//!
//! Serves the options dashboard page and its JSON API.

use market_data_client::YahooClient;
use options_chain_viewer::api::create_router;
use options_chain_viewer::config::Config;
use options_chain_viewer::state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use options_chain_viewer::models::{
    ExpirationsResponse, HealthResponse, OptionChainResponse, OptionsChainRow, OptionsTable, Quote,
};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        options_chain_viewer::api::handlers::dashboard_page,
        options_chain_viewer::api::handlers::health_check,
        options_chain_viewer::api::handlers::get_quote,
        options_chain_viewer::api::handlers::list_expirations,
        options_chain_viewer::api::handlers::get_option_chain,
    ),
    components(
        schemas(
            HealthResponse,
            Quote,
            ExpirationsResponse,
            OptionChainResponse,
            OptionsTable,
            OptionsChainRow,
        )
    ),
    tags(
        (name = "Dashboard", description = "Server-rendered options dashboard"),
        (name = "Health", description = "Health check endpoints"),
        (name = "Market Data", description = "Quotes, expirations and option chains"),
    ),
    info(
        title = "Options Chain Viewer API",
        version = "0.1.0",
        description = "Live option chains for paper-trading research",
        license(name = "MIT"),
        contact(name = "Joaquin Bejar", email = "jb@taunais.com")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = match std::env::var("CONFIG_PATH") {
        Ok(path) => {
            info!("Loading configuration from {}", path);
            Config::load(&path)?
        }
        Err(_) => Config::default(),
    };
    config.apply_env_overrides()?;

    // Create application state
    let client = YahooClient::new(config.provider.client_config())?;
    info!("Market data provider: {}", client.base_url());
    let state = Arc::new(AppState::new(Arc::new(client), config.dashboard.clone()));

    let host = &config.server.host;
    let port = config.server.port;

    info!("Starting Options Chain Viewer on {}:{}", host, port);
    info!(
        "Swagger UI available at http://{}:{}/swagger-ui/",
        host, port
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = create_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
