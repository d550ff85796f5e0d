use std::env;
use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::info;

use termhub::catalog::ServiceCatalog;
use termhub::handlers;
use termhub::models::AppState;
use termhub::services::sparql_client::SparqlClient;
use termhub::services::usage_service::UsageService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
    dotenv::dotenv().ok();

    let host = env::var("TERMHUB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("TERMHUB_PORT")
        .unwrap_or_else(|_| "3020".to_string())
        .parse::<u16>()
        .expect("Invalid port number");

    let timeout_secs = env::var("SPARQL_TIMEOUT_SECS")
        .unwrap_or_else(|_| "30".to_string())
        .parse::<u64>()
        .unwrap_or(30);

    let default_limit = env::var("DEFAULT_LIMIT")
        .unwrap_or_else(|_| "30".to_string())
        .parse::<u32>()
        .unwrap_or(30);

    // Serverless deployments mount the app under a stage prefix
    let stage = env::var("STAGE").ok().filter(|s| !s.is_empty());

    info!("🚀 [Termhub] Starting on {}:{}", host, port);

    let catalog = Arc::new(ServiceCatalog::default_catalog());
    info!("📦 Service catalog: {} endpoints", catalog.len());
    for name in catalog.names() {
        let service = catalog.get(&name).expect("catalog lookup of its own name");
        info!("  🔗 {} -> {}", name, service.endpoint);
    }

    let sparql = SparqlClient::new(Duration::from_secs(timeout_secs));
    let state = AppState {
        usage: UsageService::new(catalog, sparql, default_limit),
    };

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors);
        match &stage {
            Some(prefix) => {
                app.service(web::scope(&format!("/{}", prefix)).configure(handlers::configure))
            }
            None => app.configure(handlers::configure),
        }
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
