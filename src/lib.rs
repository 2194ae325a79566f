pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use application::order_processor::OrderProcessor;
pub use application::order_query::OrderQueryService;
pub use db::{create_pool, DbPool};
pub use domain::ports::{OrderCache, OrderStore};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::receive_order,
        handlers::orders::get_order,
        handlers::orders::list_orders,
    ),
    components(schemas(
        handlers::orders::OrderRequest,
        handlers::orders::ProductRequest,
        handlers::orders::OrderResponse,
        handlers::orders::ProductResponse,
        handlers::orders::OrderPageResponse,
    )),
    tags((name = "orders", description = "Order ingestion and lookup"))
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// Passing `None` for `cache` disables duplicate detection.
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    store: Arc<dyn OrderStore>,
    cache: Option<Arc<dyn OrderCache>>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let processor = web::Data::new(match cache {
        Some(cache) => OrderProcessor::new(store.clone(), cache),
        None => OrderProcessor::without_cache(store.clone()),
    });
    let queries = web::Data::new(OrderQueryService::new(store));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(processor.clone())
            .app_data(queries.clone())
            .wrap(Logger::default())
            .configure(handlers::orders::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
