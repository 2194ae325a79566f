use std::io;
use std::sync::Arc;

use dotenvy::dotenv;
use order_ingest::config::Config;
use order_ingest::infrastructure::order_store::DieselOrderStore;
use order_ingest::infrastructure::redis_cache::RedisOrderCache;
use order_ingest::{build_server, create_pool, run_migrations, OrderCache};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(io::Error::other)?;

    let pool = create_pool(&config.database_url).map_err(io::Error::other)?;
    run_migrations(&pool).map_err(io::Error::other)?;

    let cache: Option<Arc<dyn OrderCache>> = match &config.redis_url {
        Some(url) => Some(Arc::new(
            RedisOrderCache::connect(url, config.redis_timeout).map_err(io::Error::other)?,
        )),
        None => {
            log::warn!("REDIS_URL not set, duplicate detection is disabled");
            None
        }
    };

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(
        Arc::new(DieselOrderStore::new(pool)),
        cache,
        &config.host,
        config.port,
    )?
    .await
}
