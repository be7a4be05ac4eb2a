use std::{net::TcpListener, time::Duration};

use actix_web::{dev::Server, web, App, HttpServer};
use anyhow::Context;
use diesel::{r2d2::ConnectionManager, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use r2d2::Pool;
use tracing_actix_web::TracingLogger;

use crate::{
    configuration::{DatabaseSettings, Settings},
    routes::{
        get_coffees, get_customer_list, get_order_details, get_orders, health_check,
        json_error_handler, post_coffee, post_customer, post_order, post_order_detail,
        put_coffee, query_error_handler, welcome
    },
    utils::{DbPool, SqlitePragmas}
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub struct Application{
    pub host: String,
    pub port: u16,
    server: Server
}

impl Application {
    /// Opens the database, brings its schema up to date and binds the listener.
    /// Port 0 picks a free port, read it back from `port`.
    pub async fn build(settings: Settings) -> Result<Self, anyhow::Error>{
        let pool = get_connection_pool(&settings.database)?;
        run_migrations(&pool)?;

        let listener = TcpListener::bind((settings.application.host.as_str(), settings.application.port))
                        .context("Failed to bind address")?;
        let port = listener.local_addr()?.port();

        let server = run(listener, pool)?;

        tracing::info!(host = %settings.application.host, port, "Server is running");

        Ok(Application{
            host: settings.application.host,
            port,
            server
        })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error>{
        self.server.await
    }
}

pub fn get_connection_pool(settings: &DatabaseSettings) -> Result<DbPool, anyhow::Error>{
    let manager = ConnectionManager::<SqliteConnection>::new(settings.path.as_str());

    Pool::builder()
        .max_size(settings.max_connections)
        .connection_customizer(Box::new(SqlitePragmas{
            busy_timeout: Duration::from_millis(settings.busy_timeout_ms)
        }))
        .build(manager)
        .context("Failed to build connection pool")
}

// Only pending migrations run, existing tables and rows are left untouched
#[tracing::instrument(
    "Running pending migrations",
    skip_all
)]
pub fn run_migrations(pool: &DbPool) -> Result<(), anyhow::Error>{
    let mut conn = pool.get()
                    .context("Failed to get connection from pool")?;

    let applied = conn.run_pending_migrations(MIGRATIONS)
                    .map_err(|e| anyhow::anyhow!(e))
                    .context("Failed to run migrations")?;

    tracing::info!(count = applied.len(), "Database and tables synced");

    Ok(())
}

pub fn run(listener: TcpListener, pool: DbPool) -> Result<Server, anyhow::Error>{
    let pool = web::Data::new(pool);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(pool.clone())
            .route("/", web::get().to(welcome))
            .route("/health", web::get().to(health_check))
            .service(
                web::resource("/coffees")
                    .route(web::get().to(get_coffees))
                    .route(web::post().to(post_coffee))
            )
            .route("/coffees/{id}", web::put().to(put_coffee))
            .service(
                web::resource("/customers")
                    .route(web::get().to(get_customer_list))
                    .route(web::post().to(post_customer))
            )
            .service(
                web::resource("/orders")
                    .route(web::get().to(get_orders))
                    .route(web::post().to(post_order))
            )
            .service(
                web::resource("/orderdetails")
                    .route(web::get().to(get_order_details))
                    .route(web::post().to(post_order_detail))
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
