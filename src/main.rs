use tracing_subscriber::EnvFilter;

use flareline::{api, config, db, demo};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let settings = config::Settings::from_env();

    std::fs::create_dir_all(config::app_data_dir())
        .expect("Cannot create application data directory");
    let conn = db::open_database(&config::database_path())
        .expect("Cannot open the Flareline database");
    demo::seed_demo_data(&conn).expect("Cannot seed demo data");

    let bind_addr = settings.bind_addr.clone();
    let app = api::api_router(api::ApiContext::new(conn, settings));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("Cannot bind {bind_addr}: {e}"));
    tracing::info!("API listening on {bind_addr}");

    axum::serve(listener, app)
        .await
        .expect("error while running Flareline");
}
