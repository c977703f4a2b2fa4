use blog_api::{
    config::AppConfig,
    database::db::Db,
    rabbitmq,
    server::{self, controller::AppState},
    services::mailer::service::{LogMailer, Mailer, RmqMailer},
    tracer,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracer::init("blog_api").expect("failed to init tracer");

    let cfg = AppConfig::from_env();

    if cfg.app_development {
        info!("[CFG] {:#?}", cfg);
    }

    let db = match &cfg.db_url {
        Some(db_url) => Db::connect(db_url)
            .await
            .unwrap_or_else(|e| panic!("[DB] failed to connect to database: {:#}", e)),
        None => {
            warn!("[DB] DB_URL not set, records will be kept in memory");
            Db::in_memory()
        }
    };

    let mailer: Arc<dyn Mailer> = match &cfg.rmq_uri {
        Some(rmq_uri) => Arc::new(RmqMailer::new(
            rabbitmq::get_connection_pool(rmq_uri),
            &cfg.email_sender,
        )),
        None => {
            warn!("[MAILER] RMQ_URI not set, emails will only be logged");
            Arc::new(LogMailer)
        }
    };

    let app = server::controller::new(AppState::new(db.clone(), mailer, &cfg));

    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), cfg.http_port);
    info!("[WEB] listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("[WEB] server error");

    info!("[APP] closing database connections");
    db.close();
}

/// resolves once SIGINT or SIGTERM is received
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("[APP] received shutdown signal");
}
