use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use peer_review::config::AppConfig;
use peer_review::document::{PeerReviewDocumentService, WkhtmltopdfConverter};
use peer_review::error::AppError;
use peer_review::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let converter = Arc::new(WkhtmltopdfConverter::new(
        config.document.converter_bin.clone(),
    ));
    let document_service = Arc::new(PeerReviewDocumentService::from_config(&config, converter));
    document_service.archive().ensure_dir()?;

    if !config.storage.static_dir.join(crate::infra::FORM_PAGE).is_file() {
        warn!(
            static_dir = %config.storage.static_dir.display(),
            "form page missing; GET / will return 404"
        );
    }
    info!(
        database = %config.database.display_target(),
        pool_max = config.database.pool.max,
        pool_min = config.database.pool.min,
        "database settings loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        static_dir: Arc::new(config.storage.static_dir.clone()),
    };

    let app = with_service_routes(document_service.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        output_dir = %document_service.archive().root().display(),
        converter = %config.document.converter_bin,
        "peer review application service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
