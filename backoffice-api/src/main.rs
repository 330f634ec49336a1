use std::net::SocketAddr;
use std::sync::Arc;

use backoffice_admin::AdminRegistry;
use backoffice_api::{app, AppState};
use backoffice_invoice::{
    BulkExporter, EmptyOrders, InvoiceAssembler, InvoiceRenderer, RenderOptions,
};
use backoffice_store::{
    DbClient, PgCollectionRepository, PgCustomerRepository, PgOrderRepository,
    PgProductRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backoffice_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = backoffice_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting back-office API on port {}", config.server.port);

    let db = DbClient::new(&config.database)
        .await
        .expect("Failed to connect to Postgres");

    let customers = Arc::new(PgCustomerRepository::new(db.pool.clone()));
    let products = Arc::new(PgProductRepository::new(db.pool.clone()));
    let collections = Arc::new(PgCollectionRepository::new(db.pool.clone()));
    let orders = Arc::new(PgOrderRepository::new(db.pool.clone()));

    let empty_orders = match config.invoice.empty_orders.as_str() {
        "skip" => EmptyOrders::Skip,
        "render" => EmptyOrders::Render,
        other => {
            tracing::warn!("unknown invoice.empty_orders setting {other:?}, using render");
            EmptyOrders::Render
        }
    };
    let exporter = Arc::new(BulkExporter::new(
        InvoiceAssembler::new(orders.clone()),
        InvoiceRenderer::new(RenderOptions {
            company_name: config.invoice.company_name.clone(),
            remit_to: config.invoice.remit_to.clone(),
        }),
        config.assets.logo_path.clone(),
        empty_orders,
    ));

    let app_state = AppState {
        customers,
        products,
        collections,
        orders,
        registry: Arc::new(AdminRegistry::new()),
        exporter,
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
