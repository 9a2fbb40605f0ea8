mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::{Config, DocumentStoreKind, PostsBackend};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::ads::{routes as ads_routes, AdService};
use crate::features::auth::{routes as auth_routes, AuthService, SessionTokenService};
use crate::features::complaints::{routes as complaints_routes, ComplaintService};
use crate::features::emergency::{routes as emergency_routes, EmergencyService};
use crate::features::management::{routes as management_routes, ManagementService};
use crate::features::mart::{routes as mart_routes, MartService};
use crate::features::masjid::{routes as masjid_routes, MasjidService};
use crate::features::villas::{routes as villas_routes, VillaService};
use crate::modules::documents::{
    spawn_error_reporter, DocumentStore, ErrorEmitter, MemoryDocumentStore, PgDocumentStore,
};
use crate::modules::sheet::{SheetClient, SheetHttpClient};
use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Remote script endpoint (every sheet-backed section goes through it)
    let sheet: Arc<dyn SheetClient> = Arc::new(
        SheetHttpClient::new(&config.sheet)
            .map_err(|e| anyhow::anyhow!("Failed to create sheet client: {}", e))?,
    );
    tracing::info!("Sheet client initialized");

    // Permission errors from live subscriptions end up in the log
    let error_emitter = ErrorEmitter::new();
    spawn_error_reporter(&error_emitter);

    // Document store
    let document_store: Arc<dyn DocumentStore> = match config.store.document_store {
        DocumentStoreKind::Memory => {
            tracing::info!("Using in-memory document store");
            Arc::new(MemoryDocumentStore::new())
        }
        DocumentStoreKind::Postgres => {
            let db_config = config
                .store
                .database
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for postgres"))?;

            let pool = database::create_pool(db_config).await?;
            tracing::info!("Database connection pool created");

            tracing::info!("Running database migrations...");
            database::run_migrations(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
            tracing::info!("Database migrations completed successfully");

            Arc::new(PgDocumentStore::new(pool))
        }
    };

    // Sessions
    let token_service = Arc::new(SessionTokenService::new(&config.session));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&sheet),
        Arc::clone(&token_service),
        &config.session,
    ));
    tracing::info!("Auth service initialized");

    // Villa directory
    let villa_service = Arc::new(
        VillaService::load(config.portal.villa_data_path.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load villa directory: {}", e))?,
    );

    let ad_service = Arc::new(AdService::new(
        Arc::clone(&sheet),
        config.portal.ad_expiry_hours,
    ));
    let complaint_service = Arc::new(ComplaintService::new(
        Arc::clone(&sheet),
        Arc::clone(&villa_service),
    ));

    let management_service = Arc::new(match config.store.management_posts {
        PostsBackend::Sheet => {
            ManagementService::with_sheet(Arc::clone(&sheet), error_emitter.clone())
        }
        PostsBackend::Documents => {
            ManagementService::with_documents(Arc::clone(&document_store), error_emitter.clone())
        }
    });
    tracing::info!(
        "Management posts backend: {:?}",
        config.store.management_posts
    );

    let emergency_service = Arc::new(EmergencyService::new(Arc::clone(&sheet)));
    let mart_service = Arc::new(MartService::new(
        Arc::clone(&sheet),
        config.session.mart_owner_password.clone(),
    ));
    let masjid_service = Arc::new(MasjidService::new());
    let admin_service = Arc::new(AdminService::new(Arc::clone(&sheet)));
    tracing::info!("Portal services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // API routes; a bearer token is optional, guards check roles per handler
    let api_routes = Router::new()
        .merge(auth_routes::routes(auth_service))
        .merge(villas_routes::routes(villa_service))
        .merge(ads_routes::routes(ad_service))
        .merge(complaints_routes::routes(complaint_service))
        .merge(management_routes::routes(management_service))
        .merge(emergency_routes::routes(emergency_service))
        .merge(mart_routes::routes(mart_service))
        .merge(masjid_routes::routes(masjid_service))
        .nest("/api/admin", admin_routes::routes(admin_service))
        .route_layer(axum::middleware::from_fn_with_state(
            token_service,
            middleware::session_middleware,
        ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
