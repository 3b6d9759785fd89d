use std::sync::Arc;

use auth::Authenticator;
use auth::CredentialLookup;
use auth::IdentityResolver;
use auth::JwtHandler;
use auth::PasswordHasher;
use blog_service::config::Config;
use blog_service::config::RECOMMENDED_SECRET_BYTES;
use blog_service::domain::post::service::PostService;
use blog_service::domain::user::credentials::UserCredentialLookup;
use blog_service::domain::user::service::UserService;
use blog_service::inbound::http::router::create_router;
use blog_service::inbound::http::router::AppState;
use blog_service::outbound::repositories::PostgresPostRepository;
use blog_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "blog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        token_expiration_minutes = config.jwt.expiration_minutes,
        "Configuration loaded"
    );

    if config.jwt.secret.len() < RECOMMENDED_SECRET_BYTES {
        tracing::warn!(
            recommended_bytes = RECOMMENDED_SECRET_BYTES,
            "JWT signing key is shorter than recommended"
        );
    }

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let jwt_handler = Arc::new(JwtHandler::new(config.jwt.secret.as_bytes()));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let post_repository = Arc::new(PostgresPostRepository::new(pg_pool));

    let credential_lookup: Arc<dyn CredentialLookup> =
        Arc::new(UserCredentialLookup::new(Arc::clone(&user_repository)));

    let state = AppState {
        user_service: Arc::new(UserService::new(
            user_repository,
            password_hasher.clone(),
        )),
        post_service: Arc::new(PostService::new(post_repository)),
        authenticator: Arc::new(Authenticator::new(
            Arc::clone(&credential_lookup),
            password_hasher,
        )),
        identity_resolver: Arc::new(IdentityResolver::new(
            credential_lookup,
            Arc::clone(&jwt_handler),
        )),
        token_issuer: jwt_handler,
        token_ttl: chrono::Duration::minutes(config.jwt.expiration_minutes),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;
    tracing::info!("Server exited");

    Ok(())
}
