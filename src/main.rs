#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use leptos::logging::log;
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use studyhub::app::*;
    use studyhub::core::auth::{AuthApiState, AuthService, JwtService, UserStore, auth_api_router};
    use studyhub::core::config::Config;
    use studyhub::core::courses::{CourseApiState, CourseStore, instructor_api_router};
    use tower_http::compression::{CompressionLayer, CompressionLevel};
    use tower_http::services::ServeDir;

    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load application config from environment variables
    let config = Config::from_env();

    // Log config status (without revealing secrets)
    tracing::info!(
        "Config loaded: secret_key={}, token_expiration_minutes={:?}",
        config.has_secret_key(),
        config.token_expiration_minutes,
    );

    // Token signing requires SECRET_KEY
    let jwt_service = JwtService::from_env().unwrap();
    let auth_service = AuthService::new(UserStore::new(), jwt_service);

    // Load configuration from Cargo.toml [package.metadata.leptos]
    // Can be overridden via LEPTOS_SITE_ADDR env var for Docker/K8s
    let conf = get_configuration(None).unwrap();
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);

    // Create ServeDir for pkg with pre-compressed file support
    let pkg_service = ServeDir::new(format!("{}/pkg", leptos_options.site_root))
        .precompressed_br()
        .precompressed_gzip();

    // Build the Leptos router
    let leptos_router = Router::new()
        .nest_service("/pkg", pkg_service)
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options);

    // REST API routers
    let auth_api = auth_api_router(AuthApiState {
        auth_service: auth_service.clone(),
    });
    let instructor_api = instructor_api_router(CourseApiState {
        courses: CourseStore::new(),
        auth_service,
    });

    // Build the main application router with compression
    let app = Router::new()
        .merge(auth_api)
        .merge(instructor_api)
        .merge(leptos_router)
        .layer(
            CompressionLayer::new()
                .br(true)
                .gzip(true)
                .quality(CompressionLevel::Best),
        );

    // Run our app with hyper
    log!("listening on http://{}", &addr);
    log!("Auth API: http://{}/api/v1/auth", &addr);
    log!("Instructor API: http://{}/api/v1/instructor", &addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no client-side main function
    // see lib.rs for the hydration entry point instead
}
