use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::Capability::{self, Admin, Read, Write};
use crate::auth::CapabilitySet;
use crate::error::ApiError;
use crate::handlers::{analytics, auth, files, notifications, orders, products, system, users};
use crate::middleware::{require_api_key, Requirement};
use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(system::home))
        .route("/health", get(system::health))
        .route("/api/system/health", get(system::health))
        // Gated
        .merge(auth_routes(&state))
        .merge(user_routes(&state))
        .merge(product_routes(&state))
        .merge(order_routes(&state))
        .merge(analytics_routes(&state))
        .merge(file_routes(&state))
        .merge(notification_routes(&state))
        .merge(system_routes(&state))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes));

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config.security.cors_origins));
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

/// Wrap a method router so the API key gate runs before its handlers
fn guard(state: &AppState, required: &[Capability], route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    let requirement = Requirement {
        gate: state.gate.clone(),
        header: state.api_key_header.clone(),
        required: CapabilitySet::from(required),
    };
    route.route_layer(from_fn_with_state(requirement, require_api_key))
}

/// Register a collection route with and without the trailing slash
fn collection(router: Router<AppState>, path: &str, route: MethodRouter<AppState>) -> Router<AppState> {
    router
        .route(&format!("{}/", path), route.clone())
        .route(path, route)
}

fn auth_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // Any registered key
        .route("/api/auth/validate", guard(state, &[], get(auth::validate)))
}

fn user_routes(state: &AppState) -> Router<AppState> {
    let router = collection(
        Router::new(),
        "/api/users",
        guard(state, &[Read], get(users::list)).merge(guard(state, &[Write], post(users::create))),
    );

    router
        .route("/api/users/search", guard(state, &[Read], get(users::search)))
        .route(
            "/api/users/:user_id",
            guard(state, &[Read], get(users::get))
                .merge(guard(state, &[Write], put(users::update)))
                .merge(guard(state, &[Admin], delete(users::delete))),
        )
        .route("/api/users/:user_id/profile", guard(state, &[Read], get(users::profile)))
        .route("/api/users/:user_id/avatar", guard(state, &[Write], post(users::upload_avatar)))
        .route("/api/users/:user_id/preferences", guard(state, &[Read], get(users::preferences)))
        .route("/api/users/:user_id/activity", guard(state, &[Read], get(users::activity)))
}

fn product_routes(state: &AppState) -> Router<AppState> {
    let router = collection(
        Router::new(),
        "/api/products",
        guard(state, &[Read], get(products::list)).merge(guard(state, &[Write], post(products::create))),
    );

    router
        .route("/api/products/categories", guard(state, &[Read], get(products::categories)))
        .route("/api/products/search", guard(state, &[Read], get(products::search)))
        .route(
            "/api/products/:product_id",
            guard(state, &[Read], get(products::get))
                .merge(guard(state, &[Write], put(products::update)))
                .merge(guard(state, &[Admin], delete(products::delete))),
        )
        .route(
            "/api/products/:product_id/inventory",
            guard(state, &[Read], get(products::inventory))
                .merge(guard(state, &[Write], put(products::update_inventory))),
        )
        .route("/api/products/:product_id/reviews", guard(state, &[Read], get(products::reviews)))
        .route("/api/products/:product_id/images", guard(state, &[Write], post(products::upload_image)))
}

fn order_routes(state: &AppState) -> Router<AppState> {
    let router = collection(
        Router::new(),
        "/api/orders",
        guard(state, &[Read], get(orders::list)).merge(guard(state, &[Write], post(orders::create))),
    );

    router
        .route("/api/orders/statistics", guard(state, &[Read], get(orders::statistics)))
        .route(
            "/api/orders/:order_id",
            guard(state, &[Read], get(orders::get)).merge(guard(state, &[Write], put(orders::update))),
        )
        .route("/api/orders/:order_id/status", guard(state, &[Write], put(orders::update_status)))
        .route("/api/orders/:order_id/items", guard(state, &[Read], get(orders::items)))
        .route("/api/orders/:order_id/shipping", guard(state, &[Read], get(orders::shipping)))
        .route("/api/orders/:order_id/payment", guard(state, &[Read], get(orders::payment)))
        .route("/api/orders/:order_id/invoice", guard(state, &[Read], get(orders::invoice)))
}

fn analytics_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/analytics/dashboard", guard(state, &[Read], get(analytics::dashboard)))
        .route("/api/analytics/sales", guard(state, &[Read], get(analytics::sales)))
        .route("/api/analytics/users", guard(state, &[Read], get(analytics::users)))
        .route("/api/analytics/traffic", guard(state, &[Read], get(analytics::traffic)))
        .route("/api/analytics/revenue", guard(state, &[Read], get(analytics::revenue)))
        .route("/api/analytics/conversion", guard(state, &[Read], get(analytics::conversion)))
        .route("/api/analytics/performance", guard(state, &[Read], get(analytics::performance)))
        .route("/api/analytics/reports", guard(state, &[Read], post(analytics::generate_report)))
        .route("/api/analytics/export", guard(state, &[Read], post(analytics::export)))
        .route("/api/analytics/alerts", guard(state, &[Read], get(analytics::alerts)))
}

fn file_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/files/upload", guard(state, &[Write], post(files::upload)))
        .route("/api/files/list", guard(state, &[Read], get(files::list)))
        .route(
            "/api/files/:file_id",
            guard(state, &[Read], get(files::get)).merge(guard(state, &[Write], delete(files::delete))),
        )
        .route("/api/files/:file_id/download", guard(state, &[Read], get(files::download)))
        .route("/api/files/:file_id/share", guard(state, &[Write], post(files::share)))
}

fn notification_routes(state: &AppState) -> Router<AppState> {
    let router = collection(
        Router::new(),
        "/api/notifications",
        guard(state, &[Read], get(notifications::list))
            .merge(guard(state, &[Write], post(notifications::create))),
    );

    router
        .route("/api/notifications/send", guard(state, &[Write], post(notifications::send)))
        .route(
            "/api/notifications/:notification_id/read",
            guard(state, &[Write], put(notifications::mark_read)),
        )
}

fn system_routes(state: &AppState) -> Router<AppState> {
    Router::new().route("/api/system/info", guard(state, &[Admin], get(system::info)))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Resource not found")
}
