use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use daybook_adapters::{SessionScheme, config::AllowedOrigins};
use daybook_axum::routes::{
    credentials_callback, federated_callback, federated_signin, register, session, signin_check,
    signout_json, signout_redirect,
};
use daybook_core::{
    FederatedIdentityProvider, PasswordHasher, RevokedSessionStore, UserStore, paths,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    pages,
    telemetry::{make_span_with_request_id, on_request, on_response},
};

/// The daybook web application: auth API routes plus the server-rendered
/// pages, sharing one session scheme as router state.
pub struct AppService {
    router: Router,
}

impl AppService {
    /// Build the router over a configured [`SessionScheme`].
    ///
    /// Stores are Clone handles over shared state, so every request works
    /// against the same users and revoked sessions.
    pub fn new<U, H, B, P>(scheme: SessionScheme<U, H, B, P>) -> Self
    where
        U: UserStore + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        B: RevokedSessionStore + Clone + 'static,
        P: FederatedIdentityProvider + Clone + 'static,
    {
        type Scheme<U, H, B, P> = SessionScheme<U, H, B, P>;

        let router = Router::new()
            // Pages
            .route(paths::HOME, get(pages::home::<Scheme<U, H, B, P>>))
            .route(paths::SIGNIN_PAGE, get(pages::signin::<Scheme<U, H, B, P>>))
            .route(
                paths::PROVIDER_SIGNIN,
                get(pages::signin::<Scheme<U, H, B, P>>),
            )
            .route(
                paths::REGISTER_PAGE,
                get(pages::register::<Scheme<U, H, B, P>>),
            )
            // Credentials
            .route(paths::REGISTER, post(register::<Scheme<U, H, B, P>>))
            .route(paths::SIGNIN_CHECK, post(signin_check::<Scheme<U, H, B, P>>))
            .route(
                paths::CREDENTIALS_CALLBACK,
                post(credentials_callback::<Scheme<U, H, B, P>>),
            )
            // Federated
            .route(
                paths::FEDERATED_SIGNIN,
                get(federated_signin::<Scheme<U, H, B, P>>),
            )
            .route(
                paths::FEDERATED_CALLBACK,
                get(federated_callback::<Scheme<U, H, B, P>>),
            )
            // Session lifecycle
            .route(paths::SESSION, get(session::<Scheme<U, H, B, P>>))
            .route(
                paths::SIGNOUT,
                get(signout_redirect::<Scheme<U, H, B, P>>)
                    .post(signout_json::<Scheme<U, H, B, P>>),
            )
            .with_state(scheme);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert into a router that can be mounted on another router.
    ///
    /// With `allowed_origins`, cross-origin requests from those origins may
    /// carry the session cookie.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins.filter(|origins| !origins.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins
                            .as_slice()
                            .iter()
                            .any(|allowed| allowed.as_bytes() == origin.as_bytes())
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Daybook listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
