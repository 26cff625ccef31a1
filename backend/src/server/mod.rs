//! Server construction and endpoint wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::warn;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::Trace;
use backend::domain::ports::{FeedbackRepository, FixtureFeedbackRepository};
use backend::inbound::http::export::export_feedback;
use backend::inbound::http::feedback::{feedback_stats, list_feedback, submit_feedback};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::json_error_handler;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::DieselFeedbackRepository;

/// Run the HTTP server until shutdown.
///
/// Readiness flips on once the listener is bound, so orchestrators only
/// route traffic to a server that can actually accept it.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the listener cannot be bound.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let repository: Arc<dyn FeedbackRepository> = match config.db_pool {
        Some(ref pool) => Arc::new(DieselFeedbackRepository::new(pool.clone())),
        None => {
            warn!("no database configured; using the in-memory fixture repository");
            Arc::new(FixtureFeedbackRepository::new())
        }
    };

    let state = web::Data::new(HttpState::new(repository));
    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let api = web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(submit_feedback)
            .service(feedback_stats)
            .service(list_feedback)
            .service(export_feedback);

        let app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
