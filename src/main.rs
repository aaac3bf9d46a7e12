use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use caption_study_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};
use env_logger::Env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if config.is_production() {
        config.validate_for_production();
    }
    if config.debug_shortcuts {
        log::warn!("Debug shortcuts are enabled");
    }

    let state = match AppState::new(config).await {
        Ok(state) => Arc::new(state),
        Err(e) => {
            log::error!("Failed to load study content: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    let bind = (
        state.config.web_server_host.clone(),
        state.config.web_server_port,
    );
    log::info!("Starting HTTP server on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
    })
    .bind(bind)?
    .run()
    .await
}
