pub mod health_handler;
pub mod session_handler;

use actix_web::web;

pub use health_handler::{health_check, health_check_live};
pub use session_handler::{get_session, post_event, start_session};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_live)
        .service(start_session)
        .service(get_session)
        .service(post_event);
}
