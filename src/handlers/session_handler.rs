use std::sync::Arc;

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::response::SessionResponse,
    wizard::Event,
};

#[post("/api/sessions")]
pub async fn start_session(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let (session_id, view) = state.session_service.start().await?;
    Ok(HttpResponse::Created().json(SessionResponse::new(session_id, view)))
}

#[get("/api/sessions/{id}")]
pub async fn get_session(
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session_id = id.into_inner();
    let view = state.session_service.view(session_id).await?;
    Ok(HttpResponse::Ok().json(SessionResponse::new(session_id, view)))
}

#[post("/api/sessions/{id}/events")]
pub async fn post_event(
    req: HttpRequest,
    state: web::Data<Arc<AppState>>,
    id: web::Path<Uuid>,
    event: web::Json<Event>,
) -> Result<HttpResponse, AppError> {
    let session_id = id.into_inner();
    let event = event.into_inner();
    log::debug!(
        "[{}] session {} event '{}'",
        get_request_id(&req).unwrap_or_default(),
        session_id,
        event.name()
    );

    let view = state.session_service.handle_event(session_id, event).await?;
    Ok(HttpResponse::Ok().json(SessionResponse::new(session_id, view)))
}
