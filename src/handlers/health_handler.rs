use std::sync::Arc;

use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::response::HealthResponse};

#[get("/health")]
pub async fn health_check(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let active_sessions = state.session_service.active_sessions().await?;
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        active_sessions,
    }))
}

#[get("/health/live")]
pub async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers;
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_health_check() {
        let state = Arc::new(test_helpers::app_state());
        state.session_service.start().await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(health_check),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["active_sessions"], 1);
    }

    #[actix_web::test]
    async fn test_health_check_live() {
        let app = test::init_service(App::new().service(health_check_live)).await;

        let req = test::TestRequest::get().uri("/health/live").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }
}
