use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;

use crate::controllers::contact_controller::ContactController;
use crate::dto::contact_dto::{
    ContactResponse, InquiryFilters, InquiryListResponse, InquiryStatsResponse, RespondRequest,
    SubmitInquiryRequest, SubmittedInquiryResponse, UpdateInquiryRequest,
};
use crate::middleware::auth_middleware::AuthUser;
use crate::models::id::EntityId;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Alta pública de consultas de clientes
pub fn public_router() -> Router<AppState> {
    Router::new().route("/inquiry", post(submit_inquiry))
}

/// Gestión administrativa de consultas
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/inquiries", get(list_inquiries))
        .route("/inquiries/:id", get(get_inquiry).put(update_inquiry))
        .route("/inquiries/:id/respond", post(respond_inquiry))
        .route("/stats/inquiries", get(inquiry_stats))
}

async fn submit_inquiry(
    State(state): State<AppState>,
    Json(request): Json<SubmitInquiryRequest>,
) -> Result<(StatusCode, Json<SubmittedInquiryResponse>), AppError> {
    let controller = ContactController::new(state.pool.clone());
    let inquiry = controller.submit_inquiry(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmittedInquiryResponse {
            message: "Your inquiry has been submitted successfully. We will get back to you soon."
                .to_string(),
            inquiry_id: inquiry.id.to_string(),
        }),
    ))
}

async fn list_inquiries(
    State(state): State<AppState>,
    Query(filters): Query<InquiryFilters>,
) -> Result<Json<InquiryListResponse>, AppError> {
    let controller = ContactController::new(state.pool.clone());
    let (inquiries, total, page, pages) = controller.list_inquiries(filters).await?;

    Ok(Json(InquiryListResponse {
        inquiries: inquiries.into_iter().map(ContactResponse::from).collect(),
        total,
        page,
        pages,
    }))
}

/// GET con efecto: la primera lectura marca la consulta como leída
async fn get_inquiry(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<EntityId>,
) -> Result<Json<ContactResponse>, AppError> {
    let controller = ContactController::new(state.pool.clone());
    let inquiry = controller.get_inquiry(id.as_str(), &user.id).await?;
    Ok(Json(inquiry.into()))
}

async fn update_inquiry(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(request): Json<UpdateInquiryRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ContactController::new(state.pool.clone());
    let inquiry = controller.update_inquiry(id.as_str(), request).await?;
    Ok(Json(json!({
        "message": "Inquiry updated successfully",
        "inquiry": ContactResponse::from(inquiry)
    })))
}

async fn respond_inquiry(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<EntityId>,
    Json(request): Json<RespondRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ContactController::new(state.pool.clone());
    let inquiry = controller
        .respond(id.as_str(), request.message, &user.id)
        .await?;
    Ok(Json(json!({
        "message": "Response sent successfully",
        "inquiry": ContactResponse::from(inquiry)
    })))
}

async fn inquiry_stats(
    State(state): State<AppState>,
) -> Result<Json<InquiryStatsResponse>, AppError> {
    let controller = ContactController::new(state.pool.clone());
    Ok(Json(controller.inquiry_stats().await?))
}
