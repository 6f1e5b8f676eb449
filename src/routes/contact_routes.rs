use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::controllers::contact_controller::ContactController;
use crate::dto::contact_dto::{
    CategoryContactsResponse, ContactFilters, ContactListResponse, ContactResponse,
    ContactStatsResponse, CreateContactRequest, UpdateContactRequest, UrgentContactsResponse,
};
use crate::models::id::EntityId;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_contact_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contacts).post(create_contact))
        .route("/stats/summary", get(contact_stats))
        .route("/urgent/all", get(urgent_contacts))
        .route("/category/:category", get(contacts_by_category))
        .route(
            "/:id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
}

async fn list_contacts(
    State(state): State<AppState>,
    Query(filters): Query<ContactFilters>,
) -> Result<Json<ContactListResponse>, AppError> {
    let controller = ContactController::new(state.pool.clone());
    let contacts = controller.list(filters).await?;
    let total = contacts.len() as i64;

    Ok(Json(ContactListResponse {
        contacts: contacts.into_iter().map(ContactResponse::from).collect(),
        total,
    }))
}

async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<ContactResponse>, AppError> {
    let controller = ContactController::new(state.pool.clone());
    let contact = controller.get_by_id(id.as_str()).await?;
    Ok(Json(contact.into()))
}

async fn create_contact(
    State(state): State<AppState>,
    Json(request): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    let controller = ContactController::new(state.pool.clone());
    let contact = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(contact.into())))
}

async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(request): Json<UpdateContactRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ContactController::new(state.pool.clone());
    let contact = controller.update(id.as_str(), request).await?;
    Ok(Json(json!({
        "message": "Contact updated successfully",
        "contact": ContactResponse::from(contact)
    })))
}

async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ContactController::new(state.pool.clone());
    controller.delete(id.as_str()).await?;
    Ok(Json(json!({ "message": "Contact deleted successfully" })))
}

async fn contacts_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<CategoryContactsResponse>, AppError> {
    let controller = ContactController::new(state.pool.clone());
    let contacts = controller.list_by_category(&category).await?;
    let total = contacts.len() as i64;

    Ok(Json(CategoryContactsResponse {
        category,
        contacts: contacts.into_iter().map(ContactResponse::from).collect(),
        total,
    }))
}

async fn urgent_contacts(
    State(state): State<AppState>,
) -> Result<Json<UrgentContactsResponse>, AppError> {
    let controller = ContactController::new(state.pool.clone());
    let contacts = controller.list_urgent().await?;
    let total = contacts.len() as i64;

    Ok(Json(UrgentContactsResponse {
        urgent_contacts: contacts.into_iter().map(ContactResponse::from).collect(),
        total,
    }))
}

async fn contact_stats(
    State(state): State<AppState>,
) -> Result<Json<ContactStatsResponse>, AppError> {
    let controller = ContactController::new(state.pool.clone());
    Ok(Json(controller.contact_stats().await?))
}
