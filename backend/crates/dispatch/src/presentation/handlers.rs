//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

use auth::Principal;
use kernel::id::{IncidentId, MessageId};

use crate::application::{
    AlertsUseCase, CreateAlertInput, CreateIncidentInput, CreateMessageInput, CreateSosInput,
    IncidentMessageInput, IncidentsUseCase, MessagesUseCase, SosMessageInput, SosUseCase,
    UpdateIncidentInput,
};
use crate::domain::repository::{
    AlertRepository, IncidentRepository, MessageRepository, SosRepository,
};
use crate::domain::value_object::{incident_status::IncidentStatus, pagination::PageRequest};
use crate::error::DispatchResult;
use crate::presentation::dto::{
    AdminIncidentQuery, AdminMessageQuery, AlertCreateRequest, AlertListResponse, AlertResponse,
    IncidentCreateRequest, IncidentListResponse, IncidentMessageRequest, IncidentResponse,
    IncidentUpdateRequest, MessageCreateRequest, MessageListResponse, MessageResponse,
    MessageStatsResponse, PaginationQuery, SosCreateRequest, SosListResponse, SosMessageRequest,
    SosResponse, UnreadCountResponse,
};

/// Repository bound shared by every dispatch handler
pub trait DispatchRepository:
    IncidentRepository + SosRepository + AlertRepository + MessageRepository
    + Clone + Send + Sync + 'static
{
}

impl<T> DispatchRepository for T where
    T: IncidentRepository + SosRepository + AlertRepository + MessageRepository
        + Clone + Send + Sync + 'static
{
}

/// Shared state for dispatch handlers
#[derive(Clone)]
pub struct DispatchAppState<R: DispatchRepository> {
    pub repo: Arc<R>,
}

// ============================================================================
// Incidents
// ============================================================================

/// POST /api/incidents
pub async fn create_incident<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<IncidentCreateRequest>,
) -> DispatchResult<(StatusCode, Json<IncidentResponse>)> {
    let use_case = IncidentsUseCase::new(state.repo.clone());
    let incident = use_case
        .create(
            &principal,
            CreateIncidentInput {
                incident_type: req.incident_type,
                description: req.description,
                lat: req.lat,
                lng: req.lng,
                image_url: req.image_url,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(IncidentResponse::from(incident))))
}

/// GET /api/incidents/user
pub async fn get_my_incidents<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<PaginationQuery>,
) -> DispatchResult<Json<IncidentListResponse>> {
    let page = PageRequest::new(query.page, query.page_size)?;
    let use_case = IncidentsUseCase::new(state.repo.clone());
    let result = use_case.list_for_user(&principal, page).await?;

    Ok(Json(IncidentListResponse::from(result)))
}

/// GET /api/incidents/{incident_id}
pub async fn get_incident<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(incident_id): Path<Uuid>,
) -> DispatchResult<Json<IncidentResponse>> {
    let use_case = IncidentsUseCase::new(state.repo.clone());
    let incident = use_case
        .get_owned(&principal, IncidentId::from_uuid(incident_id))
        .await?;

    Ok(Json(IncidentResponse::from(incident)))
}

// ============================================================================
// SOS
// ============================================================================

/// POST /api/sos
pub async fn create_sos<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<SosCreateRequest>,
) -> DispatchResult<(StatusCode, Json<SosResponse>)> {
    let use_case = SosUseCase::new(state.repo.clone());
    let alert = use_case
        .create(
            &principal,
            CreateSosInput {
                ability: req.ability,
                lat: req.lat,
                lng: req.lng,
                battery: req.battery,
                status: req.status,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(SosResponse::from(alert))))
}

/// GET /api/sos/user
pub async fn get_my_sos<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<PaginationQuery>,
) -> DispatchResult<Json<SosListResponse>> {
    let page = PageRequest::new(query.page, query.page_size)?;
    let use_case = SosUseCase::new(state.repo.clone());
    let result = use_case.list_for_user(&principal, page).await?;

    Ok(Json(SosListResponse::from(result)))
}

// ============================================================================
// Alerts
// ============================================================================

/// GET /api/alerts (public)
pub async fn list_alerts<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Query(query): Query<PaginationQuery>,
) -> DispatchResult<Json<AlertListResponse>> {
    let page = PageRequest::new(query.page, query.page_size)?;
    let use_case = AlertsUseCase::new(state.repo.clone());
    let result = use_case.list(page).await?;

    Ok(Json(AlertListResponse::from(result)))
}

/// POST /api/admin/alerts
pub async fn create_alert<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Json(req): Json<AlertCreateRequest>,
) -> DispatchResult<(StatusCode, Json<AlertResponse>)> {
    let use_case = AlertsUseCase::new(state.repo.clone());
    let alert = use_case
        .create(CreateAlertInput {
            title: req.title,
            message: req.message,
            severity: req.severity,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AlertResponse::from(alert))))
}

// ============================================================================
// Admin Incidents
// ============================================================================

/// GET /api/admin/incidents
pub async fn admin_list_incidents<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Query(query): Query<AdminIncidentQuery>,
) -> DispatchResult<Json<IncidentListResponse>> {
    let page = PageRequest::new(query.page, query.page_size)?;
    let use_case = IncidentsUseCase::new(state.repo.clone());
    let result = use_case
        .list_all(query.status_filter.as_deref(), page)
        .await?;

    Ok(Json(IncidentListResponse::from(result)))
}

/// PATCH /api/admin/incidents/{incident_id}
pub async fn admin_update_incident<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Path(incident_id): Path<Uuid>,
    Json(req): Json<IncidentUpdateRequest>,
) -> DispatchResult<Json<IncidentResponse>> {
    let use_case = IncidentsUseCase::new(state.repo.clone());
    let incident = use_case
        .update(
            IncidentId::from_uuid(incident_id),
            UpdateIncidentInput {
                status: req.status,
                risk_score: req.risk_score,
                risk_level: req.risk_level,
            },
        )
        .await?;

    Ok(Json(IncidentResponse::from(incident)))
}

/// PATCH /api/admin/incidents/{incident_id}/verify
pub async fn admin_verify_incident<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Path(incident_id): Path<Uuid>,
) -> DispatchResult<Json<IncidentResponse>> {
    let use_case = IncidentsUseCase::new(state.repo.clone());
    let incident = use_case
        .set_status(IncidentId::from_uuid(incident_id), IncidentStatus::Verified)
        .await?;

    Ok(Json(IncidentResponse::from(incident)))
}

/// PATCH /api/admin/incidents/{incident_id}/resolve
pub async fn admin_resolve_incident<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Path(incident_id): Path<Uuid>,
) -> DispatchResult<Json<IncidentResponse>> {
    let use_case = IncidentsUseCase::new(state.repo.clone());
    let incident = use_case
        .set_status(IncidentId::from_uuid(incident_id), IncidentStatus::Resolved)
        .await?;

    Ok(Json(IncidentResponse::from(incident)))
}

// ============================================================================
// Messages
// ============================================================================

/// POST /api/messages
pub async fn send_message<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<MessageCreateRequest>,
) -> DispatchResult<(StatusCode, Json<MessageResponse>)> {
    let use_case = MessagesUseCase::new(state.repo.clone());
    let record = use_case
        .create(
            &principal,
            CreateMessageInput {
                kind: req.message_type,
                title: req.title,
                content: req.content,
                lat: req.lat,
                lng: req.lng,
                category: req.category,
                severity: req.severity,
                ability: req.ability,
                battery: req.battery,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(record))))
}

/// POST /api/messages/sos
pub async fn send_sos_message<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<SosMessageRequest>,
) -> DispatchResult<(StatusCode, Json<MessageResponse>)> {
    let use_case = MessagesUseCase::new(state.repo.clone());
    let record = use_case
        .create_sos(
            &principal,
            SosMessageInput {
                content: req.content,
                ability: req.ability,
                lat: req.lat,
                lng: req.lng,
                battery: req.battery,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(record))))
}

/// POST /api/messages/incident
pub async fn send_incident_message<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<IncidentMessageRequest>,
) -> DispatchResult<(StatusCode, Json<MessageResponse>)> {
    let use_case = MessagesUseCase::new(state.repo.clone());
    let record = use_case
        .create_incident(
            &principal,
            IncidentMessageInput {
                content: req.content,
                category: req.category,
                severity: req.severity,
                lat: req.lat,
                lng: req.lng,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(record))))
}

/// GET /api/messages
pub async fn get_my_messages<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<PaginationQuery>,
) -> DispatchResult<Json<MessageListResponse>> {
    let page = PageRequest::new(query.page, query.page_size)?;
    let use_case = MessagesUseCase::new(state.repo.clone());
    let result = use_case.list_for_user(&principal, page).await?;

    Ok(Json(MessageListResponse::from(result)))
}

/// GET /api/messages/{message_id}
pub async fn get_message<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(message_id): Path<Uuid>,
) -> DispatchResult<Json<MessageResponse>> {
    let use_case = MessagesUseCase::new(state.repo.clone());
    let record = use_case
        .get_owned(&principal, MessageId::from_uuid(message_id))
        .await?;

    Ok(Json(MessageResponse::from(record)))
}

/// POST /api/messages/{message_id}/read
pub async fn mark_message_read<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(message_id): Path<Uuid>,
) -> DispatchResult<Json<MessageResponse>> {
    let use_case = MessagesUseCase::new(state.repo.clone());
    let record = use_case
        .mark_read(&principal, MessageId::from_uuid(message_id))
        .await?;

    Ok(Json(MessageResponse::from(record)))
}

/// GET /api/messages/admin/all
pub async fn admin_all_messages<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Query(query): Query<AdminMessageQuery>,
) -> DispatchResult<Json<MessageListResponse>> {
    let page = PageRequest::new(query.page, query.page_size)?;
    let use_case = MessagesUseCase::new(state.repo.clone());
    let result = use_case
        .list_all(query.message_type.as_deref(), query.is_read, page)
        .await?;

    Ok(Json(MessageListResponse::from(result)))
}

/// GET /api/messages/admin/stats
pub async fn admin_message_stats<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
) -> DispatchResult<Json<MessageStatsResponse>> {
    let use_case = MessagesUseCase::new(state.repo.clone());
    let stats = use_case.stats().await?;

    Ok(Json(MessageStatsResponse::from(stats)))
}

/// GET /api/messages/admin/unread/count
pub async fn admin_unread_count<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
) -> DispatchResult<Json<UnreadCountResponse>> {
    let use_case = MessagesUseCase::new(state.repo.clone());
    let unread_count = use_case.unread_count().await?;

    Ok(Json(UnreadCountResponse { unread_count }))
}

/// POST /api/messages/admin/{message_id}/read
pub async fn admin_mark_message_read<R: DispatchRepository>(
    State(state): State<DispatchAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(message_id): Path<Uuid>,
) -> DispatchResult<Json<MessageResponse>> {
    // Same use case; the admin gate already ran in middleware
    let use_case = MessagesUseCase::new(state.repo.clone());
    let record = use_case
        .mark_read(&principal, MessageId::from_uuid(message_id))
        .await?;

    Ok(Json(MessageResponse::from(record)))
}
