//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::{Actor, Role};
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok};
use shared::models::{CreateOrderRequest, OrderDetail, OrderFilter, RiderLocation};
use shared::order::OrderStatus;

/// Create order
pub async fn create(
    State(state): State<ServerState>,
    actor: Actor,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state.lifecycle.create_order(&actor, payload).await?;
    Ok(Json(detail))
}

/// List orders matching the filter (empty result is success)
pub async fn list(
    State(state): State<ServerState>,
    actor: Actor,
    Query(filter): Query<OrderFilter>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    let details = state.lifecycle.list_orders(&actor, filter).await?;
    Ok(Json(details))
}

/// Get order aggregate by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state
        .lifecycle
        .get_order(&actor, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {id} not found")))?;
    Ok(Json(detail))
}

/// Status update request (staff path)
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Move an order along the transition table
pub async fn update_status(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state
        .lifecycle
        .transition_status(&actor, id, payload.status)
        .await?;
    Ok(Json(detail))
}

/// Cancel an order (owner or staff)
pub async fn cancel(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state.lifecycle.cancel_order(&actor, id).await?;
    Ok(Json(detail))
}

/// Rider assignment request
#[derive(Debug, Deserialize)]
pub struct AssignRiderRequest {
    pub rider_id: i64,
}

/// Attach a rider to a READY order
pub async fn assign_rider(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(payload): Json<AssignRiderRequest>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state
        .lifecycle
        .assign_rider(&actor, id, payload.rider_id)
        .await?;
    Ok(Json(detail))
}

/// Rider progress report request
#[derive(Debug, Deserialize)]
pub struct RiderStatusRequest {
    pub status: OrderStatus,
}

/// Rider-reported progress (DELIVERING / DELIVERED)
pub async fn rider_status(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(payload): Json<RiderStatusRequest>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state
        .lifecycle
        .rider_report_status(&actor, id, payload.status)
        .await?;
    Ok(Json(detail))
}

/// Mark the delivery complete (staff)
pub async fn complete(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    if !actor.is_staff() {
        return Err(AppError::Forbidden(
            "Only staff may complete deliveries".into(),
        ));
    }
    state.lifecycle.complete_delivery(id).await?;
    Ok(ok(()))
}

/// Rating submission request
#[derive(Debug, Deserialize, Validate)]
pub struct RatingRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: i64,
    #[validate(length(max = 2000))]
    pub feedback: Option<String>,
}

/// Attach a rating to the completed delivery
pub async fn submit_rating(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(payload): Json<RatingRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // Customers rate only their own orders; get_order enforces ownership
    match actor.role {
        Role::Customer => {
            state.lifecycle.get_order(&actor, id).await?;
        }
        Role::Rider => {
            return Err(AppError::Forbidden(
                "Riders may not rate their own deliveries".into(),
            ));
        }
        _ => {}
    }

    state
        .lifecycle
        .submit_rating(id, payload.rating, payload.feedback)
        .await?;
    Ok(ok(()))
}

/// Last-known rider position for this order's delivery
pub async fn rider_location(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> AppResult<Json<Option<RiderLocation>>> {
    // Ownership re-check for customers
    if actor.role == Role::Customer {
        state.lifecycle.get_order(&actor, id).await?;
    }
    let location = state.lifecycle.order_rider_location(id).await?;
    Ok(Json(location))
}
