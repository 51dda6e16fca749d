//! OrderLifecycle - the order state core
//!
//! Validates and applies every order mutation: creation with price
//! snapshotting, state-machine-gated status transitions, cancellation,
//! rider assignment, rider-reported progress, delivery completion and
//! rating.
//!
//! # Operation Flow
//!
//! ```text
//! operation(actor, ...)
//!     ├─ 1. Validate input / authorization
//!     ├─ 2. Begin transaction
//!     ├─ 3. Re-read current rows
//!     ├─ 4. Check transition table / preconditions
//!     ├─ 5. Guarded writes (WHERE status = expected)
//!     ├─ 6. Commit (rollback on any error)
//!     └─ 7. Return the order aggregate
//! ```
//!
//! The transaction plus the conditional `WHERE status = ?` guard make
//! the edge check atomic with the write: of two racing transitions one
//! sees zero affected rows and fails with `InvalidTransition`, never a
//! silent overwrite.

#[cfg(test)]
mod tests;

use sqlx::SqlitePool;

use shared::models::{CreateOrderRequest, OrderDetail, OrderFilter, RiderLocation, RiderStatus};
use shared::order::{AssignmentStatus, OrderStatus};
use shared::util::{now_millis, snowflake_id};

use super::aggregate;
use super::error::{LifecycleError, LifecycleResult};
use crate::auth::{Actor, Role};
use crate::db::repository::{SqliteTx, assignment, branch, customer, order, rider};
use crate::pricing;

/// Order lifecycle manager.
///
/// The persistence gateway is an explicit constructor dependency so the
/// core runs against any pool, including the in-memory one in tests.
#[derive(Clone, Debug)]
pub struct OrderLifecycle {
    pool: SqlitePool,
}

impl OrderLifecycle {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Create an order in status PENDING with computed total and
    /// snapshotted line prices — or fail atomically with no partial writes.
    pub async fn create_order(
        &self,
        actor: &Actor,
        req: CreateOrderRequest,
    ) -> LifecycleResult<OrderDetail> {
        if req.items.is_empty() {
            return Err(LifecycleError::Validation(
                "Order must contain at least one item".into(),
            ));
        }
        for item in &req.items {
            if item.quantity <= 0 {
                return Err(LifecycleError::Validation(format!(
                    "Quantity for menu item {} must be a positive integer",
                    item.menu_item_id
                )));
            }
        }

        let customer_id = self.resolve_customer(actor, &req)?;

        let mut tx = self.pool.begin().await?;

        let branch = branch::find_by_id_tx(&mut tx, req.branch_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                entity: "Branch",
                id: req.branch_id,
            })?;
        if !branch.is_active {
            return Err(LifecycleError::InvalidState(format!(
                "Branch {} is not accepting orders",
                branch.id
            )));
        }

        customer::find_by_id_tx(&mut tx, customer_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                entity: "Customer",
                id: customer_id,
            })?;

        // Resolve every line against the branch menu before writing
        // anything: one unavailable item aborts the whole order.
        // Client-supplied prices are never consulted.
        let mut lines = Vec::with_capacity(req.items.len());
        for item in &req.items {
            let unit_price =
                pricing::resolve_price_tx(&mut tx, req.branch_id, item.menu_item_id).await?;
            let unit_price = unit_price.ok_or(LifecycleError::ItemUnavailable {
                branch_id: req.branch_id,
                menu_item_id: item.menu_item_id,
            })?;
            lines.push((item, unit_price));
        }

        let total_amount = pricing::order_total(
            lines
                .iter()
                .map(|(item, unit_price)| (*unit_price, item.quantity)),
        );

        let now = now_millis();
        let order_id = snowflake_id();
        order::insert_tx(
            &mut tx,
            order_id,
            customer_id,
            req.branch_id,
            OrderStatus::Pending,
            total_amount,
            &req.delivery_address,
            now,
        )
        .await?;

        for (item, unit_price) in &lines {
            order::insert_item_tx(
                &mut tx,
                snowflake_id(),
                order_id,
                item.menu_item_id,
                item.quantity,
                *unit_price,
                item.special_instructions.as_deref(),
            )
            .await?;
        }

        tx.commit().await?;
        tracing::info!(order_id, total_amount, branch_id = req.branch_id, "Order created");

        self.require_aggregate(order_id).await
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Full aggregate, with the customer-ownership re-check
    pub async fn get_order(
        &self,
        actor: &Actor,
        order_id: i64,
    ) -> LifecycleResult<Option<OrderDetail>> {
        let Some(detail) = aggregate::build(&self.pool, order_id).await? else {
            return Ok(None);
        };
        if actor.role == Role::Customer && detail.customer_id != actor.user_id {
            return Err(LifecycleError::Forbidden(
                "Customers may only view their own orders".into(),
            ));
        }
        Ok(Some(detail))
    }

    /// List aggregates matching the filter, scoped to what the actor may
    /// see. Zero matches is an empty list, not an error.
    pub async fn list_orders(
        &self,
        actor: &Actor,
        mut filter: OrderFilter,
    ) -> LifecycleResult<Vec<OrderDetail>> {
        match actor.role {
            Role::Customer => filter.customer_id = Some(actor.user_id),
            Role::BranchManager => filter.branch_id = actor.branch_id,
            _ => {}
        }

        let ids = order::list_ids(&self.pool, &filter).await?;
        let mut details = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(detail) = aggregate::build(&self.pool, id).await? {
                details.push(detail);
            }
        }
        Ok(details)
    }

    // ========================================================================
    // Status transitions
    // ========================================================================

    /// Move an order along the transition table (staff path).
    ///
    /// A CANCELLED target routes through [`Self::cancel_order`] so the
    /// assignment/rider cleanup cannot be bypassed.
    pub async fn transition_status(
        &self,
        actor: &Actor,
        order_id: i64,
        target: OrderStatus,
    ) -> LifecycleResult<OrderDetail> {
        if target == OrderStatus::Cancelled {
            return self.cancel_order(actor, order_id).await;
        }

        if !actor.is_staff() {
            return Err(LifecycleError::Forbidden(
                "Only staff may update order status".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let current = order::find_by_id_tx(&mut tx, order_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                entity: "Order",
                id: order_id,
            })?;

        if !actor.can_manage_branch(current.branch_id) {
            return Err(LifecycleError::Forbidden(
                "Order belongs to a different branch".into(),
            ));
        }

        self.apply_transition(&mut tx, order_id, current.status, target)
            .await?;

        // Staff driving the coarse status drags the delivery sub-state
        // and the rider along, so the shared-state pair never splits.
        let now = now_millis();
        match target {
            OrderStatus::Delivering => {
                if let Some(active) = assignment::active_for_order_tx(&mut tx, order_id).await? {
                    let _ = assignment::mark_picked_tx(&mut tx, active.id, now).await?;
                }
            }
            OrderStatus::Delivered => {
                if let Some(active) = assignment::active_for_order_tx(&mut tx, order_id).await? {
                    assignment::complete_active_tx(&mut tx, active.id, now).await?;
                    rider::set_status_tx(&mut tx, active.rider_id, RiderStatus::Active, now)
                        .await?;
                }
            }
            _ => {}
        }

        tx.commit().await?;
        tracing::info!(order_id, from = %current.status, to = %target, "Order status updated");

        self.require_aggregate(order_id).await
    }

    /// Cancel from any non-terminal status. An active assignment is
    /// cancelled and its rider freed in the same transaction.
    pub async fn cancel_order(&self, actor: &Actor, order_id: i64) -> LifecycleResult<OrderDetail> {
        let mut tx = self.pool.begin().await?;

        let current = order::find_by_id_tx(&mut tx, order_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                entity: "Order",
                id: order_id,
            })?;

        match actor.role {
            Role::Customer => {
                if current.customer_id != actor.user_id {
                    return Err(LifecycleError::Forbidden(
                        "Customers may only cancel their own orders".into(),
                    ));
                }
            }
            Role::Rider => {
                return Err(LifecycleError::Forbidden(
                    "Riders may not cancel orders".into(),
                ));
            }
            _ => {
                if !actor.can_manage_branch(current.branch_id) {
                    return Err(LifecycleError::Forbidden(
                        "Order belongs to a different branch".into(),
                    ));
                }
            }
        }

        self.apply_transition(&mut tx, order_id, current.status, OrderStatus::Cancelled)
            .await?;

        if let Some(active) = assignment::active_for_order_tx(&mut tx, order_id).await? {
            assignment::cancel_tx(&mut tx, active.id).await?;
            rider::set_status_tx(&mut tx, active.rider_id, RiderStatus::Active, now_millis())
                .await?;
        }

        tx.commit().await?;
        tracing::info!(order_id, from = %current.status, "Order cancelled");

        self.require_aggregate(order_id).await
    }

    // ========================================================================
    // Rider assignment and progress
    // ========================================================================

    /// Attach a rider to a READY order: assignment row plus rider BUSY,
    /// both visible together or neither.
    pub async fn assign_rider(
        &self,
        actor: &Actor,
        order_id: i64,
        rider_id: i64,
    ) -> LifecycleResult<OrderDetail> {
        if !actor.is_staff() {
            return Err(LifecycleError::Forbidden(
                "Only staff may assign riders".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let current = order::find_by_id_tx(&mut tx, order_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                entity: "Order",
                id: order_id,
            })?;

        if !actor.can_manage_branch(current.branch_id) {
            return Err(LifecycleError::Forbidden(
                "Order belongs to a different branch".into(),
            ));
        }

        if current.status != OrderStatus::Ready {
            return Err(LifecycleError::InvalidState(format!(
                "Order {} is not ready for dispatch (status {})",
                order_id, current.status
            )));
        }

        if assignment::active_for_order_tx(&mut tx, order_id)
            .await?
            .is_some()
        {
            return Err(LifecycleError::InvalidState(format!(
                "Order {order_id} already has an active assignment"
            )));
        }

        let rider_row = rider::find_by_id_tx(&mut tx, rider_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                entity: "Rider",
                id: rider_id,
            })?;

        if rider_row.branch_id != current.branch_id {
            return Err(LifecycleError::InvalidState(format!(
                "Rider {} belongs to a different branch",
                rider_id
            )));
        }
        match rider_row.status {
            RiderStatus::Busy => {
                return Err(LifecycleError::InvalidState(format!(
                    "Rider {rider_id} is already on a delivery"
                )));
            }
            RiderStatus::Inactive => {
                return Err(LifecycleError::InvalidState(format!(
                    "Rider {rider_id} is not on shift"
                )));
            }
            RiderStatus::Active => {}
        }

        let now = now_millis();

        // Guarded ACTIVE -> BUSY: two dispatchers racing for the same
        // rider cannot both win.
        let affected =
            rider::update_status_guarded(&mut tx, rider_id, RiderStatus::Active, RiderStatus::Busy, now)
                .await?;
        if affected == 0 {
            return Err(LifecycleError::InvalidState(format!(
                "Rider {rider_id} is already on a delivery"
            )));
        }

        assignment::insert_tx(&mut tx, snowflake_id(), order_id, rider_id, now).await?;

        tx.commit().await?;
        tracing::info!(order_id, rider_id, "Rider assigned");

        self.require_aggregate(order_id).await
    }

    /// Rider-reported progress on the same order resource, restricted to
    /// the narrow rider vocabulary: DELIVERING (pickup) and DELIVERED.
    /// Both targets validate against the same transition table as the
    /// staff path.
    pub async fn rider_report_status(
        &self,
        actor: &Actor,
        order_id: i64,
        target: OrderStatus,
    ) -> LifecycleResult<OrderDetail> {
        if actor.role != Role::Rider {
            return Err(LifecycleError::Forbidden(
                "Only riders may report delivery progress".into(),
            ));
        }
        let rider_id = actor.rider_id.ok_or_else(|| {
            LifecycleError::Forbidden("Rider identity missing from request context".into())
        })?;

        if !target.rider_reportable() {
            return Err(LifecycleError::Validation(format!(
                "Riders may only report DELIVERING or DELIVERED, got {target}"
            )));
        }

        let mut tx = self.pool.begin().await?;

        let current = order::find_by_id_tx(&mut tx, order_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                entity: "Order",
                id: order_id,
            })?;

        let active = assignment::active_for_order_tx(&mut tx, order_id)
            .await?
            .ok_or_else(|| {
                LifecycleError::InvalidState(format!(
                    "Order {order_id} has no active delivery assignment"
                ))
            })?;

        if active.rider_id != rider_id {
            return Err(LifecycleError::Forbidden(
                "Order is assigned to a different rider".into(),
            ));
        }

        let now = now_millis();
        match target {
            OrderStatus::Delivering => {
                self.apply_transition(&mut tx, order_id, current.status, OrderStatus::Delivering)
                    .await?;
                let affected = assignment::mark_picked_tx(&mut tx, active.id, now).await?;
                if affected == 0 {
                    return Err(LifecycleError::InvalidState(format!(
                        "Pickup already reported for order {order_id}"
                    )));
                }
            }
            OrderStatus::Delivered => {
                self.complete_in_tx(&mut tx, order_id, current.status, &active, now)
                    .await?;
            }
            _ => unreachable!("rider_reportable() admits only DELIVERING and DELIVERED"),
        }

        tx.commit().await?;
        tracing::info!(order_id, rider_id, status = %target, "Rider reported status");

        self.require_aggregate(order_id).await
    }

    /// Mark the delivery complete: assignment DELIVERED, order DELIVERED,
    /// rider back to ACTIVE — three writes, one transaction.
    pub async fn complete_delivery(&self, order_id: i64) -> LifecycleResult<()> {
        let mut tx = self.pool.begin().await?;

        let current = order::find_by_id_tx(&mut tx, order_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                entity: "Order",
                id: order_id,
            })?;

        let active = assignment::active_for_order_tx(&mut tx, order_id)
            .await?
            .ok_or_else(|| {
                LifecycleError::InvalidState(format!(
                    "Order {order_id} has no active delivery assignment"
                ))
            })?;

        self.complete_in_tx(&mut tx, order_id, current.status, &active, now_millis())
            .await?;

        tx.commit().await?;
        tracing::info!(order_id, rider_id = active.rider_id, "Delivery completed");
        Ok(())
    }

    /// Attach a 1-5 rating to the completed assignment. Touches no order
    /// or rider status.
    pub async fn submit_rating(
        &self,
        order_id: i64,
        rating: i64,
        feedback: Option<String>,
    ) -> LifecycleResult<()> {
        if !(1..=5).contains(&rating) {
            return Err(LifecycleError::Validation(format!(
                "Rating must be between 1 and 5, got {rating}"
            )));
        }

        order::find_by_id(&self.pool, order_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                entity: "Order",
                id: order_id,
            })?;

        let completed = assignment::completed_for_order(&self.pool, order_id)
            .await?
            .ok_or_else(|| {
                LifecycleError::InvalidState(format!("Order {order_id} has not been delivered"))
            })?;

        assignment::insert_rating(
            &self.pool,
            snowflake_id(),
            completed.id,
            rating,
            feedback.as_deref(),
            now_millis(),
        )
        .await
        .map_err(|e| match e {
            crate::db::repository::RepoError::Duplicate(_) => LifecycleError::InvalidState(
                format!("Order {order_id} already has a delivery rating"),
            ),
            other => other.into(),
        })?;

        tracing::info!(order_id, rating, "Delivery rating submitted");
        Ok(())
    }

    // ========================================================================
    // Rider location
    // ========================================================================

    /// Upsert the rider's position with a server-side timestamp
    pub async fn record_rider_location(
        &self,
        rider_id: i64,
        latitude: f64,
        longitude: f64,
    ) -> LifecycleResult<()> {
        crate::riders::record_location(&self.pool, rider_id, latitude, longitude).await
    }

    /// Last-known position of a rider; `None` if never recorded
    pub async fn rider_location(&self, rider_id: i64) -> LifecycleResult<Option<RiderLocation>> {
        crate::riders::location_of(&self.pool, rider_id).await
    }

    /// Last-known position of the rider on the order's active
    /// assignment; `None` when unassigned or never recorded
    pub async fn order_rider_location(
        &self,
        order_id: i64,
    ) -> LifecycleResult<Option<RiderLocation>> {
        crate::riders::location_for_order(&self.pool, order_id).await
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn resolve_customer(&self, actor: &Actor, req: &CreateOrderRequest) -> LifecycleResult<i64> {
        match actor.role {
            Role::Customer => {
                if let Some(requested) = req.customer_id
                    && requested != actor.user_id
                {
                    return Err(LifecycleError::Forbidden(
                        "Customers may only order as themselves".into(),
                    ));
                }
                Ok(actor.user_id)
            }
            Role::Rider => Err(LifecycleError::Forbidden(
                "Riders may not create orders".into(),
            )),
            _ => req.customer_id.ok_or_else(|| {
                LifecycleError::Validation(
                    "customer_id is required for staff-created orders".into(),
                )
            }),
        }
    }

    /// Table-checked, guarded single-row status write. The caller has
    /// read `expected` in this transaction; zero affected rows means a
    /// concurrent writer got there first (or the row vanished) and the
    /// re-read decides which error to surface.
    async fn apply_transition(
        &self,
        tx: &mut SqliteTx<'_>,
        order_id: i64,
        expected: OrderStatus,
        target: OrderStatus,
    ) -> LifecycleResult<()> {
        if !expected.can_transition_to(target) {
            return Err(LifecycleError::InvalidTransition {
                from: expected,
                to: target,
            });
        }

        let affected =
            order::update_status_guarded(tx, order_id, expected, target, now_millis()).await?;
        if affected == 0 {
            return match order::find_by_id_tx(tx, order_id).await? {
                None => Err(LifecycleError::NotFound {
                    entity: "Order",
                    id: order_id,
                }),
                Some(now_current) => Err(LifecycleError::InvalidTransition {
                    from: now_current.status,
                    to: target,
                }),
            };
        }
        Ok(())
    }

    /// The completion cascade, shared by `complete_delivery` and the
    /// rider's DELIVERED report. Order of writes: order row, assignment
    /// row, rider row — all or nothing.
    async fn complete_in_tx(
        &self,
        tx: &mut SqliteTx<'_>,
        order_id: i64,
        current_status: OrderStatus,
        active: &shared::models::OrderAssignment,
        now: i64,
    ) -> LifecycleResult<()> {
        self.apply_transition(tx, order_id, current_status, OrderStatus::Delivered)
            .await?;

        if active.status != AssignmentStatus::InProgress {
            return Err(LifecycleError::InvalidState(format!(
                "Delivery for order {order_id} has not been picked up"
            )));
        }
        let affected = assignment::mark_delivered_tx(tx, active.id, now).await?;
        if affected == 0 {
            return Err(LifecycleError::InvalidState(format!(
                "Delivery for order {order_id} is no longer in progress"
            )));
        }

        rider::set_status_tx(tx, active.rider_id, RiderStatus::Active, now).await?;
        Ok(())
    }

    async fn require_aggregate(&self, order_id: i64) -> LifecycleResult<OrderDetail> {
        aggregate::build(&self.pool, order_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                entity: "Order",
                id: order_id,
            })
    }
}
