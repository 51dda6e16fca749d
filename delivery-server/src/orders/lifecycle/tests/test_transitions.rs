use super::*;

#[tokio::test]
async fn rejected_transition_names_both_statuses() {
    let lc = test_lifecycle().await;
    let order_id = create_pending(&lc).await;
    let admin = Actor::admin(1);

    // PENDING -> PREPARING skips CONFIRMED
    let err = lc
        .transition_status(&admin, order_id, OrderStatus::Preparing)
        .await
        .unwrap_err();
    match err {
        LifecycleError::InvalidTransition { from, to } => {
            assert_eq!(from, OrderStatus::Pending);
            assert_eq!(to, OrderStatus::Preparing);
        }
        other => panic!("expected InvalidTransition, got {other}"),
    }

    // Status unchanged
    assert_eq!(current_status(&lc, order_id).await, OrderStatus::Pending);
}

#[tokio::test]
async fn full_forward_path_succeeds() {
    let lc = test_lifecycle().await;
    let order_id = create_pending(&lc).await;
    let admin = Actor::admin(1);

    for status in [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivering,
        OrderStatus::Delivered,
    ] {
        let detail = lc
            .transition_status(&admin, order_id, status)
            .await
            .expect("forward transition");
        assert_eq!(detail.status, status);
    }
}

#[tokio::test]
async fn terminal_statuses_reject_every_transition() {
    let lc = test_lifecycle().await;
    let admin = Actor::admin(1);

    for terminal in [OrderStatus::Delivered, OrderStatus::Cancelled] {
        let order_id = create_pending(&lc).await;
        if terminal == OrderStatus::Delivered {
            advance_to(&lc, order_id, OrderStatus::Delivered).await;
        } else {
            lc.cancel_order(&admin, order_id).await.expect("cancel");
        }

        for target in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Delivering,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            let err = lc
                .transition_status(&admin, order_id, target)
                .await
                .unwrap_err();
            assert!(
                matches!(err, LifecycleError::InvalidTransition { .. }),
                "{terminal} -> {target} must be InvalidTransition"
            );
            assert_eq!(current_status(&lc, order_id).await, terminal);
        }
    }
}

#[tokio::test]
async fn cancel_succeeds_from_every_non_terminal_status() {
    let lc = test_lifecycle().await;
    let admin = Actor::admin(1);

    for status in [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivering,
    ] {
        let order_id = create_pending(&lc).await;
        advance_to(&lc, order_id, status).await;

        let detail = lc.cancel_order(&admin, order_id).await.expect("cancel");
        assert_eq!(detail.status, OrderStatus::Cancelled);
    }
}

#[tokio::test]
async fn cancel_is_rejected_from_terminal_statuses() {
    let lc = test_lifecycle().await;
    let admin = Actor::admin(1);

    let delivered = create_pending(&lc).await;
    advance_to(&lc, delivered, OrderStatus::Delivered).await;
    let err = lc.cancel_order(&admin, delivered).await.unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidTransition { .. }));

    let cancelled = create_pending(&lc).await;
    lc.cancel_order(&admin, cancelled).await.expect("cancel");
    let err = lc.cancel_order(&admin, cancelled).await.unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidTransition { .. }));
}

#[tokio::test]
async fn customers_may_cancel_only_their_own_orders() {
    let lc = test_lifecycle().await;
    let order_id = create_pending(&lc).await;

    let err = lc
        .cancel_order(&Actor::customer(OTHER_CUSTOMER), order_id)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Forbidden(_)));

    let detail = lc
        .cancel_order(&Actor::customer(CUSTOMER), order_id)
        .await
        .expect("owner cancel");
    assert_eq!(detail.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn customers_cannot_drive_the_staff_path() {
    let lc = test_lifecycle().await;
    let order_id = create_pending(&lc).await;

    let err = lc
        .transition_status(&Actor::customer(CUSTOMER), order_id, OrderStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Forbidden(_)));
}

#[tokio::test]
async fn branch_managers_are_scoped_to_their_branch() {
    let lc = test_lifecycle().await;
    let order_id = create_pending(&lc).await;

    let outsider = Actor::branch_manager(2, OTHER_BRANCH);
    let err = lc
        .transition_status(&outsider, order_id, OrderStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Forbidden(_)));

    let insider = Actor::branch_manager(3, BRANCH);
    let detail = lc
        .transition_status(&insider, order_id, OrderStatus::Confirmed)
        .await
        .expect("same-branch manager");
    assert_eq!(detail.status, OrderStatus::Confirmed);
}

#[tokio::test]
async fn transition_on_missing_order_is_not_found() {
    let lc = test_lifecycle().await;
    let admin = Actor::admin(1);

    let err = lc
        .transition_status(&admin, 424242, OrderStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::NotFound { entity: "Order", id: 424242 }
    ));
}

#[tokio::test]
async fn concurrent_transitions_have_exactly_one_winner() {
    let lc = test_lifecycle().await;
    let order_id = create_pending(&lc).await;
    let admin = Actor::admin(1);

    let (a, b) = tokio::join!(
        lc.transition_status(&admin, order_id, OrderStatus::Confirmed),
        lc.transition_status(&admin, order_id, OrderStatus::Confirmed),
    );

    let outcomes = [a, b];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "exactly one racer may apply the transition");
    let loser = outcomes.iter().find(|r| r.is_err()).unwrap();
    assert!(matches!(
        loser.as_ref().unwrap_err(),
        LifecycleError::InvalidTransition { .. }
    ));
    assert_eq!(current_status(&lc, order_id).await, OrderStatus::Confirmed);
}

#[tokio::test]
async fn get_order_returns_none_for_unknown_id() {
    let lc = test_lifecycle().await;
    let found = lc.get_order(&Actor::admin(1), 555).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn customers_cannot_view_other_orders() {
    let lc = test_lifecycle().await;
    let order_id = create_pending(&lc).await;

    let err = lc
        .get_order(&Actor::customer(OTHER_CUSTOMER), order_id)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Forbidden(_)));
}

#[tokio::test]
async fn listing_filters_and_scopes() {
    let lc = test_lifecycle().await;
    let admin = Actor::admin(1);

    let first = create_pending(&lc).await;
    let second = create_pending(&lc).await;
    lc.transition_status(&admin, second, OrderStatus::Confirmed)
        .await
        .unwrap();

    // Status filter
    let pending = lc
        .list_orders(
            &admin,
            OrderFilter {
                status: Some(OrderStatus::Pending),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, first);

    // Zero matches is success, not NotFound
    let delivered = lc
        .list_orders(
            &admin,
            OrderFilter {
                status: Some(OrderStatus::Delivered),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(delivered.is_empty());

    // Customers see only their own orders
    let other = lc
        .list_orders(&Actor::customer(OTHER_CUSTOMER), OrderFilter::default())
        .await
        .unwrap();
    assert!(other.is_empty());
    let own = lc
        .list_orders(&Actor::customer(CUSTOMER), OrderFilter::default())
        .await
        .unwrap();
    assert_eq!(own.len(), 2);
}
