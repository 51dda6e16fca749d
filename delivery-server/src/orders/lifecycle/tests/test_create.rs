use super::*;

#[tokio::test]
async fn create_order_computes_total_from_branch_prices() {
    let lc = test_lifecycle().await;

    // 2 × 5.00 + 1 × 3.00 (branch override) = 13.00
    let detail = lc
        .create_order(&Actor::customer(CUSTOMER), burger_and_fries())
        .await
        .expect("create order");

    assert_eq!(detail.status, OrderStatus::Pending);
    assert_eq!(detail.total_amount, 13.00);
    assert_eq!(detail.items.len(), 2);
    assert_eq!(detail.customer_id, CUSTOMER);
    assert_eq!(detail.customer_name, "Ana Torres");
    assert_eq!(detail.branch_name, "Centro");
    assert!(detail.rider.is_none());

    let burger = detail
        .items
        .iter()
        .find(|i| i.menu_item_id == ITEM_BURGER)
        .unwrap();
    assert_eq!(burger.price_at_time, 5.00);
    assert_eq!(burger.quantity, 2);
    assert_eq!(burger.line_total, 10.00);

    let fries = detail
        .items
        .iter()
        .find(|i| i.menu_item_id == ITEM_FRIES)
        .unwrap();
    assert_eq!(fries.price_at_time, 3.00);
    assert_eq!(fries.line_total, 3.00);
}

#[tokio::test]
async fn client_supplied_prices_never_affect_the_total() {
    let lc = test_lifecycle().await;

    let mut req = burger_and_fries();
    for item in &mut req.items {
        item.price = Some(0.01);
    }

    let detail = lc
        .create_order(&Actor::customer(CUSTOMER), req)
        .await
        .expect("create order");
    assert_eq!(detail.total_amount, 13.00);
}

#[tokio::test]
async fn snapshot_price_survives_catalog_changes() {
    let lc = test_lifecycle().await;
    let order_id = create_pending(&lc).await;

    // Reprice the menu after the fact
    sqlx::query("UPDATE menu_item SET base_price = 99.0 WHERE id = ?")
        .bind(ITEM_BURGER)
        .execute(lc.pool())
        .await
        .unwrap();
    sqlx::query("UPDATE branch_menu_item SET price_override = 99.0")
        .execute(lc.pool())
        .await
        .unwrap();

    let admin = Actor::admin(1);
    let detail = lc.get_order(&admin, order_id).await.unwrap().unwrap();
    assert_eq!(detail.total_amount, 13.00);
    assert!(detail.items.iter().all(|i| i.price_at_time < 99.0));
}

#[tokio::test]
async fn unavailable_item_rolls_back_the_whole_order() {
    let lc = test_lifecycle().await;

    let req = CreateOrderRequest {
        branch_id: BRANCH,
        items: vec![line(ITEM_BURGER, 1), line(ITEM_SOLD_OUT, 1)],
        delivery_address: address(),
        customer_id: None,
    };

    let err = lc
        .create_order(&Actor::customer(CUSTOMER), req)
        .await
        .unwrap_err();
    match err {
        LifecycleError::ItemUnavailable { menu_item_id, .. } => {
            assert_eq!(menu_item_id, ITEM_SOLD_OUT);
        }
        other => panic!("expected ItemUnavailable, got {other}"),
    }

    // No partial writes: zero order and line-item rows persisted
    assert_eq!(table_count(&lc, "orders").await, 0);
    assert_eq!(table_count(&lc, "order_item").await, 0);
}

#[tokio::test]
async fn item_without_branch_mapping_is_unavailable() {
    let lc = test_lifecycle().await;

    let req = CreateOrderRequest {
        branch_id: BRANCH,
        items: vec![line(ITEM_OFF_MENU, 1)],
        delivery_address: address(),
        customer_id: None,
    };

    let err = lc
        .create_order(&Actor::customer(CUSTOMER), req)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::ItemUnavailable { menu_item_id, .. } if menu_item_id == ITEM_OFF_MENU
    ));
}

#[tokio::test]
async fn empty_item_list_fails_fast() {
    let lc = test_lifecycle().await;

    let req = CreateOrderRequest {
        branch_id: BRANCH,
        items: vec![],
        delivery_address: address(),
        customer_id: None,
    };

    let err = lc
        .create_order(&Actor::customer(CUSTOMER), req)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Validation(_)));
    assert_eq!(table_count(&lc, "orders").await, 0);
}

#[tokio::test]
async fn non_positive_quantity_is_rejected() {
    let lc = test_lifecycle().await;

    for quantity in [0, -3] {
        let req = CreateOrderRequest {
            branch_id: BRANCH,
            items: vec![line(ITEM_BURGER, quantity)],
            delivery_address: address(),
            customer_id: None,
        };
        let err = lc
            .create_order(&Actor::customer(CUSTOMER), req)
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::Validation(_)));
    }
}

#[tokio::test]
async fn unknown_branch_is_not_found() {
    let lc = test_lifecycle().await;

    let req = CreateOrderRequest {
        branch_id: 9999,
        items: vec![line(ITEM_BURGER, 1)],
        delivery_address: address(),
        customer_id: None,
    };

    let err = lc
        .create_order(&Actor::customer(CUSTOMER), req)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::NotFound { entity: "Branch", id: 9999 }
    ));
}

#[tokio::test]
async fn inactive_branch_rejects_orders() {
    let lc = test_lifecycle().await;
    sqlx::query("UPDATE branch SET is_active = 0 WHERE id = ?")
        .bind(BRANCH)
        .execute(lc.pool())
        .await
        .unwrap();

    let err = lc
        .create_order(&Actor::customer(CUSTOMER), burger_and_fries())
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidState(_)));
}

#[tokio::test]
async fn staff_creation_requires_customer_id() {
    let lc = test_lifecycle().await;
    let admin = Actor::admin(1);

    let err = lc
        .create_order(&admin, burger_and_fries())
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Validation(_)));

    let mut req = burger_and_fries();
    req.customer_id = Some(CUSTOMER);
    let detail = lc.create_order(&admin, req).await.expect("staff create");
    assert_eq!(detail.customer_id, CUSTOMER);
}

#[tokio::test]
async fn customer_cannot_order_as_someone_else() {
    let lc = test_lifecycle().await;

    let mut req = burger_and_fries();
    req.customer_id = Some(OTHER_CUSTOMER);
    let err = lc
        .create_order(&Actor::customer(CUSTOMER), req)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Forbidden(_)));
}

#[tokio::test]
async fn rider_cannot_create_orders() {
    let lc = test_lifecycle().await;

    let err = lc
        .create_order(&Actor::rider(7, RIDER_FREE), burger_and_fries())
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Forbidden(_)));
}
