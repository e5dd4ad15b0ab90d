mod common;

use axum::http::{Method, StatusCode};
use foodiq_api::{
    dto::{
        menu::CreateMenuItemRequest,
        orders::{CreateOrderRequest, OrderLineRequest},
    },
    entity::{OrderItems, Orders},
    error::AppError,
    models::{MealPeriod, PaymentMode, Role},
    services::{menu_service, order_service},
};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

// register -> login -> add menu item -> order it twice over -> reprice -> order history keeps the sale price.
#[tokio::test]
async fn order_total_uses_price_at_time_of_sale() {
    let state = common::setup_state().await;
    let app = common::app(&state);
    common::register_http(&app, "a@x.com", "canteen").await;

    let (status, login) = common::send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "a@x.com", "password": common::PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = login["token"].as_str().unwrap().to_string();

    let (status, created) = common::send(
        &app,
        Method::POST,
        "/api/menu",
        Some(&token),
        Some(json!({ "name": "Tea", "price": 10, "category": "breakfast" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let tea_id = created["id"].as_i64().unwrap();

    let (status, order) = common::send(
        &app,
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(json!({
            "items": [{ "menu_item_id": tea_id, "quantity": 2 }],
            "payment_mode": "upi",
            "is_complimentary": false,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{order}");
    assert!(order["orderId"].as_i64().is_some());
    assert!(order["order_number"].as_str().unwrap().starts_with("ORD-"));

    let (status, _) = common::send(
        &app,
        Method::PATCH,
        &format!("/api/menu/{tea_id}"),
        Some(&token),
        Some(json!({ "price": 15 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, orders) = common::send(&app, Method::GET, "/api/orders", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["total_amount"].as_f64(), Some(20.0));
    assert_eq!(orders[0]["payment_mode"], "upi");
    assert_eq!(orders[0]["items"][0]["quantity"], 2);
    assert_eq!(orders[0]["items"][0]["unit_price"].as_f64(), Some(10.0));

    let (_, menu) = common::send(&app, Method::GET, "/api/menu?category=breakfast", None, None).await;
    assert_eq!(menu[0]["price"].as_f64(), Some(15.0));
}

#[tokio::test]
async fn unknown_menu_item_rejects_order_before_writing() -> anyhow::Result<()> {
    let state = common::setup_state().await;
    let operator = common::register(&state, "b@x.com", Role::Operator).await;

    let item = menu_service::create_menu_item(
        &state,
        &operator,
        CreateMenuItemRequest {
            name: "Idli Sambar".into(),
            price: 40.0,
            category: MealPeriod::Breakfast,
        },
    )
    .await?;

    let err = order_service::create_order(
        &state,
        &operator,
        CreateOrderRequest {
            items: vec![
                OrderLineRequest {
                    menu_item_id: item.id,
                    quantity: 1,
                },
                OrderLineRequest {
                    menu_item_id: 9_999,
                    quantity: 1,
                },
            ],
            ..Default::default()
        },
    )
    .await
    .expect_err("unknown menu item");
    assert!(matches!(err, AppError::Validation(_)));

    assert_eq!(Orders::find().count(&state.orm).await?, 0);
    assert_eq!(OrderItems::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn failed_line_insert_rolls_back_order_row() -> anyhow::Result<()> {
    let state = common::setup_state().await;
    let operator = common::register(&state, "k@x.com", Role::Operator).await;

    let item = menu_service::create_menu_item(
        &state,
        &operator,
        CreateMenuItemRequest {
            name: "Masala Dosa".into(),
            price: 50.0,
            category: MealPeriod::Breakfast,
        },
    )
    .await?;

    // The order row goes in first; every line insert then aborts.
    sqlx::query(
        r#"
        CREATE TRIGGER reject_order_lines BEFORE INSERT ON order_items
        BEGIN
            SELECT RAISE(ABORT, 'line rejected');
        END
        "#,
    )
    .execute(&state.pool)
    .await?;

    let err = order_service::create_order(
        &state,
        &operator,
        CreateOrderRequest {
            items: vec![OrderLineRequest {
                menu_item_id: item.id,
                quantity: 2,
            }],
            ..Default::default()
        },
    )
    .await
    .expect_err("line insert aborts");
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(Orders::find().count(&state.orm).await?, 0);
    assert_eq!(OrderItems::find().count(&state.orm).await?, 0);

    sqlx::query("DROP TRIGGER reject_order_lines")
        .execute(&state.pool)
        .await?;
    let created = order_service::create_order(
        &state,
        &operator,
        CreateOrderRequest {
            items: vec![OrderLineRequest {
                menu_item_id: item.id,
                quantity: 2,
            }],
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(created.total_amount, 100.0);
    assert_eq!(Orders::find().count(&state.orm).await?, 1);
    Ok(())
}

#[tokio::test]
async fn orders_are_scoped_to_their_operator() -> anyhow::Result<()> {
    let state = common::setup_state().await;
    let first = common::register(&state, "c@x.com", Role::Operator).await;
    let second = common::register(&state, "d@x.com", Role::Operator).await;

    let item = menu_service::create_menu_item(
        &state,
        &first,
        CreateMenuItemRequest {
            name: "Veg Thali".into(),
            price: 100.0,
            category: MealPeriod::Lunch,
        },
    )
    .await?;

    // Another operator's item is not sellable.
    let err = order_service::create_order(
        &state,
        &second,
        CreateOrderRequest {
            items: vec![OrderLineRequest {
                menu_item_id: item.id,
                quantity: 1,
            }],
            ..Default::default()
        },
    )
    .await
    .expect_err("foreign menu item");
    assert!(matches!(err, AppError::Validation(_)));

    let created = order_service::create_order(
        &state,
        &first,
        CreateOrderRequest {
            items: vec![OrderLineRequest {
                menu_item_id: item.id,
                quantity: 3,
            }],
            payment_mode: PaymentMode::Card,
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(created.total_amount, 300.0);

    assert_eq!(order_service::list_orders(&state, &first).await?.len(), 1);
    assert!(order_service::list_orders(&state, &second).await?.is_empty());

    let err = order_service::get_order(&state, &second, created.order_id)
        .await
        .expect_err("not visible to other operators");
    assert!(matches!(err, AppError::NotFound));

    let own = order_service::get_order(&state, &first, created.order_id).await?;
    assert_eq!(own.items.len(), 1);
    assert_eq!(own.payment_mode, PaymentMode::Card);
    Ok(())
}

#[tokio::test]
async fn order_without_items_needs_a_total() -> anyhow::Result<()> {
    let state = common::setup_state().await;
    let operator = common::register(&state, "e@x.com", Role::Operator).await;

    let err = order_service::create_order(&state, &operator, CreateOrderRequest::default())
        .await
        .expect_err("no total");
    assert!(matches!(err, AppError::Validation(_)));

    let quick = order_service::create_order(
        &state,
        &operator,
        CreateOrderRequest {
            total_amount: Some(55.0),
            is_complimentary: true,
            ..Default::default()
        },
    )
    .await?;
    let again = order_service::create_order(
        &state,
        &operator,
        CreateOrderRequest {
            total_amount: Some(55.0),
            ..Default::default()
        },
    )
    .await?;
    assert_ne!(quick.order_number, again.order_number);

    let orders = order_service::list_orders(&state, &operator).await?;
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, again.order_id);
    assert!(orders[1].is_complimentary);
    assert!(orders[1].items.is_empty());
    Ok(())
}

#[tokio::test]
async fn deactivated_items_leave_the_menu() -> anyhow::Result<()> {
    let state = common::setup_state().await;
    let operator = common::register(&state, "f@x.com", Role::Operator).await;

    let coffee = menu_service::create_menu_item(
        &state,
        &operator,
        CreateMenuItemRequest {
            name: "Cold Coffee".into(),
            price: 60.0,
            category: MealPeriod::Dinner,
        },
    )
    .await?;
    menu_service::create_menu_item(
        &state,
        &operator,
        CreateMenuItemRequest {
            name: "Upma".into(),
            price: 25.0,
            category: MealPeriod::Breakfast,
        },
    )
    .await?;

    menu_service::deactivate_menu_item(&state, &operator, coffee.id).await?;

    let menu = menu_service::list_menu(&state, Default::default()).await?;
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].name, "Upma");

    let err = order_service::create_order(
        &state,
        &operator,
        CreateOrderRequest {
            items: vec![OrderLineRequest {
                menu_item_id: coffee.id,
                quantity: 1,
            }],
            ..Default::default()
        },
    )
    .await
    .expect_err("inactive item");
    assert!(matches!(err, AppError::Validation(_)));

    let err = menu_service::create_menu_item(
        &state,
        &operator,
        CreateMenuItemRequest {
            name: "Free Lunch".into(),
            price: -1.0,
            category: MealPeriod::Lunch,
        },
    )
    .await
    .expect_err("negative price");
    assert!(matches!(err, AppError::Validation(_)));
    Ok(())
}
