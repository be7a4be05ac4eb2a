use chrono::NaiveDate;
use coffee_shop::{db_interaction::create_order_with_details, models::{NewOrder, NewOrderLine}, schema::{order_details, orders}};
use diesel::{QueryDsl, RunQueryDsl};

use crate::helpers::{ErrorResponse, OrderCreated, TestApp};

fn count_rows(app: &TestApp) -> (i64, i64){
    let mut conn = app.pool.get().unwrap();

    let orders: i64 = orders::table.count().get_result(&mut conn).unwrap();
    let details: i64 = order_details::table.count().get_result(&mut conn).unwrap();

    (orders, details)
}

#[actix_web::test]
async fn post_order_without_total_amount_is_rejected(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/orders", &serde_json::json!({
        "CustomerID": 1,
        "OrderDate": "2023-12-01"
    }))
    .await;

    assert_eq!(response.status().as_u16(), 400);

    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.error, "Invalid input. Make sure CustomerID, OrderDate, and TotalAmount are provided.");

    assert_eq!(count_rows(&app), (0, 0));
}

#[actix_web::test]
async fn post_order_with_details_is_listed_by_date(){
    let app = TestApp::spawn_app().await;

    let espresso = app.create_coffee("Espresso", 3.0).await;
    let latte = app.create_coffee("Latte", 4.5).await;

    let response = app.post_json("/orders", &serde_json::json!({
        "CustomerID": 7,
        "OrderDate": "2023-12-01",
        "TotalAmount": 10.5,
        "OrderDetails": [
            { "CoffeeID": espresso.coffee_id, "Quantity": 2, "Subtotal": 6.0 },
            { "CoffeeID": latte.coffee_id, "Quantity": 1, "Subtotal": 4.5 }
        ]
    }))
    .await;

    assert_eq!(response.status().as_u16(), 201);

    let created: OrderCreated = response.json().await.unwrap();
    assert_eq!(created.message, "Order created successfully");
    assert_eq!(created.order.order.customer_id, 7);
    assert_eq!(created.order.order_details.len(), 2);

    app.post_json("/orders", &serde_json::json!({
        "CustomerID": 8,
        "OrderDate": "2023-12-02",
        "TotalAmount": 3.0
    }))
    .await;

    let orders = app.get_orders("?date=2023-12-01").await;

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0], created.order);

    let coffee_ids: Vec<_> = orders[0].order_details.iter().map(|d| d.coffee_id).collect();
    assert_eq!(coffee_ids, vec![espresso.coffee_id, latte.coffee_id]);
    assert!(orders[0].order_details.iter().all(|d| d.order_id == created.order.order.order_id));
}

#[actix_web::test]
async fn orders_without_details_have_empty_detail_list(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/orders", &serde_json::json!({
        "CustomerID": 2,
        "OrderDate": "2024-01-15",
        "TotalAmount": 0,
        "OrderDetails": []
    }))
    .await;

    assert_eq!(response.status().as_u16(), 201);

    let orders = app.get_orders("").await;
    assert_eq!(orders.len(), 1);
    assert!(orders[0].order_details.is_empty());
}

#[actix_web::test]
async fn invalid_detail_line_creates_nothing(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/orders", &serde_json::json!({
        "CustomerID": 3,
        "OrderDate": "2024-02-01",
        "TotalAmount": 5.0,
        "OrderDetails": [
            { "CoffeeID": 1, "Quantity": -2, "Subtotal": 5.0 }
        ]
    }))
    .await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(count_rows(&app), (0, 0));
}

#[actix_web::test]
async fn malformed_date_filter_is_rejected(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/orders?date=yesterday").await;

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn empty_date_filter_lists_every_order(){
    let app = TestApp::spawn_app().await;

    for date in ["2023-12-01", "2023-12-02"] {
        let response = app.post_json("/orders", &serde_json::json!({
            "CustomerID": 1,
            "OrderDate": date,
            "TotalAmount": 4.0
        }))
        .await;

        assert_eq!(response.status().as_u16(), 201);
    }

    assert_eq!(app.get_orders("?date=").await.len(), 2);
}

#[actix_web::test]
async fn failing_detail_insert_rolls_back_the_order(){
    let app = TestApp::spawn_app().await;

    let conn = app.pool.get().unwrap();
    let new_order = NewOrder{
        customer_id: 5,
        order_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        total_amount: 9.0
    };
    let lines = vec![
        NewOrderLine{ coffee_id: 1, quantity: 2, subtotal: 6.0 },
        NewOrderLine{ coffee_id: 2, quantity: -1, subtotal: 3.0 }
    ];

    let result = create_order_with_details(conn, new_order, lines).await;

    assert!(result.is_err());
    assert_eq!(count_rows(&app), (0, 0));
}
