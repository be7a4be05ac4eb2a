use actix_web::{web, HttpResponse};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{db_interaction::create_order_with_details, models::{NewOrder, NewOrderLine, OrderWithDetails}, routes::ApiError, utils::{get_pooled_connection, DbPool}};

const MISSING_ORDER_FIELDS: &str = "Invalid input. Make sure CustomerID, OrderDate, and TotalAmount are provided.";

#[derive(Deserialize, Validate, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct OrderForm{
    #[serde(rename = "CustomerID")]
    pub customer_id: Option<i32>,
    pub order_date: Option<NaiveDate>,
    #[validate(range(min = 0.0, message = "TotalAmount must not be negative"))]
    pub total_amount: Option<f64>,
    #[validate(nested)]
    pub order_details: Option<Vec<OrderLineForm>>
}

#[derive(Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct OrderLineForm{
    #[serde(rename = "CoffeeID")]
    pub coffee_id: i32,
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i32,
    #[validate(range(min = 0.0, message = "Subtotal must not be negative"))]
    pub subtotal: f64
}

impl OrderForm {
    /// Splits the request into the order row and its detail lines. Missing
    /// required fields are reported before range violations.
    pub fn into_new_order(self) -> Result<(NewOrder, Vec<NewOrderLine>), ApiError>{
        let (customer_id, order_date, total_amount) = match (self.customer_id, self.order_date, self.total_amount) {
            (Some(customer_id), Some(order_date), Some(total_amount)) => (customer_id, order_date, total_amount),
            _ => return Err(ApiError::InvalidInput(MISSING_ORDER_FIELDS.into()))
        };

        self.validate()?;

        let lines = self.order_details
                        .unwrap_or_default()
                        .into_iter()
                        .map(|line| NewOrderLine{
                            coffee_id: line.coffee_id,
                            quantity: line.quantity,
                            subtotal: line.subtotal
                        })
                        .collect();

        Ok((NewOrder{ customer_id, order_date, total_amount }, lines))
    }
}

#[derive(Serialize)]
struct OrderCreated{
    message: &'static str,
    order: OrderWithDetails
}

#[tracing::instrument(
    "Posting order",
    skip(pool)
)]
pub async fn post_order(
    pool: web::Data<DbPool>,
    form: web::Json<OrderForm>
) -> Result<HttpResponse, ApiError>{
    let (new_order, lines) = form.into_inner().into_new_order()?;

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let order = create_order_with_details(conn, new_order, lines)
                    .await
                    .context("Failed to create order with details")?;

    Ok(HttpResponse::Created().json(OrderCreated{
        message: "Order created successfully",
        order
    }))
}
