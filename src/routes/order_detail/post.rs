use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{db_interaction::insert_order_detail, models::{NewOrderDetail, OrderDetail}, routes::ApiError, utils::{get_pooled_connection, DbPool}};

const MISSING_DETAIL_FIELDS: &str = "Invalid input. Make sure OrderID, CoffeeID, Quantity, and Subtotal are provided.";

#[derive(Deserialize, Validate, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct OrderDetailForm{
    #[serde(rename = "OrderID")]
    pub order_id: Option<i32>,
    #[serde(rename = "CoffeeID")]
    pub coffee_id: Option<i32>,
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0.0, message = "Subtotal must not be negative"))]
    pub subtotal: Option<f64>
}

impl OrderDetailForm {
    /// Zero counts as missing for every field, so a zero quantity or subtotal
    /// is rejected like an absent one.
    pub fn into_new_order_detail(self) -> Result<NewOrderDetail, ApiError>{
        let order_id = self.order_id.filter(|id| *id != 0);
        let coffee_id = self.coffee_id.filter(|id| *id != 0);
        let quantity = self.quantity.filter(|quantity| *quantity != 0);
        let subtotal = self.subtotal.filter(|subtotal| *subtotal != 0.0);

        let (order_id, coffee_id, quantity, subtotal) = match (order_id, coffee_id, quantity, subtotal) {
            (Some(order_id), Some(coffee_id), Some(quantity), Some(subtotal)) => (order_id, coffee_id, quantity, subtotal),
            _ => return Err(ApiError::InvalidInput(MISSING_DETAIL_FIELDS.into()))
        };

        self.validate()?;

        Ok(NewOrderDetail{ order_id, coffee_id, quantity, subtotal })
    }
}

#[derive(Serialize)]
struct OrderDetailCreated{
    message: &'static str,
    #[serde(rename = "orderDetail")]
    order_detail: OrderDetail
}

#[tracing::instrument(
    "Posting order detail",
    skip(pool)
)]
pub async fn post_order_detail(
    pool: web::Data<DbPool>,
    form: web::Json<OrderDetailForm>
) -> Result<HttpResponse, ApiError>{
    let new_detail = form.into_inner().into_new_order_detail()?;

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let order_detail = insert_order_detail(conn, new_detail)
                        .await
                        .context("Failed to insert order detail")?;

    Ok(HttpResponse::Created().json(OrderDetailCreated{
        message: "Order detail created successfully",
        order_detail
    }))
}
