use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;

use crate::{db_interaction::get_order_details_with_order, routes::ApiError, utils::{empty_string_as_none, get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct GetOrderDetailQuery{
    #[serde(rename = "coffeeID", default, deserialize_with = "empty_string_as_none")]
    pub coffee_id: Option<i32>
}

#[tracing::instrument(
    "Getting list of order details",
    skip(pool)
)]
pub async fn get_order_details(
    pool: web::Data<DbPool>,
    query: web::Query<GetOrderDetailQuery>
) -> Result<HttpResponse, ApiError>{
    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let order_details = get_order_details_with_order(conn, query.into_inner().coffee_id)
                            .await
                            .context("Failed to get order details with order")?;

    Ok(HttpResponse::Ok().json(order_details))
}
