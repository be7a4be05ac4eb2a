use actix_web::{web, HttpResponse};
use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{db_interaction::get_orders_with_details, routes::ApiError, utils::{empty_string_as_none, get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct GetOrderQuery{
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date: Option<NaiveDate>
}

#[tracing::instrument(
    "Getting list of orders",
    skip(pool)
)]
pub async fn get_orders(
    pool: web::Data<DbPool>,
    query: web::Query<GetOrderQuery>
) -> Result<HttpResponse, ApiError>{
    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let orders = get_orders_with_details(conn, query.into_inner().date)
                    .await
                    .context("Failed to get orders with details")?;

    Ok(HttpResponse::Ok().json(orders))
}
