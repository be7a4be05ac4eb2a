use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;

use crate::{db_interaction::get_customers, routes::ApiError, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct GetCustomerQuery{
    pub name: Option<String>
}

// `name` must equal the first or the last name exactly
#[tracing::instrument(
    "Getting customers",
    skip(pool)
)]
pub async fn get_customer_list(
    pool: web::Data<DbPool>,
    query: web::Query<GetCustomerQuery>
) -> Result<HttpResponse, ApiError>{
    let name = query.into_inner()
                .name
                .filter(|name| !name.is_empty());

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let customers = get_customers(conn, name)
                        .await
                        .context("Failed to get customers")?;

    Ok(HttpResponse::Ok().json(customers))
}
