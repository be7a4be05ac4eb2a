use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;

use crate::{db_interaction::{get_all_coffees, get_coffee_by_id, search_coffees_by_name}, routes::ApiError, utils::{empty_string_as_none, get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct GetCoffeeQuery{
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i32>,
    pub name: Option<String>
}

/// `id` wins over `name`; an id lookup answers with a single coffee or `null`.
#[tracing::instrument(
    "Getting coffees",
    skip(pool)
)]
pub async fn get_coffees(
    pool: web::Data<DbPool>,
    query: web::Query<GetCoffeeQuery>
) -> Result<HttpResponse, ApiError>{
    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let GetCoffeeQuery{ id, name } = query.into_inner();

    if let Some(coffee_id) = id {
        let coffee = get_coffee_by_id(conn, coffee_id)
                        .await
                        .context("Failed to get coffee by id")?;

        return Ok(HttpResponse::Ok().json(coffee))
    }

    let coffees = match name.filter(|name| !name.is_empty()) {
        Some(fragment) => search_coffees_by_name(conn, fragment).await,
        None => get_all_coffees(conn).await
    }
    .context("Failed to get coffees")?;

    Ok(HttpResponse::Ok().json(coffees))
}
