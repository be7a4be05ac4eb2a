use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{db_interaction::{update_coffee, UpdateCoffeeError}, models::Coffee, routes::ApiError, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Validate, Debug)]
pub struct UpdateCoffeeForm{
    #[serde(rename = "CoffeeName")]
    pub coffee_name: String,
    #[serde(rename = "Price")]
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>
}

#[derive(Serialize)]
struct CoffeeUpdated{
    message: &'static str,
    coffee: Coffee
}

#[tracing::instrument(
    "Updating coffee",
    skip(pool)
)]
pub async fn put_coffee(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<UpdateCoffeeForm>
) -> Result<HttpResponse, ApiError>{
    form.validate()?;

    let coffee_id = path.into_inner();
    let UpdateCoffeeForm{ coffee_name, price } = form.into_inner();

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let coffee = update_coffee(conn, coffee_id, coffee_name, price)
                    .await
                    .map_err(|e| {
                        match e {
                            UpdateCoffeeError::NoCoffeeIdError(_) => ApiError::NotFound("Coffee not found".into()),
                            _ => ApiError::UnexpectedError(anyhow::Error::new(e).context("Failed to update coffee"))
                        }
                    })?;

    Ok(HttpResponse::Ok().json(CoffeeUpdated{
        message: "Coffee updated successfully",
        coffee
    }))
}
