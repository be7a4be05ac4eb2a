use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{db_interaction::insert_coffee, models::{Coffee, NewCoffee}, routes::ApiError, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Validate, Debug)]
pub struct CoffeeForm{
    #[serde(rename = "CoffeeName")]
    pub coffee_name: String,
    #[serde(rename = "Price")]
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64
}

#[derive(Serialize)]
struct CoffeeCreated{
    message: &'static str,
    coffees: Vec<Coffee>
}

// A duplicate name trips the unique constraint and surfaces as a 500
#[tracing::instrument(
    "Posting coffee",
    skip(pool)
)]
pub async fn post_coffee(
    pool: web::Data<DbPool>,
    form: web::Json<CoffeeForm>
) -> Result<HttpResponse, ApiError>{
    form.validate()?;
    let form = form.into_inner();

    let new_coffee = NewCoffee{
        coffee_name: form.coffee_name,
        price: form.price
    };

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let coffees = insert_coffee(conn, new_coffee)
                    .await
                    .context("Failed to insert coffee")?;

    Ok(HttpResponse::Created().json(CoffeeCreated{
        message: "Coffee created successfully",
        coffees
    }))
}
