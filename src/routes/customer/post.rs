use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{db_interaction::insert_customer, models::{Customer, NewCustomer}, routes::ApiError, utils::{get_pooled_connection, DbPool}};

// Every field is optional, a customer may be stored with nothing but an id
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerForm{
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>
}

impl From<CustomerForm> for NewCustomer {
    fn from(form: CustomerForm) -> Self {
        NewCustomer{
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            phone: form.phone
        }
    }
}

#[derive(Serialize)]
struct CustomerCreated{
    message: &'static str,
    customers: Vec<Customer>
}

#[tracing::instrument(
    "Posting customer",
    skip_all
)]
pub async fn post_customer(
    pool: web::Data<DbPool>,
    form: web::Json<CustomerForm>
) -> Result<HttpResponse, ApiError>{
    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let customers = insert_customer(conn, form.into_inner().into())
                        .await
                        .context("Failed to insert customer")?;

    Ok(HttpResponse::Created().json(CustomerCreated{
        message: "Customer created successfully",
        customers
    }))
}
