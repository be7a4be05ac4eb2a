use std::{error::Error, fmt::Debug};

use diesel::{Connection, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl};
use thiserror::Error;

use crate::{models::{Coffee, NewCoffee}, schema::coffees, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

use super::QueryError;

// Byte position of `needle` inside `haystack`, 0 when absent; unlike LIKE it is case sensitive
diesel::define_sql_function!(fn instr(haystack: diesel::sql_types::Text, needle: diesel::sql_types::Text) -> diesel::sql_types::Integer);

#[tracing::instrument(
    "Getting all coffees from db",
    skip_all
)]
pub async fn get_all_coffees(
    mut conn: DbConnection
) -> Result<Vec<Coffee>, QueryError>{
    let res = spawn_blocking_with_tracing(move || {
        coffees::table
            .order(coffees::coffee_id.asc())
            .load::<Coffee>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting coffee by id from db",
    skip(conn)
)]
pub async fn get_coffee_by_id(
    mut conn: DbConnection,
    coffee_id: i32
) -> Result<Option<Coffee>, QueryError>{
    let res = spawn_blocking_with_tracing(move || {
        coffees::table
            .find(coffee_id)
            .first::<Coffee>(&mut conn)
            .optional()
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Searching coffees by name fragment",
    skip(conn)
)]
pub async fn search_coffees_by_name(
    mut conn: DbConnection,
    fragment: String
) -> Result<Vec<Coffee>, QueryError>{
    let res = spawn_blocking_with_tracing(move || {
        coffees::table
            .filter(instr(coffees::coffee_name, fragment).gt(0))
            .order(coffees::coffee_id.asc())
            .load::<Coffee>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Inserting coffee and reloading coffee list",
    skip(conn)
)]
pub async fn insert_coffee(
    mut conn: DbConnection,
    new_coffee: NewCoffee
) -> Result<Vec<Coffee>, QueryError>{
    let res = spawn_blocking_with_tracing(move || {
        diesel::insert_into(coffees::table)
            .values(&new_coffee)
            .execute(&mut conn)?;

        coffees::table
            .order(coffees::coffee_id.asc())
            .load::<Coffee>(&mut conn)
    })
    .await??;

    Ok(res)
}

// Error associated with renaming / repricing a coffee
#[derive(Error)]
pub enum UpdateCoffeeError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("coffee_id: {0} doesn't exist")]
    NoCoffeeIdError(i32)
}

impl Debug for UpdateCoffeeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Updating coffee in db",
    skip(conn)
)]
pub async fn update_coffee(
    mut conn: DbConnection,
    coffee_id: i32,
    coffee_name: String,
    price: Option<f64>
) -> Result<Coffee, UpdateCoffeeError>{
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<Coffee, UpdateCoffeeError, _>(|conn| {
            let affected_rows = diesel::update(coffees::table.find(coffee_id))
                                    .set(coffees::coffee_name.eq(coffee_name))
                                    .execute(conn)?;

            if affected_rows == 0 {
                return Err(UpdateCoffeeError::NoCoffeeIdError(coffee_id))
            }

            if let Some(price) = price {
                diesel::update(coffees::table.find(coffee_id))
                    .set(coffees::price.eq(price))
                    .execute(conn)?;
            }

            Ok(coffees::table.find(coffee_id).first::<Coffee>(conn)?)
        })
    })
    .await??;

    Ok(res)
}
