use diesel::{BoolExpressionMethods, ExpressionMethods, QueryDsl, RunQueryDsl};

use crate::{models::{Customer, NewCustomer}, schema::customers, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

use super::QueryError;

// Loads every customer, or only those whose first or last name equals `name`
#[tracing::instrument(
    "Getting customers from db",
    skip(conn)
)]
pub async fn get_customers(
    mut conn: DbConnection,
    name: Option<String>
) -> Result<Vec<Customer>, QueryError>{
    let res = spawn_blocking_with_tracing(move || {
        let mut query = customers::table
            .order(customers::customer_id.asc())
            .into_boxed();

        if let Some(name) = name {
            query = query.filter(
                customers::first_name.eq(name.clone())
                    .or(customers::last_name.eq(name))
            );
        }

        query.load::<Customer>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Inserting customer and reloading customer list",
    skip_all
)]
pub async fn insert_customer(
    mut conn: DbConnection,
    new_customer: NewCustomer
) -> Result<Vec<Customer>, QueryError>{
    let res = spawn_blocking_with_tracing(move || {
        diesel::insert_into(customers::table)
            .values(&new_customer)
            .execute(&mut conn)?;

        customers::table
            .order(customers::customer_id.asc())
            .load::<Customer>(&mut conn)
    })
    .await??;

    Ok(res)
}
