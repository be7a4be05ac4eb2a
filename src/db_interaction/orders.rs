use chrono::NaiveDate;
use diesel::{BelongingToDsl, Connection, ExpressionMethods, GroupedBy, QueryDsl, RunQueryDsl, SelectableHelper};

use crate::{models::{NewOrder, NewOrderDetail, NewOrderLine, Order, OrderDetail, OrderWithDetails}, schema::{order_details, orders}, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

use super::QueryError;

// Attaches to every order the detail rows that reference it, keeping order of `orders`
fn load_details_for(
    conn: &mut DbConnection,
    orders: Vec<Order>
) -> Result<Vec<OrderWithDetails>, diesel::result::Error>{
    let details = OrderDetail::belonging_to(&orders)
        .order(order_details::order_detail_id.asc())
        .load::<OrderDetail>(conn)?;

    let grouped = details.grouped_by(&orders);

    Ok(orders.into_iter()
        .zip(grouped)
        .map(|(order, order_details)| OrderWithDetails{ order, order_details })
        .collect())
}

#[tracing::instrument(
    "Getting orders along with associated order details",
    skip(conn)
)]
pub async fn get_orders_with_details(
    mut conn: DbConnection,
    order_date: Option<NaiveDate>
) -> Result<Vec<OrderWithDetails>, QueryError>{
    let res = spawn_blocking_with_tracing(move || {
        let mut query = orders::table
            .order(orders::order_id.asc())
            .into_boxed();

        if let Some(order_date) = order_date {
            query = query.filter(orders::order_date.eq(order_date));
        }

        let orders = query.load::<Order>(&mut conn)?;

        load_details_for(&mut conn, orders)
    })
    .await??;

    Ok(res)
}

/// Inserts the order and its detail rows, then re-reads the order with its
/// details. Everything runs in one transaction, so a failing detail insert
/// leaves no orphaned order behind.
#[tracing::instrument(
    "Creating order with order details",
    skip(conn, details)
)]
pub async fn create_order_with_details(
    mut conn: DbConnection,
    new_order: NewOrder,
    details: Vec<NewOrderLine>
) -> Result<OrderWithDetails, QueryError>{
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<OrderWithDetails, diesel::result::Error, _>(|conn| {
            let order = diesel::insert_into(orders::table)
                .values(&new_order)
                .returning(Order::as_returning())
                .get_result::<Order>(conn)?;

            if !details.is_empty() {
                let rows: Vec<NewOrderDetail> = details.into_iter()
                    .map(|line| NewOrderDetail{
                        order_id: order.order_id,
                        coffee_id: line.coffee_id,
                        quantity: line.quantity,
                        subtotal: line.subtotal
                    })
                    .collect();

                diesel::insert_into(order_details::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            let order = orders::table
                .find(order.order_id)
                .first::<Order>(conn)?;

            let mut loaded = load_details_for(conn, vec![order])?;
            loaded.pop().ok_or(diesel::result::Error::NotFound)
        })
    })
    .await??;

    Ok(res)
}
