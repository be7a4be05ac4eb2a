use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};

use crate::{models::{NewOrderDetail, Order, OrderDetail, OrderDetailWithOrder}, schema::{order_details, orders}, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

use super::QueryError;

// Order ids are not enforced, so the parent is joined optionally
#[tracing::instrument(
    "Getting order details along with parent order",
    skip(conn)
)]
pub async fn get_order_details_with_order(
    mut conn: DbConnection,
    coffee_id: Option<i32>
) -> Result<Vec<OrderDetailWithOrder>, QueryError>{
    let res = spawn_blocking_with_tracing(move || {
        let mut query = order_details::table
            .left_join(orders::table)
            .order(order_details::order_detail_id.asc())
            .into_boxed();

        if let Some(coffee_id) = coffee_id {
            query = query.filter(order_details::coffee_id.eq(coffee_id));
        }

        query.load::<(OrderDetail, Option<Order>)>(&mut conn)
    })
    .await??;

    Ok(res.into_iter()
        .map(|(order_detail, order)| OrderDetailWithOrder{ order_detail, order })
        .collect())
}

#[tracing::instrument(
    "Inserting order detail",
    skip(conn)
)]
pub async fn insert_order_detail(
    mut conn: DbConnection,
    new_detail: NewOrderDetail
) -> Result<OrderDetail, QueryError>{
    let res = spawn_blocking_with_tracing(move || {
        diesel::insert_into(order_details::table)
            .values(&new_detail)
            .returning(OrderDetail::as_returning())
            .get_result::<OrderDetail>(&mut conn)
    })
    .await??;

    Ok(res)
}
