use chrono::NaiveDate;
use diesel::prelude::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::Deserialize;
use serde::Serialize;

use crate::schema::coffees;
use crate::schema::customers;
use crate::schema::order_details;
use crate::schema::orders;

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = coffees, primary_key(coffee_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "PascalCase")]
pub struct Coffee{
    #[serde(rename = "CoffeeID")]
    pub coffee_id: i32,
    pub coffee_name: String,
    pub price: f64
}

#[derive(Insertable, Debug)]
#[diesel(table_name = coffees)]
pub struct NewCoffee{
    pub coffee_name: String,
    pub price: f64
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = customers, primary_key(customer_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "PascalCase")]
pub struct Customer{
    #[serde(rename = "CustomerID")]
    pub customer_id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>
}

#[derive(Insertable, Debug)]
#[diesel(table_name = customers)]
pub struct NewCustomer{
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = orders, primary_key(order_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "PascalCase")]
pub struct Order{
    #[serde(rename = "OrderID")]
    pub order_id: i32,
    #[serde(rename = "CustomerID")]
    pub customer_id: i32,
    pub order_date: NaiveDate,
    pub total_amount: f64
}

#[derive(Insertable, Debug)]
#[diesel(table_name = orders)]
pub struct NewOrder{
    pub customer_id: i32,
    pub order_date: NaiveDate,
    pub total_amount: f64
}

#[derive(Queryable, Selectable, Identifiable, Associations, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = order_details, primary_key(order_detail_id))]
#[diesel(belongs_to(Order, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "PascalCase")]
pub struct OrderDetail{
    #[serde(rename = "OrderDetailID")]
    pub order_detail_id: i32,
    #[serde(rename = "OrderID")]
    pub order_id: i32,
    #[serde(rename = "CoffeeID")]
    pub coffee_id: i32,
    pub quantity: i32,
    pub subtotal: f64
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = order_details)]
pub struct NewOrderDetail{
    pub order_id: i32,
    pub coffee_id: i32,
    pub quantity: i32,
    pub subtotal: f64
}

// An order together with every detail row pointing at it
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderWithDetails{
    #[serde(flatten)]
    pub order: Order,
    #[serde(rename = "OrderDetails")]
    pub order_details: Vec<OrderDetail>
}

// A detail row together with its parent order, if that order exists
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderDetailWithOrder{
    #[serde(flatten)]
    pub order_detail: OrderDetail,
    #[serde(rename = "Order")]
    pub order: Option<Order>
}

// A detail row submitted with a new order, before the order id is known
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderLine{
    pub coffee_id: i32,
    pub quantity: i32,
    pub subtotal: f64
}
