use std::{error::Error, fmt::{Debug, Display}, str::FromStr, time::Duration};

use actix_web::{http::StatusCode, web, HttpResponse};
use diesel::{connection::SimpleConnection, r2d2::{ConnectionManager, CustomizeConnection}, SqliteConnection};
use r2d2::{Pool, PooledConnection};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::telemetry::spawn_blocking_with_tracing;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub fn error_fmt_chain(f: &mut std::fmt::Formatter<'_>, source: &Option<impl Error>) -> std::fmt::Result{
    if let Some(error) = source{
        write!(f, "\n\tCaused By:\n\t")?;
        write!(f, "{:?}", &error)?;
        error_fmt_chain(f, &error.source())
    } else {
        Ok(())
    }
}

pub async fn get_pooled_connection(
    pool: &web::Data<DbPool>
) -> Result<DbConnection, PoolGetError>{
    let pool_clone = pool.clone();

    let res = spawn_blocking_with_tracing(move || {
        pool_clone.get()
    })
    .await??;

    Ok(res)
}

#[derive(Error)]
pub enum PoolGetError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to get connection from pool")]
    DbPoolError(#[from] r2d2::Error),
}

impl Debug for PoolGetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Applied to every connection the pool opens. Diesel turns foreign key
// enforcement on when connecting, order ids on detail rows must stay unchecked.
#[derive(Debug, Clone, Copy)]
pub struct SqlitePragmas{
    pub busy_timeout: Duration
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = OFF;",
            self.busy_timeout.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a>{
    error: &'a str
}

pub fn json_error(status: StatusCode, message: &str) -> HttpResponse{
    HttpResponse::build(status).json(ErrorBody{ error: message })
}

// Query values like `?id=` count as absent; anything else must parse
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.is_empty() => value.parse::<T>()
                                                .map(Some)
                                                .map_err(serde::de::Error::custom),
        _ => Ok(None)
    }
}
