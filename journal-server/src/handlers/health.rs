use journal_common::db::DbAsyncPool;

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

pub async fn heartbeat() -> impl Responder {
    HttpResponse::Ok()
}

/// Reports pool usage when entries are stored in Postgres. Servers running on the in-memory
/// store have no pool registered.
pub async fn health(db_async_pool: Option<web::Data<DbAsyncPool>>) -> impl Responder {
    let Some(db_async_pool) = db_async_pool else {
        return HttpResponse::Ok().json(json!({ "storage": "in_memory" }));
    };

    let async_pool_state = db_async_pool.state();
    let resp_body = json!({
        "storage": "postgres",
        "db_async_pool_state": {
            "connections": async_pool_state.connections,
            "idle_connections": async_pool_state.idle_connections
        }
    });

    HttpResponse::Ok().json(resp_body)
}
