use actix_web::web::*;

use crate::handlers::error::HttpErrorResponse;

mod entry;
mod health;

pub fn configure(cfg: &mut ServiceConfig) {
    // Body deserialization failures use the same error shape as every other rejected input
    cfg.app_data(
        JsonConfig::default().error_handler(|err, _req| HttpErrorResponse::from(err).into()),
    )
    .configure(entry::configure)
    .configure(health::configure);
}
