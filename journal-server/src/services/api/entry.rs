use actix_web::web::*;

use crate::handlers::entry;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/entries")
            .service(
                resource("")
                    .route(post().to(entry::create))
                    .route(get().to(entry::get_all))
                    .route(delete().to(entry::delete_all)),
            )
            .service(
                resource("/{entry_id}")
                    .route(get().to(entry::get))
                    .route(patch().to(entry::edit))
                    .route(delete().to(entry::delete)),
            )
            .service(resource("/{entry_id}/analyze").route(post().to(entry::analyze))),
    );
}
