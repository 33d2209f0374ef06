//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod health;
mod posts;
mod tags;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/v1")
                    .service(
                        web::scope("/auth")
                            .route("", web::post().to(auth::login))
                            .route("/register", web::post().to(auth::register)),
                    )
                    .service(
                        web::scope("/categories")
                            .route("", web::get().to(categories::list))
                            .route("", web::post().to(categories::create))
                            .route("/{id}", web::delete().to(categories::delete)),
                    )
                    .service(
                        web::scope("/tags")
                            .route("", web::get().to(tags::list))
                            .route("", web::post().to(tags::create))
                            .route("/{id}", web::delete().to(tags::delete)),
                    )
                    .service(
                        web::scope("/posts")
                            .route("", web::get().to(posts::list))
                            .route("", web::post().to(posts::create))
                            // Registered before "/{id}" so it is not captured
                            // by the id segment.
                            .route("/drafts", web::get().to(posts::drafts))
                            .route("/{id}", web::get().to(posts::get))
                            .route("/{id}", web::put().to(posts::update))
                            .route("/{id}", web::delete().to(posts::delete)),
                    ),
            ),
    );
}
