// server/src/web/routes.rs

use actix_web::web;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called from `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      // Health Check Route
      .route("/health", web::get().to(health_check_handler))
      // Authentication Routes
      .service(
        web::scope("/auth")
          .route(
            "/signup",
            web::post().to(crate::web::handlers::auth_handlers::signup_handler),
          )
          .route(
            "/signin",
            web::post().to(crate::web::handlers::auth_handlers::signin_handler),
          )
          .route(
            "/signout",
            web::post().to(crate::web::handlers::auth_handlers::signout_handler),
          ),
      )
      // Public catalog routes
      .service(
        web::scope("/products")
          .route(
            "",
            web::get().to(crate::web::handlers::product_handlers::list_products_handler),
          )
          .route(
            "/{product_id}",
            web::get().to(crate::web::handlers::product_handlers::get_product_handler),
          ),
      )
      // Cart Routes (session-bound via the SessionUser extractor)
      .service(
        web::scope("/cart")
          .route("", web::get().to(crate::web::handlers::cart_handlers::view_cart_handler))
          .route(
            "/add",
            web::post().to(crate::web::handlers::cart_handlers::add_to_cart_handler),
          )
          .route(
            "/remove",
            web::post().to(crate::web::handlers::cart_handlers::remove_from_cart_handler),
          )
          .route(
            "/increment",
            web::post().to(crate::web::handlers::cart_handlers::increment_handler),
          )
          .route(
            "/decrement",
            web::post().to(crate::web::handlers::cart_handlers::decrement_handler),
          )
          .route(
            "/quantity",
            web::post().to(crate::web::handlers::cart_handlers::set_quantity_handler),
          )
          .route(
            "/clear",
            web::post().to(crate::web::handlers::cart_handlers::clear_cart_handler),
          ),
      )
      // Checkout Routes
      .service(web::scope("/checkout").route(
        "",
        web::post().to(crate::web::handlers::checkout_handlers::checkout_handler),
      ))
      // Vendor Routes (role-gated inside the handlers)
      .service(
        web::scope("/vendor/products")
          .route(
            "",
            web::post().to(crate::web::handlers::vendor_handlers::add_product_handler),
          )
          .route(
            "",
            web::get().to(crate::web::handlers::vendor_handlers::list_my_products_handler),
          )
          .route(
            "/{product_id}",
            web::put().to(crate::web::handlers::vendor_handlers::update_product_handler),
          ),
      ),
  );
}
