pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(auth::mint_token)
        .service(users::register)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::change_role)
        .service(users::role_counts)
        .service(tasks::create_task);
}
