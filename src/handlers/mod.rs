pub mod health;
pub mod stocks;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::config).configure(stocks::config);
}
