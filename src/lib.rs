use actix_web::{web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;
use std::sync::Arc;

pub mod config;
mod routes;
mod handlers;
pub mod models;
pub mod db;
pub mod seeder;
pub mod services;
pub mod sink;
pub mod telemetry;

use crate::routes::init_routes;
use crate::seeder::SampleSeeder;
use crate::services::AuthorizationState;

pub fn run(
    listener: TcpListener,
    seeder: Arc<SampleSeeder>,
    authorization: Arc<AuthorizationState>,
) -> Result<Server, std::io::Error> {
    // web::Data is an Arc underneath, so these share the caller's instances
    let seeder_data = web::Data::from(seeder);
    let authorization_data = web::Data::from(authorization);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(seeder_data.clone())
            .app_data(authorization_data.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
