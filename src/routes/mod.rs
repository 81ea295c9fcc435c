use actix_web::web;

pub mod authorization;
pub mod backend_health;
pub mod seed;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health)
        .service(authorization::authorize);
    // Seeding routes (require a granted authorization)
    cfg.service(
        web::scope("/seed")
            .service(seed::seed_steps_route)
            .service(seed::seed_sleep_route)
            .service(seed::seed_exercise_route)
            .service(seed::seed_request_route)
            .service(seed::seed_week_of_steps_route)
            .service(seed::seed_week_of_sleep_route)
            .service(seed::seed_week_of_exercise_route)
    );
}
