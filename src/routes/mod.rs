use actix_web::web;

pub mod backend_health;
pub mod league;
pub mod matches;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // Match routes (require authentication)
    cfg.service(
        web::scope("/matches")
            .wrap(AuthMiddleware)
            .service(matches::schedule_match)
            .service(matches::advance_match_status)
            .service(matches::set_match_minute)
            .service(matches::append_match_event)
            .service(matches::get_match_events)
            .service(matches::void_match_event)
            .service(matches::save_team_lineup)
            .service(matches::get_team_lineup)
            .service(matches::add_match_commentary)
            .service(matches::get_match_commentary)
            .service(matches::get_match),
    );
    // Tournament routes (require authentication)
    cfg.service(
        web::scope("/tournaments")
            .wrap(AuthMiddleware)
            .service(league::get_tournament_matches)
            .service(league::get_tournament_standings)
            .service(league::rebuild_tournament_standings)
            .service(league::get_top_scorers)
            .service(league::get_top_assists),
    );
}
