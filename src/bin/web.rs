//! Single binary web server: REST API under /api, client files from STATIC_DIR at /static.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, JWT_SECRET,
//! TOKEN_TTL_HOURS, MAX_TEAMS, STATIC_DIR.

use actix_files::Files;
use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use std::sync::RwLock;
use tournament_manager::{api, Config, Store, TokenIssuer};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!(
        "Up to {} teams per tournament; serving client files from {}",
        config.max_teams,
        config.static_dir
    );

    let state = Data::new(RwLock::new(Store::new(config.max_teams)));
    let tokens = Data::new(TokenIssuer::new(config.jwt_secret.as_bytes(), config.token_ttl));
    let static_dir = config.static_dir.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(tokens.clone())
            .configure(api::configure)
            .service(Files::new("/static", &static_dir).index_file("index.html"))
    })
    .bind(bind)?
    .run()
    .await
}
