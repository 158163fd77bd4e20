use actix_web::{middleware::Logger, web, App, HttpServer};
use docquiz_server::{
    app_state::AppState, config::Config, handlers, middleware::SessionMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if config.session_secret_generated {
        log::warn!("SECRET_KEY is not set; using a random key, sessions will not survive a restart");
    }
    log::info!(
        "Using model {} at {} (API key {})",
        config.llm_model_name,
        config.llm_api_base_url,
        if config.has_api_key() { "present" } else { "missing" }
    );

    let bind_address = (config.web_server_host.clone(), config.web_server_port);
    let session_secret = config.session_secret.clone();
    let state = web::Data::new(AppState::new(config));

    log::info!("Starting HTTP server on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(SessionMiddleware::new(session_secret.clone()))
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
