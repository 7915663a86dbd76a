use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::info;
use services::openai_service::OpenAIService;
use services::SuggestionProvider;
use std::io;
use std::sync::Arc;
use std::time::Duration;

mod config;
mod handlers;
mod models;
mod routes;
mod services;
#[cfg(test)]
mod test_support;

/// How long a client may take to send request headers.
const CLIENT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = config::Config::from_env().map_err(io::Error::other)?;
    let service = OpenAIService::from_config(&config).map_err(io::Error::other)?;
    let provider: Arc<dyn SuggestionProvider> = Arc::new(service);
    let provider = web::Data::from(provider);

    info!(
        "Starting server on {}:{} (model {}, outbound timeout {:?})",
        config.host, config.port, config.openai_model, config.openai_timeout
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(routes::vitals::vitals_routes(provider.clone()))
    })
    .client_request_timeout(CLIENT_REQUEST_TIMEOUT)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
