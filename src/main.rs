use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizmaster_server::{
    app_state::AppState, config::Config, graphql::create_schema, handlers::configure_routes,
    middleware::RequestIdMiddleware,
};

fn cors(origin: Option<&str>) -> Cors {
    match origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allow_any_method()
            .allow_any_header()
            .expose_headers(["content-disposition", "x-request-id"])
            .max_age(3600),
        None => Cors::permissive(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if let Err(err) = config.validate() {
        log::error!("Invalid configuration: {}", err);
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()));
    }

    let state = AppState::new(config.clone()).map_err(|err| {
        log::error!("Failed to initialise application state: {}", err);
        std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
    })?;
    let schema = create_schema(state.clone());

    let bind = (config.web_server_host.clone(), config.web_server_port);
    log::info!("Starting HTTP server on {}:{}", bind.0, bind.1);
    log::info!("GraphiQL playground: http://{}:{}/graphiql", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(schema.clone()))
            .wrap(cors(config.cors_allowed_origin.as_deref()))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(configure_routes)
    })
    .bind(bind)?
    .run()
    .await
}
