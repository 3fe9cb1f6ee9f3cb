use actix_web::{App, HttpServer, web};
use email_validator::config::Settings;
use email_validator::error::ConfigError;
use email_validator::openapi::ApiDoc;
use email_validator::routes;
use email_validator::validation::cache::{CachedResolver, build_cache};
use email_validator::validation::{DnsResolver, DomainResolver, EmailValidator};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Email Validator Service Entry Point
///
/// Configures and launches the Actix-web HTTP server with:
/// - Validation endpoints mounted at the root
/// - Swagger UI for API documentation
/// - Environment configuration via `.env` file
///
/// # Endpoints
/// - Swagger UI: `/swagger-ui/`
/// - OpenAPI spec: `/api-docs/openapi.json`
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(false);
            error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };
    init_logging(settings.debug);

    let validator = build_validator(&settings)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    info!(
        "Starting email validator on {}:{} (check_mx={}, dns_timeout={:?})",
        settings.host, settings.port, settings.check_mx, settings.dns_timeout
    );

    let validator = web::Data::new(validator);

    HttpServer::new(move || {
        let openapi = ApiDoc::openapi();

        App::new()
            .app_data(validator.clone())
            .app_data(routes::json_config())
            .configure(routes::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .default_service(web::to(routes::not_found))
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}

fn build_validator(settings: &Settings) -> Result<EmailValidator, ConfigError> {
    if !settings.check_mx {
        return EmailValidator::from_options(settings.validator_options(), None);
    }

    let dns = DnsResolver::new(settings.dns_timeout);
    info!("MX lookups use {:?}", dns.tier());

    let resolver: Arc<dyn DomainResolver> = if settings.mx_cache_ttl.is_zero() {
        Arc::new(dns)
    } else {
        let cache = build_cache(settings.redis_url.as_deref(), settings.mx_cache_ttl)?;
        Arc::new(CachedResolver::new(dns, cache))
    };

    EmailValidator::from_options(settings.validator_options(), Some(resolver))
}

fn init_logging(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
