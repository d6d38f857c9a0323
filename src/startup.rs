use poem::{
    EndpointExt, Response, Route,
    endpoint::BoxEndpoint,
    http::header::STRICT_TRANSPORT_SECURITY,
    middleware::{SetHeader, Tracing},
};
use poem_openapi::OpenApiService;

use crate::{
    api::{ForecastApi, fault::FaultTranslation},
    config::ApplicationSettings,
    db::Repository,
    service::ForecastService,
};

const API_TITLE: &str = "WeatherForecast";
const API_VERSION: &str = "v1";
const HSTS_POLICY: &str = "max-age=2592000";

/// Assembles routes and middleware around a forecast store.
///
/// Swagger UI and the raw OpenAPI document are only mounted in development.
/// Production responses carry an HSTS header.
pub fn build_app<R>(repository: R, settings: &ApplicationSettings) -> BoxEndpoint<'static, Response>
where
    R: Repository + Send + Sync + 'static,
{
    let api = ForecastApi::new(ForecastService::new(repository));
    let api_service = OpenApiService::new(api, API_TITLE, API_VERSION);

    let environment = settings.environment;
    let mut route = Route::new();
    if environment.is_development() {
        route = route
            .at("/swagger/v1/swagger.json", api_service.spec_endpoint())
            .nest("/swagger", api_service.swagger_ui());
    }

    route
        .nest("/", api_service)
        .with(Tracing)
        .with(FaultTranslation::new(environment))
        .with_if(
            !environment.is_development(),
            SetHeader::new().overriding(STRICT_TRANSPORT_SECURITY, HSTS_POLICY),
        )
        .map_to_response()
        .boxed()
}
