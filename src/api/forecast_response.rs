use poem_openapi::{ApiResponse, payload::Json, types::ToJSON};

/// Successful answers of the forecast endpoints. Failures leave the handler as
/// `poem::Error` and are rendered by [`super::fault::FaultTranslation`].
#[derive(Debug, ApiResponse)]
pub enum ForecastApiResponse<T: ToJSON + Send> {
    #[oai(status = 200)]
    Ok(Json<T>),
}
