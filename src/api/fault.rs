//! Translation of handler and routing failures into problem responses.
//!
//! A `poem::Error` that reaches [`FaultTranslation`] becomes a JSON body
//! `{title, status, detail}` when it carries a [`WfError`] or is server-class.
//! A [`WfError::Status`] keeps its status and message; any other translated
//! failure keeps the status poem assigned to it and gets a generic title.

use std::error::Error as _;

use poem::{Endpoint, IntoResponse, Middleware, Request, Response, http::StatusCode};
use serde::Serialize;
use tracing::{error, warn};

use crate::{config::Environment, error::WfError};

pub const INVALID_REQUEST_TITLE: &str = "Invalid Request";
pub const INTERNAL_ERROR_TITLE: &str = "An internal error occurred while processing the request.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemDetails {
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl ProblemDetails {
    pub fn from_error(err: &poem::Error, environment: Environment) -> Self {
        let app_error = err.downcast_ref::<WfError>();

        if let Some(WfError::Status { status, message }) = app_error {
            return Self {
                title: INVALID_REQUEST_TITLE.to_string(),
                status: status.as_u16(),
                detail: message.clone(),
            };
        }

        let detail = match (app_error, environment) {
            (Some(app_error), Environment::Development) => format!("{app_error:?}"),
            (Some(app_error), Environment::Production) => app_error
                .source()
                .map(|source| source.to_string())
                .unwrap_or_else(|| app_error.to_string()),
            (None, _) => err.to_string(),
        };

        Self {
            title: INTERNAL_ERROR_TITLE.to_string(),
            status: err.status().as_u16(),
            detail,
        }
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match serde_json::to_vec(&self) {
            Ok(body) => Response::builder()
                .status(status)
                .content_type("application/json")
                .body(body),
            Err(e) => {
                error!("Failed to serialize problem details: {e}");
                Response::builder().status(status).finish()
            }
        }
    }
}

/// Outermost middleware: nothing past it ever sees an `Err`.
#[derive(Debug, Clone, Copy)]
pub struct FaultTranslation {
    environment: Environment,
}

impl FaultTranslation {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }
}

impl<E: Endpoint> Middleware<E> for FaultTranslation {
    type Output = FaultTranslationEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        FaultTranslationEndpoint {
            inner: ep,
            environment: self.environment,
        }
    }
}

pub struct FaultTranslationEndpoint<E> {
    inner: E,
    environment: Environment,
}

impl<E: Endpoint> Endpoint for FaultTranslationEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> poem::Result<Self::Output> {
        match self.inner.call(req).await {
            Ok(resp) => Ok(resp.into_response()),
            Err(err) if !translates(&err) => Ok(err.into_response()),
            Err(err) => {
                let problem = ProblemDetails::from_error(&err, self.environment);
                if err.status().is_server_error() {
                    error!(status = problem.status, "Request failed: {err}");
                } else {
                    warn!(status = problem.status, "Request rejected: {err}");
                }
                Ok(problem.into_response())
            }
        }
    }
}

/// Application errors and server-class failures become problems; client-side
/// framework errors (unmatched route, wrong method, bad parameter) keep poem's response.
fn translates(err: &poem::Error) -> bool {
    err.downcast_ref::<WfError>().is_some() || err.status().is_server_error()
}
