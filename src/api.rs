use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;
use serde_json::json;
use tracing::error;

/// Generic failure envelope: `{status: "error", message}` with HTTP 500.
/// Primary reads (search, suggestions, health) surface engine failures this
/// way; degradable reads catch errors themselves and return empty defaults.
pub struct ApiError(pub anyhow::Error);

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError(err)
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        error!("request failed: {:#}", self.0);
        let body = Json(json!({
            "status": "error",
            "message": self.0.to_string(),
        }));
        status::Custom(Status::InternalServerError, body).respond_to(req)
    }
}

pub type ApiResult = Result<Json<serde_json::Value>, ApiError>;

/// Client metadata attached to analytics events. The forwarded-for chain
/// wins over the socket address so events behind a proxy keep the real
/// client; an undeterminable address stays None.
pub struct ClientMeta {
    pub user_agent: String,
    pub ip: Option<String>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ClientMeta {
    type Error = std::convert::Infallible;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let user_agent = req
            .headers()
            .get_one("user-agent")
            .unwrap_or("unknown")
            .to_string();
        let ip = req
            .headers()
            .get_one("x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .or_else(|| req.headers().get_one("x-real-ip").map(String::from))
            .or_else(|| req.client_ip().map(|addr| addr.to_string()));
        Outcome::Success(ClientMeta { user_agent, ip })
    }
}
