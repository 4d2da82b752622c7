use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub struct ResponseError(Response);

impl IntoResponse for ResponseError {
    fn into_response(self) -> Response {
        self.0
    }
}

impl ResponseError {
    pub fn bad_request<T>(data: T) -> Self
    where
        (StatusCode, T): IntoResponse,
    {
        ResponseError((StatusCode::BAD_REQUEST, data).into_response())
    }

    pub fn bad_gateway<T>(data: T) -> Self
    where
        (StatusCode, T): IntoResponse,
    {
        ResponseError((StatusCode::BAD_GATEWAY, data).into_response())
    }
}

pub type Result<T, E = ResponseError> = axum::response::Result<T, E>;
