use axum::Json;
use axum::body::Body;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub mod bosses;
pub mod edit_user;
pub mod records;
pub mod review_record;
pub mod sign_out;
pub mod stats;
pub mod submit_record;

/// Uniform success envelope: `{"success": true, ...fields of T}`.
///
/// The failure half of the contract lives in [`crate::error::AppError`],
/// which renders as `{"success": false, "error": ...}`.
pub struct ApiResponse<T>(pub T);

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response<Body> {
        #[derive(Serialize)]
        struct Envelope<T> {
            success: bool,
            #[serde(flatten)]
            data: T,
        }

        Json(Envelope {
            success: true,
            data: self.0,
        })
        .into_response()
    }
}
