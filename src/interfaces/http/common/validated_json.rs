//! JSON body extractor that also enforces `validator` rules
//!
//! Rejections go through [`ApiError`], so malformed bodies and failed field
//! rules both answer 400 in the usual envelope.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiError;

/// `Json<T>` followed by `T::validate()`.
///
/// ```ignore
/// async fn create_company(
///     ValidatedJson(request): ValidatedJson<CompanyRequest>,
/// ) -> Result<..., ApiError> {
///     // name is 1-15 chars, amount_of_employees >= 1, type is known
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
