//! Query parameter extractors.
//!
//! Every rejection is a 422 with a `VALID_*` code: `VALID_001` when the
//! parameter is missing or unparseable, `VALID_002` when it parses but is not
//! an allowed value.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use insights_core::{Error, Period};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::response::ApiError;

/// Employee ids start at 1.
#[derive(Debug, Clone, Copy, Validate)]
pub struct RepId {
    #[validate(range(min = 1))]
    pub rep_id: i64,
}

#[derive(Deserialize)]
struct RawRepId {
    rep_id: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for RepId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw: RawRepId = query_params(parts)?;
        let value = raw
            .rep_id
            .ok_or_else(|| Error::invalid_parameter("rep_id", "is required"))?;
        let rep_id = value.trim().parse::<i64>().map_err(|_| {
            Error::invalid_parameter("rep_id", format!("'{}' is not an integer", value))
        })?;

        let extracted = RepId { rep_id };
        extracted.validate().map_err(|e| rejected("rep_id", e))?;
        Ok(extracted)
    }
}

/// Trend granularity; defaults to monthly.
#[derive(Debug, Clone, Copy)]
pub struct TimePeriod(pub Period);

#[derive(Deserialize)]
struct RawTimePeriod {
    time_period: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for TimePeriod
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw: RawTimePeriod = query_params(parts)?;
        let period = match raw.time_period {
            Some(value) => value.parse::<Period>()?,
            None => Period::default(),
        };
        Ok(TimePeriod(period))
    }
}

/// Name fragment for employee search, trimmed.
#[derive(Debug, Clone, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1, max = 100))]
    pub query: String,
}

#[derive(Deserialize)]
struct RawSearchQuery {
    query: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for SearchQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw: RawSearchQuery = query_params(parts)?;
        let query = raw
            .query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .ok_or_else(|| Error::invalid_parameter("query", "must not be empty"))?;

        let extracted = SearchQuery { query };
        extracted.validate().map_err(|e| rejected("query", e))?;
        Ok(extracted)
    }
}

fn query_params<T: DeserializeOwned>(parts: &Parts) -> Result<T, ApiError> {
    Query::<T>::try_from_uri(&parts.uri)
        .map(|Query(params)| params)
        .map_err(|e| Error::invalid_parameter("query string", e.body_text()).into())
}

fn rejected(name: &str, errors: ValidationErrors) -> ApiError {
    Error::validation(format!("{} is out of range: {}", name, errors)).into()
}
