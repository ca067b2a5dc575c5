//! Series Routes
//!
//! - GET /api/series?id=<series>&from=<period>&to=<period>

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{SeriesBody, SeriesParams};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::series::{DateRange, Period, SeriesId, SeriesQuery};

const EMPTY_MESSAGE: &str = "No observations for the given parameters";

/// GET /api/series
///
/// Fetch one series from the provider. All validation happens before the
/// upstream call, so a bad request never reaches INEGI.
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SeriesParams>, QueryRejection>,
) -> ApiResult<Json<SeriesBody>> {
    let Query(params) = params.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let query = parse_query(&params)?;

    let series = state.fetcher.fetch(&query).await?;
    let count = series.len();

    tracing::info!(series_id = %query.series_id, count, "Served series");

    Ok(Json(SeriesBody {
        series,
        from: query.range.from.map(|p| p.to_string()),
        to: query.range.to.map(|p| p.to_string()),
        count,
        message: (count == 0).then(|| EMPTY_MESSAGE.to_string()),
    }))
}

fn parse_query(params: &SeriesParams) -> ApiResult<SeriesQuery> {
    let raw_id = params
        .id
        .as_deref()
        .ok_or_else(|| ApiError::Validation("missing required parameter 'id'".to_string()))?;
    let series_id = SeriesId::parse(raw_id)?;

    let from = SeriesParams::bound(&params.from)
        .map(Period::parse)
        .transpose()?;
    let to = SeriesParams::bound(&params.to)
        .map(Period::parse)
        .transpose()?;

    Ok(SeriesQuery::new(series_id).range(DateRange::new(from, to)?))
}
