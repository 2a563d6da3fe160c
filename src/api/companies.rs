//! Company API handlers
//!
//! Contains HTTP request handlers for company CRUD operations. Each request
//! loads the backing file, operates on the loaded copy, and writes the whole
//! file back for mutations.

use crate::api::utils::{parse_json_object, validate_name_matches};
use crate::error::AppError;
use crate::state::company::NAME_FIELD;
use crate::state::{find_by_name, position_by_name, AppState, Company};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;

/// Message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}

/// GET /companies - List all companies
pub async fn list_companies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Company>>, AppError> {
    let dataset = state.store.load()?;
    Ok(Json(dataset.companies))
}

/// GET /companies/:name - Get a company by name (case-insensitive)
pub async fn get_company(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Company>, AppError> {
    let dataset = state.store.load()?;
    let company = find_by_name(&dataset.companies, &name).ok_or_else(|| {
        tracing::debug!(name = %name, "Company lookup missed");
        AppError::CompanyNotFound(name.clone())
    })?;

    Ok(Json(company.clone()))
}

/// POST /companies - Create a new company
pub async fn create_company(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Company>), AppError> {
    let company = Company::from_fields(parse_json_object(&headers, &body)?);

    let missing = company.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    let name = company
        .name()
        .ok_or_else(|| AppError::Validation(format!("Field '{NAME_FIELD}' must be a string")))?
        .to_string();

    let company = state
        .store
        .modify(|dataset| {
            if find_by_name(&dataset.companies, &name).is_some() {
                tracing::debug!(name = %name, "Rejected duplicate company");
                return Err(AppError::CompanyExists(name.clone()));
            }
            dataset.companies.push(company.clone());
            Ok(company)
        })
        .await?;

    tracing::info!(name = %name, "Company created");
    Ok((StatusCode::CREATED, Json(company)))
}

/// PUT /companies/:name - Shallow-merge the body into a company
pub async fn update_company(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Company>, AppError> {
    let updates = parse_json_object(&headers, &body)?;

    if let Some(payload_name) = updates.get(NAME_FIELD) {
        validate_name_matches(payload_name, &name)?;
    }

    let company = state
        .store
        .modify(|dataset| {
            let index = position_by_name(&dataset.companies, &name)
                .ok_or_else(|| AppError::CompanyNotFound(name.clone()))?;
            let company = &mut dataset.companies[index];
            company.merge(updates);
            Ok::<_, AppError>(company.clone())
        })
        .await?;

    tracing::info!(name = %name, "Company updated");
    Ok(Json(company))
}

/// DELETE /companies/:name - Delete a company
///
/// Responds 204 and still carries a confirmation message for clients that
/// read it.
pub async fn delete_company(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    state
        .store
        .modify(|dataset| {
            let index = position_by_name(&dataset.companies, &name)
                .ok_or_else(|| AppError::CompanyNotFound(name.clone()))?;
            dataset.companies.remove(index);
            Ok::<_, AppError>(())
        })
        .await?;

    tracing::info!(name = %name, "Company deleted");
    Ok((
        StatusCode::NO_CONTENT,
        Json(MessageResponse {
            message: format!("Company '{}' deleted", name),
        }),
    ))
}
