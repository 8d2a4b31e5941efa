//! Author handlers

use crate::error::ApiError;
use crate::extractors::{AllowListedJson, IdPath};
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use quotes_core::{Author, AuthorStore, NewAuthor};
use tracing::{debug, info, warn};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Author>>, ApiError> {
    let mut session = state.db.begin().await?;
    let authors = session.list_authors().await?;
    session.commit().await?;

    debug!("Listed {} authors", authors.len());
    Ok(Json(authors))
}

pub async fn get(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Author>, ApiError> {
    let mut session = state.db.begin().await?;
    let author = session
        .get_author(id)
        .await?
        .ok_or(ApiError::AuthorNotFound(id))?;
    session.commit().await?;

    Ok(Json(author))
}

pub async fn create(
    State(state): State<AppState>,
    AllowListedJson(req): AllowListedJson<NewAuthor>,
) -> Result<(StatusCode, Json<Author>), ApiError> {
    req.validate()?;

    let mut session = state.db.begin_write().await?;
    let author = match session.insert_author(&req).await {
        Ok(author) => author,
        Err(e) if e.is_unique_violation() => {
            warn!("Rejected duplicate author name: {}", req.name);
            session.rollback().await?;
            return Err(ApiError::DuplicateAuthorName);
        }
        Err(e) => return Err(e.into()),
    };
    session.commit().await?;

    info!("Created author {} ({} {})", author.id, author.name, author.surname);
    Ok((StatusCode::CREATED, Json(author)))
}
