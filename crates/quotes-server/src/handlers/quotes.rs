//! Quote handlers

use crate::error::ApiError;
use crate::extractors::{AllowListedJson, IdPath};
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use quotes_core::{AuthorStore, MessageBody, NewQuote, Quote, QuoteStore, QuoteUpdate, QuoteView};
use tracing::{debug, info};

/// Embed the owning author, looked up by `author_id`.
async fn render<S>(store: &mut S, quote: Quote) -> Result<QuoteView, ApiError>
where
    S: AuthorStore + ?Sized,
{
    let author = store.get_author(quote.author_id).await?.ok_or_else(|| {
        ApiError::Internal(format!(
            "Quote {} references missing author {}",
            quote.id, quote.author_id
        ))
    })?;
    Ok(QuoteView::new(quote, author))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<QuoteView>>, ApiError> {
    let mut session = state.db.begin().await?;
    let quotes = session.list_quotes().await?;

    let mut views = Vec::with_capacity(quotes.len());
    for quote in quotes {
        views.push(render(&mut session, quote).await?);
    }
    session.commit().await?;

    debug!("Listed {} quotes", views.len());
    Ok(Json(views))
}

pub async fn get(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<QuoteView>, ApiError> {
    let mut session = state.db.begin().await?;
    let quote = session
        .get_quote(id)
        .await?
        .ok_or(ApiError::QuoteNotFound(id))?;
    let view = render(&mut session, quote).await?;
    session.commit().await?;

    Ok(Json(view))
}

pub async fn create(
    State(state): State<AppState>,
    IdPath(author_id): IdPath,
    AllowListedJson(req): AllowListedJson<NewQuote>,
) -> Result<(StatusCode, Json<QuoteView>), ApiError> {
    req.validate()?;

    let mut session = state.db.begin_write().await?;
    let author = session
        .get_author(author_id)
        .await?
        .ok_or(ApiError::AuthorNotFound(author_id))?;
    let quote = session.insert_quote(&author, &req.text).await?;
    session.commit().await?;

    info!("Created quote {} for author {}", quote.id, author.id);
    Ok((StatusCode::CREATED, Json(QuoteView::new(quote, author))))
}

pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    AllowListedJson(req): AllowListedJson<QuoteUpdate>,
) -> Result<Json<QuoteView>, ApiError> {
    req.validate()?;

    let mut session = state.db.begin_write().await?;
    let mut quote = session
        .get_quote(id)
        .await?
        .ok_or(ApiError::QuoteNotFound(id))?;

    if let Some(author_id) = req.author_id {
        if session.get_author(author_id).await?.is_none() {
            return Err(ApiError::AuthorNotFound(author_id));
        }
    }

    quote.apply(&req);
    session.update_quote(&quote).await?;
    let view = render(&mut session, quote).await?;
    session.commit().await?;

    info!("Updated quote {}", id);
    Ok(Json(view))
}

pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<MessageBody>, ApiError> {
    let mut session = state.db.begin_write().await?;
    if !session.delete_quote(id).await? {
        return Err(ApiError::QuoteNotFound(id));
    }
    session.commit().await?;

    info!("Deleted quote {}", id);
    Ok(Json(MessageBody::new(format!("Quote with id={} deleted", id))))
}
