//! Hadith browsing endpoints

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use recitation_core::hadith::{
    books as book_names, download_text, editions_for_book, hadith_of_the_day, highlight_matches,
    paginate, search, HADITHS_PER_PAGE,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/hadith/books
pub async fn books(State(state): State<AppState>) -> Result<Json<BookListResponse>> {
    let editions = state.content.hadith_editions().await?;
    Ok(Json(BookListResponse {
        books: book_names(&editions),
    }))
}

/// GET /api/hadith/books/:book/editions
pub async fn book_editions(
    State(state): State<AppState>,
    Path(book): Path<String>,
) -> Result<Json<EditionListResponse>> {
    let editions = state.content.hadith_editions().await?;
    let matching: Vec<HadithEdition> = editions_for_book(&editions, &book)
        .into_iter()
        .cloned()
        .collect();

    if matching.is_empty() {
        return Err(ApiError::NotFound(format!("No editions for book {}", book)));
    }

    Ok(Json(EditionListResponse {
        book,
        editions: matching,
    }))
}

/// GET /api/hadith/editions/:edition?page=&search=
pub async fn edition_page(
    State(state): State<AppState>,
    Path(edition): Path<String>,
    Query(query): Query<HadithPageQuery>,
) -> Result<Json<HadithPageResponse>> {
    let (edition, hadiths) = state.content.hadiths(&edition).await?;

    let term = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let views: Vec<HadithView> = search(&hadiths, term.unwrap_or_default())
        .into_iter()
        .map(|h| HadithView {
            number: h.number_label(),
            segments: highlight_matches(&h.text, term.unwrap_or_default()),
            text: h.text.clone(),
        })
        .collect();

    let page = paginate(&views, query.page.unwrap_or(1), HADITHS_PER_PAGE)?;

    Ok(Json(HadithPageResponse {
        edition,
        search: term.map(str::to_string),
        page,
    }))
}

/// GET /api/hadith/editions/:edition/:number/download
/// `number` is the hadith number, or the 1-based position for unnumbered hadiths.
pub async fn download(
    State(state): State<AppState>,
    Path((edition, number)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let (edition, hadiths) = state.content.hadiths(&edition).await?;

    let (index, hadith) = hadiths
        .iter()
        .enumerate()
        .find(|(idx, h)| match h.number_label() {
            Some(label) => label == number,
            None => (idx + 1).to_string() == number,
        })
        .ok_or_else(|| ApiError::NotFound(format!("Hadith {} in {}", number, edition.name)))?;

    let file = download_text(hadith, index, Some(edition.lang_code()));

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.content,
    ))
}

/// GET /api/hadith/of-the-day
pub async fn of_the_day() -> Json<HadithOfTheDay> {
    let date = Local::now().date_naive();
    Json(HadithOfTheDay {
        date,
        text: hadith_of_the_day(date).to_string(),
    })
}
