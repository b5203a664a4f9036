//! HTTP routes and handlers for the dashboard
//!
//! Pages are server-rendered; the `/api/*` routes answer the page scripts
//! with a `{success, data, error}` JSON envelope. Access policy follows the
//! auth-or-guest model: data pages admit guests, while favorites, history,
//! and master data require a login.

use axum::{
    extract::{Form, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::analytics::{sentiment_stats, source_summary, SentimentLabel, SentimentStats, SourceCount};
use crate::backend::BackendError;
use crate::i18n::t;
use crate::models::{ArticleRecord, FavoriteStatus, HistoryEntry, NewSource, NewsSource, SourcePatch};

use super::charts::{ChartRegistry, ChartSpec};
use super::session::{
    self, clear_session_cookie, session_cookie, session_id_from_headers, SessionData,
};
use super::server::AppState;
use super::views::PageContext;

// ============================================================================
// API Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
        }
    }
}

/// Simple error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub backend_reachable: bool,
}

// ============================================================================
// View Models
// ============================================================================

/// Article rendered in a list, with defaults resolved for display
#[derive(Debug, Serialize)]
struct ArticleView {
    id: i64,
    title: String,
    url: String,
    source: String,
    sentiment: String,
}

impl ArticleView {
    fn from_record(article: &ArticleRecord) -> Self {
        let bucket = SentimentLabel::classify(article.sentiment.as_deref());
        Self {
            id: article.id,
            title: article.title.clone(),
            url: article.url.clone(),
            source: article
                .source
                .clone()
                .unwrap_or_else(|| crate::analytics::UNKNOWN_SOURCE.to_string()),
            sentiment: sentiment_display(bucket),
        }
    }

    fn from_records(articles: &[ArticleRecord]) -> Vec<Self> {
        articles.iter().map(Self::from_record).collect()
    }
}

fn sentiment_display(bucket: SentimentLabel) -> String {
    match bucket {
        SentimentLabel::Positive => t!("sentiment.positive").to_string(),
        SentimentLabel::Negative => t!("sentiment.negative").to_string(),
        SentimentLabel::Neutral => t!("sentiment.neutral").to_string(),
    }
}

/// Localized labels for the dashboard and result pages
#[derive(Debug, Serialize)]
struct PageLabels {
    total_articles: String,
    positive: String,
    negative: String,
    neutral: String,
    sentiment_chart: String,
    sources_table: String,
    recent_articles: String,
    results_for: String,
}

impl PageLabels {
    fn localized() -> Self {
        Self {
            total_articles: t!("dashboard.total_articles").to_string(),
            positive: t!("sentiment.positive").to_string(),
            negative: t!("sentiment.negative").to_string(),
            neutral: t!("sentiment.neutral").to_string(),
            sentiment_chart: t!("dashboard.sentiment_chart").to_string(),
            sources_table: t!("dashboard.sources_table").to_string(),
            recent_articles: t!("dashboard.recent_articles").to_string(),
            results_for: t!("search.results_for").to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DashboardView {
    page: PageContext,
    labels: PageLabels,
    stats: SentimentStats,
    recent_articles: Vec<ArticleView>,
    sources_summary: Vec<SourceCount>,
    charts_json: String,
}

#[derive(Debug, Serialize)]
struct ResultsView {
    page: PageContext,
    labels: PageLabels,
    query: String,
    timestamp: Option<String>,
    stats: SentimentStats,
    articles: Vec<ArticleView>,
    sources_summary: Vec<SourceCount>,
    charts_json: String,
}

// Donut + bar chart pair every aggregated page embeds
fn aggregate_charts(stats: &SentimentStats, summary: &[SourceCount]) -> String {
    let mut registry = ChartRegistry::new();
    registry.register(ChartSpec::sentiment_donut("sentimentDonut", stats));
    registry.register(ChartSpec::sources_bar("sourcesBar", summary));
    registry.to_script_json()
}

// ============================================================================
// Router
// ============================================================================

/// Create the dashboard router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Entry and auth
        .route("/", get(root))
        .route("/login", get(login_page).post(login_submit))
        .route("/guest-login", get(guest_login))
        .route("/logout", post(logout))
        // Pages (auth or guest)
        .route("/dashboard", get(dashboard))
        .route("/search-results", get(search_results))
        // Pages (auth only)
        .route("/favorite", get(favorite_page))
        .route("/history", get(history_page))
        .route("/history/detail", get(history_detail))
        .route("/master-data", get(master_data_page))
        // JSON API
        .route("/api/health", get(health_check))
        .route("/api/v1/article/{id}", get(article_proxy))
        .route("/api/favorites/{id}/toggle", post(toggle_favorite))
        .route("/api/history", delete(clear_history))
        .route("/api/history/{id}", delete(delete_history))
        .route("/api/sources", get(list_sources).post(create_source))
        .route("/api/sources/{id}", put(update_source).delete(delete_source))
        .with_state(state)
}

// ============================================================================
// Session Guards
// ============================================================================

async fn current_session(state: &AppState, headers: &HeaderMap) -> Option<SessionData> {
    let id = session_id_from_headers(headers, &state.config.session.cookie_name)?;
    state.sessions.get(id).await.ok()
}

// Pages browsable by guests and users alike
async fn page_session(state: &AppState, headers: &HeaderMap) -> Result<SessionData, Response> {
    match current_session(state, headers).await {
        Some(session) => Ok(session),
        None => Err(Redirect::to("/login").into_response()),
    }
}

// Pages that require a real login; guests bounce to the login form
async fn auth_session(state: &AppState, headers: &HeaderMap) -> Result<SessionData, Response> {
    match current_session(state, headers).await {
        Some(session) if session.is_authenticated() => Ok(session),
        _ => Err(Redirect::to("/login").into_response()),
    }
}

// JSON endpoints answer 401 instead of redirecting
async fn api_auth_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<SessionData, Response> {
    match current_session(state, headers).await {
        Some(session) if session.is_authenticated() => Ok(session),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new(session::SessionError::NotFound.to_string())),
        )
            .into_response()),
    }
}

fn page_context(title: &str, session: &SessionData) -> PageContext {
    PageContext::new(
        title,
        session.username().map(str::to_string),
        !session.is_authenticated(),
    )
}

fn render_page<T: Serialize>(state: &AppState, template: &str, data: &T) -> Response {
    match state.views.render(template, data) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(template, error = %e, "Failed to render page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

// Map a one-shot notice code from the query string to display text
fn notice_text(code: &str) -> Option<String> {
    match code {
        "empty-query" => Some(t!("search.empty_query").to_string()),
        "invalid-item" => Some(t!("history.invalid_item").to_string()),
        _ => None,
    }
}

// ============================================================================
// Entry and Auth Handlers
// ============================================================================

/// Root: logged-in users and guests land on the dashboard, others on login
async fn root(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    match current_session(&state, &headers).await {
        Some(_) => Redirect::to("/dashboard"),
        None => Redirect::to("/login"),
    }
}

#[derive(Debug, Serialize)]
struct LoginView {
    page: PageContext,
    login_label: String,
    guest_label: String,
    allow_guest: bool,
    error: Option<String>,
}

fn login_view(state: &AppState, error: Option<String>) -> LoginView {
    LoginView {
        page: PageContext::new(t!("app.title").to_string(), None, false),
        login_label: t!("nav.login").to_string(),
        guest_label: t!("nav.guest").to_string(),
        allow_guest: state.config.auth.allow_guest,
        error,
    }
}

async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    // Already signed in (or guest): skip the form
    if current_session(&state, &headers).await.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    render_page(&state, "login", &login_view(&state, None))
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    if !session::verify_credentials(&state.config.auth.users, &form.username, &form.password) {
        tracing::info!(username = %form.username, "Rejected login attempt");
        return render_page(
            &state,
            "login",
            &login_view(&state, Some(t!("login.invalid").to_string())),
        );
    }

    // Drop any previous session before issuing the new one
    if let Some(old) = session_id_from_headers(&headers, &state.config.session.cookie_name) {
        state.sessions.remove(old).await;
    }

    let session = state.sessions.create_authenticated(&form.username).await;
    tracing::info!(username = %form.username, "User signed in");

    (
        [(
            header::SET_COOKIE,
            session_cookie(&state.config.session.cookie_name, session.id),
        )],
        Redirect::to("/dashboard"),
    )
        .into_response()
}

/// Start an anonymous guest session
async fn guest_login(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !state.config.auth.allow_guest {
        return render_page(
            &state,
            "login",
            &login_view(&state, Some(t!("login.guest_disabled").to_string())),
        );
    }

    // Invalidate whatever session the cookie pointed at
    if let Some(old) = session_id_from_headers(&headers, &state.config.session.cookie_name) {
        state.sessions.remove(old).await;
    }

    let session = state.sessions.create_guest().await;
    tracing::debug!(session_id = %session.id, "Guest session started");

    (
        [(
            header::SET_COOKIE,
            session_cookie(&state.config.session.cookie_name, session.id),
        )],
        Redirect::to("/dashboard"),
    )
        .into_response()
}

/// Sign out users and guests alike
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(id) = session_id_from_headers(&headers, &state.config.session.cookie_name) {
        state.sessions.remove(id).await;
    }

    (
        [(
            header::SET_COOKIE,
            clear_session_cookie(&state.config.session.cookie_name),
        )],
        Redirect::to("/login"),
    )
        .into_response()
}

// ============================================================================
// Dashboard and Search Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct NoticeParams {
    notice: Option<String>,
}

async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<NoticeParams>,
) -> Response {
    let session = match page_session(&state, &headers).await {
        Ok(s) => s,
        Err(r) => return r,
    };

    let articles = state.backend.articles_or_empty(None, None).await;
    let stats = sentiment_stats(&articles);
    let summary = source_summary(&articles);
    let recent = state
        .backend
        .recent_articles_or_empty(state.config.ui.recent_limit)
        .await;

    let view = DashboardView {
        page: page_context(&t!("app.title"), &session)
            .with_flash(params.notice.as_deref().and_then(notice_text)),
        labels: PageLabels::localized(),
        charts_json: aggregate_charts(&stats, &summary),
        stats,
        recent_articles: ArticleView::from_records(&recent),
        sources_summary: summary,
    };

    render_page(&state, "dashboard", &view)
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: Option<String>,
}

async fn search_results(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Response {
    let session = match page_session(&state, &headers).await {
        Ok(s) => s,
        Err(r) => return r,
    };

    let query = params.query.as_deref().unwrap_or("").trim().to_string();
    if query.is_empty() {
        return Redirect::to("/dashboard?notice=empty-query").into_response();
    }

    // Record the search; a history failure must not break the results page
    if let Err(e) = state.backend.save_search(&query).await {
        tracing::warn!(error = %e, "Failed to save search history");
    }

    let articles = state.backend.articles_or_empty(Some(&query), None).await;
    let stats = sentiment_stats(&articles);
    let summary = source_summary(&articles);

    let view = ResultsView {
        page: page_context(&t!("app.title"), &session),
        labels: PageLabels::localized(),
        query,
        timestamp: None,
        charts_json: aggregate_charts(&stats, &summary),
        stats,
        articles: ArticleView::from_records(&articles),
        sources_summary: summary,
    };

    render_page(&state, "search-results", &view)
}

/// Proxy a single-article fetch for the detail modal
async fn article_proxy(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(r) = page_session(&state, &headers).await {
        return r;
    }

    match state.backend.article(id).await {
        Ok(article) => Json(article).into_response(),
        Err(BackendError::Http { status, .. }) => {
            let code =
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (code, Json(ErrorResponse::new("Failed to fetch article"))).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, article_id = id, "Article proxy failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Favorites Handlers
// ============================================================================

#[derive(Debug, Serialize)]
struct FavoritesView {
    page: PageContext,
    heading: String,
    favorites: Vec<ArticleView>,
}

async fn favorite_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = match auth_session(&state, &headers).await {
        Ok(s) => s,
        Err(r) => return r,
    };

    let favorites = state
        .backend
        .favorites_or_empty(state.config.ui.favorites_limit)
        .await;

    let view = FavoritesView {
        page: page_context(&t!("app.title"), &session),
        heading: t!("nav.favorite").to_string(),
        favorites: ArticleView::from_records(&favorites),
    };

    render_page(&state, "favorite", &view)
}

/// Flip an article's favorite flag and report the new state
async fn toggle_favorite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(r) = api_auth_session(&state, &headers).await {
        return r;
    }

    let was_favorite = match state.backend.check_favorite(id).await {
        Ok(status) => status.is_favorite,
        Err(e) => {
            tracing::warn!(error = %e, article_id = id, "Favorite check failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(t!("favorites.check_failed").to_string())),
            )
                .into_response();
        }
    };

    let result = if was_favorite {
        state.backend.remove_favorite(id).await
    } else {
        state.backend.add_favorite(id).await
    };

    match result {
        Ok(()) => Json(ApiResponse::success(FavoriteStatus {
            is_favorite: !was_favorite,
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, article_id = id, "Favorite toggle failed");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(t!("favorites.toggle_failed").to_string())),
            )
                .into_response()
        }
    }
}

// ============================================================================
// History Handlers
// ============================================================================

#[derive(Debug, Serialize)]
struct HistoryView {
    page: PageContext,
    heading: String,
    history: Vec<HistoryEntry>,
}

async fn history_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = match auth_session(&state, &headers).await {
        Ok(s) => s,
        Err(r) => return r,
    };

    let history = state
        .backend
        .search_history_or_empty(state.config.ui.history_limit)
        .await;

    let view = HistoryView {
        page: page_context(&t!("app.title"), &session),
        heading: t!("nav.history").to_string(),
        history,
    };

    render_page(&state, "history", &view)
}

#[derive(Debug, Deserialize)]
struct HistoryDetailParams {
    query: Option<String>,
    timestamp: Option<String>,
}

/// Re-run a saved search and render its aggregates
async fn history_detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HistoryDetailParams>,
) -> Response {
    let session = match auth_session(&state, &headers).await {
        Ok(s) => s,
        Err(r) => return r,
    };

    let query = params.query.as_deref().unwrap_or("").trim().to_string();
    if query.is_empty() {
        return Redirect::to("/history?notice=invalid-item").into_response();
    }

    let articles = state.backend.articles_or_empty(Some(&query), None).await;
    let stats = sentiment_stats(&articles);
    let summary = source_summary(&articles);

    let view = ResultsView {
        page: page_context(&t!("app.title"), &session),
        labels: PageLabels::localized(),
        query,
        timestamp: params.timestamp,
        charts_json: aggregate_charts(&stats, &summary),
        stats,
        articles: ArticleView::from_records(&articles),
        sources_summary: summary,
    };

    render_page(&state, "history-detail", &view)
}

async fn delete_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(r) = api_auth_session(&state, &headers).await {
        return r;
    }

    match state.backend.delete_search(id).await {
        Ok(()) => Json(ApiResponse::success_with_message(
            (),
            t!("history.deleted").to_string(),
        ))
        .into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        )
            .into_response(),
    }
}

async fn clear_history(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(r) = api_auth_session(&state, &headers).await {
        return r;
    }

    match state.backend.clear_search_history().await {
        Ok(()) => Json(ApiResponse::success_with_message(
            (),
            t!("history.cleared").to_string(),
        ))
        .into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        )
            .into_response(),
    }
}

// ============================================================================
// Master Data Handlers
// ============================================================================

#[derive(Debug, Serialize)]
struct MasterDataView {
    page: PageContext,
    heading: String,
    sources: Vec<NewsSource>,
}

async fn master_data_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = match auth_session(&state, &headers).await {
        Ok(s) => s,
        Err(r) => return r,
    };

    let view = MasterDataView {
        page: page_context(&t!("app.title"), &session),
        heading: t!("nav.master_data").to_string(),
        sources: state.backend.sources_or_empty().await,
    };

    render_page(&state, "master-data", &view)
}

async fn list_sources(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(r) = api_auth_session(&state, &headers).await {
        return r;
    }

    match state.backend.sources().await {
        Ok(sources) => Json(ApiResponse::success(sources)).into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct CreateSourceForm {
    name: String,
    base_url: String,
}

async fn create_source(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<CreateSourceForm>,
) -> Response {
    if let Err(r) = api_auth_session(&state, &headers).await {
        return r;
    }

    let name = form.name.trim();
    let base_url = form.base_url.trim();
    if name.is_empty() || name.len() > 100 {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("name must be 1-100 characters")),
        )
            .into_response();
    }
    if !base_url.starts_with("http") || base_url.len() > 500 {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("base_url must be a valid URL")),
        )
            .into_response();
    }

    let payload = NewSource::from_form(name.to_string(), base_url.to_string());
    match state.backend.create_source(&payload).await {
        Ok(source) => Json(ApiResponse::success_with_message(
            source,
            t!("sources.created").to_string(),
        ))
        .into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        )
            .into_response(),
    }
}

async fn update_source(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(patch): Json<SourcePatch>,
) -> Response {
    if let Err(r) = api_auth_session(&state, &headers).await {
        return r;
    }

    if patch.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(t!("sources.empty_patch").to_string())),
        )
            .into_response();
    }

    match state.backend.update_source(id, &patch).await {
        Ok(source) => Json(ApiResponse::success_with_message(
            source,
            t!("sources.updated").to_string(),
        ))
        .into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        )
            .into_response(),
    }
}

async fn delete_source(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(r) = api_auth_session(&state, &headers).await {
        return r;
    }

    match state.backend.delete_source(id).await {
        Ok(()) => Json(ApiResponse::success_with_message(
            (),
            t!("sources.deleted").to_string(),
        ))
        .into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        )
            .into_response(),
    }
}

// ============================================================================
// Health Handler
// ============================================================================

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let backend_reachable = state.backend.health().await;

    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        backend_reachable,
    }))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success("test data");
        assert!(response.success);
        assert!(response.data.is_some());
        assert!(response.error.is_none());
    }

    #[test]
    fn test_api_response_message() {
        let response = ApiResponse::success_with_message((), "done");
        assert_eq!(response.message.as_deref(), Some("done"));
    }

    #[test]
    fn test_error_response() {
        let response = ErrorResponse::new("test error");
        assert!(!response.success);
        assert_eq!(response.error, "test error");
    }

    #[test]
    fn test_article_view_resolves_defaults() {
        let record = ArticleRecord::with_sentiment_and_source(None, None);
        let view = ArticleView::from_record(&record);
        assert_eq!(view.source, "Unknown");
        assert!(!view.sentiment.is_empty());
    }

    #[test]
    fn test_notice_text_known_codes() {
        assert!(notice_text("empty-query").is_some());
        assert!(notice_text("invalid-item").is_some());
        assert!(notice_text("bogus").is_none());
    }

    #[test]
    fn test_aggregate_charts_embeds_both() {
        let stats = sentiment_stats(&[]);
        let json = aggregate_charts(&stats, &[]);
        assert!(json.contains("sentimentDonut"));
        assert!(json.contains("sourcesBar"));
    }
}
