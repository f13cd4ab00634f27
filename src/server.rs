//! HTTP host for the language switcher.
//!
//! Serves a minimal admin page with the switcher embedded, the form endpoint
//! its menu items post to, and a backend `switch-language` API the
//! [`HttpApiClient`] can talk to when no other backend is configured.
//! The chosen language travels back to the page as a `lang` query parameter
//! and is remembered in a `lang` cookie.

use crate::api_client::{
    HttpApiClient, LanguageApi, SwitchError, SwitchLanguageRequest, SwitchLanguageResponse,
    SWITCH_LANGUAGE_PATH,
};
use crate::config::Config;
use crate::i18n::{I18n, I18nContext, SwitcherMetrics, TranslationStore};
use crate::markup::{render_admin_page, render_error_page, render_switcher};
use crate::navigation::RedirectNavigator;
use crate::switcher::LanguageSwitcher;
use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use url::form_urlencoded::{self, byte_serialize};

/// Name of the cookie remembering the chosen language.
pub const LANGUAGE_COOKIE: &str = "lang";

/// Shared state for every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Context at the default language; requests derive their own from it
    pub i18n: I18n,
    pub api: Arc<dyn LanguageApi>,
    /// Renders every page and caches the language list; selections run on
    /// per-request copies so concurrent admins never block each other
    pub switcher: Arc<LanguageSwitcher>,
}

impl AppState {
    pub fn new(config: Config, i18n: I18n, api: Arc<dyn LanguageApi>) -> Self {
        let switcher = LanguageSwitcher::new(Arc::clone(&api), Arc::new(RedirectNavigator::new()));
        Self {
            config: Arc::new(config),
            i18n,
            api,
            switcher: Arc::new(switcher),
        }
    }

    /// Build the state from configuration: translations plus the HTTP API client.
    pub fn from_config(config: Config) -> Result<Self> {
        let i18n = build_i18n(&config)?;
        let api = HttpApiClient::new(&config.api_base_url, config.switch_timeout)?;
        Ok(Self::new(config, i18n, Arc::new(api)))
    }

    /// Languages offered in the menu, shared across requests.
    pub fn available_languages(&self) -> Arc<[String]> {
        self.switcher.available_languages(&self.i18n)
    }

    fn is_selectable(&self, code: &str) -> bool {
        self.available_languages().iter().any(|c| c == code)
    }
}

/// Build the i18n context described by the configuration.
///
/// Bundled labels are registered under the default language, which is also
/// the lookup fallback. A configured bundle file overrides them.
pub fn build_i18n(config: &Config) -> Result<I18n> {
    let mut store = TranslationStore::with_bundled_labels(&config.default_language);

    if let Some(path) = &config.translations_path {
        let added = store.merge_file(path)?;
        info!("Loaded {} translations from {}", added, path);
    }

    Ok(I18n::new(
        config.default_language.clone(),
        config.default_language.clone(),
        Some(config.supported_languages.clone()),
        store,
    ))
}

pub fn router(state: AppState) -> Router {
    let admin_root = state.config.admin_root_path.clone();
    let select_route = format!("{}/:code", state.config.switch_action_base());

    Router::new()
        .route("/health", get(health))
        .route(&admin_root, get(admin_page))
        .route(&select_route, post(select_language))
        .route(SWITCH_LANGUAGE_PATH, post(api_switch_language))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    lang: Option<String>,
}

async fn admin_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    let requested = query.lang.filter(|code| state.is_selectable(code));
    let remembered = cookie_value(&headers, LANGUAGE_COOKIE).filter(|code| state.is_selectable(code));

    let language = requested
        .clone()
        .or(remembered)
        .unwrap_or_else(|| state.config.default_language.clone());

    let i18n = state.i18n.with_language(language);
    let view = state.switcher.render(&i18n);

    let title = i18n.translate_component("AdminPage.title", "Admin");
    let switcher_html = render_switcher(view.as_ref(), &state.config.switch_action_base());
    let page = render_admin_page(i18n.language(), &title, &switcher_html);

    let mut response = Html(page).into_response();

    if let Some(code) = requested {
        let encoded: String = byte_serialize(code.as_bytes()).collect();
        let cookie = format!("{}={}; Path=/; SameSite=Lax", LANGUAGE_COOKIE, encoded);
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }

    response
}

async fn select_language(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    if !state.is_selectable(&code) {
        warn!("Rejected switch to unknown language '{}'", code);
        return (
            StatusCode::BAD_REQUEST,
            Html(render_error_page(
                "Unknown language",
                &format!("'{}' is not an available language.", code),
            )),
        )
            .into_response();
    }

    let navigator = Arc::new(RedirectNavigator::new());
    let switcher = state.switcher.with_navigator(navigator.clone());

    match switcher.select(&code).await {
        Ok(_) => match navigator.take_target() {
            Some(target) => see_other(&target),
            None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        },
        Err(e) => switch_failed(&e),
    }
}

/// `303 See Other` to `target`, or the failure page when it cannot be a `Location`.
fn see_other(target: &str) -> Response {
    match HeaderValue::try_from(target) {
        Ok(location) => (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response(),
        Err(_) => {
            warn!("Redirect target {:?} is not a valid Location header", target);
            switch_failed(&SwitchError::InvalidRedirect(target.to_string()))
        }
    }
}

fn switch_failed(error: &SwitchError) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Html(render_error_page(
            "Language switch failed",
            &error.to_string(),
        )),
    )
        .into_response()
}

async fn api_switch_language(
    State(state): State<AppState>,
    Json(request): Json<SwitchLanguageRequest>,
) -> Response {
    if !state.is_selectable(&request.language) {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": format!("Unknown language: '{}'", request.language)
            })),
        )
            .into_response();
    }

    let encoded: String = byte_serialize(request.language.as_bytes()).collect();
    let redirect_url = format!("{}?lang={}", state.config.admin_root_path, encoded);
    info!("Switching language to '{}'", request.language);

    Json(SwitchLanguageResponse { redirect_url }).into_response()
}

async fn metrics() -> Json<crate::i18n::MetricsReport> {
    Json(SwitcherMetrics::global().report())
}

/// Extract a cookie value from request headers, percent-decoded.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .flat_map(|pair| form_urlencoded::parse(pair.trim().as_bytes()))
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
