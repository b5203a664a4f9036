//! HTML rendering with the Handlebars template engine
//!
//! Templates are embedded at compile time; the engine is built once at
//! server startup and shared read-only across requests.

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;
use crate::i18n::t;

// Embedded page templates
const LAYOUT_NAV: &str = include_str!("../../templates/nav.hbs");
const CHARTS_SCRIPT: &str = include_str!("../../templates/charts-script.hbs");
const LOGIN: &str = include_str!("../../templates/login.hbs");
const DASHBOARD: &str = include_str!("../../templates/dashboard.hbs");
const SEARCH_RESULTS: &str = include_str!("../../templates/search-results.hbs");
const FAVORITE: &str = include_str!("../../templates/favorite.hbs");
const HISTORY: &str = include_str!("../../templates/history.hbs");
const HISTORY_DETAIL: &str = include_str!("../../templates/history-detail.hbs");
const MASTER_DATA: &str = include_str!("../../templates/master-data.hbs");

/// Fields shared by every rendered page
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    /// Localized page title
    pub title: String,

    /// Active UI locale
    pub locale: String,

    /// Logged-in username, absent for guests
    pub username: Option<String>,

    /// True when browsing as guest
    pub is_guest: bool,

    /// One-shot notice carried via query string
    pub flash: Option<String>,

    /// Localized navigation labels
    pub nav: NavLabels,
}

/// Localized labels for the shared navigation bar
#[derive(Debug, Clone, Serialize)]
pub struct NavLabels {
    pub dashboard: String,
    pub favorite: String,
    pub history: String,
    pub master_data: String,
    pub logout: String,
    pub search_placeholder: String,
}

impl PageContext {
    /// Build a context for the given visitor
    pub fn new(title: impl Into<String>, username: Option<String>, is_guest: bool) -> Self {
        Self {
            title: title.into(),
            locale: crate::i18n::current_locale(),
            username,
            is_guest,
            flash: None,
            nav: NavLabels {
                dashboard: t!("nav.dashboard").to_string(),
                favorite: t!("nav.favorite").to_string(),
                history: t!("nav.history").to_string(),
                master_data: t!("nav.master_data").to_string(),
                logout: t!("nav.logout").to_string(),
                search_placeholder: t!("search.placeholder").to_string(),
            },
        }
    }

    /// Attach a one-shot flash message
    pub fn with_flash(mut self, flash: Option<String>) -> Self {
        self.flash = flash;
        self
    }
}

/// Handlebars registry with all dashboard templates
pub struct ViewEngine {
    handlebars: Handlebars<'static>,
}

impl ViewEngine {
    /// Create the engine and register every embedded template
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Partials shared across pages
        handlebars.register_partial("nav", LAYOUT_NAV)?;
        handlebars.register_partial("charts_script", CHARTS_SCRIPT)?;

        handlebars.register_template_string("login", LOGIN)?;
        handlebars.register_template_string("dashboard", DASHBOARD)?;
        handlebars.register_template_string("search-results", SEARCH_RESULTS)?;
        handlebars.register_template_string("favorite", FAVORITE)?;
        handlebars.register_template_string("history", HISTORY)?;
        handlebars.register_template_string("history-detail", HISTORY_DETAIL)?;
        handlebars.register_template_string("master-data", MASTER_DATA)?;

        Ok(Self { handlebars })
    }

    /// Render a registered template with the given data
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        Ok(self.handlebars.render(name, data)?)
    }

    /// Names of all registered templates
    pub fn template_names(&self) -> Vec<String> {
        self.handlebars
            .get_templates()
            .keys()
            .cloned()
            .collect()
    }
}
