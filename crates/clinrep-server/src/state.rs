use std::sync::Arc;

use clinrep_export::pdf::HeadlessChrome;
use clinrep_export::styles::PageSetup;
use clinrep_export::template::TemplateStore;
use clinrep_instruments::ScoreTable;
use clinrep_instruments::tables::quotient::QuotientTable;

use crate::config::ServerConfig;

/// Shared application state, injected into all route handlers via Axum state.
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub templates: Arc<TemplateStore>,
    pub scores: Arc<dyn ScoreTable>,
    pub pdf: Arc<HeadlessChrome>,
    pub page_setup: Arc<PageSetup>,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            templates: Arc::new(TemplateStore::new(
                &config.template_dir,
                config.cache_template,
            )),
            scores: Arc::new(QuotientTable),
            pdf: Arc::new(HeadlessChrome::new(
                config.chrome_path.clone(),
                config.pdf_timeout,
            )),
            page_setup: Arc::new(PageSetup::a4().with_base_href(&config.public_url)),
        }
    }
}
