use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BIND: &str = "0.0.0.0:8000";
const DEFAULT_TEMPLATE_DIR: &str = "template";
const DEFAULT_PDF_TIMEOUT_SECS: u64 = 30;

/// Server settings, read from `CLINREP_*` environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Directory holding `complete_report.html` and its assets.
    pub template_dir: PathBuf,
    /// Compile the template once at first use instead of on every request.
    pub cache_template: bool,
    pub chrome_path: Option<PathBuf>,
    pub pdf_timeout: Duration,
    /// Public base URL the browser resolves relative asset links against.
    /// Always ends with `/`.
    pub public_url: String,
    /// Connection string for the submission store. Nothing in the report
    /// routes reads from it; it is carried for deployments that set it.
    pub records_uri: Option<String>,
}

impl ServerConfig {
    /// Load from the process environment, after merging a `.env` file if present.
    pub fn from_env() -> eyre::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("CLINREP_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind_raw
            .trim()
            .parse()
            .map_err(|e| eyre::eyre!("invalid CLINREP_BIND {bind_raw:?}: {e}"))?;

        let template_dir = get("CLINREP_TEMPLATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR));

        let cache_template = match get("CLINREP_CACHE_TEMPLATE") {
            None => true,
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| eyre::eyre!("invalid CLINREP_CACHE_TEMPLATE {raw:?}"))?,
        };

        let chrome_path = get("CLINREP_CHROME_PATH").map(PathBuf::from);

        let pdf_timeout = match get("CLINREP_PDF_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_PDF_TIMEOUT_SECS),
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| eyre::eyre!("invalid CLINREP_PDF_TIMEOUT_SECS {raw:?}: {e}"))?;
                if secs == 0 {
                    eyre::bail!("CLINREP_PDF_TIMEOUT_SECS must be greater than zero");
                }
                Duration::from_secs(secs)
            }
        };

        let mut public_url = get("CLINREP_PUBLIC_URL")
            .map(|u| u.trim().to_string())
            .unwrap_or_else(|| format!("http://127.0.0.1:{}/", bind.port()));
        if !public_url.ends_with('/') {
            public_url.push('/');
        }

        Ok(Self {
            bind,
            template_dir,
            cache_template,
            chrome_path,
            pdf_timeout,
            public_url,
            records_uri: get("CLINREP_RECORDS_URI"),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
