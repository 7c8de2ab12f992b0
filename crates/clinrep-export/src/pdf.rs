use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;

use crate::error::ExportError;
use crate::styles::PageSetup;

pub const CONTENT_TYPE: &str = "application/pdf";
pub const FILE_NAME: &str = "Clinical_Report.pdf";

/// Executable names tried on `PATH`, in order.
const BROWSER_NAMES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
];

/// Well-known install locations outside `PATH`.
const INSTALL_PATHS: &[&str] = &[
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
];

/// Renders HTML to PDF with a headless Chromium-family browser.
///
/// One browser process per call, in its own scratch directory and profile,
/// so concurrent renders never share state. The process is killed if it
/// outlives `timeout`.
#[derive(Debug, Clone)]
pub struct HeadlessChrome {
    binary: Option<PathBuf>,
    timeout: Duration,
}

impl HeadlessChrome {
    /// `binary` overrides discovery; `None` searches `PATH` and the usual
    /// install locations on each render.
    pub fn new(binary: Option<PathBuf>, timeout: Duration) -> Self {
        Self { binary, timeout }
    }

    pub fn discover_binary(&self) -> Result<PathBuf, ExportError> {
        if let Some(configured) = &self.binary {
            return Ok(configured.clone());
        }
        find_on_path()
            .or_else(|| {
                INSTALL_PATHS
                    .iter()
                    .map(PathBuf::from)
                    .find(|p| p.is_file())
            })
            .ok_or(ExportError::BrowserNotFound)
    }

    pub async fn render(&self, html: &str, setup: &PageSetup) -> Result<Vec<u8>, ExportError> {
        let binary = self.discover_binary()?;
        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join("report.html");
        let output = workdir.path().join("report.pdf");

        tokio::fs::write(&input, prepare_html(html, setup)).await?;

        let child = Command::new(&binary)
            .args(browser_args(workdir.path(), &input, &output, setup))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExportError::BrowserLaunch {
                path: binary.clone(),
                source,
            })?;

        let started = Instant::now();
        let finished = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                tracing::warn!(timeout = ?self.timeout, "browser render timed out, killing process");
                ExportError::BrowserTimeout(self.timeout)
            })??;

        if !finished.status.success() {
            let stderr = String::from_utf8_lossy(&finished.stderr);
            return Err(ExportError::Pdf(format!(
                "browser exited with {}: {}",
                finished.status,
                last_line(&stderr)
            )));
        }

        let bytes = match tokio::fs::read(&output).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return Err(ExportError::Pdf(format!("browser produced no output: {e}")));
            }
        };
        if !bytes.starts_with(b"%PDF") {
            return Err(ExportError::Pdf("browser output is not a PDF".to_string()));
        }

        tracing::info!(
            bytes = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "pdf rendered"
        );
        Ok(bytes)
    }
}

/// Command line for one print-to-PDF run.
pub fn browser_args(workdir: &Path, input: &Path, output: &Path, setup: &PageSetup) -> Vec<OsString> {
    let mut profile = OsString::from("--user-data-dir=");
    profile.push(workdir.join("profile"));
    let mut print_to = OsString::from("--print-to-pdf=");
    print_to.push(output);

    vec![
        OsString::from("--headless"),
        OsString::from("--disable-gpu"),
        OsString::from("--no-sandbox"),
        OsString::from("--no-first-run"),
        OsString::from("--hide-scrollbars"),
        OsString::from("--run-all-compositor-stages-before-draw"),
        OsString::from("--no-pdf-header-footer"),
        OsString::from(format!("--virtual-time-budget={}", setup.settle_budget_ms)),
        profile,
        print_to,
        OsString::from(file_url(input)),
    ]
}

/// Inject the print stylesheet and `<base>` element into the document head.
pub fn prepare_html(html: &str, setup: &PageSetup) -> String {
    let mut injected = String::new();
    if let Some(base) = &setup.base_href {
        injected.push_str(&format!("<base href=\"{}\">", tera::escape_html(base)));
    }
    injected.push_str(&format!("<style>{}</style>", setup.print_css()));

    match head_open_end(html) {
        Some(at) => {
            let mut out = String::with_capacity(html.len() + injected.len());
            out.push_str(&html[..at]);
            out.push_str(&injected);
            out.push_str(&html[at..]);
            out
        }
        None => format!("{injected}{html}"),
    }
}

/// Byte offset just past the `<head ...>` open tag. `<header>` does not count.
fn head_open_end(html: &str) -> Option<usize> {
    let lower = html.to_ascii_lowercase();
    let mut from = 0;
    while let Some(found) = lower[from..].find("<head") {
        let start = from + found;
        let after = start + "<head".len();
        match lower.as_bytes().get(after) {
            Some(b'>') => return Some(after + 1),
            Some(c) if c.is_ascii_whitespace() => {
                return lower[after..].find('>').map(|end| after + end + 1);
            }
            _ => from = after,
        }
    }
    None
}

fn file_url(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    if raw.starts_with('/') {
        format!("file://{raw}")
    } else {
        format!("file:///{raw}")
    }
}

fn find_on_path() -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path).find_map(|dir| {
        BROWSER_NAMES.iter().find_map(|name| {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
            let exe = candidate.with_extension("exe");
            exe.is_file().then_some(exe)
        })
    })
}

fn last_line(stderr: &str) -> &str {
    stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("no diagnostic output")
}
