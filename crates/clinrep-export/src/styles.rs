use serde::{Deserialize, Serialize};

/// Page configuration for PDF export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSetup {
    /// Paper width in millimetres.
    pub paper_width_mm: f64,

    /// Paper height in millimetres.
    pub paper_height_mm: f64,

    /// Page margin in millimetres (applied uniformly). The report layout
    /// carries its own padding, so the default is zero.
    pub margin_mm: f64,

    /// Print background colours and images.
    pub print_background: bool,

    /// Virtual time the browser may spend loading before it prints. The
    /// browser prints early once the network is idle.
    pub settle_budget_ms: u64,

    /// Base URL that relative asset references resolve against, typically
    /// the public URL of the running server.
    pub base_href: Option<String>,
}

impl PageSetup {
    /// A4 portrait.
    pub fn a4() -> Self {
        Self {
            paper_width_mm: 210.0,
            paper_height_mm: 297.0,
            margin_mm: 0.0,
            print_background: true,
            settle_budget_ms: 10_000,
            base_href: None,
        }
    }

    pub fn with_base_href(mut self, base_href: impl Into<String>) -> Self {
        self.base_href = Some(base_href.into());
        self
    }

    /// Print stylesheet injected into the page before printing.
    pub fn print_css(&self) -> String {
        let mut css = format!(
            "@page {{ size: {}mm {}mm; margin: {}mm; }}",
            self.paper_width_mm, self.paper_height_mm, self.margin_mm
        );
        if self.print_background {
            css.push_str(
                " html, body { -webkit-print-color-adjust: exact; print-color-adjust: exact; }",
            );
        }
        css
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::a4()
    }
}
