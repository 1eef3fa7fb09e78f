use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://exhibitors.gulfood.com";
pub const DEFAULT_EVENT_PATH: &str = "/gulfood-2026/Exhibitor";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/145.0.0.0 Safari/537.36";

pub const PAGE_SIZE: usize = 10;
pub const CHECKPOINT_EVERY: usize = 20;

/// Everything that identifies the target directory site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub base_url: String,
    pub event_path: String,
    pub user_agent: String,
    /// Session cookies sent with the first request.
    pub cookies: Vec<(String, String)>,
    /// Substrings marking links that point back at the show itself.
    pub own_domains: Vec<String>,
    /// Brand token used to reject the organiser's own email addresses.
    pub brand: String,
}

impl SiteConfig {
    /// Listing endpoint that answers the paginated POST.
    pub fn api_url(&self) -> String {
        format!("{}{}/fetchExhibitors", self.base_url, self.event_path)
    }

    pub fn referer(&self) -> String {
        format!("{}{}", self.base_url, self.event_path)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            event_path: DEFAULT_EVENT_PATH.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cookies: vec![
                ("_ga".to_string(), "GA1.1.876438033.1771852033".to_string()),
                ("ci_sessions".to_string(), "bg9kgm8l1464784p81jja1gobc6trjnt".to_string()),
            ],
            own_domains: vec![
                "gulfood.com".to_string(),
                "exhibitors.gulfood".to_string(),
                "map.gulfood".to_string(),
            ],
            brand: "gulfood".to_string(),
        }
    }
}

/// Knobs for a single scrape run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub output_dir: PathBuf,
    pub page_size: usize,
    pub checkpoint_every: usize,
    /// `None` or `Some(0)` means no bound.
    pub max_pages: Option<u32>,
    pub profile_delay: Duration,
    pub page_delay: Duration,
    pub partial_exports: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            output_dir: PathBuf::from("output"),
            page_size: PAGE_SIZE,
            checkpoint_every: CHECKPOINT_EVERY,
            max_pages: None,
            profile_delay: Duration::from_secs(1),
            page_delay: Duration::from_secs(2),
            partial_exports: false,
        }
    }
}

impl RunConfig {
    pub fn page_limit(&self) -> Option<u32> {
        self.max_pages.filter(|&n| n > 0)
    }
}
