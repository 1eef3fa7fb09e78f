use log::{error, info, warn};

use crate::client::PageSource;
use crate::config::{RunConfig, SiteConfig};
use crate::delay_manager::Pacing;
use crate::error::Result;
use crate::export;
use crate::extractor::Extractor;
use crate::list_parser::ListParser;
use crate::record::ExhibitorRecord;
use crate::resume_manager;

/// Why the page loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Listing fetch failed or came back without items.
    EndOfData,
    /// The configured page bound was reached.
    PageLimit,
}

/// Drives pagination over a `PageSource` and accumulates records.
pub struct Scraper<S: PageSource> {
    source: S,
    list_parser: ListParser,
    extractor: Extractor,
    run: RunConfig,
    pacing: Pacing,
}

impl<S: PageSource> Scraper<S> {
    pub fn new(source: S, site: &SiteConfig, run: RunConfig) -> Result<Self> {
        Ok(Scraper {
            list_parser: ListParser::new(&site.base_url)?,
            extractor: Extractor::new(site)?,
            pacing: Pacing::from_config(&run),
            source,
            run,
        })
    }

    /// Overrides the configured delays.
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn scrape_all(&self) -> Vec<ExhibitorRecord> {
        let mut all = Vec::new();
        let reason = self.run_pages(&mut all);
        info!(
            "Scraping finished ({:?}). Total companies: {}",
            reason,
            all.len()
        );
        all
    }

    /// The page loop proper. Records already pushed to `all` survive whatever
    /// stops the loop.
    pub fn run_pages(&self, all: &mut Vec<ExhibitorRecord>) -> StopReason {
        let page_size = self.run.page_size;
        let limit = self.run.page_limit();
        let mut page: u32 = 1;
        let mut offset = 0;

        info!("Starting exhibitor extraction...");
        loop {
            info!("Fetching page {} (start={})...", page, offset);
            let Some(html) = self.source.fetch_list_page(offset, page_size) else {
                return StopReason::EndOfData;
            };

            let mut companies = self.list_parser.parse(&html);
            if companies.is_empty() {
                info!("Reached the end of the exhibitor list");
                return StopReason::EndOfData;
            }

            let total = companies.len();
            for (i, company) in companies.iter_mut().enumerate() {
                self.enrich(company, i + 1, total);
            }

            all.extend(companies);
            info!("Companies on this page: {}", total);
            info!("Companies so far: {}", all.len());

            self.checkpoint(all, page);

            if limit.is_some_and(|max| page >= max) {
                return StopReason::PageLimit;
            }
            offset += page_size;
            page += 1;
            self.pacing.page_delay();
        }
    }

    fn enrich(&self, company: &mut ExhibitorRecord, index: usize, total: usize) {
        if !company.has_profile() {
            warn!("  Company '{}' has no profile link!", company.company);
            return;
        }
        let short: String = company.company.chars().take(30).collect();
        info!("  Fetching details {}/{}: {}...", index, total, short);

        match self.source.fetch_profile_page(&company.profile_url) {
            Some(html) => company.apply(self.extractor.extract(&html)),
            None => warn!("  No details for '{}'", company.company),
        }
        self.pacing.profile_delay();
    }

    /// Best-effort backups; a failed write is logged and the run goes on.
    fn checkpoint(&self, all: &[ExhibitorRecord], page: u32) {
        let count = all.len();
        if self.run.checkpoint_every > 0 && count % self.run.checkpoint_every == 0 {
            let name = resume_manager::backup_file_name(count);
            if let Err(e) = resume_manager::save_snapshot(all, &self.run.output_dir, Some(&name)) {
                error!("Failed to write backup {}: {}", name, e);
            }
        }
        if self.run.partial_exports {
            if let Err(e) = export::export_partial(all, &self.run.output_dir, page) {
                error!("Failed to write partial export for page {}: {}", page, e);
            }
        }
    }
}
