// src/pipeline/lookup.rs

//! Per-movie lookup and the sequential batch loop.

use std::path::PathBuf;

use crate::error::{ParseFailure, Result};
use crate::models::{CanonicalRecord, Config, ImdbId, MovieReport, ParsedName, SearchQuery};
use crate::services::{
    MetadataProvider, PosterDownloader, RatingScraper, SearchResultMatcher, TitleSearch, parser,
    query, verifier,
};
use crate::utils::http::PageFetcher;
use crate::utils::log::Reporter;
use crate::utils::url::extract_imdb_id;

/// Optional steps of a lookup.
#[derive(Debug, Clone, Default)]
pub struct LookupOptions {
    /// Cross-check the match against the metadata service
    pub verify: bool,

    /// Parent directory of movie folders to save posters into
    pub poster_dir: Option<PathBuf>,
}

/// How one movie name was resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// Identity found and rating read
    Rated(MovieReport),

    /// The folder name did not parse
    Unparsed(ParseFailure),

    /// No acceptable search row, or its link carried no identifier
    NotFound { query: SearchQuery },
}

/// Counts for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub rated: usize,
    pub unparsed: usize,
    pub not_found: usize,
    pub failed: usize,
}

/// Resolves movie names one at a time.
pub struct MovieLookup<'a> {
    search: TitleSearch<'a>,
    matcher: &'a SearchResultMatcher,
    rating: RatingScraper<'a>,
    posters: PosterDownloader<'a>,
    metadata: Option<&'a dyn MetadataProvider>,
    reporter: &'a dyn Reporter,
    base_url: &'a str,
    options: LookupOptions,
}

impl<'a> MovieLookup<'a> {
    /// Wire up the lookup services; fails on invalid selectors.
    pub fn new(
        config: &'a Config,
        fetcher: &'a dyn PageFetcher,
        matcher: &'a SearchResultMatcher,
        metadata: Option<&'a dyn MetadataProvider>,
        reporter: &'a dyn Reporter,
        options: LookupOptions,
    ) -> Result<Self> {
        Ok(Self {
            search: TitleSearch::new(fetcher, &config.search, &config.selectors, matcher)?,
            matcher,
            rating: RatingScraper::new(fetcher, &config.search.base_url, &config.selectors)?,
            posters: PosterDownloader::new(fetcher, &config.metadata.image_base),
            metadata,
            reporter,
            base_url: &config.search.base_url,
            options,
        })
    }

    /// Resolve one raw folder name.
    ///
    /// `Err` is reserved for transport and page failures; "cannot parse" and
    /// "no match" are ordinary outcomes.
    pub fn lookup(&self, name: &str) -> Result<LookupOutcome> {
        let parsed = match parser::parse(name) {
            Ok(parsed) => parsed,
            Err(failure) => {
                self.reporter.warn(&failure.to_string());
                return Ok(LookupOutcome::Unparsed(failure));
            }
        };
        log::info!("Movie Title and Year: {} {}", parsed.title(), parsed.year);

        let query = query::build_query(&parsed);
        let rows = self.search.candidates(&query)?;

        let Some(href) = self.matcher.find_match(&rows, &parsed) else {
            self.reporter.warn(&format!("No IMDB ID found for '{}'.", query));
            return Ok(LookupOutcome::NotFound { query });
        };
        let Some(imdb_id) = extract_imdb_id(self.base_url, &href) else {
            self.reporter
                .warn(&format!("No IMDB ID found in matched link '{}'.", href));
            return Ok(LookupOutcome::NotFound { query });
        };
        log::info!("Matched {} -> {}", name, imdb_id);

        // Fetched at most once per movie, shared by poster and verification.
        let mut record: Option<CanonicalRecord> = None;

        if let Some(dir) = &self.options.poster_dir {
            if !dir.join(name).is_dir() {
                self.reporter.warn(&format!(
                    "Movie folder {} not found in {}; skipping poster",
                    name,
                    dir.display()
                ));
            } else if let Some(r) = self.canonical_record(&imdb_id, &mut record) {
                match r.poster_path.as_deref() {
                    Some(poster_path) => {
                        if let Err(e) = self.posters.download(poster_path, dir, name) {
                            self.reporter
                                .warn(&format!("Poster download failed for {}: {}", name, e));
                        }
                    }
                    None => self.reporter.warn(&format!("No poster available for {}", imdb_id)),
                }
            }
        }

        let page = self.rating.fetch(&href)?;

        let verification = if self.options.verify {
            self.reporter.info("Verifying... ...");
            self.canonical_record(&imdb_id, &mut record).map(|r| {
                let outcome = verifier::verify(
                    &href,
                    &page.displayed_title,
                    Some(parsed.year.as_str()),
                    r,
                );
                self.reporter.result(&format!("    {}", outcome.reason()));
                for note in &outcome.notes {
                    self.reporter.result(&format!("    {}", note));
                }
                outcome
            })
        } else {
            None
        };

        let report = MovieReport {
            name: name.to_string(),
            title: display_title(&parsed),
            year: parsed.year.clone(),
            imdb_id,
            url: self.rating.page_url(&href)?,
            rating: page.rating,
            verification,
        };
        self.reporter.result(&report.to_string());
        Ok(LookupOutcome::Rated(report))
    }

    /// Fetch the canonical record into `slot` unless it is already there.
    ///
    /// Failures are reported and yield `None`; they never fail the movie.
    fn canonical_record<'r>(
        &self,
        id: &ImdbId,
        slot: &'r mut Option<CanonicalRecord>,
    ) -> Option<&'r CanonicalRecord> {
        if slot.is_none() {
            let Some(metadata) = self.metadata else {
                self.reporter
                    .warn("Metadata service not configured (set TMDB_API_KEY); skipping");
                return None;
            };
            match metadata.canonical_record(id) {
                Ok(r) => *slot = Some(r),
                Err(e) => {
                    self.reporter
                        .warn(&format!("Metadata lookup failed for {}: {}", id, e));
                    return None;
                }
            }
        }
        slot.as_ref()
    }
}

/// Title with the series marker, e.g. "Daddys Home 2".
fn display_title(parsed: &ParsedName) -> String {
    match &parsed.series {
        Some(series) => format!("{} {}", parsed.title(), series),
        None => parsed.title(),
    }
}

/// Look up every name in order. A failing movie is logged and skipped.
pub fn run_batch(lookup: &MovieLookup<'_>, names: &[String]) -> (Vec<LookupOutcome>, BatchSummary) {
    let reporter = lookup.reporter;
    let mut outcomes = Vec::with_capacity(names.len());
    let mut summary = BatchSummary {
        total: names.len(),
        ..BatchSummary::default()
    };

    for (i, name) in names.iter().enumerate() {
        reporter.info(&format!("[{}/{}] {}", i + 1, names.len(), name));

        match lookup.lookup(name) {
            Ok(outcome) => {
                match &outcome {
                    LookupOutcome::Rated(_) => summary.rated += 1,
                    LookupOutcome::Unparsed(_) => summary.unparsed += 1,
                    LookupOutcome::NotFound { .. } => summary.not_found += 1,
                }
                outcomes.push(outcome);
            }
            Err(e) => {
                summary.failed += 1;
                log::warn!("Lookup failed for {}: {}", name, e);
                reporter.error(&format!("Lookup failed for {}: {}", name, e));
            }
        }
    }

    reporter.summary(
        "Movie lookup",
        &[
            ("Total", summary.total.to_string()),
            ("Rated", summary.rated.to_string()),
            ("Unparsed", summary.unparsed.to_string()),
            ("Not found", summary.not_found.to_string()),
            ("Failed", summary.failed.to_string()),
        ],
    );

    (outcomes, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::metadata::tests::FakeMetadata;
    use crate::services::search::tests::{
        FakeFetcher, NO_RESULTS_PAGE, RELAXED_WILSON, STRICT_WILSON, WILSON_RESULTS,
    };
    use crate::utils::log::{LogLevel, RecordingReporter};

    const WILSON_NAME: &str = "Wilson.2017.LIMITED.720p.BluRay.x264-GECKOS";
    const WILSON_PAGE_URL: &str = "http://www.imdb.com/title/tt3286484/?ref_=fn_ft_tt_2";
    const WILSON_PAGE: &str = r#"<html><body>
        <h1 itemprop="name">Wilson (2017)</h1>
        <span itemprop="ratingValue">5.7</span>
        </body></html>"#;

    const HEAT_STRICT: &str =
        "http://www.imdb.com/find?ref_=nv_sr_fn&q=Heat+1995&s=tt&ttype=ft&ref_=fn_ft";
    const HEAT_RESULTS: &str = r#"<html><body><table class="findList">
        <tr><td><a href="/title/tt0113277/">Heat Wave</a> (1995)</td></tr>
        </table></body></html>"#;

    fn wilson_fetcher() -> FakeFetcher {
        FakeFetcher::default()
            .with(STRICT_WILSON, WILSON_RESULTS)
            .with(WILSON_PAGE_URL, WILSON_PAGE)
    }

    fn rated(outcome: LookupOutcome) -> MovieReport {
        match outcome {
            LookupOutcome::Rated(report) => report,
            other => panic!("expected a rated movie, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_rates_matched_movie() {
        let config = Config::default();
        let fetcher = wilson_fetcher();
        let matcher = SearchResultMatcher::new(&config.matcher);
        let reporter = RecordingReporter::default();
        let lookup = MovieLookup::new(
            &config,
            &fetcher,
            &matcher,
            None,
            &reporter,
            LookupOptions::default(),
        )
        .unwrap();

        let report = rated(lookup.lookup(WILSON_NAME).unwrap());
        assert_eq!(report.imdb_id.as_str(), "tt3286484");
        assert_eq!(report.rating, Some(5.7));
        assert_eq!(report.url, WILSON_PAGE_URL);
        assert_eq!(report.verification, None);
        assert!(reporter.contains("Wilson (2017): 5.7 / 10.0"));
    }

    #[test]
    fn test_results_use_result_level() {
        let config = Config::default();
        let fetcher = wilson_fetcher();
        let matcher = SearchResultMatcher::new(&config.matcher);
        let fake = FakeMetadata::default().with("tt3286484", "Wilson", "2017-03-24", None);
        let metadata: &dyn MetadataProvider = &fake;
        let reporter = RecordingReporter::default();
        let options = LookupOptions {
            verify: true,
            poster_dir: None,
        };
        let lookup =
            MovieLookup::new(&config, &fetcher, &matcher, Some(metadata), &reporter, options)
                .unwrap();

        rated(lookup.lookup(WILSON_NAME).unwrap());
        assert_eq!(reporter.level_of("5.7 / 10.0"), Some(LogLevel::Result));
        assert_eq!(reporter.level_of("PASSED"), Some(LogLevel::Result));
        assert_eq!(reporter.level_of("Verifying"), Some(LogLevel::Info));
    }

    #[test]
    fn test_lookup_after_relaxed_retry() {
        let config = Config::default();
        let fetcher = FakeFetcher::default()
            .with(STRICT_WILSON, NO_RESULTS_PAGE)
            .with(RELAXED_WILSON, WILSON_RESULTS)
            .with(WILSON_PAGE_URL, WILSON_PAGE);
        let matcher = SearchResultMatcher::new(&config.matcher);
        let reporter = RecordingReporter::default();
        let lookup = MovieLookup::new(
            &config,
            &fetcher,
            &matcher,
            None,
            &reporter,
            LookupOptions::default(),
        )
        .unwrap();

        let report = rated(lookup.lookup(WILSON_NAME).unwrap());
        assert_eq!(report.imdb_id.as_str(), "tt3286484");
    }

    #[test]
    fn test_lookup_unparsed_name() {
        let config = Config::default();
        let fetcher = FakeFetcher::default();
        let matcher = SearchResultMatcher::new(&config.matcher);
        let reporter = RecordingReporter::default();
        let lookup = MovieLookup::new(
            &config,
            &fetcher,
            &matcher,
            None,
            &reporter,
            LookupOptions::default(),
        )
        .unwrap();

        let outcome = lookup.lookup("Untitled.Project").unwrap();
        assert!(matches!(
            outcome,
            LookupOutcome::Unparsed(ParseFailure::NoYear { .. })
        ));
        assert!(fetcher.requests.borrow().is_empty());
    }

    #[test]
    fn test_lookup_no_acceptable_row() {
        let config = Config::default();
        let fetcher = FakeFetcher::default().with(HEAT_STRICT, HEAT_RESULTS);
        let matcher = SearchResultMatcher::new(&config.matcher);
        let reporter = RecordingReporter::default();
        let lookup = MovieLookup::new(
            &config,
            &fetcher,
            &matcher,
            None,
            &reporter,
            LookupOptions::default(),
        )
        .unwrap();

        let outcome = lookup.lookup("Heat.1995.1080p").unwrap();
        assert_eq!(
            outcome,
            LookupOutcome::NotFound {
                query: SearchQuery("Heat 1995".to_string())
            }
        );
        assert!(reporter.contains("No IMDB ID found"));
    }

    #[test]
    fn test_verification_pass() {
        let config = Config::default();
        let fetcher = wilson_fetcher();
        let matcher = SearchResultMatcher::new(&config.matcher);
        let fake = FakeMetadata::default().with("tt3286484", "Wilson", "2017-03-24", None);
        let metadata: &dyn MetadataProvider = &fake;
        let reporter = RecordingReporter::default();
        let options = LookupOptions {
            verify: true,
            poster_dir: None,
        };
        let lookup =
            MovieLookup::new(&config, &fetcher, &matcher, Some(metadata), &reporter, options)
                .unwrap();

        let report = rated(lookup.lookup(WILSON_NAME).unwrap());
        let verification = report.verification.unwrap();
        assert!(verification.passed);
        assert!(reporter.contains("PASSED"));
    }

    #[test]
    fn test_verification_failure_keeps_result() {
        let config = Config::default();
        let fetcher = wilson_fetcher();
        let matcher = SearchResultMatcher::new(&config.matcher);
        let fake =
            FakeMetadata::default().with("tt3286484", "Wilson's Wonders", "2016-01-01", None);
        let metadata: &dyn MetadataProvider = &fake;
        let reporter = RecordingReporter::default();
        let options = LookupOptions {
            verify: true,
            poster_dir: None,
        };
        let lookup =
            MovieLookup::new(&config, &fetcher, &matcher, Some(metadata), &reporter, options)
                .unwrap();

        let report = rated(lookup.lookup(WILSON_NAME).unwrap());
        assert_eq!(report.rating, Some(5.7));
        let verification = report.verification.unwrap();
        assert!(!verification.passed);
        assert_eq!(verification.failures.len(), 2);
        assert!(reporter.contains("Failed:"));
    }

    #[test]
    fn test_verification_without_metadata_is_skipped() {
        let config = Config::default();
        let fetcher = wilson_fetcher();
        let matcher = SearchResultMatcher::new(&config.matcher);
        let reporter = RecordingReporter::default();
        let options = LookupOptions {
            verify: true,
            poster_dir: None,
        };
        let lookup =
            MovieLookup::new(&config, &fetcher, &matcher, None, &reporter, options).unwrap();

        let report = rated(lookup.lookup(WILSON_NAME).unwrap());
        assert_eq!(report.verification, None);
        assert!(reporter.contains("Metadata service not configured"));
    }

    #[test]
    fn test_poster_saved_next_to_movie() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let fetcher =
            wilson_fetcher().with("https://image.tmdb.org/t/p/w500/wilson.jpg", "IMG");
        let matcher = SearchResultMatcher::new(&config.matcher);
        std::fs::create_dir(dir.path().join(WILSON_NAME)).unwrap();
        let fake =
            FakeMetadata::default().with("tt3286484", "Wilson", "2017-03-24", Some("/wilson.jpg"));
        let metadata: &dyn MetadataProvider = &fake;
        let reporter = RecordingReporter::default();
        let options = LookupOptions {
            verify: true,
            poster_dir: Some(dir.path().to_path_buf()),
        };
        let lookup =
            MovieLookup::new(&config, &fetcher, &matcher, Some(metadata), &reporter, options)
                .unwrap();

        rated(lookup.lookup(WILSON_NAME).unwrap());
        let poster = dir.path().join(WILSON_NAME).join(format!("{WILSON_NAME}.jpg"));
        assert_eq!(std::fs::read(poster).unwrap(), b"IMG");
    }

    #[test]
    fn test_verification_metadata_failure_still_rates() {
        let config = Config::default();
        let fetcher = wilson_fetcher();
        let matcher = SearchResultMatcher::new(&config.matcher);
        let fake = FakeMetadata::default();
        let metadata: &dyn MetadataProvider = &fake;
        let reporter = RecordingReporter::default();
        let options = LookupOptions {
            verify: true,
            poster_dir: None,
        };
        let lookup =
            MovieLookup::new(&config, &fetcher, &matcher, Some(metadata), &reporter, options)
                .unwrap();

        let report = rated(lookup.lookup(WILSON_NAME).unwrap());
        assert_eq!(report.rating, Some(5.7));
        assert_eq!(report.verification, None);
        assert!(reporter.contains("Metadata lookup failed for tt3286484"));
        assert_eq!(
            reporter.level_of("Metadata lookup failed"),
            Some(LogLevel::Warn)
        );
    }

    #[test]
    fn test_poster_metadata_failure_still_rates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(WILSON_NAME)).unwrap();
        let config = Config::default();
        let fetcher = wilson_fetcher();
        let matcher = SearchResultMatcher::new(&config.matcher);
        let fake = FakeMetadata::default();
        let metadata: &dyn MetadataProvider = &fake;
        let reporter = RecordingReporter::default();
        let options = LookupOptions {
            verify: false,
            poster_dir: Some(dir.path().to_path_buf()),
        };
        let lookup =
            MovieLookup::new(&config, &fetcher, &matcher, Some(metadata), &reporter, options)
                .unwrap();

        let report = rated(lookup.lookup(WILSON_NAME).unwrap());
        assert_eq!(report.rating, Some(5.7));
        assert!(reporter.contains("Metadata lookup failed for tt3286484"));
        assert!(
            std::fs::read_dir(dir.path().join(WILSON_NAME))
                .unwrap()
                .next()
                .is_none()
        );
    }

    #[test]
    fn test_poster_skipped_without_movie_folder() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let fetcher = wilson_fetcher();
        let matcher = SearchResultMatcher::new(&config.matcher);
        let fake =
            FakeMetadata::default().with("tt3286484", "Wilson", "2017-03-24", Some("/wilson.jpg"));
        let metadata: &dyn MetadataProvider = &fake;
        let reporter = RecordingReporter::default();
        let options = LookupOptions {
            verify: false,
            poster_dir: Some(dir.path().to_path_buf()),
        };
        let lookup =
            MovieLookup::new(&config, &fetcher, &matcher, Some(metadata), &reporter, options)
                .unwrap();

        rated(lookup.lookup(WILSON_NAME).unwrap());
        assert!(!dir.path().join(WILSON_NAME).exists());
        assert!(reporter.contains("skipping poster"));
        assert!(
            !fetcher
                .requests
                .borrow()
                .iter()
                .any(|url| url.contains("wilson.jpg"))
        );
    }

    #[test]
    fn test_batch_continues_after_failures() {
        let config = Config::default();
        // Heat search page is missing, so that lookup fails at the transport level.
        let fetcher = wilson_fetcher();
        let matcher = SearchResultMatcher::new(&config.matcher);
        let reporter = RecordingReporter::default();
        let lookup = MovieLookup::new(
            &config,
            &fetcher,
            &matcher,
            None,
            &reporter,
            LookupOptions::default(),
        )
        .unwrap();

        let names = vec![
            "Heat.1995.1080p".to_string(),
            "Untitled.Project".to_string(),
            WILSON_NAME.to_string(),
        ];
        let (outcomes, summary) = run_batch(&lookup, &names);

        assert_eq!(outcomes.len(), 2);
        assert_eq!(
            summary,
            BatchSummary {
                total: 3,
                rated: 1,
                unparsed: 1,
                not_found: 0,
                failed: 1,
            }
        );
        assert!(reporter.contains("Lookup failed for Heat.1995.1080p"));
        assert!(reporter.contains("[SUMMARY] Movie lookup"));
    }

    #[test]
    fn test_display_title_includes_series() {
        let parsed = parser::parse("Daddys.Home.2.2017.1080p").unwrap();
        assert_eq!(display_title(&parsed), "Daddys Home 2");
    }
}
