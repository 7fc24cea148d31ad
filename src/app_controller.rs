use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

use crate::app_config::Config;
use crate::errors::AppResult;
use crate::file_utils::FileManager;
use crate::models::{Series, SeriesCatalog};
use crate::shuffler;
use crate::sql_emitter::{EmittedFile, MigrationStep, SqlEmitter};
use crate::xml_extractor::XmlExtractor;

// @module: Application controller for the fixture-to-SQL pipeline

/// Outcome of a complete run
#[derive(Debug, Clone)]
pub struct RunSummary {
    // @field: Scripts written, in step order
    pub files: Vec<EmittedFile>,

    // @field: Series in emitted (shuffled) order
    pub series: Vec<Series>,

    // @field: Seed the shuffle used
    pub seed: u64,

    pub country_count: usize,
    pub genre_count: usize,
    pub duration: Duration,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Draw a progress bar on stderr
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Run all five steps in order.
    ///
    /// The first failure aborts the remaining steps; scripts already
    /// written are left in place.
    pub fn run(&self) -> AppResult<RunSummary> {
        let start_time = Instant::now();
        let config = &self.config;

        FileManager::ensure_dir(&config.output_dir)?;

        let extractor = XmlExtractor::new(config.locale.clone());
        let emitter = SqlEmitter::new(&config.output_dir);
        let progress_bar = self.progress_bar();
        let mut files = Vec::with_capacity(MigrationStep::ALL.len());

        progress_bar.set_message("countries");
        let countries = extractor.parse_countries(config.countries_path())?;
        files.push(emitter.write_countries(&countries)?);
        progress_bar.inc(1);

        progress_bar.set_message("genres");
        let genres = extractor.parse_genres(config.genres_path())?;
        files.push(emitter.write_genres(&genres)?);
        progress_bar.inc(1);

        progress_bar.set_message("series");
        let mut series = extractor.parse_series(config.series_path())?;
        let seed = shuffler::shuffle(&mut series, config.shuffle_seed);
        SeriesCatalog::ensure_unique_localized_names(&series)?;
        debug!(
            "{} series, {} country links, {} genre links",
            series.len(),
            SeriesCatalog::country_link_count(&series),
            SeriesCatalog::genre_link_count(&series)
        );

        files.push(emitter.write_series(&series)?);
        progress_bar.inc(1);

        progress_bar.set_message("series countries");
        files.push(emitter.write_series_countries(&series)?);
        progress_bar.inc(1);

        progress_bar.set_message("series genres");
        files.push(emitter.write_series_genres(&series)?);
        progress_bar.inc(1);

        progress_bar.finish_and_clear();

        let duration = start_time.elapsed();
        info!(
            "Generated {} scripts in {}.",
            files.len(),
            Self::format_duration(duration)
        );

        Ok(RunSummary {
            files,
            series,
            seed,
            country_count: countries.len(),
            genre_count: genres.len(),
            duration,
        })
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(MigrationStep::ALL.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} scripts {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar
    }

    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
