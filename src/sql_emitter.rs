use std::path::{Path, PathBuf};
use log::info;

use crate::errors::{AppError, AppResult};
use crate::file_utils::FileManager;
use crate::models::Series;

// @module: SQL INSERT script generation

const ROW_SEPARATOR: &str = ",\n";
const TERMINATOR: &str = ";\n";

/// One generated migration script, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MigrationStep {
    Countries,
    Genres,
    Series,
    SeriesCountries,
    SeriesGenres,
}

impl MigrationStep {
    /// All steps, in the order they must run
    pub const ALL: [MigrationStep; 5] = [
        MigrationStep::Countries,
        MigrationStep::Genres,
        MigrationStep::Series,
        MigrationStep::SeriesCountries,
        MigrationStep::SeriesGenres,
    ];

    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Countries => 1,
            Self::Genres => 2,
            Self::Series => 3,
            Self::SeriesCountries => 4,
            Self::SeriesGenres => 5,
        }
    }

    /// Output file name, prefixed with the step ordinal
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Countries => "1_insert_into_countries_tb.sql",
            Self::Genres => "2_insert_into_genres_tb.sql",
            Self::Series => "3_insert_into_tvseries_tb.sql",
            Self::SeriesCountries => "4_insert_into_tvcountry_tb.sql",
            Self::SeriesGenres => "5_insert_into_tvgenre_tb.sql",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            Self::Countries => "CountriesTb",
            Self::Genres => "GenresTb",
            Self::Series => "TvSeriesTb",
            Self::SeriesCountries => "TvCountryTb",
            Self::SeriesGenres => "TvGenreTb",
        }
    }

    pub fn columns(&self) -> &'static str {
        match self {
            Self::Countries => "CountryName",
            Self::Genres => "GenreName",
            Self::Series => "SeriesName, ReleaseYear, SeasonsAmount, Status",
            Self::SeriesCountries => "SeriesId, CountryId",
            Self::SeriesGenres => "SeriesId, GenreId",
        }
    }

    // @returns: Name reported in empty-input errors
    fn function_name(&self) -> &'static str {
        match self {
            Self::Countries => "insert_into_countries_tb",
            Self::Genres => "insert_into_genres_tb",
            Self::Series => "insert_into_tvseries_tb",
            Self::SeriesCountries => "insert_into_tvcountry_tb",
            Self::SeriesGenres => "insert_into_tvgenre_tb",
        }
    }
}

// Lookup table referenced from a join row
struct JoinTarget {
    table: &'static str,
    id_column: &'static str,
    name_column: &'static str,
}

const GENRE_TARGET: JoinTarget = JoinTarget {
    table: "GenresTb",
    id_column: "GenreId",
    name_column: "GenreName",
};

const COUNTRY_TARGET: JoinTarget = JoinTarget {
    table: "CountriesTb",
    id_column: "CountryId",
    name_column: "CountryName",
};

/// Assemble a complete INSERT statement from pre-rendered value tuples.
///
/// Rows are joined with `",\n"` and the statement ends with a single `";\n"`.
pub fn render_insert(step: MigrationStep, rows: &[String]) -> AppResult<String> {
    if rows.is_empty() {
        return Err(AppError::empty_input(step.function_name()));
    }

    let mut sql = format!("INSERT INTO {} ({}) VALUES\n", step.table(), step.columns());
    sql.push_str(&rows.join(ROW_SEPARATOR));
    sql.push_str(TERMINATOR);
    Ok(sql)
}

pub fn render_countries(countries: &[String]) -> AppResult<String> {
    render_insert(MigrationStep::Countries, &name_rows(countries))
}

pub fn render_genres(genres: &[String]) -> AppResult<String> {
    render_insert(MigrationStep::Genres, &name_rows(genres))
}

/// Series rows keyed by localized name; `airing` is written as 0/1
pub fn render_series(series: &[Series]) -> AppResult<String> {
    let rows: Vec<String> = series
        .iter()
        .map(|s| {
            format!(
                "('{}', {}, {}, {})",
                s.localized_name,
                s.release_year,
                s.season_count,
                u8::from(s.airing)
            )
        })
        .collect();
    render_insert(MigrationStep::Series, &rows)
}

/// One row per (series, country) pair, ids resolved by subquery
pub fn render_series_countries(series: &[Series]) -> AppResult<String> {
    let rows = join_rows(series, |s| &s.countries, &COUNTRY_TARGET);
    render_insert(MigrationStep::SeriesCountries, &rows)
}

/// One row per (series, genre) pair, ids resolved by subquery
pub fn render_series_genres(series: &[Series]) -> AppResult<String> {
    let rows = join_rows(series, |s| &s.genres, &GENRE_TARGET);
    render_insert(MigrationStep::SeriesGenres, &rows)
}

fn name_rows(names: &[String]) -> Vec<String> {
    names.iter().map(|name| format!("('{}')", name)).collect()
}

fn join_rows<F>(series: &[Series], items: F, target: &JoinTarget) -> Vec<String>
where
    F: Fn(&Series) -> &Vec<String>,
{
    series
        .iter()
        .flat_map(|s| {
            items(s).iter().map(move |item| {
                format!(
                    "((SELECT SeriesId FROM TvSeriesTb WHERE SeriesName = '{}'), (SELECT {} FROM {} WHERE {} = '{}'))",
                    s.localized_name, target.id_column, target.table, target.name_column, item
                )
            })
        })
        .collect()
}

/// A script written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub step: MigrationStep,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Writes rendered scripts into an output directory.
///
/// Rendering happens before the file is touched, so an empty input never
/// leaves a file behind.
#[derive(Debug, Clone)]
pub struct SqlEmitter {
    output_dir: PathBuf,
}

impl SqlEmitter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    // @returns: Target path of a step
    pub fn path_for(&self, step: MigrationStep) -> PathBuf {
        self.output_dir.join(step.file_name())
    }

    pub fn write_countries(&self, countries: &[String]) -> AppResult<EmittedFile> {
        self.write(MigrationStep::Countries, render_countries(countries)?)
    }

    pub fn write_genres(&self, genres: &[String]) -> AppResult<EmittedFile> {
        self.write(MigrationStep::Genres, render_genres(genres)?)
    }

    pub fn write_series(&self, series: &[Series]) -> AppResult<EmittedFile> {
        self.write(MigrationStep::Series, render_series(series)?)
    }

    pub fn write_series_countries(&self, series: &[Series]) -> AppResult<EmittedFile> {
        self.write(MigrationStep::SeriesCountries, render_series_countries(series)?)
    }

    pub fn write_series_genres(&self, series: &[Series]) -> AppResult<EmittedFile> {
        self.write(MigrationStep::SeriesGenres, render_series_genres(series)?)
    }

    fn write(&self, step: MigrationStep, sql: String) -> AppResult<EmittedFile> {
        let path = self.path_for(step);
        FileManager::write_to_file(&path, &sql)?;
        info!("Wrote {:?} ({} bytes)", path, sql.len());
        Ok(EmittedFile {
            step,
            path,
            bytes: sql.len(),
        })
    }
}
