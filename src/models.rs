use std::collections::HashSet;
use std::fmt;

use crate::errors::{AppError, AppResult};

// @module: In-memory entity model

/// One TV series record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Series {
    // @field: Original title, informational only
    pub name: String,

    // @field: Localized title, the business key for join rows
    pub localized_name: String,

    // @field: Release year
    pub release_year: i32,

    // @field: Number of seasons
    pub season_count: i32,

    // @field: Currently airing
    pub airing: bool,

    // @field: Genre names in document order
    pub genres: Vec<String>,

    // @field: Country names in document order
    pub countries: Vec<String>,
}

impl Series {
    pub fn new(
        name: impl Into<String>,
        localized_name: impl Into<String>,
        release_year: i32,
        season_count: i32,
        airing: bool,
        genres: Vec<String>,
        countries: Vec<String>,
    ) -> Self {
        Series {
            name: name.into(),
            localized_name: localized_name.into(),
            release_year,
            season_count,
            airing,
            genres,
            countries,
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name:       {}", self.name)?;
        writeln!(f, "Locname:    {}", self.localized_name)?;
        writeln!(f, "Year:       {}", self.release_year)?;
        writeln!(f, "Amount:     {}", self.season_count)?;
        writeln!(f, "Status:     {}", u8::from(self.airing))?;
        writeln!(f, "Genres:     {}", self.genres.join(" "))?;
        writeln!(f, "Countries:  {}", self.countries.join(" "))
    }
}

/// Helpers over a whole series collection
pub struct SeriesCatalog;

impl SeriesCatalog {
    /// Fails on the first localized name that appears twice
    pub fn ensure_unique_localized_names(series: &[Series]) -> AppResult<()> {
        let mut seen = HashSet::with_capacity(series.len());
        for s in series {
            if !seen.insert(s.localized_name.as_str()) {
                return Err(AppError::DuplicateLocalizedName {
                    name: s.localized_name.clone(),
                });
            }
        }
        Ok(())
    }

    // @returns: Number of series-genre pairs
    pub fn genre_link_count(series: &[Series]) -> usize {
        series.iter().map(|s| s.genres.len()).sum()
    }

    // @returns: Number of series-country pairs
    pub fn country_link_count(series: &[Series]) -> usize {
        series.iter().map(|s| s.countries.len()).sum()
    }
}
