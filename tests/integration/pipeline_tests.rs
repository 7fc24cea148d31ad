/*!
 * Integration tests for the fixture-to-SQL pipeline
 */

use std::fs;
use std::path::Path;
use anyhow::Result;

use tvsqlgen::app_config::Config;
use tvsqlgen::errors::AppError;
use tvsqlgen::sql_emitter::MigrationStep;
use tvsqlgen::Controller;
use crate::common;

fn config_for(input_dir: &Path, output_dir: &Path, seed: Option<u64>) -> Config {
    common::init_test_logging();
    Config {
        input_dir: input_dir.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        shuffle_seed: seed,
        ..Config::default()
    }
}

fn read_step(output_dir: &Path, step: MigrationStep) -> Result<String> {
    Ok(fs::read_to_string(output_dir.join(step.file_name()))?)
}

/// Full run writes all five scripts in order
#[test]
fn test_run_withValidFixtures_shouldWriteFiveScripts() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_dir = temp_dir.path().join("out");
    common::write_fixtures(temp_dir.path())?;

    let controller = Controller::with_config(config_for(temp_dir.path(), &output_dir, Some(3)))?;
    let summary = controller.run()?;

    let steps: Vec<MigrationStep> = summary.files.iter().map(|f| f.step).collect();
    assert_eq!(steps, MigrationStep::ALL.to_vec());
    assert_eq!(summary.seed, 3);
    assert_eq!(summary.country_count, 2);
    assert_eq!(summary.genre_count, 3);
    assert_eq!(summary.series.len(), 3);

    assert_eq!(
        read_step(&output_dir, MigrationStep::Countries)?,
        "INSERT INTO CountriesTb (CountryName) VALUES\n('USA'),\n('UK');\n"
    );
    assert_eq!(
        read_step(&output_dir, MigrationStep::Genres)?,
        "INSERT INTO GenresTb (GenreName) VALUES\n('Drama'),\n('Crime'),\n('Comedy');\n"
    );

    let series_sql = read_step(&output_dir, MigrationStep::Series)?;
    assert!(series_sql.contains("('Y', 2020, 3, 1)"));
    assert!(series_sql.contains("('Фарго', 2014, 5, 0)"));
    assert!(series_sql.contains("('Шерлок', 2010, 4, 0)"));

    // 2 + 1 + 3 genre pairs, 1 + 2 + 1 country pairs
    let genre_sql = read_step(&output_dir, MigrationStep::SeriesGenres)?;
    let country_sql = read_step(&output_dir, MigrationStep::SeriesCountries)?;
    assert_eq!(genre_sql.lines().count() - 1, 6);
    assert_eq!(country_sql.lines().count() - 1, 4);
    Ok(())
}

/// Series table and both join tables follow the same shuffled order
#[test]
fn test_run_withSeed_shouldShareOrderAcrossSeriesScripts() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::write_fixtures(temp_dir.path())?;

    let summary = Controller::with_config(config_for(temp_dir.path(), temp_dir.path(), Some(11)))?.run()?;
    let order: Vec<&str> = summary.series.iter().map(|s| s.localized_name.as_str()).collect();

    let series_sql = read_step(temp_dir.path(), MigrationStep::Series)?;
    let series_order: Vec<&str> = series_sql
        .lines()
        .skip(1)
        .map(|line| line.split('\'').nth(1).unwrap_or_default())
        .collect();
    assert_eq!(series_order, order);

    let genre_sql = read_step(temp_dir.path(), MigrationStep::SeriesGenres)?;
    let mut genre_order: Vec<&str> = genre_sql
        .lines()
        .skip(1)
        .map(|line| line.split('\'').nth(1).unwrap_or_default())
        .collect();
    genre_order.dedup();
    assert_eq!(genre_order, order);
    Ok(())
}

/// Same seed gives byte-identical scripts
#[test]
fn test_run_withSameSeedTwice_shouldBeReproducible() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::write_fixtures(temp_dir.path())?;
    let first_out = temp_dir.path().join("first");
    let second_out = temp_dir.path().join("second");

    Controller::with_config(config_for(temp_dir.path(), &first_out, Some(5)))?.run()?;
    Controller::with_config(config_for(temp_dir.path(), &second_out, Some(5)))?.run()?;

    for step in MigrationStep::ALL {
        assert_eq!(read_step(&first_out, step)?, read_step(&second_out, step)?);
    }
    Ok(())
}

/// The single-series scenario yields exactly the expected rows
#[test]
fn test_run_withSingleSeries_shouldEmitExpectedRows() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "countries.xml", common::COUNTRIES_XML)?;
    common::create_test_file(temp_dir.path(), "genres.xml", common::GENRES_XML)?;
    common::create_test_file(
        temp_dir.path(),
        "tvseries.xml",
        r#"<tvseries>
  <tvs name="X" locname="Y" year="2020">
    <info amount="3" status="снимается"/>
    <genres><genre>Drama</genre><genre>Crime</genre></genres>
    <countries><country>USA</country></countries>
  </tvs>
</tvseries>"#,
    )?;

    Controller::with_config(config_for(temp_dir.path(), temp_dir.path(), None))?.run()?;

    assert_eq!(
        read_step(temp_dir.path(), MigrationStep::Series)?,
        "INSERT INTO TvSeriesTb (SeriesName, ReleaseYear, SeasonsAmount, Status) VALUES\n('Y', 2020, 3, 1);\n"
    );
    assert_eq!(
        read_step(temp_dir.path(), MigrationStep::SeriesGenres)?,
        "INSERT INTO TvGenreTb (SeriesId, GenreId) VALUES\n\
         ((SELECT SeriesId FROM TvSeriesTb WHERE SeriesName = 'Y'), (SELECT GenreId FROM GenresTb WHERE GenreName = 'Drama')),\n\
         ((SELECT SeriesId FROM TvSeriesTb WHERE SeriesName = 'Y'), (SELECT GenreId FROM GenresTb WHERE GenreName = 'Crime'));\n"
    );
    assert_eq!(
        read_step(temp_dir.path(), MigrationStep::SeriesCountries)?,
        "INSERT INTO TvCountryTb (SeriesId, CountryId) VALUES\n\
         ((SELECT SeriesId FROM TvSeriesTb WHERE SeriesName = 'Y'), (SELECT CountryId FROM CountriesTb WHERE CountryName = 'USA'));\n"
    );
    Ok(())
}

/// A missing genre file stops the run after the countries script
#[test]
fn test_run_withMissingGenres_shouldAbortAfterCountries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "countries.xml", common::COUNTRIES_XML)?;
    common::create_test_file(temp_dir.path(), "tvseries.xml", common::SERIES_XML)?;

    let result = Controller::with_config(config_for(temp_dir.path(), temp_dir.path(), None))?.run();

    match result {
        Err(AppError::UnreadableFile { path, .. }) => assert!(path.ends_with("genres.xml")),
        other => panic!("expected UnreadableFile, got {:?}", other),
    }
    assert!(temp_dir.path().join(MigrationStep::Countries.file_name()).exists());
    assert!(!temp_dir.path().join(MigrationStep::Genres.file_name()).exists());
    assert!(!temp_dir.path().join(MigrationStep::Series.file_name()).exists());
    Ok(())
}

/// Malformed series XML is a parse error naming the file
#[test]
fn test_run_withMalformedSeries_shouldReportParseError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::write_fixtures(temp_dir.path())?;
    common::create_test_file(temp_dir.path(), "tvseries.xml", "<tvseries><tvs name=")?;

    let result = Controller::with_config(config_for(temp_dir.path(), temp_dir.path(), None))?.run();

    match result {
        Err(AppError::Parse { path, .. }) => assert!(path.ends_with("tvseries.xml")),
        other => panic!("expected Parse, got {:?}", other),
    }
    assert!(!temp_dir.path().join(MigrationStep::Series.file_name()).exists());
    Ok(())
}

/// Duplicate localized names are rejected before the series script
#[test]
fn test_run_withDuplicateLocalizedNames_shouldFailBeforeSeriesScript() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::write_fixtures(temp_dir.path())?;
    common::create_test_file(
        temp_dir.path(),
        "tvseries.xml",
        r#"<tvseries>
  <tvs name="A" locname="Same" year="2001"><info amount="1"/><genres/><countries/></tvs>
  <tvs name="B" locname="Same" year="2002"><info amount="2"/><genres/><countries/></tvs>
</tvseries>"#,
    )?;

    let result = Controller::with_config(config_for(temp_dir.path(), temp_dir.path(), None))?.run();

    assert!(matches!(result, Err(AppError::DuplicateLocalizedName { ref name }) if name == "Same"));
    assert!(!temp_dir.path().join(MigrationStep::Series.file_name()).exists());
    Ok(())
}

/// An empty country list is rejected and writes nothing
#[test]
fn test_run_withEmptyCountries_shouldFailWithEmptyInput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::write_fixtures(temp_dir.path())?;
    common::create_test_file(temp_dir.path(), "countries.xml", "<countries></countries>")?;

    let result = Controller::with_config(config_for(temp_dir.path(), temp_dir.path(), None))?.run();

    assert!(matches!(result, Err(AppError::EmptyInput(_))));
    assert!(!temp_dir.path().join(MigrationStep::Countries.file_name()).exists());
    Ok(())
}

/// Invalid configuration is rejected up front
#[test]
fn test_withConfig_withEmptyAiringStatus_shouldFail() {
    let mut config = Config::default();
    config.locale.airing_status = String::new();
    assert!(matches!(Controller::with_config(config), Err(AppError::Config(_))));
}

#[test]
fn test_formatDuration_withShortRun_shouldShowMillis() {
    let formatted = Controller::format_duration(std::time::Duration::from_millis(1250));
    assert_eq!(formatted, "1.250s");
}
