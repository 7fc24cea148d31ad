use std::path::Path;
use log::debug;
use roxmltree::{Document, Node, ParsingOptions};

use crate::errors::{AppError, AppResult};
use crate::file_utils::FileManager;
use crate::locale::LocaleConfig;
use crate::models::Series;

// @module: XML fixture extraction

/// Root and item tags of the country list
pub const COUNTRIES_TAGS: (&str, &str) = ("countries", "country");

/// Root and item tags of the genre list
pub const GENRES_TAGS: (&str, &str) = ("genres", "genre");

const SERIES_ROOT: &str = "tvseries";
const SERIES_ITEM: &str = "tvs";
const INFO_TAG: &str = "info";

/// Turns fixture XML into entity model values.
///
/// Every failure carries the path of the file being parsed. Extraction is
/// all-or-nothing: a missing element or attribute fails the whole file.
#[derive(Debug, Clone, Default)]
pub struct XmlExtractor {
    locale: LocaleConfig,
}

impl XmlExtractor {
    pub fn new(locale: LocaleConfig) -> Self {
        Self { locale }
    }

    /// Collect the text of every `item_tag` child of the `root_tag` root, in document order
    pub fn extract_flat_list(
        &self,
        text: &str,
        path: &Path,
        root_tag: &str,
        item_tag: &str,
    ) -> AppResult<Vec<String>> {
        let doc = parse_document(text, path)?;
        let root = expect_root(&doc, path, root_tag)?;

        root.children()
            .filter(|n| n.has_tag_name(item_tag))
            .map(|item| element_text(item, path))
            .collect()
    }

    /// Build one `Series` per `<tvs>` element, in document order
    pub fn extract_series(&self, text: &str, path: &Path) -> AppResult<Vec<Series>> {
        let doc = parse_document(text, path)?;
        let root = expect_root(&doc, path, SERIES_ROOT)?;

        let items: Vec<Node> = root
            .children()
            .filter(|n| n.has_tag_name(SERIES_ITEM))
            .collect();

        let mut series = Vec::with_capacity(items.len());
        for tvs in items {
            series.push(self.extract_one_series(tvs, path)?);
        }

        debug!("Extracted {} series from {:?}", series.len(), path);
        Ok(series)
    }

    fn extract_one_series(&self, tvs: Node, path: &Path) -> AppResult<Series> {
        let name = required_attribute(tvs, path, "name")?;
        let localized_name = required_attribute(tvs, path, "locname")?;
        let release_year = int_attribute(tvs, path, "year")?;

        let info = tvs
            .children()
            .find(|n| n.has_tag_name(INFO_TAG))
            .ok_or_else(|| missing(path, INFO_TAG, SERIES_ITEM))?;

        let season_count = int_attribute(info, path, "amount")?;
        let airing = self.locale.is_airing(info.attribute("status"));

        let genres = self.nested_list(info, path, GENRES_TAGS)?;
        let countries = self.nested_list(info, path, COUNTRIES_TAGS)?;

        Ok(Series {
            name: name.to_string(),
            localized_name: localized_name.to_string(),
            release_year,
            season_count,
            airing,
            genres,
            countries,
        })
    }

    // Reads `<list><item>..</item></list>` found after the info element
    fn nested_list(&self, info: Node, path: &Path, (list_tag, item_tag): (&str, &str)) -> AppResult<Vec<String>> {
        let list = following_sibling(info, list_tag)
            .ok_or_else(|| missing(path, list_tag, INFO_TAG))?;

        list.children()
            .filter(|n| n.has_tag_name(item_tag))
            .map(|item| element_text(item, path))
            .collect()
    }

    /// Read and extract the country list
    pub fn parse_countries<P: AsRef<Path>>(&self, path: P) -> AppResult<Vec<String>> {
        let path = path.as_ref();
        let text = FileManager::read_to_string(path)?;
        self.extract_flat_list(&text, path, COUNTRIES_TAGS.0, COUNTRIES_TAGS.1)
    }

    /// Read and extract the genre list
    pub fn parse_genres<P: AsRef<Path>>(&self, path: P) -> AppResult<Vec<String>> {
        let path = path.as_ref();
        let text = FileManager::read_to_string(path)?;
        self.extract_flat_list(&text, path, GENRES_TAGS.0, GENRES_TAGS.1)
    }

    /// Read and extract the series catalog
    pub fn parse_series<P: AsRef<Path>>(&self, path: P) -> AppResult<Vec<Series>> {
        let path = path.as_ref();
        let text = FileManager::read_to_string(path)?;
        self.extract_series(&text, path)
    }
}

fn parse_document<'input>(text: &'input str, path: &Path) -> AppResult<Document<'input>> {
    // DOCTYPE declarations are accepted; external subsets are never loaded
    let options = ParsingOptions { allow_dtd: true, ..Default::default() };
    Document::parse_with_options(text, options).map_err(|e| AppError::parse(path, e.to_string()))
}

fn expect_root<'a, 'input>(
    doc: &'a Document<'input>,
    path: &Path,
    root_tag: &str,
) -> AppResult<Node<'a, 'input>> {
    let root = doc.root_element();
    if root.has_tag_name(root_tag) {
        Ok(root)
    } else {
        Err(AppError::parse(
            path,
            format!("expected root <{}>, found <{}>", root_tag, root.tag_name().name()),
        ))
    }
}

fn following_sibling<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    let mut current = node.next_sibling_element();
    while let Some(sibling) = current {
        if sibling.has_tag_name(tag) {
            return Some(sibling);
        }
        current = sibling.next_sibling_element();
    }
    None
}

fn element_text(node: Node, path: &Path) -> AppResult<String> {
    node.text().map(str::to_string).ok_or_else(|| {
        AppError::parse(path, format!("element <{}> has no text", node.tag_name().name()))
    })
}

fn required_attribute<'a>(node: Node<'a, '_>, path: &Path, attr: &str) -> AppResult<&'a str> {
    node.attribute(attr).ok_or_else(|| {
        AppError::parse(
            path,
            format!("<{}> is missing attribute '{}'", node.tag_name().name(), attr),
        )
    })
}

fn int_attribute(node: Node, path: &Path, attr: &str) -> AppResult<i32> {
    let raw = required_attribute(node, path, attr)?;
    raw.trim().parse::<i32>().map_err(|_| {
        AppError::parse(
            path,
            format!("attribute '{}' of <{}> is not an integer: '{}'", attr, node.tag_name().name(), raw),
        )
    })
}

fn missing(path: &Path, child: &str, parent: &str) -> AppError {
    AppError::parse(path, format!("missing <{}> in <{}>", child, parent))
}
