use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use thiserror::Error;

use super::model::{Dataset, PriceTier, Record};

/// Hosted copy of the cleaned DC review table.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/austinbarish/food-grid/main/data/dc_reviews_cleaned.csv";

// ---------------------------------------------------------------------------
// Data source: local file or remote URL
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    /// Anything starting with `http://` or `https://` is fetched remotely.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            DataSource::Url(s.to_string())
        } else {
            DataSource::Path(PathBuf::from(s))
        }
    }

    /// Lower-cased file extension, ignoring any URL query or fragment.
    fn extension(&self) -> String {
        let name = match self {
            DataSource::Path(p) => p.to_string_lossy().into_owned(),
            DataSource::Url(u) => u.split(['?', '#']).next().unwrap_or("").to_string(),
        };
        Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(p) => write!(f, "{}", p.display()),
            DataSource::Url(u) => f.write_str(u),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the review table once at startup. Dispatch by extension.
///
/// Supported formats:
/// * `.json` – records-oriented array, `categories` as a real array
/// * anything else – CSV with an index column and `categories` stored as a
///   list literal such as `['Bars', "Women's Clothing"]`
pub fn load_source(source: &DataSource) -> Result<Dataset> {
    let bytes = read_source(source).with_context(|| format!("reading {source}"))?;
    let dataset = match source.extension().as_str() {
        "json" => parse_json(&bytes),
        _ => parse_csv(bytes.as_slice()),
    }
    .with_context(|| format!("parsing {source}"))?;

    log::info!(
        "Loaded {} restaurants in {} main categories from {source}",
        dataset.len(),
        dataset.main_categories.len()
    );
    Ok(dataset)
}

fn read_source(source: &DataSource) -> Result<Vec<u8>> {
    match source {
        DataSource::Path(path) => std::fs::read(path).context("reading file"),
        DataSource::Url(url) => {
            log::info!("Fetching dataset from {url}");
            let response = ureq::get(url).call().context("HTTP request failed")?;
            let mut contents = Vec::new();
            response
                .into_reader()
                .read_to_end(&mut contents)
                .context("reading HTTP body")?;
            Ok(contents)
        }
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Row as it appears in the CSV. The leading index column and any columns not
/// listed here are ignored.
///
/// Whole-number columns are read as floats: a rounded column written by a
/// dataframe library comes out as `73.0`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    main_category: String,
    categories: String,
    /// Empty when the source had no price for the restaurant.
    price: Option<String>,
    average_rating: f64,
    normalized_rating: f64,
    rounded_normalized_rating: f64,
    total_reviews: f64,
    normalized_total_reviews: f64,
    rounded_normalized_total_reviews: f64,
    url: String,
}

/// Parse the CSV layout: header row, first column a record index.
///
/// Rows without a price can never pass the price filter and are skipped with
/// a warning. Any other malformed value aborts the load.
pub fn parse_csv<R: Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(input);
    let mut records = Vec::new();
    let mut unpriced = 0usize;

    for (row_no, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let Some(price) = row.price.as_deref().map(str::trim).filter(|p| !p.is_empty()) else {
            log::debug!("CSV row {row_no}: {:?} has no price, skipped", row.name);
            unpriced += 1;
            continue;
        };
        let price: PriceTier = price.parse().with_context(|| format!("CSV row {row_no}"))?;
        let categories = parse_tag_list(&row.categories)
            .with_context(|| format!("CSV row {row_no}: bad categories field"))?;

        let total_reviews = whole_number(row.total_reviews, "total_reviews")
            .and_then(|n| u64::try_from(n).context("total_reviews is negative"))
            .with_context(|| format!("CSV row {row_no}"))?;
        let rounded_normalized_rating =
            whole_number(row.rounded_normalized_rating, "rounded_normalized_rating")
                .with_context(|| format!("CSV row {row_no}"))?;
        let rounded_normalized_total_reviews = whole_number(
            row.rounded_normalized_total_reviews,
            "rounded_normalized_total_reviews",
        )
        .with_context(|| format!("CSV row {row_no}"))?;

        records.push(Record {
            name: row.name,
            main_category: row.main_category,
            categories,
            price,
            average_rating: row.average_rating,
            normalized_rating: row.normalized_rating,
            rounded_normalized_rating,
            total_reviews,
            normalized_total_reviews: row.normalized_total_reviews,
            rounded_normalized_total_reviews,
            url: row.url,
        });
    }

    if unpriced > 0 {
        log::warn!("Skipped {unpriced} restaurants without a price");
    }
    Ok(Dataset::from_records(records))
}

/// `73.0` → `73`; NaN and infinities are rejected.
fn whole_number(value: f64, column: &str) -> Result<i64> {
    if !value.is_finite() {
        bail!("{column} is not a number: {value}");
    }
    Ok(value.round() as i64)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "name": "Le Diplomate",
///     "main_category": "French",
///     "categories": ["French", "Brasseries"],
///     "price": "$$$",
///     ...
///   }
/// ]
/// ```
pub fn parse_json(bytes: &[u8]) -> Result<Dataset> {
    let records: Vec<Record> = serde_json::from_slice(bytes).context("parsing JSON records")?;
    if records.iter().any(|r| r.name.is_empty()) {
        bail!("JSON record with an empty name");
    }
    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Tag list literal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagListError {
    #[error("expected a bracketed list, got {0:?}")]
    NotAList(String),
    #[error("expected a quoted string at offset {0}")]
    ExpectedString(usize),
    #[error("unterminated string starting at offset {0}")]
    Unterminated(usize),
    #[error("expected ',' or ']' at offset {0}")]
    ExpectedSeparator(usize),
}

/// Parse a serialized list of strings: `['a', "b's", 'c']`.
///
/// Both quote styles and backslash escapes are accepted; a trailing comma is
/// allowed.
pub fn parse_tag_list(text: &str) -> Result<Vec<String>, TagListError> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| TagListError::NotAList(trimmed.to_string()))?;

    let chars: Vec<char> = inner.chars().collect();
    let mut tags = Vec::new();
    let mut i = 0;

    loop {
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        if i == chars.len() {
            break;
        }

        let quote = chars[i];
        if quote != '\'' && quote != '"' {
            return Err(TagListError::ExpectedString(i));
        }
        let start = i;
        i += 1;

        let mut tag = String::new();
        loop {
            match chars.get(i) {
                None => return Err(TagListError::Unterminated(start)),
                Some('\\') => {
                    let escaped = chars.get(i + 1).ok_or(TagListError::Unterminated(start))?;
                    tag.push(*escaped);
                    i += 2;
                }
                Some(&c) if c == quote => {
                    i += 1;
                    break;
                }
                Some(&c) => {
                    tag.push(c);
                    i += 1;
                }
            }
        }
        tags.push(tag);

        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        match chars.get(i) {
            None => break,
            Some(',') => i += 1,
            Some(_) => return Err(TagListError::ExpectedSeparator(i)),
        }
    }

    Ok(tags)
}

/// Inverse of [`parse_tag_list`]: single quotes unless the tag contains one.
pub fn format_tag_list(tags: &[String]) -> String {
    let quoted: Vec<String> = tags
        .iter()
        .map(|tag| {
            let quote = if tag.contains('\'') && !tag.contains('"') { '"' } else { '\'' };
            let escaped = tag
                .replace('\\', "\\\\")
                .replace(quote, &format!("\\{quote}"));
            format!("{quote}{escaped}{quote}")
        })
        .collect();
    format!("[{}]", quoted.join(", "))
}
