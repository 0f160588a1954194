//! Photo catalog parsing.
//!
//! ```text
//! N
//! <H|V> <tag_count> <tag_1> ... <tag_k>
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::{Result, SlideshowError};

pub type Tags = BTreeSet<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "H" => Some(Orientation::Horizontal),
            "V" => Some(Orientation::Vertical),
            _ => None,
        }
    }

    fn token(self) -> &'static str {
        match self {
            Orientation::Horizontal => "H",
            Orientation::Vertical => "V",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: usize,
    pub orientation: Orientation,
    pub tags: Tags,
}

impl Photo {
    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }
}

pub fn read_catalog(path: &Path) -> Result<Vec<Photo>> {
    let content = fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// Parses a whole catalog. Any malformed line fails the whole parse.
///
/// A blank input is an empty catalog.
pub fn parse_catalog(input: &str) -> Result<Vec<Photo>> {
    let mut lines = input.lines().enumerate();

    let count = loop {
        match lines.next() {
            None => return Ok(Vec::new()),
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((idx, line)) => {
                let count = line.trim().parse::<usize>().map_err(|_| {
                    SlideshowError::parse(idx + 1, format!("invalid photo count '{}'", line.trim()))
                })?;
                break count;
            }
        }
    };

    // count is untrusted until every photo line has been read
    let mut photos = Vec::new();
    for id in 0..count {
        let (idx, line) = lines.next().ok_or_else(|| {
            SlideshowError::parse(
                input.lines().count() + 1,
                format!("expected {} photos, found {}", count, id),
            )
        })?;
        photos.push(parse_photo(id, idx + 1, line)?);
    }

    if let Some((idx, _)) = lines.find(|(_, line)| !line.trim().is_empty()) {
        return Err(SlideshowError::parse(
            idx + 1,
            format!("unexpected content after {} photos", count),
        ));
    }

    Ok(photos)
}

fn parse_photo(id: usize, line_no: usize, line: &str) -> Result<Photo> {
    let mut tokens = line.split_whitespace();

    let orientation_token = tokens
        .next()
        .ok_or_else(|| SlideshowError::parse(line_no, "missing orientation"))?;
    let orientation = Orientation::from_token(orientation_token).ok_or_else(|| {
        SlideshowError::parse(line_no, format!("unknown orientation '{}'", orientation_token))
    })?;

    let count_token = tokens
        .next()
        .ok_or_else(|| SlideshowError::parse(line_no, "missing tag count"))?;
    let declared = count_token.parse::<usize>().map_err(|_| {
        SlideshowError::parse(line_no, format!("invalid tag count '{}'", count_token))
    })?;

    let raw: Vec<&str> = tokens.collect();
    if raw.len() != declared {
        return Err(SlideshowError::parse(
            line_no,
            format!("declared {} tags but found {}", declared, raw.len()),
        ));
    }

    Ok(Photo {
        id,
        orientation,
        tags: raw.into_iter().map(str::to_owned).collect(),
    })
}

/// Serializes photos back into catalog format, tags in sorted order.
pub fn write_catalog(photos: &[Photo]) -> String {
    let mut out = format!("{}\n", photos.len());
    for photo in photos {
        let mut fields = vec![photo.orientation.token().to_string(), photo.tags.len().to_string()];
        fields.extend(photo.tags.iter().cloned());
        out.push_str(&fields.join(" "));
        out.push('\n');
    }
    out
}
