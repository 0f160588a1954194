//! Photo slideshow builder.
//!
//! Parses a photo catalog, pairs vertical photos greedily, and orders the
//! resulting slides to maximize the interest between neighbours. Ordering
//! is solved as an integer program through a pluggable [`domain::solver::Solver`].

pub mod config;
pub mod convert;
pub mod domain;
pub mod error;
pub mod models;
pub mod slideshow;

use std::path::Path;

use config::Config;
use error::Result;

/// Reads `input`, builds the slideshow and writes it to the configured output.
///
/// Returns the number of slides written.
pub fn run(input: &Path, config: &Config) -> Result<usize> {
    let photos = slideshow::catalog::read_catalog(input)?;
    log::info!("Parsed {} photos from {}", photos.len(), input.display());

    let slides = slideshow::build_slideshow(&photos, &config.orderer())?;
    slideshow::writer::save_solution(&config.output, &slides)?;

    Ok(slides.len())
}
