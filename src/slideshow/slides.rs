use crate::slideshow::catalog::{Photo, Tags};
use crate::slideshow::pairing::Pairing;

/// One horizontal photo, or two paired vertical photos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub photo_ids: Vec<usize>,
    pub tags: Tags,
}

impl Slide {
    pub fn single(photo: &Photo) -> Self {
        Slide {
            photo_ids: vec![photo.id],
            tags: photo.tags.clone(),
        }
    }

    pub fn pair(pairing: Pairing) -> Self {
        Slide {
            photo_ids: vec![pairing.first, pairing.second],
            tags: pairing.tags,
        }
    }
}

/// Horizontal singles in catalog order, then the pairs in emission order.
/// This is only the construction order fed to the orderer.
pub fn assemble_slides(photos: &[Photo], pairs: Vec<Pairing>) -> Vec<Slide> {
    let mut slides: Vec<Slide> = photos
        .iter()
        .filter(|p| !p.is_vertical())
        .map(Slide::single)
        .collect();
    slides.extend(pairs.into_iter().map(Slide::pair));
    slides
}
