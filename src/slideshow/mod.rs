pub mod catalog;
pub mod order;
pub mod pairing;
pub mod score;
pub mod slides;
pub mod writer;

use catalog::Photo;
use order::{path_score, SlideOrderer};
use pairing::pair_vertical_photos;
use slides::{assemble_slides, Slide};

use crate::error::Result;

/// Pairs, assembles and orders the slides for a parsed catalog.
pub fn build_slideshow(photos: &[Photo], orderer: &SlideOrderer) -> Result<Vec<Slide>> {
    let outcome = pair_vertical_photos(photos);
    log::info!("Paired {} vertical slides", outcome.pairs.len());
    if let Some(dropped) = outcome.dropped {
        log::info!("Dropped unpaired vertical photo {}", dropped);
    }

    let slides = assemble_slides(photos, outcome.pairs);
    if slides.is_empty() {
        log::warn!("Catalog produced no slides; writing an empty slideshow");
        return Ok(slides);
    }
    log::info!("Ordering {} slides", slides.len());

    let order = orderer.order(&slides)?;
    log::info!("Total interest: {}", path_score(&slides, &order));

    let mut slots: Vec<Option<Slide>> = slides.into_iter().map(Some).collect();
    Ok(order.into_iter().filter_map(|idx| slots[idx].take()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::solvers::GlpkSolver;
    use crate::slideshow::catalog::parse_catalog;
    use crate::slideshow::order::OrderStrategy;

    fn glpk_orderer() -> SlideOrderer {
        SlideOrderer::new(Box::new(GlpkSolver::new()))
    }

    fn photo_ids(slides: &[Slide]) -> Vec<usize> {
        let mut ids: Vec<usize> = slides.iter().flat_map(|s| s.photo_ids.iter().copied()).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_four_horizontals_give_four_slides() {
        let photos = parse_catalog("4\nH 3 a b c\nH 3 b c d\nH 2 x y\nH 3 c d e\n").unwrap();
        let slides = build_slideshow(&photos, &glpk_orderer()).unwrap();

        assert_eq!(slides.len(), 4);
        assert_eq!(photo_ids(&slides), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_three_verticals_give_one_slide() {
        let photos = parse_catalog("3\nV 2 x y\nV 1 x\nV 1 z\n").unwrap();
        let slides = build_slideshow(&photos, &glpk_orderer()).unwrap();

        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].photo_ids, vec![0, 2]);
    }

    #[test]
    fn test_mixed_catalog_uses_every_photo_once() {
        let photos = parse_catalog(
            "7\nH 3 cat beach sun\nV 2 selfie smile\nV 2 garden selfie\nH 2 garden cat\nV 1 sun\nH 2 beach smile\nV 2 cat sun\n",
        )
        .unwrap();
        let slides = build_slideshow(&photos, &glpk_orderer().with_strategy(OrderStrategy::Greedy)).unwrap();

        assert_eq!(slides.len(), 5);
        assert_eq!(photo_ids(&slides), (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_catalog_gives_no_slides() {
        let slides = build_slideshow(&[], &glpk_orderer()).unwrap();
        assert!(slides.is_empty());
    }
}
