//! Greedy pairing of vertical photos.
//!
//! Vertical photos are visited in catalog order. The first unconsumed photo
//! is paired with the unconsumed photo that maximizes the size of their tag
//! union, ties going to the earliest candidate. This is not a maximum-weight
//! matching and must stay greedy: changing the policy changes the output.

use crate::slideshow::catalog::{Photo, Tags};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub first: usize,
    pub second: usize,
    pub tags: Tags,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingOutcome {
    pub pairs: Vec<Pairing>,
    /// The leftover vertical photo when their count is odd
    pub dropped: Option<usize>,
}

pub fn pair_vertical_photos(photos: &[Photo]) -> PairingOutcome {
    let verticals: Vec<&Photo> = photos.iter().filter(|p| p.is_vertical()).collect();
    let mut consumed = vec![false; verticals.len()];
    let mut outcome = PairingOutcome::default();

    for i in 0..verticals.len() {
        if consumed[i] {
            continue;
        }
        consumed[i] = true;

        let mut best: Option<(usize, usize)> = None;
        for j in (i + 1)..verticals.len() {
            if consumed[j] {
                continue;
            }
            let union = verticals[i].tags.union(&verticals[j].tags).count();
            if best.map_or(true, |(_, size)| union > size) {
                best = Some((j, union));
            }
        }

        match best {
            Some((j, _)) => {
                consumed[j] = true;
                outcome.pairs.push(Pairing {
                    first: verticals[i].id,
                    second: verticals[j].id,
                    tags: verticals[i].tags.union(&verticals[j].tags).cloned().collect(),
                });
            }
            None => outcome.dropped = Some(verticals[i].id),
        }
    }

    outcome
}
