use crate::slideshow::catalog::Tags;

/// Interest of showing two tag sets next to each other:
/// `min(|t1 ∩ t2|, |t1 \ t2|, |t2 \ t1|)`.
pub fn score(t1: &Tags, t2: &Tags) -> usize {
    let common = t1.intersection(t2).count();
    let only_in_1 = t1.len() - common;
    let only_in_2 = t2.len() - common;
    common.min(only_in_1).min(only_in_2)
}
