use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::slideshow::slides::Slide;

/// Writes the slide count, then each slide's photo ids on its own line.
pub fn write_solution<W: Write>(out: &mut W, slides: &[Slide]) -> io::Result<()> {
    writeln!(out, "{}", slides.len())?;
    for slide in slides {
        let ids: Vec<String> = slide.photo_ids.iter().map(|id| id.to_string()).collect();
        writeln!(out, "{}", ids.join(" "))?;
    }
    Ok(())
}

pub fn save_solution(path: &Path, slides: &[Slide]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_solution(&mut out, slides)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_solution_keeps_photo_order_within_slide() {
        let slides = vec![
            Slide { photo_ids: vec![3], tags: Default::default() },
            Slide { photo_ids: vec![2, 0], tags: Default::default() },
        ];
        let mut out = Vec::new();
        write_solution(&mut out, &slides).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2\n3\n2 0\n");
    }

    #[test]
    fn test_write_solution_given_no_slides_should_write_zero() {
        let mut out = Vec::new();
        write_solution(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0\n");
    }
}
