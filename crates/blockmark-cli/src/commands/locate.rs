use blockmark_core::error::ViewerError;
use blockmark_core::geometry::{OverlayBox, PixelBox, Rotation};
use blockmark_core::model::TextBlock;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

use super::{ConsoleSurface, Context};
use crate::output;

#[derive(Serialize)]
struct LocateView<'a> {
    index: usize,
    block: &'a TextBlock,
    overlay: Option<OverlayBox>,
    pixels: Option<PixelBox>,
}

pub fn run(
    ctx: &Context,
    url: &str,
    index: usize,
    rotation: i32,
    page_size: Option<&str>,
    input: Option<PathBuf>,
    output_format: &str,
) -> Result<(), ViewerError> {
    let rotation = Rotation::from_degrees(rotation)?;
    let page_size = page_size.map(parse_page_size).transpose()?;

    let mut controller = ctx.open(url, input)?;
    let mut surface = ConsoleSurface::default();
    controller.click_block(index, &mut surface, Instant::now())?;

    let block = &controller.blocks()[index];
    let overlay = controller.overlay_for_page(block.page, rotation);
    let pixels = match (overlay, page_size) {
        (Some(o), Some((w, h))) => Some(o.to_pixels(w, h)),
        _ => None,
    };

    match output_format {
        "json" => output::json::print(&LocateView {
            index,
            block,
            overlay,
            pixels,
        })?,
        _ => print!(
            "{}",
            output::table::format_overlay(index, block, overlay.as_ref(), pixels.as_ref())
        ),
    }

    Ok(())
}

/// Parse `WIDTHxHEIGHT` in pixels.
fn parse_page_size(s: &str) -> Result<(f64, f64), ViewerError> {
    let invalid = || ViewerError::ConfigInvalid(format!("page size '{s}' is not WIDTHxHEIGHT"));
    let (w, h) = s.split_once(['x', 'X']).ok_or_else(invalid)?;
    let w: f64 = w.trim().parse().map_err(|_| invalid())?;
    let h: f64 = h.trim().parse().map_err(|_| invalid())?;
    if !(w > 0.0 && h > 0.0) {
        return Err(invalid());
    }
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_size() {
        assert_eq!(parse_page_size("816x1056").unwrap(), (816.0, 1056.0));
        assert_eq!(parse_page_size("612.5 X 792").unwrap(), (612.5, 792.0));
        assert!(parse_page_size("816").is_err());
        assert!(parse_page_size("0x100").is_err());
        assert!(parse_page_size("axb").is_err());
    }
}
