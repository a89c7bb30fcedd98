use blockmark_core::error::ViewerError;
use blockmark_core::geometry::{OverlayBox, Rotation};
use blockmark_core::selection::{Highlight, SelectionOutcome};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

use super::{ConsoleSurface, Context};
use crate::output;

#[derive(Serialize)]
struct SelectView<'a> {
    selected: &'a str,
    result: &'a SelectionOutcome,
    active_index: Option<usize>,
    overlay: Option<OverlayBox>,
    searched: &'a [String],
}

pub fn run(
    ctx: &Context,
    url: &str,
    text: &str,
    rotation: i32,
    input: Option<PathBuf>,
    output_format: &str,
) -> Result<(), ViewerError> {
    let rotation = Rotation::from_degrees(rotation)?;
    let mut controller = ctx.open(url, input)?;
    let mut surface = ConsoleSurface::default();

    let now = Instant::now();
    let outcome = controller.select_text(text, &mut surface, now);
    // Let the debounced search land so it shows up in the output.
    controller.poll(&mut surface, now + ctx.config.highlight.search_debounce());

    let overlay = match controller.highlight() {
        Highlight::Overlay { page, .. } => controller.overlay_for_page(*page, rotation),
        _ => None,
    };

    match output_format {
        "json" => output::json::print(&SelectView {
            selected: text.trim(),
            result: &outcome,
            active_index: controller.selection().active_index(),
            overlay,
            searched: &surface.searches,
        })?,
        _ => print!(
            "{}",
            output::table::format_selection(text, &outcome, &controller, overlay.as_ref())
        ),
    }

    Ok(())
}
