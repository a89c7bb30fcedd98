use blockmark_core::controller::{BlockRow, Document};
use blockmark_core::error::ViewerError;
use blockmark_core::ordering::Section;
use serde::Serialize;
use std::path::PathBuf;

use super::Context;
use crate::output;

#[derive(Serialize)]
struct ExtractView<'a> {
    document: &'a Document,
    rows: Vec<BlockRow<'a>>,
    sections: Vec<Section>,
    pages: Vec<String>,
}

pub fn run(
    ctx: &Context,
    url: &str,
    input: Option<PathBuf>,
    output_format: &str,
) -> Result<(), ViewerError> {
    let controller = ctx.open(url, input)?;

    match output_format {
        "json" => {
            let Some(document) = controller.document() else {
                return Ok(());
            };
            let view = ExtractView {
                document,
                rows: controller.rows(),
                sections: controller.sections(),
                pages: controller.pages(),
            };
            output::json::print(&view)?
        }
        _ => print!("{}", output::table::format_document(&controller)),
    }

    Ok(())
}
