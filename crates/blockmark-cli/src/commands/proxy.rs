use blockmark_core::error::ViewerError;
use std::path::Path;

use super::Context;

pub fn url(ctx: &Context, source_url: &str) -> Result<(), ViewerError> {
    let service = ctx.service()?;
    println!("{}", service.proxy_url(source_url));
    Ok(())
}

pub fn download(ctx: &Context, source_url: &str, out: &Path) -> Result<(), ViewerError> {
    let service = ctx.service()?;
    let bytes = service.fetch_pdf(source_url)?;
    std::fs::write(out, &bytes)?;
    eprintln!("Wrote {} bytes to {}", bytes.len(), out.display());
    Ok(())
}
