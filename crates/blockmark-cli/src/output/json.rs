use blockmark_core::error::ViewerError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), ViewerError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
