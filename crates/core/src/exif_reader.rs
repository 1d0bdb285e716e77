use anyhow::{Context, Result};
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Returns the IFD0 `DateTime` value of `path`, or `None` when it cannot be read.
///
/// Every failure (unreadable file, unknown container, corrupt EXIF, missing
/// tag) collapses to `None`; the underlying error is only logged at debug level.
pub fn find_exif_datetime(path: &Path) -> Option<String> {
    match read_exif_datetime(path) {
        Ok(value) => value,
        Err(err) => {
            let detail = format!("{err:#}");
            debug!(path = %path.display(), error = %detail, "EXIF DateTime unavailable");
            None
        }
    }
}

/// Like [`find_exif_datetime`] but keeps the failure detail.
///
/// A container that simply has no EXIF block is `Ok(None)`, not an error.
/// Only the metadata segment is read; pixel data is never decoded.
pub fn read_exif_datetime(path: &Path) -> Result<Option<String>> {
    let file = File::open(path)
        .with_context(|| format!("could not open EXIF source: {}", path.display()))?;
    let mut buf = BufReader::new(file);
    let exif = match Reader::new().read_from_container(&mut buf) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("could not parse EXIF: {}", path.display()))
        }
    };

    Ok(exif
        .get_field(Tag::DateTime, In::PRIMARY)
        .and_then(|field| first_ascii(&field.value)))
}

// display_value() reformats DateTime fields, so the raw ASCII bytes are used.
fn first_ascii(value: &Value) -> Option<String> {
    match value {
        Value::Ascii(parts) => parts
            .first()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}
