//! Character set transcoding
//!
//! Source files arrive in a legacy 8-bit encoding (cp1252 by default) and
//! are stored as UTF-8. The text is not checked for XML well-formedness;
//! only the charset label has to resolve.

use crate::{IngestError, Result};
use encoding_rs::Encoding;

/// Decode `bytes` under the charset named by `charset_label` and re-encode
/// the text as UTF-8.
///
/// Labels are resolved per the WHATWG encoding registry, so `cp1252`,
/// `windows-1252` and `latin1` all name the expected legacy encodings.
/// Byte sequences with no mapping in the charset are replaced with U+FFFD
/// rather than failing; under cp1252 every byte maps, so this only arises
/// for other configured charsets.
pub fn transcode(bytes: &[u8], charset_label: &str) -> Result<Vec<u8>> {
    let encoding = Encoding::for_label(charset_label.trim().as_bytes()).ok_or_else(|| {
        IngestError::Encoding(format!("unknown charset label: {}", charset_label))
    })?;

    let (decoded, _, _) = encoding.decode(bytes);
    Ok(decoded.into_owned().into_bytes())
}
