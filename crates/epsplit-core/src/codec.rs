use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;

/// Decode raw document bytes with a single-byte Western encoding.
///
/// windows-1252 as specified by WHATWG maps all 256 byte values, so legacy
/// assets that mix encodings decode without loss and without errors.
pub fn decode_document(bytes: &[u8]) -> Cow<'_, str> {
    let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    if had_errors {
        tracing::warn!("document contained bytes outside windows-1252");
    }
    text
}

/// Encode an output document back to the source's single-byte encoding.
pub fn encode_document(text: &str) -> Cow<'_, [u8]> {
    let (bytes, _, had_unmappable) = WINDOWS_1252.encode(text);
    if had_unmappable {
        tracing::warn!("output contained characters outside windows-1252, written as references");
    }
    bytes
}
