use crate::{
    error::{BmFontError, BmFontResult},
    parse_binary::BinaryParser,
};

use super::PayloadParser;

/// Every page name is null terminated. The names are stored back to back in
/// a single block, so the position of a name is its page index.
pub fn decode_pages(payload: &[u8]) -> BmFontResult<Vec<String>> {
    let mut parser = PayloadParser::new(payload);
    let mut pages = Vec::new();

    while parser.remaining() > 0 {
        let name = parser.parse_cstr();

        if name.is_empty() {
            // zero padding after the last terminator
            if parser.buffer()[parser.cursor()..].iter().all(|&b| b == 0) {
                break;
            }

            anyhow::bail!(BmFontError::EmptyPageName { index: pages.len() });
        }

        pages.push(name);
    }

    Ok(pages)
}
