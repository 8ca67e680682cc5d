//! PDF encoding: raw bytes → standard base64 text.
//!
//! The text form exists for callers that move the document through channels
//! that only carry strings (JSON bodies, stdout of a child process). The
//! standard padded alphabet is used so any base64 decoder can read it back.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

/// Encode a PDF buffer as standard, padded base64.
pub fn encode_pdf(pdf: &[u8]) -> String {
    let b64 = STANDARD.encode(pdf);
    debug!("Encoded PDF {} bytes → {} bytes base64", pdf.len(), b64.len());
    b64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_padding() {
        assert_eq!(encode_pdf(b"%PDF-"), "JVBERi0=");
    }

    #[test]
    fn decodes_back_to_header() {
        let pdf = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n1 0 obj\n";
        let decoded = STANDARD.decode(encode_pdf(pdf)).expect("valid base64");
        assert!(decoded.starts_with(b"%PDF-"));
        assert_eq!(decoded, pdf);
    }

    #[test]
    fn empty_buffer() {
        assert_eq!(encode_pdf(&[]), "");
    }
}
