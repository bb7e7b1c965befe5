//! PDF disarming, grounded on the original's `modules/sanitization/pdf.py`,
//! which hands the buffer to a vendored `pdfid`-based disarmer. This crate
//! uses `lopdf` instead of vendoring a PDF-specific disarmer, since `lopdf`
//! is a real, maintained crate capable of the same structural edit: strip
//! every dictionary key that can trigger active content, then re-serialize.

use sha2::{Digest, Sha256};

use crate::model::UploadedFile;

/// Dictionary keys that can trigger JavaScript execution, auto-launch
/// external programs, or surface embedded payloads when the PDF is opened.
const DANGEROUS_KEYS: &[&[u8]] = &[
    b"JS",
    b"JavaScript",
    b"Launch",
    b"OpenAction",
    b"AA",
    b"EmbeddedFile",
    b"EmbeddedFiles",
    b"RichMedia",
];

fn disarm_bytes(content: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut document = lopdf::Document::load_mem(content)?;

    for object in document.objects.values_mut() {
        let dict = match object {
            lopdf::Object::Dictionary(dict) => Some(dict),
            lopdf::Object::Stream(stream) => Some(&mut stream.dict),
            _ => None,
        };
        if let Some(dict) = dict {
            for key in DANGEROUS_KEYS {
                dict.remove(*key);
            }
        }
    }

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Runs only when `detection.guessed_mime == "application/pdf"` (§4.7).
/// Disarmer errors are caught, logged, and leave `content` unchanged.
pub fn sanitize(file: &mut UploadedFile) {
    log::debug!("[sanitize:pdf] {} - Starting PDF disarm", file.current_name);

    match disarm_bytes(&file.content) {
        Ok(disarmed) => {
            let disarmed_hash = hex::encode(Sha256::digest(&disarmed));
            if disarmed_hash != file.hashes.sha256 {
                file.sanitization.disarmed_pdf = true;
            }
            file.content = disarmed;
        }
        Err(e) => {
            log::error!(
                "[sanitize:pdf] Error sanitizing PDF to generate a disarmed PDF file: {}",
                e
            );
        }
    }
}
