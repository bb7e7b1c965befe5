//! Filename randomization, grounded on the original's
//! `create_random_filename_with_guessed_extension`.

use uuid::Uuid;

use crate::mime_types::guess_extension;
use crate::model::UploadedFile;

/// Replace `current_name` with a fresh UUIDv4 plus the extension the MIME
/// guesser's output maps to. Unknown guessed MIMEs fall back to no extension
/// rather than blocking — sanitization never fails closed.
pub fn randomize(file: &mut UploadedFile) {
    let extension = guess_extension(&file.detection.guessed_mime);
    let new_name = match extension {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    };

    log::debug!(
        "[sanitize:filename] {} -> {}",
        file.current_name,
        new_name
    );

    file.current_name = new_name;
    file.sanitization.created_random_filename_with_guessed_extension = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::MemoryFile;
    use crate::ingest::ingest;
    use crate::mime_types::known_mime_types;

    #[test]
    fn random_name_carries_the_guessed_extension() {
        let mut mem = MemoryFile::new("report.pdf", b"%PDF-".to_vec(), "application/pdf");
        let mut file = ingest(&mut mem, known_mime_types()).unwrap();
        file.detection.guessed_mime = "application/pdf".to_string();
        randomize(&mut file);
        assert!(file.current_name.ends_with(".pdf"));
        assert!(file.sanitization.created_random_filename_with_guessed_extension);
        let stem = file.current_name.trim_end_matches(".pdf");
        assert!(uuid::Uuid::parse_str(stem).is_ok());
    }

    #[test]
    fn unknown_guessed_mime_still_gets_a_uuid_name() {
        let mut mem = MemoryFile::new("mystery.bin", b"\x00".to_vec(), "application/octet-stream");
        let mut file = ingest(&mut mem, known_mime_types()).unwrap();
        file.detection.guessed_mime = "application/octet-stream".to_string();
        randomize(&mut file);
        assert!(uuid::Uuid::parse_str(&file.current_name).is_ok());
    }
}
