//! MIME Guesser: evidence-fusion scoring over signature/extension/declared MIME.
//!
//! Ported from `guess_mime_type` in the original validator module. The original
//! breaks ties however Python's `max()` happens to resolve them (first-seen in
//! dict insertion order); this implementation makes the tie-break an explicit,
//! documented contract — lexicographically ascending on the MIME string — by
//! walking the `BTreeMap`-backed score table in key order and only replacing
//! the current leader on a strictly greater score.

use crate::mime_types::guess_from_extension;
use crate::model::UploadedFile;

/// Runs only when `file` is not yet blocked (§4.5). Awards one point each for
/// the signature MIME, the primary extension's guessed MIME, and the declared
/// MIME, but only for MIME types present in the known-types table; fills
/// `detection.guessed_mime` with the arg-max.
pub fn guess_mime_type(file: &mut UploadedFile) {
    let mut total_points_overall = 0u32;

    let signature_mime = file.detection.signature_mime.clone();
    award_point(file, &signature_mime);
    total_points_overall += 1;

    let main_extension = file
        .detection
        .extensions
        .first()
        .cloned()
        .unwrap_or_default();
    let extension_mime = guess_from_extension(&main_extension)
        .map(str::to_string)
        .unwrap_or_default();
    award_point(file, &extension_mime);
    total_points_overall += 1;

    let declared_mime = file.declared.content_type.clone();
    award_point(file, &declared_mime);
    total_points_overall += 1;

    file.validation.total_points_overall = total_points_overall;

    let guessed = file
        .validation
        .guessing_scores
        .iter()
        .fold(None::<(&str, u32)>, |best, (mime, &score)| match best {
            Some((_, best_score)) if score <= best_score => best,
            _ => Some((mime.as_str(), score)),
        })
        .map(|(mime, _)| mime.to_string())
        .unwrap_or_default();

    log::debug!(
        "[guess] name={} signature={:?} extension={:?} declared={:?} -> {}",
        file.current_name,
        signature_mime,
        extension_mime,
        declared_mime,
        guessed
    );

    file.detection.guessed_mime = guessed;
}

fn award_point(file: &mut UploadedFile, mime: &str) {
    if let Some(score) = file.validation.guessing_scores.get_mut(mime) {
        *score += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::detect;
    use crate::framework::MemoryFile;
    use crate::ingest::ingest;
    use crate::mime_types::known_mime_types;

    #[test]
    fn agreeing_evidence_wins_outright() {
        let mut mem = MemoryFile::new("doc.pdf", b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec(), "application/pdf");
        let mut file = ingest(&mut mem, known_mime_types()).unwrap();
        detect(&mut file);
        guess_mime_type(&mut file);
        assert_eq!(file.detection.guessed_mime, "application/pdf");
    }

    #[test]
    fn ties_break_lexicographically_ascending() {
        let mut mem = MemoryFile::new("mystery.bin", b"\x00\x01".to_vec(), "application/octet-stream");
        let mut file = ingest(&mut mem, known_mime_types()).unwrap();
        detect(&mut file);
        // None of the three sources matches a known MIME type; every score stays
        // zero, so the guesser falls back to the lexicographically first entry.
        guess_mime_type(&mut file);
        let smallest_known = known_mime_types().min().unwrap();
        assert_eq!(file.detection.guessed_mime, smallest_known);
    }

    #[test]
    fn total_points_overall_counts_three_sources() {
        let mut mem = MemoryFile::new("a.txt", b"hello".to_vec(), "text/plain");
        let mut file = ingest(&mut mem, known_mime_types()).unwrap();
        detect(&mut file);
        guess_mime_type(&mut file);
        assert_eq!(file.validation.total_points_overall, 3);
    }
}
