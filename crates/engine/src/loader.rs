//! Script document loading from an exported page

use crate::document::ScriptDocument;

const OPEN_TAG: &str = "<script";
const CLOSE_TAG: &str = "</script>";

/// Extract the inline `<script>` elements of an exported HTML page
///
/// Elements are collected in document order. Tag names are matched
/// case-insensitively; attributes on the opening tag are ignored. An
/// unterminated element runs to the end of the page.
#[tracing::instrument(skip_all)]
pub fn load_document(html: &str) -> ScriptDocument {
    let mut document = ScriptDocument::new();
    let lower = html.to_ascii_lowercase();
    let mut cursor = 0;

    while let Some(found) = lower[cursor..].find(OPEN_TAG) {
        let tag_start = cursor + found;
        let Some(tag_len) = lower[tag_start..].find('>') else {
            break;
        };
        let body_start = tag_start + tag_len + 1;

        let body_end = lower[body_start..]
            .find(CLOSE_TAG)
            .map(|i| body_start + i)
            .unwrap_or(html.len());

        document.append(&html[body_start..body_end]);
        cursor = (body_end + CLOSE_TAG.len()).min(html.len());
    }

    tracing::info!("Loaded {} script elements", document.len());
    document
}
