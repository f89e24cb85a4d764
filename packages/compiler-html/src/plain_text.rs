use blockmail_model::Block;

/// Emitted when a document has no text-bearing content
pub const EMPTY_PLAIN_TEXT: &str = "(This email has no text content.)";

/// Plain-text alternative: the primary text of each text-bearing block, in
/// document order, separated by a blank line. Blank fields are skipped.
pub fn plain_text(blocks: &[Block]) -> String {
    let sections: Vec<&str> = blocks
        .iter()
        .filter_map(|block| block.data.primary_text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect();

    if sections.is_empty() {
        EMPTY_PLAIN_TEXT.to_string()
    } else {
        sections.join("\n\n")
    }
}
