//! Parses generator output back into sections, key/value rows and bullet
//! lists for display, including the optional translation block.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Literal substring whose first occurrence starts the translation block.
pub const TRANSLATION_DELIMITER: &str = "--- TRANSLATION";

/// Grammar of the delimiter line: `--- TRANSLATION (<Name>) ---`.
/// The parenthesized language name is optional.
fn delimiter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^---\s*TRANSLATION\s*(?:\(([^)]*)\))?\s*-*\s*$").expect("delimiter regex")
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Row {
    Bullet { text: String },
    KeyValue { key: String, value: String },
    Prose { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationBlock {
    pub language_label: String,
    pub sections: Vec<Section>,
}

/// Display-ready structure rebuilt from the stored raw output on every
/// render; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    pub primary: Vec<Section>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<TranslationBlock>,
}

/// Split raw generator output into primary sections and an optional
/// translation block. Pure and deterministic; malformed input degrades to
/// prose rows rather than failing.
pub fn parse(output: &str) -> ParsedDocument {
    match output.find(TRANSLATION_DELIMITER) {
        Some(pos) => {
            let (primary_text, translation_text) = output.split_at(pos);
            ParsedDocument {
                primary: parse_sections(primary_text, false),
                translation: Some(TranslationBlock {
                    language_label: translation_label(translation_text),
                    sections: parse_sections(translation_text, true),
                }),
            }
        }
        None => ParsedDocument {
            primary: parse_sections(output, false),
            translation: None,
        },
    }
}

/// Human-readable label for the translation block, taken from the
/// parenthesized language name on the delimiter line. Falls back to the
/// literal "Translation" when no name is present.
fn translation_label(translation_text: &str) -> String {
    let first_line = translation_text.lines().next().unwrap_or("").trim();
    if let Some(caps) = delimiter_re().captures(first_line) {
        if let Some(name) = caps.get(1) {
            let name = name.as_str().trim();
            if !name.is_empty() {
                return name.to_string();
            }
        }
    }
    "Translation".to_string()
}

/// Segment a text part into blank-line-delimited blocks and classify every
/// block body line. Blocks with an empty title are dropped; in the
/// translation part the delimiter line itself is not a contentful block.
fn parse_sections(text: &str, is_translation: bool) -> Vec<Section> {
    let mut sections = Vec::new();
    for block in split_blocks(text) {
        let title = block[0];
        if title.trim().is_empty() {
            continue;
        }
        if is_translation && title.contains("---") {
            continue;
        }
        let rows = block[1..].iter().map(|&line| classify_row(line)).collect();
        sections.push(Section {
            title: title.to_string(),
            rows,
        });
    }
    sections
}

/// Contiguous runs of non-blank lines; consecutive blank lines collapse to
/// a single separator.
fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Classify one body line: bullet first, then key/value on the first
/// colon (inner colons stay in the value), otherwise prose.
fn classify_row(line: &str) -> Row {
    let trimmed = line.trim();
    if trimmed.starts_with("- ") {
        return Row::Bullet {
            text: trimmed[2..].trim().to_string(),
        };
    }
    if let Some(pos) = trimmed.find(':') {
        return Row::KeyValue {
            key: trimmed[..pos].trim().to_string(),
            value: trimmed[pos + 1..].trim().to_string(),
        };
    }
    Row::Prose {
        text: trimmed.to_string(),
    }
}

/// Display title for a stored analysis: the value of its first `Vendor:`
/// line, used for the history sidebar.
pub fn record_title(formatted_output: &str) -> String {
    for line in formatted_output.lines() {
        if let Some(pos) = line.find("Vendor:") {
            let name = line[pos + "Vendor:".len()..].trim();
            if !name.is_empty() {
                return name.to_string();
            }
        }
    }
    "Unnamed Analysis".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
🧾 Extracted Purchase Details
Vendor: ABC Stationery
Date: 12 Aug 2024
Items: A4 Paper pack - 5, Printer Ink - 2
Total Amount: ₹3,450
Tax: Not Available
Payment Method: UPI

🗂 Expense Category
Category: Office Supplies
Reason: Paper and ink are routine office consumables.

📊 Purchase Intelligence Insights
- Bulk paper purchases suggest steady printing demand.
- Ink was bought alongside paper, hinting at coordinated restocking.
- No tax line was found on this receipt.

🔧 Business Recommendations
- Buy in bulk
- Compare ink prices across two more vendors.
- Ask the vendor for a tax invoice next time.

💬 Summary for Business Owner
This purchase reflects routine office restocking paid digitally.";

    fn with_translation(label_line: &str) -> String {
        format!(
            "{SAMPLE}\n\n{label_line}\n\n🧾 Detalles de Compra\nVendedor: ABC Stationery\n\n💬 Resumen\nCompra rutinaria de oficina."
        )
    }

    #[test]
    fn parse_is_idempotent() {
        let text = with_translation("--- TRANSLATION (Spanish) ---");
        assert_eq!(parse(&text), parse(&text));
    }

    #[test]
    fn sample_without_delimiter_is_all_primary() {
        let doc = parse(SAMPLE);
        assert!(doc.translation.is_none());
        assert_eq!(doc.primary.len(), 5);
        assert_eq!(doc.primary[0].title, "🧾 Extracted Purchase Details");
        assert_eq!(doc.primary[4].title, "💬 Summary for Business Owner");
    }

    #[test]
    fn translation_split_keeps_delimiter_side() {
        let text = with_translation("--- TRANSLATION (Spanish) ---");
        let doc = parse(&text);
        assert_eq!(doc.primary.len(), 5);
        let translation = doc.translation.expect("translation present");
        assert_eq!(translation.language_label, "Spanish");
        // The delimiter line itself is not a contentful section.
        assert_eq!(translation.sections.len(), 2);
        assert_eq!(translation.sections[0].title, "🧾 Detalles de Compra");
    }

    #[test]
    fn translation_label_defaults_without_language_name() {
        let text = with_translation("--- TRANSLATION ---");
        let label = parse(&text).translation.unwrap().language_label;
        assert_eq!(label, "Translation");
    }

    #[test]
    fn bullet_row_strips_marker() {
        let doc = parse("Tips\n- Buy in bulk");
        assert_eq!(
            doc.primary[0].rows[0],
            Row::Bullet {
                text: "Buy in bulk".to_string()
            }
        );
    }

    #[test]
    fn indented_bullet_still_classifies_as_bullet() {
        let doc = parse("Tips\n  - Track spending weekly");
        assert_eq!(
            doc.primary[0].rows[0],
            Row::Bullet {
                text: "Track spending weekly".to_string()
            }
        );
    }

    #[test]
    fn key_value_row_splits_on_first_colon() {
        let doc = parse("Details\nTotal: ₹3,450");
        assert_eq!(
            doc.primary[0].rows[0],
            Row::KeyValue {
                key: "Total".to_string(),
                value: "₹3,450".to_string()
            }
        );
    }

    #[test]
    fn key_value_preserves_inner_colons() {
        let doc = parse("Details\nPayment Method: UPI:1234");
        assert_eq!(
            doc.primary[0].rows[0],
            Row::KeyValue {
                key: "Payment Method".to_string(),
                value: "UPI:1234".to_string()
            }
        );
    }

    #[test]
    fn plain_line_is_prose() {
        let doc = parse("Summary\nA short clear paragraph");
        assert_eq!(
            doc.primary[0].rows[0],
            Row::Prose {
                text: "A short clear paragraph".to_string()
            }
        );
    }

    #[test]
    fn consecutive_blank_lines_collapse() {
        let doc = parse("First\nVendor: A\n\n\n\nSecond\n- item");
        assert_eq!(doc.primary.len(), 2);
        assert_eq!(doc.primary[0].title, "First");
        assert_eq!(doc.primary[1].title, "Second");
    }

    #[test]
    fn whitespace_only_title_block_is_dropped() {
        // Whitespace-only lines never become sections.
        let doc = parse("   \t  \nReal Section\nKey: Value");
        assert_eq!(doc.primary.len(), 1);
        assert_eq!(doc.primary[0].title, "Real Section");
    }

    #[test]
    fn second_delimiter_is_ordinary_content() {
        let text = format!(
            "{SAMPLE}\n\n--- TRANSLATION (French) ---\n\n🧾 Détails\nNote: see --- TRANSLATION marker above"
        );
        let doc = parse(&text);
        let translation = doc.translation.unwrap();
        assert_eq!(translation.language_label, "French");
        assert_eq!(translation.sections.len(), 1);
        assert_eq!(
            translation.sections[0].rows[0],
            Row::KeyValue {
                key: "Note".to_string(),
                value: "see --- TRANSLATION marker above".to_string()
            }
        );
    }

    #[test]
    fn delimiter_inside_user_content_splits_early() {
        // Known limitation: the first literal occurrence defines the split
        // point even when it appears inside ordinary content.
        let text = "Notes\nThe receipt mentions --- TRANSLATION literally\n\nMore\nKey: Value";
        let doc = parse(text);
        assert!(doc.translation.is_some());
        assert_eq!(doc.primary.len(), 1);
    }

    #[test]
    fn malformed_input_degrades_to_prose() {
        let doc = parse("Just a title\nno colon here\nno bullet either");
        assert_eq!(doc.primary.len(), 1);
        assert_eq!(doc.primary[0].rows.len(), 2);
        assert!(doc.primary[0]
            .rows
            .iter()
            .all(|r| matches!(r, Row::Prose { .. })));
    }

    #[test]
    fn record_title_reads_vendor_line() {
        assert_eq!(record_title(SAMPLE), "ABC Stationery");
        assert_eq!(record_title("💬 Summary\nNothing here"), "Unnamed Analysis");
    }
}
