//! Government-ID extraction for the registration payload.
//!
//! The backend only receives the last four characters of the identity
//! document. Numeric kinds (SSN, SIN, TFN) are stripped of separators
//! first; alphanumeric kinds (PAN, NINO, NRIC) are taken verbatim.

use std::sync::LazyLock;

use regex::Regex;

use crate::locale::{DocumentKind, GovDocument};

static NON_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\D").unwrap());

/// How many trailing characters of the document go on the wire.
const SUFFIX_LEN: usize = 4;

/// Extract the wire form of the user's identity document.
///
/// `expected` is the kind the active country asks for. A held document of
/// a different kind is still used (the user may have entered it before
/// switching country); that mismatch and a missing document are both
/// recoverable data-quality issues — logged, empty result, no error.
pub fn extract_gov_id(document: Option<&GovDocument>, expected: DocumentKind) -> String {
    let Some(doc) = document else {
        tracing::warn!(%expected, "no identity document captured");
        return String::new();
    };

    if doc.kind != expected {
        tracing::warn!(held = %doc.kind, %expected, "identity document kind mismatch; using held document");
    }

    let source = if doc.kind.is_numeric() {
        NON_DIGIT.replace_all(doc.value.trim(), "").into_owned()
    } else {
        doc.value.trim().to_string()
    };

    if source.is_empty() {
        tracing::warn!(kind = %doc.kind, "identity document is empty after normalization");
        return String::new();
    }

    let chars: Vec<char> = source.chars().collect();
    if chars.len() <= SUFFIX_LEN {
        source
    } else {
        chars[chars.len() - SUFFIX_LEN..].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Country;

    #[test]
    fn pan_takes_last_four_alphanumeric() {
        let doc = GovDocument::new(DocumentKind::Pan, "ABCDE1234F");
        assert_eq!(
            extract_gov_id(Some(&doc), Country::In.document_kind()),
            "234F"
        );
    }

    #[test]
    fn ssn_strips_separators_before_extracting() {
        let doc = GovDocument::new(DocumentKind::Ssn, "123-45-6789");
        assert_eq!(
            extract_gov_id(Some(&doc), Country::Us.document_kind()),
            "6789"
        );
    }

    #[test]
    fn shorter_than_four_uses_full_value() {
        let doc = GovDocument::new(DocumentKind::Pan, "AB");
        assert_eq!(
            extract_gov_id(Some(&doc), DocumentKind::Pan),
            "AB"
        );
        let doc = GovDocument::new(DocumentKind::Ssn, "1-2");
        assert_eq!(extract_gov_id(Some(&doc), DocumentKind::Ssn), "12");
    }

    #[test]
    fn missing_document_yields_empty() {
        assert_eq!(extract_gov_id(None, DocumentKind::Ssn), "");
    }

    #[test]
    fn mismatched_kind_falls_back_to_held_document() {
        // Country says SSN but the user entered a PAN earlier.
        let doc = GovDocument::new(DocumentKind::Pan, "ABCDE1234F");
        assert_eq!(extract_gov_id(Some(&doc), DocumentKind::Ssn), "234F");
    }

    #[test]
    fn all_separator_numeric_value_yields_empty() {
        let doc = GovDocument::new(DocumentKind::Ssn, "---  --");
        assert_eq!(extract_gov_id(Some(&doc), DocumentKind::Ssn), "");
    }

    #[test]
    fn nino_is_taken_verbatim() {
        let doc = GovDocument::new(DocumentKind::Nino, "QQ123456C");
        assert_eq!(extract_gov_id(Some(&doc), DocumentKind::Nino), "456C");
    }
}
