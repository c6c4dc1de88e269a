use crate::cesr::{label_dex, BaseMatter};
use crate::errors::MatterError;
use crate::Matter;

/// Labeler is subclass of Matter for CESR native field map labels and/or generic
/// textual field values. Labeler auto sizes the instance code to minimize
/// the total encoded size of the associated field label or textual field value.
pub struct Labeler {
    base: BaseMatter,
}

impl Labeler {
    /// Fixed-size Tag codes ordered by the label length they hold, Tag1 for
    /// one char labels through Tag10 for ten char labels.
    const TAG_CODES: [&'static str; 10] = [
        label_dex::TAG1,
        label_dex::TAG2,
        label_dex::TAG3,
        label_dex::TAG4,
        label_dex::TAG5,
        label_dex::TAG6,
        label_dex::TAG7,
        label_dex::TAG8,
        label_dex::TAG9,
        label_dex::TAG10,
    ];

    /// Builds a Labeler for a strict field map label (regex
    /// `^[a-zA-Z_][a-zA-Z0-9_]*$`), choosing the smallest Tag code that
    /// admits the label's byte length and falling back to a variable sized
    /// Base64 text code for labels longer than Tag10 covers.
    pub fn new_label(label: &str) -> Result<Self, MatterError> {
        if label.is_empty() {
            return Err(MatterError::EmptyMaterial("label must not be empty".to_string()));
        }
        let raw = label.as_bytes();
        let base = if raw.len() <= Self::TAG_CODES.len() {
            let code = Self::TAG_CODES[raw.len() - 1];
            BaseMatter::new(Some(raw), Some(code), None, None)?
        } else {
            BaseMatter::new(Some(raw), Some(label_dex::STRB64_L0), None, Some(raw.len()))?
        };
        Ok(Labeler { base })
    }

    /// Builds a Labeler for an arbitrary UTF-8 field value. Base64-only
    /// text uses the StrB64 variable code, anything else falls back to the
    /// raw byte-string code.
    pub fn new_text(text: &str) -> Result<Self, MatterError> {
        let raw = text.as_bytes();
        let code = if Self::is_b64_text(text) {
            label_dex::STRB64_L0
        } else {
            label_dex::BYTES_L0
        };
        let base = BaseMatter::new(Some(raw), Some(code), None, Some(raw.len()))?;
        Ok(Labeler { base })
    }

    fn is_b64_text(text: &str) -> bool {
        text.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }

    /// Returns the label or text value as a UTF-8 string.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.base.raw()).into_owned()
    }
}

impl Matter for Labeler {
    fn code(&self) -> &str { self.base.code() }
    fn raw(&self) -> &[u8] { self.base.raw() }
    fn qb64(&self) -> String { self.base.qb64() }
    fn qb2(&self) -> Vec<u8> { self.base.qb2() }
    fn is_transferable(&self) -> bool { self.base.is_transferable() }
    fn is_digestive(&self) -> bool { self.base.is_digestive() }
    fn is_prefixive(&self) -> bool { self.base.is_prefixive() }
    fn is_special(&self) -> bool { self.base.is_special() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_label_uses_tag_code() {
        let lbl = Labeler::new_label("d").unwrap();
        assert_eq!(lbl.code(), label_dex::TAG1);
        assert_eq!(lbl.text(), "d");
    }

    #[test]
    fn ten_char_label_uses_tag10() {
        let lbl = Labeler::new_label("abcdefghij").unwrap();
        assert_eq!(lbl.code(), label_dex::TAG10);
    }

    #[test]
    fn long_label_falls_back_to_variable_code() {
        let lbl = Labeler::new_label("a_very_long_field_label_name").unwrap();
        assert_eq!(lbl.text(), "a_very_long_field_label_name");
    }

    #[test]
    fn empty_label_rejected() {
        assert!(Labeler::new_label("").is_err());
    }
}
