use crate::cesr::diger::Diger;
use crate::cesr::{dig_dex, BaseMatter};
use crate::errors::MatterError;
use crate::Matter;
use indexmap::IndexMap;

/// Saider is a Matter subclass for a self-addressing identifier computed as
/// the digest of a serialization of the data it identifies, keyed off of a
/// single label (typically `"d"`) inside that serialization.
pub struct Saider {
    base: BaseMatter,
}

impl Saider {
    /// Wraps an already-computed digest as a Saider.
    pub fn new(raw: &[u8], code: &str) -> Result<Self, MatterError> {
        let base = BaseMatter::new(Some(raw), Some(code), None, None)?;
        Ok(Saider { base })
    }

    pub fn from_qb64(qb64: &str) -> Result<Self, MatterError> {
        let base = BaseMatter::from_qb64(qb64)?;
        Ok(Saider { base })
    }

    /// Computes the SAID over `ser`, the serialization of a map whose
    /// `label` field has already been dummy-filled to the digest's full
    /// text size.
    pub fn saidify(ser: &[u8], code: Option<&str>) -> Result<Self, MatterError> {
        let code = code.unwrap_or(dig_dex::BLAKE3_256);
        let raw = Diger::digest(ser, code)?;
        Saider::new(&raw, code)
    }

    /// Recomputes the SAID over `ser` and checks it against `expected` (the
    /// qb64 value currently stored at the SAID field).
    pub fn verify(ser: &[u8], code: &str, expected: &str) -> Result<bool, MatterError> {
        let saider = Saider::saidify(ser, Some(code))?;
        Ok(saider.qb64() == expected)
    }

    /// Returns a dummy-filled value for a SAID field of the given digest
    /// code: `'#'` repeated to the code's full text size, per the makify
    /// algorithm shared by Mapper and Saider.
    pub fn dummy(code: &str) -> Result<String, MatterError> {
        let fs = crate::cesr::full_size(code)?;
        Ok("#".repeat(fs))
    }
}

impl Matter for Saider {
    fn code(&self) -> &str { self.base.code() }
    fn raw(&self) -> &[u8] { self.base.raw() }
    fn qb64(&self) -> String { self.base.qb64() }
    fn qb2(&self) -> Vec<u8> { self.base.qb2() }
    fn is_transferable(&self) -> bool { self.base.is_transferable() }
    fn is_digestive(&self) -> bool { self.base.is_digestive() }
    fn is_prefixive(&self) -> bool { self.base.is_prefixive() }
    fn is_special(&self) -> bool { self.base.is_special() }
}

#[allow(dead_code)]
type JsonMad = IndexMap<String, serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dummy_is_full_size_of_hash_chars() {
        let d = Saider::dummy(dig_dex::BLAKE3_256).unwrap();
        assert_eq!(d.len(), 44);
        assert!(d.chars().all(|c| c == '#'));
    }

    #[test]
    fn saidify_then_verify_round_trips() {
        let ser = b"{\"d\":\"############################################\"}";
        let saider = Saider::saidify(ser, None).unwrap();
        assert!(Saider::verify(ser, dig_dex::BLAKE3_256, &saider.qb64()).unwrap());
    }
}
