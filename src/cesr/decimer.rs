use crate::cesr::{mtr_dex, BaseMatter};
use crate::errors::MatterError;
use crate::Matter;

/// Native value held by a Decimer: either the integer or floating-point
/// reading that produced its canonical text, preserved so a round trip
/// restores the original Rust type rather than always widening to float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decimal {
    Int(i64),
    Float(f64),
}

/// Decimer is a Matter subclass for CESR native decimal numbers: finite
/// integers and floats encoded as their canonical decimal text, stored as
/// a variable-length Base64 text primitive.
pub struct Decimer {
    base: BaseMatter,
    decimal: Decimal,
}

impl Decimer {
    /// Builds a Decimer from a native Rust number, choosing the shortest
    /// canonical text that round-trips back to the same value.
    pub fn new(decimal: Decimal) -> Result<Self, MatterError> {
        let text = match decimal {
            Decimal::Int(i) => i.to_string(),
            Decimal::Float(f) => {
                if !f.is_finite() {
                    return Err(MatterError::InvalidValue(format!(
                        "Decimer requires a finite number, got {}",
                        f
                    )));
                }
                let mut s = format!("{}", f);
                if !s.contains('.') {
                    s.push_str(".0");
                }
                s
            }
        };
        let raw = text.as_bytes();
        let base = BaseMatter::new(Some(raw), Some(mtr_dex::DECIMAL_L0), None, Some(raw.len()))?;
        Ok(Decimer { base, decimal })
    }

    /// Parses a Decimer off an already-decoded Matter whose raw bytes hold
    /// canonical decimal text; used when deserializing a Mapper value.
    pub fn from_qb64b(data: &mut Vec<u8>, strip: Option<bool>) -> Result<Self, MatterError> {
        let base = BaseMatter::from_qb64b(data, strip)?;
        let text = std::str::from_utf8(base.raw())
            .map_err(|_| MatterError::InvalidValue("Decimer raw is not valid UTF-8".to_string()))?;
        let decimal = Self::parse(text)?;
        Ok(Decimer { base, decimal })
    }

    pub fn parse(text: &str) -> Result<Decimal, MatterError> {
        if text.contains('.') || text.contains('e') || text.contains('E') {
            text.parse::<f64>()
                .map(Decimal::Float)
                .map_err(|_| MatterError::InvalidValue(format!("Invalid decimal text: {}", text)))
        } else {
            text.parse::<i64>()
                .map(Decimal::Int)
                .map_err(|_| MatterError::InvalidValue(format!("Invalid decimal text: {}", text)))
        }
    }

    pub fn decimal(&self) -> Decimal {
        self.decimal
    }

    /// Decimal text as stored, with the `'.'` lead stripped or not; used
    /// when callers need the literal serialized form.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.base.raw()).into_owned()
    }
}

impl Matter for Decimer {
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
    fn int_round_trips() {
        let d = Decimer::new(Decimal::Int(42)).unwrap();
        assert_eq!(d.text(), "42");
        let mut bytes = d.qb64().into_bytes();
        let back = Decimer::from_qb64b(&mut bytes, None).unwrap();
        assert_eq!(back.decimal(), Decimal::Int(42));
    }

    #[test]
    fn float_round_trips() {
        let d = Decimer::new(Decimal::Float(3.25)).unwrap();
        let mut bytes = d.qb64().into_bytes();
        let back = Decimer::from_qb64b(&mut bytes, None).unwrap();
        assert_eq!(back.decimal(), Decimal::Float(3.25));
    }

    #[test]
    fn non_finite_rejected() {
        assert!(Decimer::new(Decimal::Float(f64::NAN)).is_err());
    }
}
