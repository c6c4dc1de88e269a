//! CESR native field map codec: Mapper serializes and deserializes an
//! ordered field map (a "mad") to and from its quadlet-aligned qb64 body,
//! and computes/verifies SAID fields over it. Partor layers the
//! hierarchical most-compact SAID algorithm on top of Mapper.

use crate::cesr::counting::{ctr_dex_2_0, BaseCounter, Counter};
use crate::cesr::decimer::{Decimal, Decimer};
use crate::cesr::diger::Diger;
use crate::cesr::labeler::Labeler;
use crate::cesr::saider::Saider;
use crate::cesr::{full_size, label_dex, mtr_dex, BaseMatter, Matter, Parsable};
use crate::keri::core::errors::MapperError;
use crate::keri::core::serdering::{Sadder, SadValue};
use indexmap::IndexMap;

/// Codes Mapper may itself emit for reserved atoms (null/bool/decimal/empty)
/// or that Labeler may emit for labels and text values. A string value whose
/// full content happens to parse as one of these must be escaped so
/// deserialize doesn't mistake it for the reserved atom it resembles.
const ESCAPE_CODES: &[&str] = &[
    mtr_dex::NULL,
    mtr_dex::NO,
    mtr_dex::YES,
    mtr_dex::EMPTY,
    mtr_dex::DECIMAL_L0,
    mtr_dex::DECIMAL_L1,
    mtr_dex::DECIMAL_L2,
    mtr_dex::DECIMAL_BIG_L0,
    mtr_dex::DECIMAL_BIG_L1,
    mtr_dex::DECIMAL_BIG_L2,
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
    label_dex::STRB64_L0,
    label_dex::STRB64_L1,
    label_dex::STRB64_L2,
    label_dex::STRB64_BIG_L0,
    label_dex::STRB64_BIG_L1,
    label_dex::STRB64_BIG_L2,
    label_dex::LABEL1,
    label_dex::LABEL2,
    label_dex::BYTES_L0,
    label_dex::BYTES_L1,
    label_dex::BYTES_L2,
    label_dex::BYTES_BIG_L0,
    label_dex::BYTES_BIG_L1,
    label_dex::BYTES_BIG_L2,
];

fn is_escape_code(code: &str) -> bool {
    ESCAPE_CODES.contains(&code)
}

fn is_decimal_code(code: &str) -> bool {
    matches!(
        code,
        "4H" | "5H" | "6H" | "7AAH" | "8AAH" | "9AAH"
    )
}

fn is_label_code(code: &str) -> bool {
    matches!(
        code,
        label_dex::TAG1
            | label_dex::TAG2
            | label_dex::TAG3
            | label_dex::TAG4
            | label_dex::TAG5
            | label_dex::TAG6
            | label_dex::TAG7
            | label_dex::TAG8
            | label_dex::TAG9
            | label_dex::TAG10
            | label_dex::STRB64_L0
            | label_dex::STRB64_L1
            | label_dex::STRB64_L2
            | label_dex::STRB64_BIG_L0
            | label_dex::STRB64_BIG_L1
            | label_dex::STRB64_BIG_L2
            | label_dex::LABEL1
            | label_dex::LABEL2
            | label_dex::BYTES_L0
            | label_dex::BYTES_L1
            | label_dex::BYTES_L2
            | label_dex::BYTES_BIG_L0
            | label_dex::BYTES_BIG_L1
            | label_dex::BYTES_BIG_L2
    )
}

fn is_valid_label(label: &str) -> bool {
    let mut chars = label.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn decimal_to_value(decimal: Decimal) -> Result<SadValue, MapperError> {
    match decimal {
        Decimal::Int(i) => Ok(SadValue::from_i64(i)),
        Decimal::Float(f) => {
            SadValue::from_f64(f).map_err(MapperError::InvalidValue)
        }
    }
}

/// Mapper holds an ordered field map (`mad`) together with its CESR
/// serialization (`raw`), and drives the makify/verify SAID algorithm.
#[derive(Clone)]
pub struct Mapper {
    mad: Sadder,
    raw: Vec<u8>,
    count: u64,
    strict: bool,
}

impl Mapper {
    /// Builds a Mapper from an in-memory mad, serializing it immediately.
    pub fn new(mad: Sadder, strict: bool) -> Result<Self, MapperError> {
        let (raw, count) = Self::serialize(&mad, strict)?;
        Ok(Mapper { mad, raw, count, strict })
    }

    /// Builds a Mapper from a previously serialized qb64/qb64b body,
    /// stripping exactly the consumed map group from `raw`.
    pub fn from_raw(raw: &[u8], strict: bool) -> Result<Self, MapperError> {
        let mut buf = raw.to_vec();
        let mad = Self::deserialize(&mut buf)?;
        if !buf.is_empty() {
            return Err(MapperError::Deserialize(
                "bytes remain after map payload consumption".to_string(),
            ));
        }
        let (reraw, count) = Self::serialize(&mad, strict)?;
        Ok(Mapper { mad, raw: reraw, count, strict })
    }

    /// Runs the SAID computation (makify) pass: dummies every field named in
    /// `saids`, digests the dummy serialization, and writes the resulting
    /// SAID back into `mad` before building the final Mapper.
    pub fn makify(
        mad: Sadder,
        saids: &IndexMap<String, String>,
        strict: bool,
    ) -> Result<Self, MapperError> {
        let mut mad = mad;
        let resolved = Self::dummy_fill(&mut mad, saids)?;
        let (dummy_raw, _) = Self::serialize(&mad, strict)?;
        for (label, code) in &resolved {
            let said = Self::digest_field(&dummy_raw, code)?;
            mad.insert(label.clone(), SadValue::String(said));
        }
        Self::new(mad, strict)
    }

    /// Recomputes every SAID field named in `saids` over a dummied copy of
    /// this Mapper's mad and compares against the stored values.
    pub fn verify(&self, saids: &IndexMap<String, String>) -> Result<bool, MapperError> {
        let mut dummy = self.mad.clone();
        let mut codes: IndexMap<String, String> = IndexMap::new();
        for label in saids.keys() {
            let actual = match self.mad.get(label) {
                Some(SadValue::String(s)) => s.clone(),
                _ => {
                    return Err(MapperError::InvalidValue(format!(
                        "missing SAID field '{}'",
                        label
                    )))
                }
            };
            let mtr = BaseMatter::from_qb64(&actual)?;
            if !mtr.is_digestive() {
                return Err(MapperError::InvalidValue(format!(
                    "SAID field '{}' has non-digestive code {}",
                    label,
                    mtr.code()
                )));
            }
            let code = mtr.code().to_string();
            let fs = full_size(&code)?;
            dummy.insert(label.clone(), SadValue::String("#".repeat(fs)));
            codes.insert(label.clone(), code);
        }
        let (dummy_raw, _) = Self::serialize(&dummy, self.strict)?;
        for (label, code) in &codes {
            let said = Self::digest_field(&dummy_raw, code)?;
            if let Some(SadValue::String(actual)) = self.mad.get(label) {
                if actual != &said {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn digest_field(dummy_raw: &[u8], code: &str) -> Result<String, MapperError> {
        let raw = Diger::digest(dummy_raw, code)?;
        let saider = Saider::new(&raw, code)?;
        Ok(saider.qb64())
    }

    /// Dummies every `saids`-named field present in `mad`, honoring an
    /// already-present digestive code over the configured default, and
    /// returns the label→code map actually used.
    fn dummy_fill(
        mad: &mut Sadder,
        saids: &IndexMap<String, String>,
    ) -> Result<IndexMap<String, String>, MapperError> {
        let mut resolved = IndexMap::new();
        for (label, default_code) in saids {
            if !mad.contains_key(label) {
                continue;
            }
            let code = match mad.get(label) {
                Some(SadValue::String(s)) => match BaseMatter::from_qb64(s) {
                    Ok(mtr) if mtr.is_digestive() && mtr.qb64() == *s => mtr.code().to_string(),
                    _ => default_code.clone(),
                },
                _ => default_code.clone(),
            };
            let fs = full_size(&code)?;
            mad.insert(label.clone(), SadValue::String("#".repeat(fs)));
            resolved.insert(label.clone(), code);
        }
        Ok(resolved)
    }

    pub fn mad(&self) -> &Sadder {
        &self.mad
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn qb64(&self) -> String {
        String::from_utf8_lossy(&self.raw).into_owned()
    }

    pub fn qb64b(&self) -> Vec<u8> {
        self.raw.clone()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn size(&self) -> usize {
        self.raw.len()
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    pub fn said(&self, label: &str) -> Option<&str> {
        match self.mad.get(label) {
            Some(SadValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    // -- serialize ---------------------------------------------------

    fn serialize(mad: &Sadder, strict: bool) -> Result<(Vec<u8>, u64), MapperError> {
        let mut body = Vec::new();
        for (label, value) in mad {
            if strict && !is_valid_label(label) {
                return Err(MapperError::InvalidValue(format!(
                    "label '{}' is not a strict field map label",
                    label
                )));
            }
            let lbl = Labeler::new_label(label)?;
            body.extend(lbl.qb64b());
            Self::serialize_value(value, &mut body)?;
        }
        Self::enclose(&body, ctr_dex_2_0::GENERIC_MAP_GROUP)
    }

    fn serialize_value(value: &SadValue, out: &mut Vec<u8>) -> Result<(), MapperError> {
        match value {
            SadValue::Null => {
                out.extend(BaseMatter::new(Some(&[]), Some(mtr_dex::NULL), None, None)?.qb64b())
            }
            SadValue::Bool(true) => {
                out.extend(BaseMatter::new(Some(&[]), Some(mtr_dex::YES), None, None)?.qb64b())
            }
            SadValue::Bool(false) => {
                out.extend(BaseMatter::new(Some(&[]), Some(mtr_dex::NO), None, None)?.qb64b())
            }
            SadValue::Number(n) => {
                let decimal = if let Some(i) = n.as_i64() {
                    Decimal::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Decimal::Int(u as i64)
                } else if let Some(f) = n.as_f64() {
                    Decimal::Float(f)
                } else {
                    return Err(MapperError::Serialize("unsupported numeric value".to_string()));
                };
                out.extend(Decimer::new(decimal)?.qb64b());
            }
            SadValue::String(s) => {
                if let Ok(mtr) = BaseMatter::from_qb64(s) {
                    if mtr.qb64() == *s {
                        if is_escape_code(mtr.code()) {
                            out.extend(
                                BaseMatter::new(Some(&[]), Some(mtr_dex::ESCAPE), None, None)?
                                    .qb64b(),
                            );
                        }
                        out.extend(s.as_bytes());
                        return Ok(());
                    }
                }
                out.extend(Labeler::new_text(s)?.qb64b());
            }
            SadValue::Array(items) => {
                let mut inner = Vec::new();
                for item in items {
                    Self::serialize_value(item, &mut inner)?;
                }
                let (framed, _) = Self::enclose(&inner, ctr_dex_2_0::GENERIC_LIST_GROUP)?;
                out.extend(framed);
            }
            SadValue::Object(map) => {
                let (sub_raw, _) = Self::serialize(map, false)?;
                out.extend(sub_raw);
            }
        }
        Ok(())
    }

    /// Wraps `body` (already quadlet-aligned primitive/group bytes) in a
    /// counter of the given code, recording the payload's quadlet count.
    fn enclose(body: &[u8], code: &str) -> Result<(Vec<u8>, u64), MapperError> {
        if body.len() % 4 != 0 {
            return Err(MapperError::Serialize(
                "group body is not quadlet aligned".to_string(),
            ));
        }
        let quadlets = (body.len() / 4) as u64;
        let counter = BaseCounter::from_code_and_count(Some(code), Some(quadlets), None)?;
        let mut raw = counter.qb64b();
        raw.extend_from_slice(body);
        Ok((raw, quadlets))
    }

    // -- deserialize -------------------------------------------------

    fn deserialize(data: &mut Vec<u8>) -> Result<Sadder, MapperError> {
        let counter = BaseCounter::from_qb64b(data, Some(true))?;
        if counter.code() != ctr_dex_2_0::GENERIC_MAP_GROUP
            && counter.code() != ctr_dex_2_0::BIG_GENERIC_MAP_GROUP
        {
            return Err(MapperError::Deserialize(format!(
                "expected a map counter, got code={}",
                counter.code()
            )));
        }
        let len = (counter.count() * 4) as usize;
        if data.len() < len {
            return Err(MapperError::Deserialize("truncated map body".to_string()));
        }
        let mut body: Vec<u8> = data.drain(..len).collect();
        Self::deserialize_map_body(&mut body)
    }

    fn deserialize_map_body(body: &mut Vec<u8>) -> Result<Sadder, MapperError> {
        let mut mad = Sadder::new();
        while !body.is_empty() {
            let lbl = BaseMatter::from_qb64b(body, Some(true))?;
            let label = String::from_utf8_lossy(lbl.raw()).into_owned();
            let value = Self::deserialize_value(body)?;
            mad.insert(label, value);
        }
        Ok(mad)
    }

    fn deserialize_value(body: &mut Vec<u8>) -> Result<SadValue, MapperError> {
        if body.is_empty() {
            return Err(MapperError::Deserialize("truncated field value".to_string()));
        }
        if body[0] == b'-' {
            let counter = BaseCounter::from_qb64b(body, Some(true))?;
            let len = (counter.count() * 4) as usize;
            if body.len() < len {
                return Err(MapperError::Deserialize("truncated group value".to_string()));
            }
            let mut inner: Vec<u8> = body.drain(..len).collect();
            return if counter.code() == ctr_dex_2_0::GENERIC_MAP_GROUP
                || counter.code() == ctr_dex_2_0::BIG_GENERIC_MAP_GROUP
            {
                Ok(SadValue::Object(Self::deserialize_map_body(&mut inner)?))
            } else if counter.code() == ctr_dex_2_0::GENERIC_LIST_GROUP
                || counter.code() == ctr_dex_2_0::BIG_GENERIC_LIST_GROUP
            {
                let mut items = Vec::new();
                while !inner.is_empty() {
                    items.push(Self::deserialize_value(&mut inner)?);
                }
                Ok(SadValue::Array(items))
            } else {
                Err(MapperError::Deserialize(format!(
                    "unexpected group counter code={}",
                    counter.code()
                )))
            };
        }

        let mtr = BaseMatter::from_qb64b(body, Some(true))?;
        if mtr.code() == mtr_dex::ESCAPE {
            let next = BaseMatter::from_qb64b(body, Some(true))?;
            return Ok(SadValue::String(next.qb64()));
        }
        Self::value_from_primitive(&mtr)
    }

    fn value_from_primitive(mtr: &BaseMatter) -> Result<SadValue, MapperError> {
        let code = mtr.code();
        if code == mtr_dex::NULL {
            return Ok(SadValue::Null);
        }
        if code == mtr_dex::YES {
            return Ok(SadValue::Bool(true));
        }
        if code == mtr_dex::NO {
            return Ok(SadValue::Bool(false));
        }
        if is_decimal_code(code) {
            let text = String::from_utf8_lossy(mtr.raw()).into_owned();
            let decimal = Decimer::parse(&text)?;
            return decimal_to_value(decimal);
        }
        if is_label_code(code) {
            return Ok(SadValue::String(String::from_utf8_lossy(mtr.raw()).into_owned()));
        }
        Ok(SadValue::String(mtr.qb64()))
    }
}

/// Partor layers the hierarchical most-compact SAID algorithm (`trace` /
/// `compact`) over a Mapper. A leaf is a nested mad that carries a
/// SAID-field label at its own top level and has no descendant map that
/// also carries one.
pub struct Partor {
    mapper: Mapper,
    saids: IndexMap<String, String>,
    leaves: IndexMap<String, Mapper>,
    partials: Vec<IndexMap<String, Mapper>>,
}

impl Partor {
    /// Builds a Partor over `mad`, running the SAID makify pass so the
    /// saidive invariant holds from construction onward.
    pub fn new(
        mad: Sadder,
        saids: IndexMap<String, String>,
        strict: bool,
    ) -> Result<Self, MapperError> {
        let mapper = Mapper::makify(mad, &saids, strict)?;
        Ok(Partor {
            mapper,
            saids,
            leaves: IndexMap::new(),
            partials: Vec::new(),
        })
    }

    pub fn mad(&self) -> &Sadder {
        self.mapper.mad()
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    pub fn leaves(&self) -> &IndexMap<String, Mapper> {
        &self.leaves
    }

    pub fn partials(&self) -> &[IndexMap<String, Mapper>] {
        &self.partials
    }

    /// `None` if never traced, `true` if exactly one top-level leaf carries
    /// a SAID, `false` otherwise.
    pub fn iscompact(&self) -> Option<bool> {
        if self.leaves.is_empty() {
            None
        } else {
            Some(self.leaves.len() == 1 && self.leaves.contains_key(""))
        }
    }

    pub fn get_sub_mad<'a>(mad: &'a Sadder, path: &str) -> Option<&'a SadValue> {
        if path.is_empty() {
            return None;
        }
        let mut segments = path.split('.');
        let mut cur = mad.get(segments.next()?)?;
        for seg in segments {
            match cur {
                SadValue::Object(m) => cur = m.get(seg)?,
                _ => return None,
            }
        }
        Some(cur)
    }

    pub fn get_super_mad<'a>(mad: &'a Sadder, path: &str) -> Option<&'a Sadder> {
        if path.is_empty() {
            return Some(mad);
        }
        let mut cur = mad;
        for seg in path.split('.') {
            match cur.get(seg)? {
                SadValue::Object(m) => cur = m,
                _ => return None,
            }
        }
        Some(cur)
    }

    fn get_super_mad_mut<'a>(mad: &'a mut Sadder, path: &str) -> Option<&'a mut Sadder> {
        if path.is_empty() {
            return Some(mad);
        }
        let mut cur = mad;
        for seg in path.split('.') {
            match cur.get_mut(seg)? {
                SadValue::Object(m) => cur = m,
                _ => return None,
            }
        }
        Some(cur)
    }

    /// Depth-first walk recording the Mapper for every leaf under its
    /// dot-delimited path (top level is `""`); optionally makifies each
    /// leaf and writes the resulting SAIDs back into the tree. Returns the
    /// recorded leaf paths.
    pub fn trace(&mut self, saidify: bool) -> Result<Vec<String>, MapperError> {
        self.leaves.clear();
        let mut mad = self.mapper.mad().clone();
        Self::trace_node(&mut mad, "", &self.saids, saidify, &mut self.leaves, self.mapper.strict())?;
        self.mapper = Mapper::new(mad, self.mapper.strict())?;
        Ok(self.leaves.keys().cloned().collect())
    }

    fn trace_node(
        node: &mut Sadder,
        path: &str,
        saids: &IndexMap<String, String>,
        saidify: bool,
        leaves: &mut IndexMap<String, Mapper>,
        strict: bool,
    ) -> Result<bool, MapperError> {
        for label in saids.keys() {
            if matches!(node.get(label), Some(SadValue::Object(_))) {
                return Err(MapperError::InvalidValue(format!(
                    "nested map stored in SAID field '{}' at path '{}'",
                    label, path
                )));
            }
        }

        let mut has_said_descendant = false;
        let keys: Vec<String> = node.keys().cloned().collect();
        for key in keys {
            let is_object = matches!(node.get(&key), Some(SadValue::Object(_)));
            if !is_object {
                continue;
            }
            let mut sub = match node.remove(&key) {
                Some(SadValue::Object(m)) => m,
                _ => unreachable!(),
            };
            let sub_path = if path.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", path, key)
            };
            let sub_has_said =
                Self::trace_node(&mut sub, &sub_path, saids, saidify, leaves, strict)?;
            node.insert(key, SadValue::Object(sub));
            has_said_descendant |= sub_has_said;
        }

        let has_own_said = saids.keys().any(|l| node.contains_key(l));

        if has_own_said && !has_said_descendant {
            let leaf_mapper = if saidify {
                Mapper::makify(node.clone(), saids, strict)?
            } else {
                Mapper::new(node.clone(), strict)?
            };
            *node = leaf_mapper.mad().clone();
            leaves.insert(path.to_string(), leaf_mapper);
            return Ok(true);
        }

        Ok(has_own_said || has_said_descendant)
    }

    /// Iterates trace+saidify, then collapses every non-root leaf's
    /// sub-map in the parent tree down to its SAID string, re-tracing
    /// after each collapse. Terminates when `iscompact()` is `true`.
    /// Every intermediate leaf set is recorded under `partials`.
    pub fn compact(&mut self) -> Result<(), MapperError> {
        let primary = self
            .saids
            .keys()
            .next()
            .cloned()
            .ok_or_else(|| MapperError::InvalidValue("no SAID labels configured".to_string()))?;

        loop {
            self.trace(true)?;
            if self.iscompact() == Some(true) {
                break;
            }
            self.partials.push(self.leaves.clone());

            let mut mad = self.mapper.mad().clone();
            let paths: Vec<String> = self
                .leaves
                .keys()
                .filter(|p| !p.is_empty())
                .cloned()
                .collect();
            if paths.is_empty() {
                return Err(MapperError::InvalidValue(
                    "compact did not converge: no collapsible leaves remain".to_string(),
                ));
            }
            for path in paths {
                let leaf_mapper = &self.leaves[&path];
                let said_value = leaf_mapper
                    .mad()
                    .get(&primary)
                    .cloned()
                    .ok_or_else(|| {
                        MapperError::InvalidValue(format!(
                            "leaf at '{}' missing SAID field '{}'",
                            path, primary
                        ))
                    })?;
                let mut segs: Vec<&str> = path.split('.').collect();
                let key = segs.pop().expect("path is non-empty");
                let parent_path = segs.join(".");
                let parent = Self::get_super_mad_mut(&mut mad, &parent_path).ok_or_else(|| {
                    MapperError::InvalidValue(format!("missing parent for path '{}'", path))
                })?;
                parent.insert(key.to_string(), said_value);
            }
            self.mapper = Mapper::new(mad, self.mapper.strict())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sadder(pairs: Vec<(&str, SadValue)>) -> Sadder {
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn round_trip_scalars_and_nesting() {
        let inner = sadder(vec![("x", SadValue::from_i64(1))]);
        let mad = sadder(vec![
            ("a", SadValue::Null),
            ("b", SadValue::Bool(true)),
            ("c", SadValue::from_i64(7)),
            ("name", SadValue::from_string("alice")),
            ("nest", SadValue::Object(inner)),
            ("list", SadValue::from_array(vec![SadValue::from_i64(1), SadValue::from_i64(2)])),
        ]);
        let mapper = Mapper::new(mad.clone(), false).unwrap();
        let back = Mapper::from_raw(mapper.raw(), false).unwrap();
        assert_eq!(back.mad().len(), mad.len());
        assert_eq!(back.mad().get("name"), Some(&SadValue::from_string("alice")));
        assert_eq!(back.mad().get("a"), Some(&SadValue::Null));
        assert_eq!(back.mad().get("b"), Some(&SadValue::Bool(true)));
    }

    #[test]
    fn string_equal_to_null_code_is_escaped_and_round_trips() {
        let mad = sadder(vec![("x", SadValue::from_string(mtr_dex::NULL))]);
        let mapper = Mapper::new(mad, false).unwrap();
        let text = mapper.qb64();
        assert!(text.contains(mtr_dex::ESCAPE));
        assert!(text.contains(mtr_dex::NULL));
        let back = Mapper::from_raw(mapper.raw(), false).unwrap();
        assert_eq!(
            back.mad().get("x"),
            Some(&SadValue::from_string(mtr_dex::NULL))
        );
    }

    #[test]
    fn makify_computes_blake3_said_and_verifies() {
        let mad = sadder(vec![
            ("d", SadValue::from_string("")),
            ("name", SadValue::from_string("alice")),
        ]);
        let mut saids = IndexMap::new();
        saids.insert("d".to_string(), crate::cesr::dig_dex::BLAKE3_256.to_string());
        let mapper = Mapper::makify(mad, &saids, false).unwrap();
        let said = mapper.said("d").unwrap().to_string();
        assert_eq!(said.len(), 44);
        assert!(mapper.verify(&saids).unwrap());
    }

    #[test]
    fn partor_compacts_nested_said_tree() {
        let a = sadder(vec![
            ("d", SadValue::from_string("")),
            ("x", SadValue::from_i64(1)),
        ]);
        let b = sadder(vec![
            ("d", SadValue::from_string("")),
            ("y", SadValue::from_i64(2)),
        ]);
        let mad = sadder(vec![
            ("d", SadValue::from_string("")),
            ("a", SadValue::Object(a)),
            ("b", SadValue::Object(b)),
        ]);
        let mut saids = IndexMap::new();
        saids.insert("d".to_string(), crate::cesr::dig_dex::BLAKE3_256.to_string());

        let mut partor = Partor::new(mad, saids, false).unwrap();
        partor.compact().unwrap();

        assert_eq!(partor.iscompact(), Some(true));
        assert_eq!(partor.leaves().len(), 1);
        assert!(partor.leaves().contains_key(""));
        assert!(!partor.partials().is_empty());

        match partor.mad().get("a").unwrap() {
            SadValue::String(s) => assert_eq!(s.len(), 44),
            other => panic!("expected collapsed SAID string, got {:?}", other),
        }
        match partor.mad().get("b").unwrap() {
            SadValue::String(s) => assert_eq!(s.len(), 44),
            other => panic!("expected collapsed SAID string, got {:?}", other),
        }
    }
}
