//! Anchorer drives a locally controlled identifier's delegated inception or
//! rotation event through its full lifecycle — witnessing, delegator
//! anchoring, and witness publication — via Baser's delegation escrow
//! queues `dpwe`, `dune`, `dpub` and `cdel`.
//!
//! Networking collaborators (peer exchange postman, witness inquisitor,
//! witness receiptor, per-prefix witness publisher) are injected behind the
//! [`DelegationTransport`] trait; their concrete implementations live outside
//! this module.

use crate::cesr::prefixer::Prefixer;
use crate::cesr::saider::Saider;
use crate::cesr::seqner::Seqner;
use crate::cesr::Matter;
use crate::errors::MatterError;
use crate::keri::core::serdering::{Rawifiable, Serder, SerderKERI};
use crate::keri::db::basing::Baser;
use crate::keri::db::errors::DBError;
use crate::keri::db::subing::SuberError;
use crate::keri::KERIError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Error taxonomy for delegation anchoring: protocol violations that
/// indicate a caller bug (`Validation`) versus storage/engine faults
/// (`Database`).
#[derive(Debug, thiserror::Error)]
pub enum AnchorError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<DBError> for AnchorError {
    fn from(e: DBError) -> Self {
        AnchorError::Database(e.to_string())
    }
}

impl From<SuberError> for AnchorError {
    fn from(e: SuberError) -> Self {
        AnchorError::Database(e.to_string())
    }
}

impl From<MatterError> for AnchorError {
    fn from(e: MatterError) -> Self {
        AnchorError::Database(e.to_string())
    }
}

impl From<KERIError> for AnchorError {
    fn from(e: KERIError) -> Self {
        AnchorError::Database(e.to_string())
    }
}

/// Outbound side effects Anchorer needs during a sweep: sending the
/// delegation request exchange and delegated event to the delegator,
/// querying the delegator's KEL for an anchoring event, broadcasting the
/// delegator's KEL to the local witness set, and polling per-prefix witness
/// publication for idleness.
pub trait DelegationTransport {
    /// Sends the `/delegate/request` exn plus the raw delegated event from
    /// `pre` (via `proxy`, the sending identifier) to the delegator `delpre`.
    fn send_delegate_request(
        &mut self,
        proxy: &str,
        pre: &str,
        delpre: &str,
        evt: &[u8],
        aids: &[String],
    ) -> Result<(), AnchorError>;

    /// Queries the delegator `delpre`'s KEL for an establishment event
    /// anchoring `seal`.
    fn query_anchor(&mut self, delpre: &str, seal: &IndexMap<String, String>) -> Result<(), AnchorError>;

    /// Starts (or resumes) broadcasting `pre`'s delegator's KEL to `pre`'s
    /// own witnesses.
    fn publish_delegator(&mut self, pre: &str) -> Result<(), AnchorError>;

    /// True once the publisher for `pre` has confirmed every witness has
    /// acknowledged the broadcast (and there is no publisher in flight).
    fn publisher_idle(&mut self, pre: &str) -> bool;

    /// True if a witness receipt cue for `(pre, sn)` has been observed this
    /// run. Mirrors the reference implementation's in-memory cue list; see
    /// the Anchorer module docs for its restart caveat.
    fn witnessed_cue(&self, pre: &str, sn: u64) -> bool;
}

/// One entry queued for delegation: the locally controlled identifier's
/// signed event, its delegator, and (for group habs) the proxy identifier
/// used to actually transmit it plus co-signer identifiers.
struct Delegation {
    proxy: String,
    aids: Vec<String>,
}

/// Drives delegated inception/rotation events through `dpwe` → `dune` →
/// `dpub` → `cdel`, reading witness/delegator state from Baser's cached
/// [`KeyStateRecord`](crate::keri::db::basing::KeyStateRecord)s.
pub struct Anchorer<'db> {
    db: Arc<&'db Baser<'db>>,
    proxy: Option<String>,
    delegations: IndexMap<String, Delegation>,
}

impl<'db> Anchorer<'db> {
    pub fn new(db: Arc<&'db Baser<'db>>, proxy: Option<String>) -> Self {
        Anchorer { db, proxy, delegations: IndexMap::new() }
    }

    /// Submits the locally controlled identifier `pre`'s event at `sn` (the
    /// identifier's current sequence number if `sn` is `None`) for delegation
    /// approval: looks up its delegator, records the submission, and places
    /// `(pre, said)` in the `dpwe` escrow awaiting witness receipts.
    ///
    /// # Errors
    /// `Validation` if `pre` is unknown or its delegator is not locally
    /// cached.
    pub fn delegation(
        &mut self,
        pre: &str,
        evt: &[u8],
        proxy: Option<&str>,
        aids: Option<&[String]>,
    ) -> Result<(), AnchorError> {
        let state = self.db.kevers.get(pre).ok_or_else(|| {
            AnchorError::Validation(format!("{} is not a valid local AID for delegation", pre))
        })?;

        if state.di.is_empty() {
            return Err(AnchorError::Validation(format!(
                "{} is not a delegated identifier",
                pre
            )));
        }
        if !self.db.kevers.contains_key(&state.di) {
            return Err(AnchorError::Validation(format!(
                "delegator {} not found, unable to process delegation",
                state.di
            )));
        }

        let proxy = proxy.or(self.proxy.as_deref()).ok_or_else(|| {
            AnchorError::Validation("no proxy to send messages for delegation".to_string())
        })?;

        let srdr = SerderKERI::from_raw(evt, None)?;
        let srdr_pre = srdr.pre().ok_or_else(|| {
            AnchorError::Validation("delegated event missing identifier prefix".to_string())
        })?;
        let said = srdr.said().ok_or_else(|| {
            AnchorError::Validation("delegated event missing SAID".to_string())
        })?;

        self.delegations.insert(
            pre.to_string(),
            Delegation { proxy: proxy.to_string(), aids: aids.map(|a| a.to_vec()).unwrap_or_default() },
        );

        self.db
            .dpwe
            .pin(&[srdr_pre.as_str(), said], &[&evt.to_vec()])?;
        Ok(())
    }

    /// Checks whether the delegation protocol for `(prefixer, seqner)` has
    /// reached `cdel`. Returns `false` if not yet complete; `true` if
    /// complete and (when `saider` is given) it matches the recorded SAID.
    ///
    /// # Errors
    /// `Validation` if `saider` is given and disagrees with the recorded
    /// completion SAID — distinguishes "done but wrong" from "not yet done".
    pub fn complete(
        &self,
        prefixer: &Prefixer,
        seqner: &Seqner,
        saider: Option<&Saider>,
    ) -> Result<bool, AnchorError> {
        let csaider = self.db.cdel.get(&[prefixer.qb64().as_str(), seqner.qb64().as_str()])?;
        let csaider = match csaider {
            Some(s) => s,
            None => return Ok(false),
        };
        if let Some(saider) = saider {
            if csaider.qb64() != saider.qb64() {
                return Err(AnchorError::Validation(format!(
                    "invalid delegation protocol escrowed event {}-{}",
                    csaider.qb64(),
                    saider.qb64()
                )));
            }
        }
        Ok(true)
    }

    /// Runs all three escrow sweeps once, in the order the reference
    /// implementation performs them: witness completion, delegator
    /// anchoring, then publication.
    pub fn process_escrows(&mut self, transport: &mut dyn DelegationTransport) {
        self.process_partial_witness_escrow(transport);
        self.process_unanchored_escrow(transport);
        self.process_witness_publication(transport);
    }

    /// For each `dpwe` entry, checks whether witness receipting is complete
    /// (`len(wigs) == len(wits)`, confirmed by a witness-doer cue for
    /// non-empty witness sets). When complete, emits the `/delegate/request`
    /// exchange and an anchor query to the delegator, then moves the entry
    /// to `dune`.
    pub fn process_partial_witness_escrow(&mut self, transport: &mut dyn DelegationTransport) {
        let items = match self.db.dpwe.get_item_iter(&[] as &[&str], true) {
            Ok(items) => items,
            Err(e) => {
                warn!("dpwe sweep: failed to list escrow: {}", e);
                return;
            }
        };

        for (keys, raw) in items {
            if keys.len() < 2 {
                continue;
            }
            let pre = String::from_utf8_lossy(&keys[0]).into_owned();
            let said = String::from_utf8_lossy(&keys[1]).into_owned();

            if let Err(e) = self.try_process_partial_witness_entry(&pre, &said, &raw, transport) {
                warn!("dpwe sweep: skipping {}/{}: {}", pre, said, e);
            }
        }
    }

    fn try_process_partial_witness_entry(
        &mut self,
        pre: &str,
        said: &str,
        raw: &[u8],
        transport: &mut dyn DelegationTransport,
    ) -> Result<(), AnchorError> {
        let serder = SerderKERI::from_raw(raw, None)?;
        let state = self
            .db
            .kevers
            .get(pre)
            .ok_or_else(|| AnchorError::Validation(format!("unknown kever for {}", pre)))?
            .clone();

        let dgkey = crate::keri::db::dbing::keys::dg_key(pre, serder.said().unwrap_or_default());
        let wigs = self.db.wigs.get::<_, Vec<u8>>(&[&dgkey])?;

        if wigs.len() != state.b.len() {
            return Ok(());
        }
        if !state.b.is_empty() {
            let sn = serder.sn().unwrap_or(0);
            if !transport.witnessed_cue(pre, sn) {
                return Ok(());
            }
        }

        info!("witness receipts complete for {}, waiting for delegation approval", pre);

        let (proxy, aids) = match self.delegations.get(pre) {
            Some(d) => (d.proxy.clone(), d.aids.clone()),
            None => {
                return Err(AnchorError::Validation(format!(
                    "no proxy to send messages for delegation of {}",
                    pre
                )))
            }
        };

        transport.send_delegate_request(&proxy, pre, &state.di, raw, &aids)?;

        let mut seal = IndexMap::new();
        seal.insert("i".to_string(), pre.to_string());
        seal.insert("s".to_string(), serder.snh().unwrap_or_default());
        seal.insert("d".to_string(), serder.said().unwrap_or_default().to_string());
        transport.query_anchor(&state.di, &seal)?;

        self.db.dpwe.rem(&[pre, said], None::<&Vec<u8>>)?;
        self.db.dune.pin(&[pre, said], &[&raw.to_vec()])?;
        Ok(())
    }

    /// For each `dune` entry, asks Baser whether the delegator's KEL now
    /// contains an establishment event anchoring our seal. If so, records
    /// the authorizing seal couple via `setAes`, kicks off delegator-KEL
    /// publication to our witnesses, and moves the entry to `dpub`.
    pub fn process_unanchored_escrow(&mut self, transport: &mut dyn DelegationTransport) {
        let items = match self.db.dune.get_item_iter(&[] as &[&str], true) {
            Ok(items) => items,
            Err(e) => {
                warn!("dune sweep: failed to list escrow: {}", e);
                return;
            }
        };

        for (keys, raw) in items {
            if keys.len() < 2 {
                continue;
            }
            let pre = String::from_utf8_lossy(&keys[0]).into_owned();
            let said = String::from_utf8_lossy(&keys[1]).into_owned();

            if let Err(e) = self.try_process_unanchored_entry(&pre, &said, &raw, transport) {
                warn!("dune sweep: skipping {}/{}: {}", pre, said, e);
            }
        }
    }

    fn try_process_unanchored_entry(
        &mut self,
        pre: &str,
        said: &str,
        raw: &[u8],
        transport: &mut dyn DelegationTransport,
    ) -> Result<(), AnchorError> {
        let serder = SerderKERI::from_raw(raw, None)?;
        let state = self
            .db
            .kevers
            .get(pre)
            .ok_or_else(|| AnchorError::Validation(format!("unknown kever for {}", pre)))?
            .clone();
        let sn = serder.sn().unwrap_or(0);
        let eventsaid = serder.said().unwrap_or_default().to_string();

        let dserder = self
            .db
            .fetch_last_sealing_event_by_event_seal(&state.di, pre, sn, &eventsaid)?;

        let dserder = match dserder {
            Some(d) => d,
            None => return Ok(()),
        };

        let dsn = dserder.sn().unwrap_or(0);
        let dsaid = dserder.said().unwrap_or_default();
        let seqner = Seqner::new(dsn)?;
        let mut couple = seqner.qb64().into_bytes();
        couple.extend(dsaid.as_bytes());

        let dgkey = crate::keri::db::dbing::keys::dg_key(pre, &eventsaid);
        self.db.set_aes(&dgkey, &couple)?;

        info!("delegation approval received, {} confirmed, publishing to my witnesses", pre);
        transport.publish_delegator(pre)?;

        self.db.dpub.pin(&[pre, said], &[&raw.to_vec()])?;
        self.db.dune.rem(&[pre, said], None::<&Vec<u8>>)?;
        Ok(())
    }

    /// For each `dpub` entry, polls the per-prefix witness publisher; once
    /// idle (every witness acknowledged), writes the terminal `cdel` record
    /// and removes the entry.
    pub fn process_witness_publication(&mut self, transport: &mut dyn DelegationTransport) {
        let items = match self.db.dpub.get_item_iter(&[] as &[&str], true) {
            Ok(items) => items,
            Err(e) => {
                warn!("dpub sweep: failed to list escrow: {}", e);
                return;
            }
        };

        for (keys, raw) in items {
            if keys.len() < 2 {
                continue;
            }
            let pre = String::from_utf8_lossy(&keys[0]).into_owned();
            let said = String::from_utf8_lossy(&keys[1]).into_owned();

            if !transport.publisher_idle(&pre) {
                continue;
            }

            if let Err(e) = self.try_complete_publication(&pre, &said, &raw) {
                warn!("dpub sweep: skipping {}/{}: {}", pre, said, e);
            }
        }
    }

    fn try_complete_publication(&mut self, pre: &str, said: &str, raw: &[u8]) -> Result<(), AnchorError> {
        let serder = SerderKERI::from_raw(raw, None)?;
        let sn = serder.sn().unwrap_or(0);
        let seqner = Seqner::new(sn)?;
        let event_said = serder.said().unwrap_or_default();
        let saider = Saider::from_qb64(event_said)?;

        self.db.dpub.rem(&[pre, said], None::<&Vec<u8>>)?;
        self.db.cdel.pin(&[pre, seqner.qb64().as_str()], &saider)?;
        self.delegations.swap_remove(pre);
        Ok(())
    }
}

/// Builds the `/delegate/request` exn payload `{delpre, aids?}` embedding
/// `{evt: <serialized-signed-event-bytes>}`, per the delegation peer
/// message wire contract. The actual exn envelope/signing is a collaborator
/// concern; this returns the route and payload a caller's exchanger can wrap.
pub fn delegate_request_payload(delpre: &str, evt: &[u8], aids: &[String]) -> IndexMap<String, serde_json::Value> {
    let mut payload = IndexMap::new();
    payload.insert("delpre".to_string(), serde_json::Value::String(delpre.to_string()));
    if !aids.is_empty() {
        payload.insert(
            "aids".to_string(),
            serde_json::Value::Array(aids.iter().map(|a| serde_json::Value::String(a.clone())).collect()),
        );
    }
    payload.insert(
        "evt".to_string(),
        serde_json::Value::String(URL_SAFE_NO_PAD.encode(evt)),
    );
    payload
}
