use crate::cesr::Versionage;
use crate::keri::core::serdering::{SadValue, SerderKERI};
use crate::keri::{versify, Ilks, Kinds};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::error::Error;

/// Builder for creating KERI query events
pub struct QueryEventBuilder {
    route: String,
    reply_route: String,
    query: Option<IndexMap<String, SadValue>>,
    stamp: Option<String>,
    version: String,
    kind: String,
}

impl QueryEventBuilder {
    /// Create a new QueryEventBuilder
    pub fn new() -> Self {
        Self {
            route: String::new(),
            reply_route: String::new(),
            query: None,
            stamp: None,
            version: "KERI10JSON000000_".to_string(),
            kind: "JSON".to_string(),
        }
    }

    /// Set the route
    ///
    /// Parameters:
    ///   route - namespaced path, '/' delimited, that indicates data flow
    ///           handler (behavior) to process the query
    pub fn with_route(mut self, route: String) -> Self {
        self.route = route;
        self
    }

    /// Set the reply route
    ///
    /// Parameters:
    ///   reply_route - namespaced path, '/' delimited, that indicates data flow
    ///                 handler (behavior) to process reply message to query if any
    pub fn with_reply_route(mut self, reply_route: String) -> Self {
        self.reply_route = reply_route;
        self
    }

    /// Set the query data parameters
    pub fn with_query(mut self, query: IndexMap<String, SadValue>) -> Self {
        self.query = Some(query);
        self
    }

    /// Set the timestamp
    ///
    /// Parameters:
    ///   stamp - date-time-stamp RFC-3339 profile of ISO-8601 datetime of creation of message
    pub fn with_stamp(mut self, stamp: String) -> Self {
        self.stamp = Some(stamp);
        self
    }

    /// Set the version string
    pub fn with_version(mut self, version: String) -> Self {
        self.version = version;
        self
    }

    /// Set the serialization kind
    pub fn with_kind(mut self, kind: String) -> Self {
        self.kind = kind;
        self
    }

    /// Build the query event serder
    pub fn build(self) -> Result<SerderKERI, Box<dyn Error>> {
        if !Kinds::contains(&self.kind) {
            return Err(format!("Invalid kind = {} for qry.", self.kind).into());
        }

        // Create versified string
        let vs = versify("KERI", &Versionage::from(self.version), &self.kind, 0)?;

        // Generate timestamp if not provided
        let timestamp = match self.stamp {
            Some(ts) => ts,
            None => {
                let now: DateTime<Utc> = Utc::now();
                now.to_rfc3339()
            }
        };

        // Create the key event dict (ked)
        let mut ked = IndexMap::new();
        ked.insert("v".to_string(), SadValue::String(vs));
        ked.insert("t".to_string(), SadValue::String(Ilks::QRY.to_string()));
        ked.insert("d".to_string(), SadValue::String("".to_string()));
        ked.insert("dt".to_string(), SadValue::String(timestamp));
        ked.insert("r".to_string(), SadValue::String(self.route));
        ked.insert("rr".to_string(), SadValue::String(self.reply_route));

        if let Some(query_data) = self.query {
            ked.insert("q".to_string(), SadValue::Object(query_data));
        } else {
            // If no query data is provided, use an empty object
            ked.insert("q".to_string(), SadValue::Object(IndexMap::new()));
        }

        // Create the serder
        let serder = SerderKERI::from_sad_and_saids(&ked, None)?;
        Ok(serder)
    }
}
