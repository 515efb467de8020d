//! Serializable documentation metadata for registered options.
//!
//! The entries are read back from the registry's record store, so they
//! reflect exactly what help rendering shows. External tooling can emit
//! them as JSON to build man pages or completion scripts.

use serde::Serialize;

use crate::registry::{DOC_TAG, MATCHER_TAG, Registry, TAKER_TAG};
use crate::store::RecordPos;

/// Documentation for one registered option.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OptionDoc {
    /// Position of the option's record.
    pub pos: RecordPos,
    /// Aliases, or a `<binding>` label for positional options.
    pub aliases: Vec<String>,
    /// Description of the option's taker.
    pub taker: String,
    /// Documentation lines.
    pub doc: Vec<String>,
}

impl Registry {
    /// Documentation for every registered option, in registration order.
    #[must_use]
    pub fn doc_metadata(&self) -> Vec<OptionDoc> {
        let store = self.store();
        store
            .iter()
            .map(|(pos, record)| {
                let attr = |tag: &str| record.attr(tag).map(<[String]>::to_vec).unwrap_or_default();
                OptionDoc {
                    pos,
                    aliases: attr(MATCHER_TAG),
                    taker: attr(TAKER_TAG).join(" "),
                    doc: attr(DOC_TAG),
                }
            })
            .collect()
    }
}
