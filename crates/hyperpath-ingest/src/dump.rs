// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Serde model of a channel dump.
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Participant id as written in a dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParticipantId {
    /// Textual id.
    Text(String),
    /// Numeric id; normalised to its decimal string.
    Number(i64),
}

impl ParticipantId {
    /// `true` for ids written as JSON numbers.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Vertex id used in the hypergraph.
    ///
    /// `7` and `"7"` share the vertex id `7`; loading rejects a dump that
    /// uses both spellings.
    pub fn into_vertex(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Channel timing as written in a dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTiming {
    /// Integer tick.
    Tick(i64),
    /// ISO-8601 date-time text.
    Text(String),
}

/// One channel record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Vertices linked by the channel.
    pub participants: Vec<ParticipantId>,
    /// Timing of the channel.
    pub end: RawTiming,
}

/// Whole dump, with records in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelDump {
    /// `(channel id, record)` pairs.
    pub records: Vec<(String, ChannelRecord)>,
}

impl<'de> Deserialize<'de> for ChannelDump {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DumpVisitor;

        impl<'de> Visitor<'de> for DumpVisitor {
            type Value = ChannelDump;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping channel ids to channel records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ChannelDump, A::Error> {
                let mut records = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, ChannelRecord>()? {
                    records.push(entry);
                }
                Ok(ChannelDump { records })
            }
        }

        deserializer.deserialize_map(DumpVisitor)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn records_keep_document_order() {
        let dump: ChannelDump = serde_json::from_str(
            r#"{"z": {"participants": ["a"], "end": 3}, "a": {"participants": [7, "b"], "end": "2020-01-01T00:00:00"}}"#,
        )
        .expect("valid dump");
        let ids: Vec<&str> = dump.records.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["z", "a"]);
        assert_eq!(dump.records[0].1.end, RawTiming::Tick(3));
        assert_eq!(
            dump.records[1].1.participants,
            [ParticipantId::Number(7), ParticipantId::Text("b".into())]
        );
    }

    #[test]
    fn numeric_participants_become_strings() {
        assert_eq!(ParticipantId::Number(-4).into_vertex(), "-4");
        assert_eq!(ParticipantId::Text("v1".into()).into_vertex(), "v1");
        assert!(ParticipantId::Number(1).is_number());
        assert!(!ParticipantId::Text("1".into()).is_number());
    }

    #[test]
    fn non_object_documents_are_rejected() {
        assert!(serde_json::from_str::<ChannelDump>("[1, 2]").is_err());
        assert!(serde_json::from_str::<ChannelDump>(r#"{"c": {"end": 1}}"#).is_err());
    }
}
