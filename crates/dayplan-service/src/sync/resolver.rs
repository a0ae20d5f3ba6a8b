//! Temp-id to server-id resolution for one batch.

use dayplan_core::types::TableName;
use serde::Serialize;

/// One temp-to-server id assignment, produced by a successful create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    pub table_name: TableName,
    pub temp_id: i64,
    pub server_id: i64,
}

/// Append-only mapping table scoped to a single batch.
///
/// Unresolved candidates pass through unchanged: they are assumed to be
/// real server ids and, if they are not, the downstream entity lookup
/// fails with NotFound. Nothing is swallowed here.
#[derive(Debug, Default)]
pub struct IdMap {
    entries: Vec<MappingEntry>,
}

impl IdMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a candidate id against the mappings recorded so far.
    #[must_use]
    pub fn resolve(&self, table_name: TableName, candidate_id: i64) -> i64 {
        self.entries
            .iter()
            .find(|entry| entry.table_name == table_name && entry.temp_id == candidate_id)
            .map_or(candidate_id, |entry| entry.server_id)
    }

    /// Records a new mapping after a successful create.
    pub fn record(&mut self, table_name: TableName, temp_id: i64, server_id: i64) {
        self.entries.push(MappingEntry {
            table_name,
            temp_id,
            server_id,
        });
    }

    /// Drops the mapping whose server id was deleted later in the same
    /// batch, so the response does not advertise a dead row.
    pub fn forget(&mut self, table_name: TableName, server_id: i64) {
        self.entries
            .retain(|entry| !(entry.table_name == table_name && entry.server_id == server_id));
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<MappingEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_pass_through_unchanged() {
        let map = IdMap::new();
        assert_eq!(map.resolve(TableName::Events, 42), 42);
        assert_eq!(map.resolve(TableName::Categories, -1), -1);
    }

    #[test]
    fn recorded_temp_id_resolves_to_server_id() {
        let mut map = IdMap::new();
        map.record(TableName::Categories, -1, 17);
        assert_eq!(map.resolve(TableName::Categories, -1), 17);
        // Same temp id under a different table is untouched.
        assert_eq!(map.resolve(TableName::Events, -1), -1);
    }

    #[test]
    fn forget_removes_only_the_matching_entry() {
        let mut map = IdMap::new();
        map.record(TableName::Events, -1, 10);
        map.record(TableName::Events, -2, 11);
        map.forget(TableName::Events, 10);

        let entries = map.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].temp_id, -2);
    }

    #[test]
    fn forgotten_temp_id_is_treated_as_a_real_id_again() {
        let mut map = IdMap::new();
        map.record(TableName::Tasks, -3, 20);
        map.forget(TableName::Tasks, 20);
        // No tombstone: the stale temp id falls through and will fail
        // downstream with NotFound.
        assert_eq!(map.resolve(TableName::Tasks, -3), -3);
    }

    #[test]
    fn mapping_entry_wire_format() {
        let entry = MappingEntry {
            table_name: TableName::Events,
            temp_id: -2,
            server_id: 9,
        };
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["tableName"], "events");
        assert_eq!(json["tempId"], -2);
        assert_eq!(json["serverId"], 9);
    }
}
