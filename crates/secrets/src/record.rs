//! Credential records and the caller-supplied parameters merged into them

use crate::SecureSecret;
use serde::Deserialize;

/// Connection credentials decoded from a stored secret.
///
/// The payload must carry `username`, `password` and `account_identifier`.
/// `warehouse`, `database` and `schema` are optional defaults; unknown keys
/// are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialRecord {
    /// Login name
    pub username: String,
    /// Login password
    pub password: SecureSecret,
    /// Host-level account identifier (e.g. `xy12345.us-east-1`)
    pub account_identifier: String,
    /// Default warehouse
    #[serde(default)]
    pub warehouse: Option<String>,
    /// Database
    #[serde(default)]
    pub database: Option<String>,
    /// Schema
    #[serde(default)]
    pub schema: Option<String>,
}

impl CredentialRecord {
    /// Merge caller-supplied parameters into this record.
    ///
    /// A non-empty `warehouse` replaces the stored one; otherwise the stored
    /// value is kept. `database` and `schema` are always assigned, including
    /// `None` and empty strings.
    #[must_use]
    pub fn merge(mut self, params: &ConnectionParams) -> Self {
        if let Some(warehouse) = params.warehouse.as_deref().filter(|w| !w.is_empty()) {
            self.warehouse = Some(warehouse.to_string());
        }
        self.database.clone_from(&params.database);
        self.schema.clone_from(&params.schema);
        self
    }
}

/// Parameters supplied by the caller for one connection.
///
/// `None` for `database`/`schema` means "not passed", which is distinct from
/// `Some(String::new())`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// Logical account name, used to locate the secret
    pub account: String,
    /// Warehouse override
    pub warehouse: Option<String>,
    /// Database
    pub database: Option<String>,
    /// Schema
    pub schema: Option<String>,
}

impl ConnectionParams {
    /// Parameters for `account` with nothing else passed.
    #[must_use]
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            warehouse: None,
            database: None,
            schema: None,
        }
    }

    /// Set the warehouse override
    #[must_use]
    pub fn with_warehouse(mut self, warehouse: impl Into<String>) -> Self {
        self.warehouse = Some(warehouse.into());
        self
    }

    /// Set the database
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set the schema
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> CredentialRecord {
        serde_json::from_str(json).unwrap()
    }

    fn full_record() -> CredentialRecord {
        record(
            r#"{
                "username": "u",
                "password": "p",
                "account_identifier": "acct",
                "warehouse": "STORED_WH",
                "database": "STORED_DB",
                "schema": "STORED_SCHEMA"
            }"#,
        )
    }

    #[test]
    fn test_record_optional_fields_default_to_none() {
        let r = record(r#"{"username": "u", "password": "p", "account_identifier": "acct"}"#);
        assert_eq!(r.username, "u");
        assert_eq!(r.password.expose(), "p");
        assert!(r.warehouse.is_none());
        assert!(r.database.is_none());
        assert!(r.schema.is_none());
    }

    #[test]
    fn test_record_ignores_unknown_keys() {
        let r = record(
            r#"{"username": "u", "password": "p", "account_identifier": "acct", "role": "SYSADMIN"}"#,
        );
        assert_eq!(r.account_identifier, "acct");
    }

    #[test]
    fn test_record_requires_password() {
        let result =
            serde_json::from_str::<CredentialRecord>(r#"{"username": "u", "account_identifier": "a"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_record_debug_redacts_password() {
        let debug = format!("{:?}", full_record());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("\"p\""));
    }

    #[test]
    fn test_merge_warehouse_override_wins() {
        let merged = full_record().merge(&ConnectionParams::new("a").with_warehouse("OVERRIDE"));
        assert_eq!(merged.warehouse.as_deref(), Some("OVERRIDE"));
    }

    #[test]
    fn test_merge_keeps_stored_warehouse_without_override() {
        let merged = full_record().merge(&ConnectionParams::new("a"));
        assert_eq!(merged.warehouse.as_deref(), Some("STORED_WH"));
    }

    #[test]
    fn test_merge_empty_warehouse_is_not_an_override() {
        let merged = full_record().merge(&ConnectionParams::new("a").with_warehouse(""));
        assert_eq!(merged.warehouse.as_deref(), Some("STORED_WH"));
    }

    #[test]
    fn test_merge_missing_warehouse_stays_missing() {
        let r = record(r#"{"username": "u", "password": "p", "account_identifier": "acct"}"#);
        let merged = r.merge(&ConnectionParams::new("a"));
        assert!(merged.warehouse.is_none());
    }

    #[test]
    fn test_merge_database_and_schema_always_assigned() {
        let merged = full_record().merge(
            &ConnectionParams::new("a")
                .with_database("db1")
                .with_schema("sch1"),
        );
        assert_eq!(merged.database.as_deref(), Some("db1"));
        assert_eq!(merged.schema.as_deref(), Some("sch1"));
    }

    #[test]
    fn test_merge_empty_database_and_schema_are_assigned() {
        let merged =
            full_record().merge(&ConnectionParams::new("a").with_database("").with_schema(""));
        assert_eq!(merged.database.as_deref(), Some(""));
        assert_eq!(merged.schema.as_deref(), Some(""));
    }

    #[test]
    fn test_merge_absent_database_and_schema_clear_stored_values() {
        let merged = full_record().merge(&ConnectionParams::new("a"));
        assert!(merged.database.is_none());
        assert!(merged.schema.is_none());
    }
}
