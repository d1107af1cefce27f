//! Metadata snapshot records consumed by the formatters.
//!
//! A snapshot is produced once by an external collection run and is
//! read-only from here on. Every record in [`MetadataSnapshot`] is optional:
//! a missing record means that collection phase did not run, and the
//! formatters treat it as nothing to render.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Timestamp layout used for the "generated on" row
pub const CRAWL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Product name and version pair, shown as a single summary string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVersion {
    pub product_name: String,
    pub product_version: String,
}

impl ProductVersion {
    /// Creates a new product version summary
    pub fn new(product_name: impl Into<String>, product_version: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            product_version: product_version.into(),
        }
    }
}

impl fmt::Display for ProductVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.product_name.trim();
        let version = self.product_version.trim();
        match (name.is_empty(), version.is_empty()) {
            (_, true) => write!(f, "{}", name),
            (true, false) => write!(f, "{}", version),
            (false, false) => write!(f, "{} {}", name, version),
        }
    }
}

/// Renders an optional property value the way reports show it.
///
/// Absent and JSON `null` values become an empty string, strings are shown
/// without quotes, and everything else uses compact JSON.
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Server information property, in the order the server reported it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub value: Option<Value>,
}

impl Property {
    /// Creates a server property
    pub fn new(name: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Value as report text, empty when absent
    pub fn value_text(&self) -> String {
        value_text(self.value.as_ref())
    }
}

/// Database characteristic, keyed by its human-readable description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseProperty {
    pub description: String,
    #[serde(default)]
    pub value: Option<Value>,
}

impl DatabaseProperty {
    /// Creates a database characteristic
    pub fn new(description: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            description: description.into(),
            value,
        }
    }

    /// Value as report text, empty when absent
    pub fn value_text(&self) -> String {
        value_text(self.value.as_ref())
    }
}

/// Database server identity and characteristics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub product_name: String,
    pub product_version: String,
    pub user_name: String,
    #[serde(default)]
    pub server_info: Vec<Property>,
    #[serde(default)]
    pub properties: Vec<DatabaseProperty>,
}

impl DatabaseInfo {
    /// Creates database info with no server properties or characteristics
    pub fn new(
        product_name: impl Into<String>,
        product_version: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            product_version: product_version.into(),
            user_name: user_name.into(),
            server_info: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Summary of the database product and version
    pub fn version(&self) -> ProductVersion {
        ProductVersion::new(&self.product_name, &self.product_version)
    }
}

/// A single connection property advertised by the driver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverProperty {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub choices: BTreeSet<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl DriverProperty {
    /// Creates an optional driver property with no choices or value
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Details line, e.g. `required; choices [A, B]` or `not required`
    pub fn details(&self) -> String {
        let required = if self.required {
            "required"
        } else {
            "not required"
        };
        if self.choices.is_empty() {
            return required.to_string();
        }

        let choices: Vec<&str> = self.choices.iter().map(String::as_str).collect();
        format!("{}; choices [{}]", required, choices.join(", "))
    }
}

/// Driver identity and connection properties
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverInfo {
    pub product_name: String,
    pub product_version: String,
    pub driver_class_name: String,
    pub connection_url: String,
    #[serde(default)]
    pub jdbc_compliant: bool,
    #[serde(default)]
    pub driver_properties: Vec<DriverProperty>,
}

impl DriverInfo {
    /// Summary of the driver product and version
    pub fn version(&self) -> ProductVersion {
        ProductVersion::new(&self.product_name, &self.product_version)
    }
}

/// Identity of the tool that produced the snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub product_name: String,
    pub product_version: String,
}

impl ToolInfo {
    /// Creates tool info
    pub fn new(product_name: impl Into<String>, product_version: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            product_version: product_version.into(),
        }
    }

    /// Tool info describing this build of schemadoc
    pub fn current() -> Self {
        Self::new("schemadoc", env!("CARGO_PKG_VERSION"))
    }

    /// Summary of the tool product and version
    pub fn version(&self) -> ProductVersion {
        ProductVersion::new(&self.product_name, &self.product_version)
    }
}

/// Summary of one collection run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlInfo {
    pub tool_version: ProductVersion,
    pub crawl_timestamp: String,
    pub database_version: ProductVersion,
    pub driver_version: ProductVersion,
}

impl CrawlInfo {
    /// Builds a crawl summary from the records collected in that run.
    pub fn new(
        tool_info: &ToolInfo,
        database_info: &DatabaseInfo,
        driver_info: &DriverInfo,
        crawled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tool_version: tool_info.version(),
            crawl_timestamp: crawled_at.format(CRAWL_TIMESTAMP_FORMAT).to_string(),
            database_version: database_info.version(),
            driver_version: driver_info.version(),
        }
    }
}

/// Everything one render pass may draw from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSnapshot {
    pub crawl_info: Option<CrawlInfo>,
    pub database_info: Option<DatabaseInfo>,
    pub driver_info: Option<DriverInfo>,
    pub tool_info: Option<ToolInfo>,
}

impl MetadataSnapshot {
    /// Creates a fully-populated snapshot with a crawl summary derived
    /// from the other records.
    pub fn new(
        tool_info: ToolInfo,
        database_info: DatabaseInfo,
        driver_info: DriverInfo,
        crawled_at: DateTime<Utc>,
    ) -> Self {
        let crawl_info = CrawlInfo::new(&tool_info, &database_info, &driver_info, crawled_at);
        Self {
            crawl_info: Some(crawl_info),
            database_info: Some(database_info),
            driver_info: Some(driver_info),
            tool_info: Some(tool_info),
        }
    }

    /// Parses a snapshot from its JSON form.
    ///
    /// # Errors
    /// Returns a serialization error if the JSON does not describe a snapshot
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            crate::error::SchemaDocError::serialization("Failed to parse metadata snapshot", e)
        })
    }

    /// True if no collection phase contributed a record
    pub const fn is_empty(&self) -> bool {
        self.crawl_info.is_none()
            && self.database_info.is_none()
            && self.driver_info.is_none()
            && self.tool_info.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_product_version_display() {
        assert_eq!(ProductVersion::new("H2", "2.1").to_string(), "H2 2.1");
        assert_eq!(ProductVersion::new("H2", "").to_string(), "H2");
        assert_eq!(ProductVersion::new("", "2.1").to_string(), "2.1");
        assert_eq!(ProductVersion::default().to_string(), "");
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(None), "");
        assert_eq!(value_text(Some(&Value::Null)), "");
        assert_eq!(value_text(Some(&json!("UTF-8"))), "UTF-8");
        assert_eq!(value_text(Some(&json!(42))), "42");
        assert_eq!(value_text(Some(&json!(true))), "true");
        assert_eq!(value_text(Some(&json!(["a", "b"]))), r#"["a","b"]"#);
    }

    #[test]
    fn test_driver_property_details() {
        let mut property = DriverProperty::new("mode", "Compatibility mode");
        assert_eq!(property.details(), "not required");

        property.required = true;
        property.choices = ["B".to_string(), "A".to_string()].into_iter().collect();
        assert_eq!(property.details(), "required; choices [A, B]");
    }

    #[test]
    fn test_crawl_info_derives_versions() {
        let tool = ToolInfo::new("schemadoc", "1.2.3");
        let database = DatabaseInfo::new("H2", "2.1", "SA");
        let driver = DriverInfo {
            product_name: "H2 JDBC Driver".to_string(),
            product_version: "2.1.214".to_string(),
            ..DriverInfo::default()
        };
        let crawled_at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();

        let crawl_info = CrawlInfo::new(&tool, &database, &driver, crawled_at);
        assert_eq!(crawl_info.tool_version.to_string(), "schemadoc 1.2.3");
        assert_eq!(crawl_info.crawl_timestamp, "2024-01-15 10:30:00");
        assert_eq!(crawl_info.database_version.to_string(), "H2 2.1");
        assert_eq!(crawl_info.driver_version.to_string(), "H2 JDBC Driver 2.1.214");
    }

    #[test]
    fn test_snapshot_from_partial_json() {
        let snapshot = MetadataSnapshot::from_json(
            r#"{
                "database_info": {
                    "product_name": "H2",
                    "product_version": "2.1",
                    "user_name": "SA",
                    "server_info": [{ "name": "MODE", "value": null }]
                }
            }"#,
        )
        .unwrap();

        assert!(snapshot.crawl_info.is_none());
        assert!(snapshot.driver_info.is_none());
        let database = snapshot.database_info.unwrap();
        assert_eq!(database.server_info[0].value_text(), "");
        assert!(database.properties.is_empty());
    }

    #[test]
    fn test_snapshot_from_invalid_json() {
        let error = MetadataSnapshot::from_json("{ not json").unwrap_err();
        assert!(error.to_string().contains("metadata snapshot"));
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(MetadataSnapshot::default().is_empty());
        assert!(MetadataSnapshot::from_json("{}").unwrap().is_empty());
    }
}
