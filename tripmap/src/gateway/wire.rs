//! Response shapes of the map proxy endpoints.
//!
//! The proxy passes the provider's JSON through untouched. The provider encodes
//! `status` as the string `"1"` on success and reports empty text fields as
//! `[]` instead of `""`, so text fields are decoded leniently.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Provider status value meaning "OK".
pub const STATUS_OK: &str = "1";

/// Decodes a text field that may arrive as a string, a number, `[]` or null.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// `GET /api/map/search` body.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub info: Option<String>,
    #[serde(default)]
    pub pois: Vec<Poi>,
}

/// One point of interest from place search.
#[derive(Debug, Deserialize)]
pub(crate) struct Poi {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pname: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cityname: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub adname: Option<String>,
}

impl Poi {
    /// Explicit address if present, else province + city + district.
    pub fn composed_address(&self) -> Option<String> {
        if let Some(address) = &self.address {
            return Some(address.clone());
        }

        let parts: String = [&self.pname, &self.cityname, &self.adname]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts)
        }
    }
}

/// `GET /api/map/geocode` body.
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub info: Option<String>,
    #[serde(default)]
    pub geocodes: Vec<GeocodeEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(
        default,
        alias = "formattedAddress",
        deserialize_with = "lenient_string"
    )]
    pub formatted_address: Option<String>,
}

/// `GET /api/map/regeo` body.
#[derive(Debug, Deserialize)]
pub(crate) struct RegeoResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub info: Option<String>,
    #[serde(default)]
    pub regeocode: Option<Regeocode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Regeocode {
    #[serde(default, deserialize_with = "lenient_string")]
    pub formatted_address: Option<String>,
}

/// Describes a non-OK provider status for failure reasons.
pub(crate) fn describe_status(status: &Option<String>, info: &Option<String>) -> String {
    format!(
        "status {} ({})",
        status.as_deref().unwrap_or("missing"),
        info.as_deref().unwrap_or("no info")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_with_empty_array_fields() {
        let json = r#"{
            "status": "1",
            "info": "OK",
            "pois": [{
                "name": "西湖",
                "location": "120.141375,30.256668",
                "address": [],
                "pname": "浙江省",
                "cityname": "杭州市",
                "adname": "西湖区"
            }]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status.as_deref(), Some(STATUS_OK));
        let poi = &response.pois[0];
        assert!(poi.address.is_none());
        assert_eq!(poi.composed_address().as_deref(), Some("浙江省杭州市西湖区"));
    }

    #[test]
    fn test_explicit_address_wins() {
        let json = r#"{"name": "Museum", "address": "1 Rue", "pname": "Île-de-France"}"#;
        let poi: Poi = serde_json::from_str(json).unwrap();
        assert_eq!(poi.composed_address().as_deref(), Some("1 Rue"));
    }

    #[test]
    fn test_no_address_parts() {
        let poi: Poi = serde_json::from_str(r#"{"name": "Nowhere"}"#).unwrap();
        assert!(poi.composed_address().is_none());
    }

    #[test]
    fn test_geocode_accepts_both_address_spellings() {
        let snake = r#"{"status":"1","geocodes":[{"location":"1,2","formatted_address":"A"}]}"#;
        let camel = r#"{"status":"1","geocodes":[{"location":"1,2","formattedAddress":"A"}]}"#;

        for json in [snake, camel] {
            let response: GeocodeResponse = serde_json::from_str(json).unwrap();
            assert_eq!(response.geocodes[0].formatted_address.as_deref(), Some("A"));
        }
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"status":"0","info":"INVALID_USER_KEY"}"#).unwrap();
        assert!(response.pois.is_empty());
        assert_eq!(
            describe_status(&response.status, &response.info),
            "status 0 (INVALID_USER_KEY)"
        );
    }

    #[test]
    fn test_numeric_status() {
        let response: GeocodeResponse = serde_json::from_str(r#"{"status":1}"#).unwrap();
        assert_eq!(response.status.as_deref(), Some("1"));
    }
}
