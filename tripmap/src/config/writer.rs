//! INI serialization logic for converting `ConfigFile` → INI string.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let bearer_token = config.proxy.bearer_token.as_deref().unwrap_or("");
    let city = config.geocoder.city.as_deref().unwrap_or("");

    format!(
        r#"[proxy]
; Backend serving the /api/map/* proxy endpoints
base_url = {}
; HTTP timeout in seconds (default: 60)
timeout = {}
; Bearer token sent with every proxy request (leave empty for none)
bearer_token = {}

[geocoder]
; How long to wait for the address geocoder, in milliseconds (default: 10000)
timeout_ms = {}
; Default city filter for place search (leave empty for nationwide)
city = {}

[batch]
; Delay between sequential lookups in milliseconds (default: 500)
; Keeps batch resolution under the provider's QPS limit
delay_ms = {}

[map]
; Initial map center as lng,lat (default: 116.397428,39.90923)
center = {}
; Initial zoom level (default: 10)
zoom = {}
; Camera pitch in degrees for the 3D view (default: 50)
pitch = {}

[reverse]
; Reverse-geocoding search radius in meters (default: 1000)
radius = {}

[logging]
; Log file path (default: ~/.tripmap/tripmap.log)
file = {}
"#,
        config.proxy.base_url,
        config.proxy.timeout,
        bearer_token,
        config.geocoder.timeout_ms,
        city,
        config.batch.delay_ms,
        config.map.center,
        config.map.zoom,
        config.map.pitch,
        config.reverse.radius,
        config.logging.file.display(),
    )
}

#[cfg(test)]
mod tests {
    use super::super::settings::ConfigFile;
    use crate::coord::LngLat;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");

        let mut config = ConfigFile::default();
        config.proxy.base_url = "https://trip.example.com".to_string();
        config.proxy.bearer_token = Some("secret".to_string());
        config.geocoder.city = Some("成都".to_string());
        config.batch.delay_ms = 250;
        config.map.center = LngLat::new(104.06, 30.67).unwrap();
        config.map.zoom = 13.5;
        config.reverse.radius = 300;

        config.save_to(&config_path).unwrap();
        let loaded = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_defaults_survive_save() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        ConfigFile::default().save_to(&config_path).unwrap();
        let loaded = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(loaded, ConfigFile::default());
    }

    #[test]
    fn test_output_has_all_sections() {
        let text = super::to_config_string(&ConfigFile::default());
        for section in ["[proxy]", "[geocoder]", "[batch]", "[map]", "[reverse]", "[logging]"] {
            assert!(text.contains(section), "missing {section}");
        }
    }
}
