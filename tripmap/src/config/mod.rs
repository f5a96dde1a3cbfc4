//! Configuration for tripmap components.
//!
//! Two layers:
//!
//! - [`ConfigFile`]: the user's `~/.tripmap/config.ini`, one settings struct
//!   per `[section]`, with typed `section.key` access through [`ConfigKey`].
//! - Runtime configs ([`GatewayConfig`], [`BatchConfig`]) built with
//!   `with_*` methods and handed to the services that use them.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tripmap::config::{BatchConfig, ConfigFile};
//!
//! let file = ConfigFile::default();
//! let gateway = file.gateway_config();
//! assert_eq!(gateway.geocode_timeout(), Duration::from_secs(10));
//!
//! let batch = BatchConfig::new().with_delay(Duration::from_millis(100));
//! assert_eq!(batch.delay(), Duration::from_millis(100));
//! ```

mod batch;
mod defaults;
mod file;
mod gateway;
mod keys;
mod parser;
mod settings;
mod writer;

pub use batch::BatchConfig;
pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use gateway::GatewayConfig;
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::*;
