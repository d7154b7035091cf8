//! Disaster Identifier Decoder Library
//!
//! A Rust library for decoding the 36-digit composite identifiers attached
//! to disaster-information records, and the 12-digit administrative
//! geo-codes embedded in them.
//!
//! This library provides tools for:
//! - Validating identifiers (length, digits, calendar timestamp)
//! - Slicing identifiers into their eight fields and resolving each coded
//!   field through bilingual code tables
//! - Decomposing geo-codes into jurisdiction segments and roll-up codes
//! - Extracting identifiers from file names, sheet cells and free text
//! - Batch decoding with per-item success/failure accounting
//!
//! # Example
//!
//! ```rust
//! use disaster_decoder::{decode, is_valid};
//!
//! let id = "110105000000202401151030000011301001";
//! assert!(is_valid(id));
//!
//! let decoded = decode(id).unwrap();
//! assert_eq!(decoded.disaster_category_name, "房屋破坏");
//! assert_eq!(decoded.carrier_name, "图像");
//! ```

pub mod batch;
pub mod codes;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod extract;
pub mod geo;
pub mod identifier;
pub mod models;

// CLI modules
pub mod cli;

// Re-export commonly used types
pub use batch::{BatchDecoder, BatchOutcome, ItemOutcome, ItemState};
pub use codes::Language;
pub use config::DecoderConfig;
pub use decoder::{IdDecoder, decode, describe};
pub use error::{DecoderError, FormatViolation, Result};
pub use extract::{extract_id, extract_id_from_path};
pub use geo::{is_valid_geo_code, parse_geo_code};
pub use identifier::{CompositeId, is_valid};
pub use models::{
    AdministrativeLevel, DataRecord, DecodedIdentifier, EnrichedRecord, GeoCodeDecomposition,
    RollupLevel,
};
