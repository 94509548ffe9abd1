//! OTA radio-firmware update planner
//!
//! Plans the firmware portion of an over-the-air update for QCOM-based
//! devices. Given a target-files package (and optionally a source package
//! for incremental updates), the planner decides which radio blobs need
//! flashing by comparing content fingerprints, emits the conditional
//! installer instructions and hardware-revision assertions, and stages
//! blob copies into the output package. Nothing here touches a device;
//! the emitted script is executed later by the recovery installer.
//!
//! # Architecture
//!
//! - [`filesmap`]: manifest loading and blob discovery
//! - [`planner`]: per-blob skip-vs-install decisions and orchestration
//! - [`wipe`]: the conditional DDR wipe sequence
//! - [`assertions`]: modem and trustzone revision assertions
//! - [`context`]: the borrowed collaborator bundle for one planning pass
//! - [`fingerprint`]: content fingerprinting
//! - [`error`]: error types
//!
//! # Example
//!
//! ```
//! use otaplan::prelude::*;
//! use otaplan_package::MemPackage;
//! use otaplan_script::EdifyScript;
//!
//! # fn main() -> Result<(), PlanError> {
//! let mut target = MemPackage::new("target.zip")
//!     .with_entry("RADIO/filesmap", &b"boot.img /dev/block/boot"[..])
//!     .with_entry("RADIO/boot.img", &b"image bytes"[..]);
//! let mut output = MemPackage::new("output.zip");
//! let mut script = EdifyScript::new();
//!
//! let mut ctx = PlanningContext::new(&mut target, 3, &mut output, &mut script);
//! plan_full_update(&mut ctx)?;
//!
//! assert!(!script.is_empty());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod assertions;
pub mod context;
pub mod error;
pub mod filesmap;
pub mod fingerprint;
pub mod planner;
pub mod prelude;
pub mod wipe;

pub use assertions::{add_modem_assertion, add_trustzone_assertion, add_version_assertions};
pub use context::PlanningContext;
pub use error::PlanError;
pub use filesmap::{FILESMAP_ENTRY, FileMapEntry, FilesMap, RADIO_DIR, load_filesmap, radio_files};
pub use fingerprint::content_fingerprint;
pub use planner::{install_radio_files, plan_full_update, plan_incremental_update};
pub use wipe::{
    DDR_DEVICE, DDR_WIPE_BLOCKS, DDR_WIPED_FINGERPRINT, RPM_BLOB, SBL_BLOB, add_ddr_wipe,
};

/// A specialized `Result` type for planning operations.
pub type Result<T> = std::result::Result<T, PlanError>;
