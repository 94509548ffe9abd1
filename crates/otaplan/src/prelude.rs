//! Convenience re-exports for common planner types

pub use crate::assertions::{
    DEVICE_INFO_ENTRY, add_modem_assertion, add_trustzone_assertion, add_version_assertions,
};
pub use crate::context::PlanningContext;
pub use crate::error::PlanError;
pub use crate::filesmap::{
    FILESMAP_ENTRY, FileMapEntry, FilesMap, RADIO_DIR, load_filesmap, radio_files,
};
pub use crate::fingerprint::content_fingerprint;
pub use crate::planner::{install_radio_files, plan_full_update, plan_incremental_update};
pub use crate::wipe::{
    DDR_DEVICE, DDR_WIPE_BLOCKS, DDR_WIPED_FINGERPRINT, RPM_BLOB, SBL_BLOB, add_ddr_wipe,
};
