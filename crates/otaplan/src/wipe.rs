//! Conditional DDR wipe planning
//!
//! DDR training data is only valid for the RPM/SBL pairing it was saved
//! under. When either control blob is about to change, stale DDR content
//! could leave the device unbootable, so the update script wipes the
//! region unless both blobs are confirmed current on the device.
//!
//! The emitted conditional nests the SBL check inside the RPM check's
//! match branch: an RPM mismatch wipes immediately without consulting
//! SBL, and only a matching RPM defers to the SBL check. The truth table
//! is asymmetric; installers in the field depend on this exact shape, so
//! it must not be collapsed into a symmetric AND.

use otaplan_script::{ContentCheck, Instruction};
use tracing::warn;

use crate::Result;
use crate::context::PlanningContext;
use crate::filesmap::{FileMapEntry, load_filesmap, radio_files};

/// Block device backing the DDR training-data region
pub const DDR_DEVICE: &str = "/dev/block/platform/msm_sdcc.1/by-name/DDR";

/// Size of the wiped region in device units
pub const DDR_WIPE_BLOCKS: u32 = 32768;

/// SHA-1 of a fully-zeroed region of [`DDR_WIPE_BLOCKS`] bytes
pub const DDR_WIPED_FINGERPRINT: &str = "5188431849b4613152fd7bdba6a3ff0a4fd6424b";

/// Resource/power-manager control blob
pub const RPM_BLOB: &str = "rpm.mbn";

/// Secondary-boot-loader control blob
pub const SBL_BLOB: &str = "sbl1.mbn";

fn content_check(entry: &FileMapEntry) -> ContentCheck {
    ContentCheck::new(
        entry.partition_path.clone(),
        entry.byte_length,
        entry.fingerprint.clone(),
    )
}

/// Plan the conditional DDR wipe and its verification step.
///
/// Skips with a warning when the package carries no radio blobs, no
/// usable filesmap, or when either control blob is unmapped; a partial
/// control-path pairing never triggers a wipe. The verification
/// instruction is emitted unconditionally after the wipe conditional and
/// only reports; it never re-attempts the wipe.
///
/// # Errors
///
/// Propagates manifest and package failures.
pub fn add_ddr_wipe(ctx: &mut PlanningContext<'_>) -> Result<()> {
    let files = radio_files(ctx.target)?;
    if files.is_empty() {
        warn!("radio-update: no radio image in target package; not wiping DDR");
        return Ok(());
    }
    let filesmap = load_filesmap(ctx.target)?;
    if filesmap.is_empty() {
        warn!("radio-update: no or invalid filesmap found; not wiping DDR");
        return Ok(());
    }
    let (Some(rpm), Some(sbl)) = (filesmap.get(RPM_BLOB), filesmap.get(SBL_BLOB)) else {
        warn!(
            rpm = filesmap.contains(RPM_BLOB),
            sbl = filesmap.contains(SBL_BLOB),
            "radio-update: control blobs not both mapped; not wiping DDR"
        );
        return Ok(());
    };

    ctx.script.emit(Instruction::print("Wiping DDR"));
    ctx.script.emit(Instruction::wipe_unless_current(
        content_check(rpm),
        content_check(sbl),
        DDR_DEVICE,
        DDR_WIPE_BLOCKS,
        "RPM+SBL Already up to date, not wiping DDR",
    ));
    ctx.script.emit(Instruction::verify_wipe(
        ContentCheck::new(DDR_DEVICE, u64::from(DDR_WIPE_BLOCKS), DDR_WIPED_FINGERPRINT),
        "Verified DDR wipe",
        "DDR wipe failed or not performed",
    ));
    Ok(())
}
