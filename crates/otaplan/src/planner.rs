//! Update planning and orchestration
//!
//! A planning pass runs revision assertions, then DDR wipe planning, then
//! per-blob install planning. Incremental passes additionally compare
//! source and target fingerprints so blobs the device already carries are
//! neither scripted nor staged.

use otaplan_script::{ContentCheck, Instruction};
use tracing::{debug, info, warn};

use crate::Result;
use crate::assertions::add_version_assertions;
use crate::context::PlanningContext;
use crate::filesmap::{FilesMap, RADIO_DIR, load_filesmap, radio_files};
use crate::wipe::add_ddr_wipe;

/// Minimum installer API version able to execute conditional image installs
const MIN_API_VERSION: u32 = 3;

/// Plan a full OTA update: assertions, DDR wipe, then every radio blob.
///
/// # Errors
///
/// Fails on a malformed filesmap or any unexpected package failure.
pub fn plan_full_update(ctx: &mut PlanningContext<'_>) -> Result<()> {
    run_plan(ctx)
}

/// Plan an incremental OTA update.
///
/// Identical to a full plan except that blobs whose fingerprints match
/// between the source and target packages are skipped outright.
///
/// # Errors
///
/// Fails on a malformed filesmap (in either package) or any unexpected
/// package failure.
pub fn plan_incremental_update(ctx: &mut PlanningContext<'_>) -> Result<()> {
    if ctx.source.is_none() {
        warn!("radio-update: incremental plan without a source package; planning as full");
    }
    run_plan(ctx)
}

fn run_plan(ctx: &mut PlanningContext<'_>) -> Result<()> {
    add_version_assertions(ctx)?;
    add_ddr_wipe(ctx)?;
    install_radio_files(ctx)
}

/// Plan the install of every discovered radio blob.
///
/// Emits one conditional install instruction per blob covered by the
/// filesmap and stages that blob's bytes into the output package. Blobs
/// without a manifest entry are skipped silently by policy; an installer
/// API below 3 skips with a warning because the conditional install
/// builtin does not exist there.
///
/// # Errors
///
/// Fails on a malformed filesmap or any unexpected package failure.
pub fn install_radio_files(ctx: &mut PlanningContext<'_>) -> Result<()> {
    let files = radio_files(ctx.target)?;
    if files.is_empty() {
        warn!("radio-update: no radio image in target package; not flashing radio");
        return Ok(());
    }
    ctx.script.emit(Instruction::print("Writing radio image..."));
    let filesmap = load_filesmap(ctx.target)?;
    if filesmap.is_empty() {
        warn!("radio-update: no or invalid filesmap found; not flashing radio");
        return Ok(());
    }

    let source_map = match ctx.source.as_deref_mut() {
        Some(source) => Some(load_filesmap(source)?),
        None => None,
    };

    for path in &files {
        let Some(relative) = path.strip_prefix(RADIO_DIR) else {
            continue;
        };
        if let Some(source_map) = &source_map {
            let source_fp = source_map.get(relative).map(|e| e.fingerprint.as_str());
            let target_fp = filesmap.get(relative).map(|e| e.fingerprint.as_str());
            if source_fp.is_some() && source_fp == target_fp {
                info!(
                    blob = relative,
                    "radio-update: source and target match; skipping"
                );
                continue;
            }
        }
        install_raw_image(ctx, relative, &filesmap)?;
    }
    Ok(())
}

fn install_raw_image(
    ctx: &mut PlanningContext<'_>,
    relative_name: &str,
    filesmap: &FilesMap,
) -> Result<()> {
    let Some(entry) = filesmap.get(relative_name) else {
        // Accepted policy: a packaged blob the manifest does not cover is
        // not an error and emits nothing.
        debug!(
            blob = relative_name,
            "radio-update: blob not covered by filesmap; skipping"
        );
        return Ok(());
    };
    if ctx.api_version < MIN_API_VERSION {
        warn!(
            api_version = ctx.api_version,
            "radio-update: no support for api_version less than 3"
        );
        return Ok(());
    }

    ctx.script.emit(Instruction::install_image(
        ContentCheck::new(
            entry.partition_path.clone(),
            entry.byte_length,
            entry.fingerprint.clone(),
        ),
        relative_name,
    ));
    // The conditional's extract branch expects the blob at this name in
    // the output package at install time.
    let data = ctx.target.read(&format!("{RADIO_DIR}{relative_name}"))?;
    ctx.output.write(relative_name, &data)?;
    Ok(())
}
