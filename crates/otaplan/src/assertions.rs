//! Hardware-revision assertions
//!
//! A package that ships no firmware of its own must assert that the
//! device's installed modem and trustzone revisions are ones the build
//! was qualified against; the installer aborts on a mismatch. A package
//! with a non-empty filesmap carries its own firmware and needs no
//! assertion.

use std::sync::LazyLock;

use otaplan_script::Instruction;
use regex::Regex;

use crate::Result;
use crate::context::PlanningContext;
use crate::filesmap::load_filesmap;

/// Device-info entry naming the required hardware revisions
pub const DEVICE_INFO_ENTRY: &str = "OTA/android-info.txt";

static MODEM_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"require\s+version-modem\s*=\s*(.+)").expect("hardcoded pattern")
});

static TRUSTZONE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"require\s+version-trustzone\s*=\s*(\S+)").expect("hardcoded pattern")
});

/// Emit both revision assertions for a planning pass.
///
/// # Errors
///
/// Propagates manifest and package failures; a missing device-info entry
/// is fatal when an assertion has to be considered.
pub fn add_version_assertions(ctx: &mut PlanningContext<'_>) -> Result<()> {
    add_modem_assertion(ctx)?;
    add_trustzone_assertion(ctx)?;
    Ok(())
}

/// Emit the modem revision assertion, when one is required.
///
/// # Errors
///
/// See [`add_version_assertions`].
pub fn add_modem_assertion(ctx: &mut PlanningContext<'_>) -> Result<()> {
    assert_revision_class(ctx, &MODEM_DIRECTIVE, "oppo.verify_modem")
}

/// Emit the trustzone revision assertion, when one is required.
///
/// # Errors
///
/// See [`add_version_assertions`].
pub fn add_trustzone_assertion(ctx: &mut PlanningContext<'_>) -> Result<()> {
    assert_revision_class(ctx, &TRUSTZONE_DIRECTIVE, "oppo.verify_trustzone")
}

fn assert_revision_class(
    ctx: &mut PlanningContext<'_>,
    directive: &Regex,
    function: &str,
) -> Result<()> {
    // Presence of packaged firmware makes the revision check moot.
    let filesmap = load_filesmap(ctx.target)?;
    if !filesmap.is_empty() {
        return Ok(());
    }

    let info = ctx.target.read(DEVICE_INFO_ENTRY)?;
    let text = String::from_utf8_lossy(&info);
    let Some(value) = directive.captures(&text).and_then(|c| c.get(1)) else {
        return Ok(());
    };

    let versions: Vec<&str> = value.as_str().split('|').collect();
    if versions.is_empty() || versions.contains(&"*") {
        return Ok(());
    }
    ctx.script.emit(Instruction::assert_versions(function, versions));
    Ok(())
}
