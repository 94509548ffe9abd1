//! The collaborator bundle for one planning pass

use otaplan_package::{PackageRead, PackageWrite};
use otaplan_script::InstructionSink;

/// Borrowed collaborators for a single planning pass.
///
/// The caller owns every collaborator; the planner borrows the bundle for
/// the duration of one call and never stores it. A source package is only
/// present for incremental plans, where it enables skip-on-match.
pub struct PlanningContext<'a> {
    /// Target-files package being planned
    pub target: &'a mut dyn PackageRead,

    /// Previously-shipped package, present for incremental plans
    pub source: Option<&'a mut dyn PackageRead>,

    /// Installer API version of the target build; versions below 3 cannot
    /// execute conditional image installs
    pub api_version: u32,

    /// Output OTA package receiving staged blob copies
    pub output: &'a mut dyn PackageWrite,

    /// Script accumulator receiving emitted instructions
    pub script: &'a mut dyn InstructionSink,
}

impl<'a> PlanningContext<'a> {
    /// Bundle the collaborators for a full (target-only) plan.
    pub fn new(
        target: &'a mut dyn PackageRead,
        api_version: u32,
        output: &'a mut dyn PackageWrite,
        script: &'a mut dyn InstructionSink,
    ) -> Self {
        Self {
            target,
            source: None,
            api_version,
            output,
            script,
        }
    }

    /// Attach a source package, turning this into an incremental plan.
    #[must_use]
    pub fn with_source(mut self, source: &'a mut dyn PackageRead) -> Self {
        self.source = Some(source);
        self
    }
}
