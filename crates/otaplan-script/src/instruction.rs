//! Structured installer instructions and their edify rendering

use std::fmt;

use serde::{Deserialize, Serialize};

/// One read-and-fingerprint operand: the installer reads `byte_length`
/// bytes from `partition` and compares the SHA-1 of that content against
/// `fingerprint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCheck {
    /// Partition device path the installer reads from
    pub partition: String,

    /// Number of bytes to read before fingerprinting
    pub byte_length: u64,

    /// Expected lowercase-hex SHA-1 of the content
    pub fingerprint: String,
}

impl ContentCheck {
    /// Build a check over the first `byte_length` bytes of `partition`.
    pub fn new(
        partition: impl Into<String>,
        byte_length: u64,
        fingerprint: impl Into<String>,
    ) -> Self {
        Self {
            partition: partition.into(),
            byte_length,
            fingerprint: fingerprint.into(),
        }
    }

    /// The installer-runtime read source for this check.
    fn emmc_source(&self) -> String {
        format!("EMMC:{}:{}:{}", self.partition, self.byte_length, self.fingerprint)
    }
}

/// One installer instruction, constructed by the planners and rendered to
/// the runtime's textual grammar by `Display`.
///
/// The planner treats rendered text as write-only output; nothing in this
/// workspace parses it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Progress message shown on the installer console
    Print {
        /// Message text
        message: String,
    },

    /// Abort installation unless a device-revision query matches one of
    /// the listed versions
    AssertVersions {
        /// Installer builtin performing the query (`oppo.verify_modem`)
        function: String,
        /// Acceptable revision identifiers
        versions: Vec<String>,
    },

    /// Conditionally flash one staged blob: skip with a message when the
    /// partition content already matches, extract the blob otherwise
    InstallImage {
        /// On-device content check deciding skip-vs-extract
        check: ContentCheck,
        /// Name of the staged blob inside the OTA package
        blob_name: String,
    },

    /// Wipe a dependent region unless its two control blobs are both
    /// already current on the device.
    ///
    /// The emitted conditional is asymmetric: `secondary` is only
    /// consulted when `primary` matches, and a `primary` mismatch wipes
    /// immediately. See [`Instruction::wipe_branch_taken`].
    WipeUnlessCurrent {
        /// Outer check; a mismatch wipes without consulting `secondary`
        primary: ContentCheck,
        /// Inner check, evaluated only when `primary` matches
        secondary: ContentCheck,
        /// Block device to wipe
        device: String,
        /// Wipe size in device units
        blocks: u32,
        /// Message printed when both checks pass and no wipe happens
        skip_message: String,
    },

    /// Re-check a wiped region against its known wiped-state fingerprint
    /// and report the outcome; observational only, never re-wipes
    VerifyWipe {
        /// Check against the wiped-state fingerprint
        check: ContentCheck,
        /// Message on a confirmed wipe
        ok_message: String,
        /// Message when the region does not match the wiped state
        fail_message: String,
    },
}

impl Instruction {
    /// Console progress message.
    pub fn print(message: impl Into<String>) -> Self {
        Instruction::Print {
            message: message.into(),
        }
    }

    /// Revision assertion over the given installer builtin.
    pub fn assert_versions(
        function: impl Into<String>,
        versions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Instruction::AssertVersions {
            function: function.into(),
            versions: versions.into_iter().map(Into::into).collect(),
        }
    }

    /// Conditional install of one staged blob.
    pub fn install_image(check: ContentCheck, blob_name: impl Into<String>) -> Self {
        Instruction::InstallImage {
            check,
            blob_name: blob_name.into(),
        }
    }

    /// Conditional wipe gated on two control-blob checks.
    pub fn wipe_unless_current(
        primary: ContentCheck,
        secondary: ContentCheck,
        device: impl Into<String>,
        blocks: u32,
        skip_message: impl Into<String>,
    ) -> Self {
        Instruction::WipeUnlessCurrent {
            primary,
            secondary,
            device: device.into(),
            blocks,
            skip_message: skip_message.into(),
        }
    }

    /// Post-wipe verification report.
    pub fn verify_wipe(
        check: ContentCheck,
        ok_message: impl Into<String>,
        fail_message: impl Into<String>,
    ) -> Self {
        Instruction::VerifyWipe {
            check,
            ok_message: ok_message.into(),
            fail_message: fail_message.into(),
        }
    }

    /// Evaluate the wipe conditional's truth table for a
    /// [`Instruction::WipeUnlessCurrent`]; `None` for other kinds.
    ///
    /// Mirrors the nesting of the rendered conditional: the secondary
    /// check is only reached when the primary one passes, so a stale
    /// primary wipes regardless of the secondary's state.
    pub fn wipe_branch_taken(
        &self,
        primary_current: bool,
        secondary_current: bool,
    ) -> Option<bool> {
        match self {
            Instruction::WipeUnlessCurrent { .. } => {
                if primary_current {
                    Some(!secondary_current)
                } else {
                    Some(true)
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Print { message } => write!(f, "ui_print(\"{message}\");"),
            Instruction::AssertVersions { function, versions } => {
                let args = versions
                    .iter()
                    .map(|v| format!("\"{v}\""))
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "assert({function}({args}) == \"1\");")
            }
            Instruction::InstallImage { check, blob_name } => write!(
                f,
                "ifelse((sha1_check(read_file(\"{source}\")) != \"\"),\
                 (ui_print(\"{partition} already up to date\")),\
                 (package_extract_file(\"{blob_name}\", \"{partition}\")));",
                source = check.emmc_source(),
                partition = check.partition,
            ),
            Instruction::WipeUnlessCurrent {
                primary,
                secondary,
                device,
                blocks,
                skip_message,
            } => write!(
                f,
                "ifelse((sha1_check(read_file(\"{primary}\")) != \"\"),\
                 ifelse((sha1_check(read_file(\"{secondary}\")) != \"\"),\
                 (ui_print(\"{skip_message}\")),\
                 (wipe_block_device(\"{device}\", {blocks}))),\
                 (wipe_block_device(\"{device}\", {blocks})));",
                primary = primary.emmc_source(),
                secondary = secondary.emmc_source(),
            ),
            Instruction::VerifyWipe {
                check,
                ok_message,
                fail_message,
            } => write!(
                f,
                "ifelse(sha1_check(read_file(\"{source}\")) != \"\",\
                 ui_print(\"{ok_message}\"),\
                 ui_print(\"{fail_message}\"));",
                source = check.emmc_source(),
            ),
        }
    }
}
