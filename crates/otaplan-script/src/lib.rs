//! Installer-script instruction builder for the otaplan OTA update planner
//!
//! The update planner does not talk to devices; it emits instructions that
//! the recovery-side installer runtime executes. This crate isolates the
//! runtime's textual grammar (edify) from the planning logic: planners
//! construct [`Instruction`] values through one constructor per kind, and
//! only the `Display` implementation knows the wire text.
//!
//! Instructions are appended to an [`InstructionSink`]; [`EdifyScript`] is
//! the default ordered, append-only accumulator.
//!
//! # Example
//!
//! ```
//! use otaplan_script::{ContentCheck, EdifyScript, Instruction, InstructionSink};
//!
//! let mut script = EdifyScript::new();
//! let check = ContentCheck::new("/dev/block/boot", 16, "a94a8fe5ccb19ba6");
//! script.emit(Instruction::install_image(check, "boot.img"));
//! assert_eq!(script.len(), 1);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod instruction;
pub mod script;

pub use instruction::{ContentCheck, Instruction};
pub use script::{EdifyScript, InstructionSink};
