//! Planning commands over on-disk packages

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use otaplan::prelude::*;
use otaplan_package::{ZipPackage, ZipPackageWriter};
use otaplan_script::EdifyScript;
use tracing::info;

/// Run one planning pass and write the script and output package.
pub fn plan(
    target: &Path,
    source: Option<&Path>,
    output: &Path,
    script_path: &Path,
    api_version: u32,
) -> Result<()> {
    let mut target_pkg = ZipPackage::open(target)
        .with_context(|| format!("opening target package {}", target.display()))?;
    let mut source_pkg = match source {
        Some(path) => Some(
            ZipPackage::open(path)
                .with_context(|| format!("opening source package {}", path.display()))?,
        ),
        None => None,
    };
    let mut output_pkg = ZipPackageWriter::create(output)
        .with_context(|| format!("creating output package {}", output.display()))?;
    let mut script = EdifyScript::new();

    match source_pkg.as_mut() {
        Some(source) => {
            let mut ctx =
                PlanningContext::new(&mut target_pkg, api_version, &mut output_pkg, &mut script)
                    .with_source(source);
            plan_incremental_update(&mut ctx)?;
        }
        None => {
            let mut ctx =
                PlanningContext::new(&mut target_pkg, api_version, &mut output_pkg, &mut script);
            plan_full_update(&mut ctx)?;
        }
    }

    output_pkg
        .finish()
        .context("finalizing output package")?;
    fs::write(script_path, script.render())
        .with_context(|| format!("writing script {}", script_path.display()))?;

    info!(instructions = script.len(), "planning complete");
    Ok(())
}

/// Parse and print a target package's filesmap.
pub fn show_filesmap(target: &Path, json: bool) -> Result<()> {
    let mut package = ZipPackage::open(target)
        .with_context(|| format!("opening target package {}", target.display()))?;
    let map = load_filesmap(&mut package)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else if map.is_empty() {
        println!("no filesmap entries in {}", target.display());
    } else {
        for entry in map.iter() {
            println!(
                "{:<16} {:<52} {:>10}  {}",
                entry.file_name, entry.partition_path, entry.byte_length, entry.fingerprint
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use otaplan_package::{PackageRead, PackageWrite};

    use super::*;

    fn write_target(path: &Path) -> Result<()> {
        let mut writer = ZipPackageWriter::create(path)?;
        writer.write("RADIO/filesmap", b"boot.img /dev/block/boot\n")?;
        writer.write("RADIO/boot.img", b"boot image bytes")?;
        writer.finish()?;
        Ok(())
    }

    #[test]
    fn test_full_plan_writes_script_and_output() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("target.zip");
        let output = dir.path().join("ota.zip");
        let script = dir.path().join("radio.edify");
        write_target(&target)?;

        plan(&target, None, &output, &script, 4)?;

        let text = fs::read_to_string(&script)?;
        assert!(text.contains("package_extract_file(\"boot.img\", \"/dev/block/boot\")"));

        let mut staged = ZipPackage::open(&output)?;
        assert_eq!(staged.read("boot.img")?, b"boot image bytes");
        Ok(())
    }

    #[test]
    fn test_incremental_plan_with_identical_source_stages_nothing() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("target.zip");
        let source = dir.path().join("source.zip");
        let output = dir.path().join("ota.zip");
        let script = dir.path().join("radio.edify");
        write_target(&target)?;
        write_target(&source)?;

        plan(&target, Some(&source), &output, &script, 4)?;

        let text = fs::read_to_string(&script)?;
        assert!(!text.contains("package_extract_file"));

        let mut staged = ZipPackage::open(&output)?;
        assert!(staged.entries()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_target_package_fails() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let result = plan(
            &dir.path().join("absent.zip"),
            None,
            &dir.path().join("ota.zip"),
            &dir.path().join("radio.edify"),
            4,
        );
        assert!(result.is_err());
        Ok(())
    }
}
