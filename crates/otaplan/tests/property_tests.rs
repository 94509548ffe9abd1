//! Property-based tests for the update planner

use std::collections::BTreeSet;

use otaplan::prelude::*;
use otaplan_package::MemPackage;
use otaplan_script::{EdifyScript, Instruction};
use proptest::prelude::*;

fn arb_blob_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.]{0,11}".prop_filter("manifest name is reserved", |n| n != "filesmap")
}

fn arb_partition() -> impl Strategy<Value = String> {
    "/dev/block/[a-z0-9]{1,8}".prop_map(|s| s)
}

fn arb_image() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_manifest_field_count_gate(
        name in arb_blob_name(),
        partition in arb_partition(),
        extra in prop::collection::vec("[0-9a-f]{1,8}", 0..4),
    ) {
        let mut fields = vec![name.clone(), partition];
        fields.extend(extra.iter().cloned());
        let field_count = fields.len();
        let line = fields.join(" ");

        let mut package = MemPackage::new("target.zip")
            .with_entry("RADIO/filesmap", line.into_bytes())
            .with_entry(format!("RADIO/{name}"), b"blob bytes".to_vec());
        let result = load_filesmap(&mut package);

        if field_count <= 3 {
            let map = result.map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert!(map.contains(&name), "entry for {} expected", name);
        } else {
            prop_assert!(
                matches!(result, Err(PlanError::MalformedManifestLine { .. })),
                "{} fields should be rejected",
                field_count
            );
        }
    }

    #[test]
    fn prop_single_field_line_is_rejected(name in arb_blob_name()) {
        let mut package = MemPackage::new("target.zip")
            .with_entry("RADIO/filesmap", name.clone().into_bytes())
            .with_entry(format!("RADIO/{name}"), b"blob bytes".to_vec());
        let result = load_filesmap(&mut package);
        prop_assert!(
            matches!(result, Err(PlanError::MalformedManifestLine { .. })),
            "single-field line should be rejected"
        );
    }

    #[test]
    fn prop_fingerprint_always_recomputed(
        name in arb_blob_name(),
        partition in arb_partition(),
        image in arb_image(),
        supplied in "[0-9a-f]{40}",
    ) {
        let line = format!("{name} {partition} {supplied}");
        let mut package = MemPackage::new("target.zip")
            .with_entry("RADIO/filesmap", line.into_bytes())
            .with_entry(format!("RADIO/{name}"), image.clone());

        let map = load_filesmap(&mut package)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let entry = map
            .get(&name)
            .ok_or_else(|| TestCaseError::fail(format!("no entry for {name}")))?;

        prop_assert_eq!(&entry.fingerprint, &content_fingerprint(&image));
        prop_assert_eq!(entry.byte_length, image.len() as u64);
        prop_assert_eq!(entry.fingerprint.len(), 40);
    }

    #[test]
    fn prop_discovery_matches_radio_namespace(
        names in prop::collection::btree_set(arb_blob_name(), 0..5),
        foreign in prop::collection::vec("[A-Z]{3,6}/[a-z]{1,8}", 0..3),
    ) {
        let mut package = MemPackage::new("target.zip");
        for name in &names {
            package = package.with_entry(format!("RADIO/{name}"), b"x".to_vec());
        }
        for entry in &foreign {
            package = package.with_entry(entry.clone(), b"y".to_vec());
        }

        let found = radio_files(&mut package)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let expected: BTreeSet<String> =
            names.iter().map(|n| format!("RADIO/{n}")).collect();
        prop_assert_eq!(found, expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_incremental_skips_exactly_on_fingerprint_match(
        name in arb_blob_name(),
        partition in arb_partition(),
        image in arb_image(),
        changed in any::<bool>(),
    ) {
        let manifest = format!("{name} {partition}");
        let mut source_image = image.clone();
        if changed {
            source_image.push(0x5a);
        }

        let mut target = MemPackage::new("target.zip")
            .with_entry("RADIO/filesmap", manifest.clone().into_bytes())
            .with_entry(format!("RADIO/{name}"), image.clone());
        let mut source = MemPackage::new("source.zip")
            .with_entry("RADIO/filesmap", manifest.into_bytes())
            .with_entry(format!("RADIO/{name}"), source_image);
        let mut output = MemPackage::new("ota.zip");
        let mut script = EdifyScript::new();

        let mut ctx = PlanningContext::new(&mut target, 4, &mut output, &mut script)
            .with_source(&mut source);
        install_radio_files(&mut ctx)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let installs = script
            .instructions()
            .iter()
            .filter(|i| matches!(i, Instruction::InstallImage { .. }))
            .count();
        let staged = output.get(&name).is_some();

        if changed {
            prop_assert_eq!(installs, 1, "changed blob must be installed");
            prop_assert!(staged, "changed blob must be staged");
        } else {
            prop_assert_eq!(installs, 0, "matching blob must be skipped");
            prop_assert!(!staged, "matching blob must not be staged");
        }
    }
}
