//! End-to-end catalog tests over a miniature annotated source tree.
//!
//! Builds the kind of header layout the wizard points the core at — a
//! VERSION file, driver headers with module annotations, configuration
//! headers with parameter annotations, CPU definition files — and checks
//! every public loader against it, including the substitution round trip.

use anyhow::Result;
use hdrwiz::{
    ParamType, WizardError, is_source_tree, load_configuration_catalog, load_cpu_definitions,
    load_enum_catalog, load_module_catalog, source_tree_version, substitute,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TIMER_H: &str = r#"/**
 * Hardware timer driver.
 *
 * $WIZARD_MODULE = {"name": "timer", "depends": ["kfile"], "configuration": "cfg/cfg_timer.h"}
 */
#ifndef DRV_TIMER_H
#define DRV_TIMER_H
void timer_init(void);
#endif
"#;

const SER_H: &str = r#"/**
 * Serial port driver.
 *
 * $WIZARD_MODULE = {"name": "ser", "depends": ["kfile", "timer"], "configuration": "cfg/cfg_ser.h"}
 */
/**
 * $WIZARD_LIST = {"ser_parity": ["none", "even", "odd"]}
 */
void ser_init(void);
"#;

const CFG_SER_H: &str = r#"/**
 * Baud rate for the serial port.
 * $WIZARD = {"type": "int", "min": 300, "max": 115200, "long": True}
 */
#define SER_BAUD_RATE 19200L

/// Enable RTS/CTS handshake.
#define SER_HANDSHAKE 0

#define SER_TX_BUFSIZE 32 ///< Transmit buffer size.

/**
 * Parity mode.
 * $WIZARD = {"type": "enum", "value_list": "ser_parity"}
 */
#define SER_PARITY none
"#;

fn build_tree() -> Result<TempDir> {
    let dir = tempfile::tempdir()?;
    let root = dir.path();
    fs::write(root.join("VERSION"), "2.1.0\n")?;
    fs::create_dir_all(root.join("drv"))?;
    fs::create_dir_all(root.join("cfg"))?;
    fs::create_dir_all(root.join("cpu/arm"))?;
    fs::write(root.join("drv/timer.h"), TIMER_H)?;
    fs::write(root.join("drv/ser.h"), SER_H)?;
    fs::write(root.join("cfg/cfg_ser.h"), CFG_SER_H)?;
    fs::write(
        root.join("cpu/arm/arm.common.cdef"),
        "TOOLCHAIN = \"arm-none-eabi\"\nCPU_TAGS = [\"arm\"]\n",
    )?;
    fs::write(
        root.join("cpu/arm/at91sam7s.cdef"),
        "include(\"arm.common.cdef\")\nCPU_DESC = [\"ARM7TDMI\", \"64kB flash\"]\n",
    )?;
    Ok(dir)
}

#[test]
fn test_source_tree_probe() -> Result<()> {
    let dir = build_tree()?;
    assert!(is_source_tree(dir.path()));
    assert_eq!(source_tree_version(dir.path())?, "2.1.0");
    Ok(())
}

#[test]
fn test_module_catalog_over_tree() -> Result<()> {
    let dir = build_tree()?;
    let scan = load_module_catalog(dir.path())?;
    assert!(scan.is_complete());
    assert_eq!(scan.catalog.len(), 2);

    let timer = &scan.catalog["timer"];
    assert_eq!(timer.depends, vec!["kfile"]);
    assert_eq!(timer.configuration, "cfg/cfg_timer.h");
    assert_eq!(timer.description, "Hardware timer driver.");
    assert!(!timer.enabled);

    let ser = &scan.catalog["ser"];
    assert_eq!(ser.depends, vec!["kfile", "timer"]);
    Ok(())
}

#[test]
fn test_enum_catalog_over_tree() -> Result<()> {
    let dir = build_tree()?;
    let scan = load_enum_catalog(dir.path())?;
    assert!(scan.is_complete());
    assert_eq!(scan.catalog["ser_parity"], vec!["none", "even", "odd"]);
    Ok(())
}

#[test]
fn test_configuration_catalog() -> Result<()> {
    let dir = build_tree()?;
    let catalog = load_configuration_catalog(&dir.path().join("cfg/cfg_ser.h"))?;
    assert_eq!(catalog.len(), 4);
    assert!(catalog.warnings.is_empty());

    let baud = catalog.get("SER_BAUD_RATE").unwrap();
    assert_eq!(baud.value, "19200L");
    assert_eq!(baud.description, "Baud rate for the serial port.");
    assert_eq!(baud.param_type(), Some(ParamType::Int));
    assert_eq!(baud.min(), Some(300));
    assert_eq!(baud.max(), Some(115200));
    assert!(baud.is_long());

    let handshake = catalog.get("SER_HANDSHAKE").unwrap();
    assert_eq!(handshake.value, "0");
    assert_eq!(handshake.description, "Enable RTS/CTS handshake.");

    let bufsize = catalog.get("SER_TX_BUFSIZE").unwrap();
    assert_eq!(bufsize.value, "32");
    assert_eq!(bufsize.description, "Transmit buffer size.");

    let parity = catalog.get("SER_PARITY").unwrap();
    assert_eq!(parity.param_type(), Some(ParamType::Enum));
    assert_eq!(parity.value_list(), Some("ser_parity"));
    Ok(())
}

#[test]
fn test_cpu_definitions_over_tree() -> Result<()> {
    let dir = build_tree()?;
    let scan = load_cpu_definitions(dir.path())?;
    assert!(scan.is_complete());
    assert_eq!(scan.catalog.len(), 2);

    // Sorted walk: arm.common before at91sam7s.
    assert_eq!(scan.catalog[0].name, "arm");
    let chip = &scan.catalog[1];
    assert_eq!(chip.name, "at91sam7s");
    assert!(chip.definition_path.ends_with("cpu/arm/at91sam7s.cdef"));
    assert_eq!(
        chip.attr("TOOLCHAIN"),
        Some(&serde_json::json!("arm-none-eabi"))
    );
    assert_eq!(
        chip.attr("CPU_DESC"),
        Some(&serde_json::json!(["ARM7TDMI", "64kB flash"]))
    );
    Ok(())
}

#[test]
fn test_substitution_round_trip() -> Result<()> {
    let dir = build_tree()?;
    let path = dir.path().join("cfg/cfg_ser.h");
    let text = fs::read_to_string(&path)?;

    let rewritten = substitute(&text, "SER_BAUD_RATE", "115200L");
    fs::write(&path, &rewritten)?;

    let catalog = load_configuration_catalog(&path)?;
    let baud = catalog.get("SER_BAUD_RATE").unwrap();
    assert_eq!(baud.value, "115200L");
    // Everything around the rewritten value is untouched.
    assert_eq!(baud.description, "Baud rate for the serial port.");
    assert_eq!(catalog.len(), 4);
    Ok(())
}

#[test]
fn test_substitution_idempotence_over_real_header() {
    let once = substitute(CFG_SER_H, "SER_TX_BUFSIZE", "32");
    assert_eq!(once, CFG_SER_H);
    let twice = substitute(&substitute(CFG_SER_H, "SER_PARITY", "even"), "SER_PARITY", "even");
    assert_eq!(twice, substitute(CFG_SER_H, "SER_PARITY", "even"));
}

#[test]
fn test_malformed_file_reported_with_path_and_catalog_intact() -> Result<()> {
    let dir = build_tree()?;
    let bad = dir.path().join("drv/bad.h");
    fs::write(&bad, "/** $WIZARD_MODULE = {\"name\": \"broken\", */\n")?;

    let scan = load_module_catalog(dir.path())?;
    // Both good modules survive; the bad file is reported, not fatal.
    assert_eq!(scan.catalog.len(), 2);
    assert_eq!(scan.failures.len(), 1);
    assert!(scan.failures[0].path.ends_with("drv/bad.h"));
    assert!(matches!(
        scan.failures[0].error,
        WizardError::AnnotationEvaluation { .. }
    ));
    Ok(())
}

#[test]
fn test_missing_root_is_an_error() {
    let missing: PathBuf = Path::new("/nonexistent").join("hdrwiz-tree");
    assert!(load_module_catalog(&missing).is_err());
    assert!(load_enum_catalog(&missing).is_err());
    assert!(load_cpu_definitions(&missing).is_err());
}
