//! Shared helpers for the integration tests: parse a configuration-language source
//! string, run it through the whole pipeline, and hand back the solved symbol table
//! (or the driver's error) for the test to assert against.

use satconfig_core::driver::DriverState;
use satconfig_core::{CoreError, Driver};
use satconfig_kconfig::{SymbolTable, Tri};

/// Parses `source` and drives it through layout, clause building, and both solves,
/// panicking on parse failure (a malformed test fixture is a test bug, not a case
/// under test).
pub fn solve(source: &str) -> Result<SymbolTable, CoreError> {
    let table = satconfig_kconfig::parse("Kconfig", source).expect("test fixture should parse");
    let mut driver = Driver::new(table, false);
    match driver.run() {
        Ok(()) => {
            assert_eq!(driver.state(), DriverState::Written);
            Ok(driver.into_table())
        }
        Err(e) => Err(e),
    }
}

/// The tristate value of a named symbol in a solved table, panicking if the symbol
/// was never declared.
pub fn value_of(table: &SymbolTable, name: &str) -> Tri {
    let id = table.find(name).unwrap_or_else(|| panic!("symbol {name} not declared"));
    table
        .get(id)
        .curr
        .as_tri()
        .unwrap_or_else(|| panic!("symbol {name} has no tristate value"))
}

/// Like [`solve`], but first overlays `satconfig_overlay` (rendered `.satconfig`
/// text) onto the `S_DEF_SAT` slot, the way the CLI does before handing the table to
/// the driver.
pub fn solve_with_overlay(source: &str, satconfig_overlay: &str) -> Result<SymbolTable, CoreError> {
    use std::io::Write as _;

    let mut table = satconfig_kconfig::parse("Kconfig", source).expect("test fixture should parse");

    let path = std::env::temp_dir().join(format!("satconfig-test-{}.satconfig", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).expect("temp overlay file");
        file.write_all(satconfig_overlay.as_bytes()).expect("write temp overlay");
    }
    satconfig_kconfig::conf_read_simple(&mut table, &path, satconfig_kconfig::DefSlot::Sat)
        .expect("overlay should read back");
    let _ = std::fs::remove_file(&path);

    let mut driver = Driver::new(table, false);
    match driver.run() {
        Ok(()) => {
            assert_eq!(driver.state(), DriverState::Written);
            Ok(driver.into_table())
        }
        Err(e) => Err(e),
    }
}
