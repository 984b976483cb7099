//! Contract Discovery
//!
//! Recursively discovers source files under a directory and turns them into
//! the ordered list of units a run processes. Entries are sorted per
//! directory so the enumeration order, and therefore the report row order,
//! is deterministic across filesystems.

use solcost_oracle::ContractUnit;
use std::path::Path;
use walkdir::WalkDir;

/// Recursively discover contract files with the given extension.
///
/// The returned order is the unit-processing order of the run.
pub fn discover_contracts(dir: &Path, extension: &str) -> std::io::Result<Vec<ContractUnit>> {
    let mut units = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().map(|e| e == extension).unwrap_or(false)
        {
            units.push(ContractUnit::from_path(path.to_path_buf()));
        }
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::write(path, "// contract\n").unwrap();
    }

    #[test]
    fn discovers_recursively_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("Zebra.sol"));
        touch(&dir.path().join("Alpha.sol"));
        touch(&dir.path().join("nested").join("Inner.sol"));
        touch(&dir.path().join("README.md"));

        let units = discover_contracts(dir.path(), "sol").unwrap();
        let names: Vec<&str> = units.iter().map(|u| u.name.as_str()).collect();
        // Depth-first with per-directory byte-order sorting: "nested" sorts
        // after "Zebra.sol", so its contents come last.
        assert_eq!(names, vec!["Alpha.sol", "Zebra.sol", "Inner.sol"]);
    }

    #[test]
    fn empty_directory_yields_no_units() {
        let dir = tempfile::tempdir().unwrap();
        let units = discover_contracts(dir.path(), "sol").unwrap();
        assert!(units.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        assert!(discover_contracts(&missing, "sol").is_err());
    }
}
