//! Jacoco line-coverage report decoding
//!
//! Reads the XML report jacoco's `report` goal writes to
//! `target/site/jacoco/jacoco.xml`, narrows it to the target package and
//! source file, and keeps the lines with at least one covered instruction
//! (`ci > 0`). A package or source file absent from the report is not an
//! error: that run simply executed none of the target's lines.

use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use tarantula::{TarantulaError, TarantulaResult};

/// Relative location of the XML report inside the Maven project
const REPORT_PATH: &str = "target/site/jacoco/jacoco.xml";

/// Decode the executed-line set for one run from the project's jacoco report
///
/// `package` uses dot notation; jacoco names packages with slashes.
pub fn decode_executed_lines(
    project_root: &Path,
    package: &str,
    source_file: &str,
    test: &str,
) -> TarantulaResult<BTreeSet<u32>> {
    let path = project_root.join(REPORT_PATH);
    let xml = std::fs::read_to_string(&path).map_err(|e| {
        TarantulaError::report_parse(test, format!("could not read {}: {e}", path.display()))
    })?;
    executed_lines(&xml, &package_path(package), source_file)
        .map_err(|m| TarantulaError::report_parse(test, m))
}

/// Convert a dotted Java package to jacoco's slash form
#[must_use]
pub fn package_path(package: &str) -> String {
    package.replace('.', "/")
}

/// Extract covered line numbers for one source file from a jacoco document
pub fn executed_lines(
    xml: &str,
    package_path: &str,
    source_file: &str,
) -> Result<BTreeSet<u32>, String> {
    let Some(package) = named_section(xml, "package", package_path)? else {
        return Ok(BTreeSet::new());
    };
    let Some(file) = named_section(package, "sourcefile", source_file)? else {
        return Ok(BTreeSet::new());
    };

    let line_re = Regex::new(r"<line\b[^>]*>").map_err(|e| e.to_string())?;
    let mut lines = BTreeSet::new();
    for tag in line_re.find_iter(file) {
        let tag = tag.as_str();
        if attr_u64(tag, "ci")? > 0 {
            lines.insert(u32::try_from(attr_u64(tag, "nr")?).map_err(|e| e.to_string())?);
        }
    }
    Ok(lines)
}

/// Find the body of `<element name="...">...</element>` with the given name
fn named_section<'a>(
    xml: &'a str,
    element: &str,
    name: &str,
) -> Result<Option<&'a str>, String> {
    let re = Regex::new(&format!(
        r#"(?s)<{element} name="{}"[^>]*>(.*?)</{element}>"#,
        regex::escape(name)
    ))
    .map_err(|e| e.to_string())?;
    Ok(re.captures(xml).and_then(|c| c.get(1)).map(|m| m.as_str()))
}

/// Read one numeric attribute out of an element tag
fn attr_u64(tag: &str, name: &str) -> Result<u64, String> {
    let re = Regex::new(&format!(r#"\b{name}="(\d+)""#)).map_err(|e| e.to_string())?;
    let value = re
        .captures(tag)
        .and_then(|c| c.get(1))
        .ok_or_else(|| format!("line element has no numeric '{name}' attribute"))?;
    value
        .as_str()
        .parse()
        .map_err(|e| format!("invalid '{name}' attribute: {e}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<report name="calc">
  <package name="com/example/calc">
    <class name="com/example/calc/Calculator" sourcefilename="Calculator.java">
      <method name="add" desc="(II)I" line="8"/>
    </class>
    <sourcefile name="Calculator.java">
      <line nr="8" mi="0" ci="4" mb="0" cb="0"/>
      <line nr="9" mi="2" ci="0" mb="0" cb="0"/>
      <line nr="12" mi="0" ci="7" mb="1" cb="1"/>
    </sourcefile>
    <sourcefile name="Helper.java">
      <line nr="3" mi="0" ci="2" mb="0" cb="0"/>
    </sourcefile>
  </package>
  <package name="com/example/other">
    <sourcefile name="Calculator.java">
      <line nr="99" mi="0" ci="1" mb="0" cb="0"/>
    </sourcefile>
  </package>
</report>
"#;

    mod executed_lines_tests {
        use super::*;

        #[test]
        fn test_only_covered_lines_of_target_file() {
            let lines = executed_lines(REPORT, "com/example/calc", "Calculator.java").unwrap();
            // Line 9 has ci="0" and is excluded; other files and packages
            // do not contribute.
            assert_eq!(lines, BTreeSet::from([8, 12]));
        }

        #[test]
        fn test_same_file_name_in_other_package_not_picked_up() {
            let lines = executed_lines(REPORT, "com/example/other", "Calculator.java").unwrap();
            assert_eq!(lines, BTreeSet::from([99]));
        }

        #[test]
        fn test_missing_package_yields_empty_set() {
            let lines = executed_lines(REPORT, "com/elsewhere", "Calculator.java").unwrap();
            assert!(lines.is_empty());
        }

        #[test]
        fn test_missing_sourcefile_yields_empty_set() {
            let lines = executed_lines(REPORT, "com/example/calc", "Missing.java").unwrap();
            assert!(lines.is_empty());
        }

        #[test]
        fn test_malformed_line_attribute_rejected() {
            let xml = r#"<package name="p"><sourcefile name="A.java">
                <line nr="1" mi="0"/>
            </sourcefile></package>"#;
            let err = executed_lines(xml, "p", "A.java").unwrap_err();
            assert!(err.contains("ci"));
        }

        #[test]
        fn test_package_name_with_regex_metacharacters() {
            // Package names never contain regex syntax, but the lookup must
            // treat the name literally regardless.
            let lines = executed_lines(REPORT, "com/example/ca.c", "Calculator.java").unwrap();
            assert!(lines.is_empty());
        }
    }

    mod path_tests {
        use super::*;

        #[test]
        fn test_package_path_conversion() {
            assert_eq!(package_path("com.example.calc"), "com/example/calc");
            assert_eq!(package_path("calc"), "calc");
        }

        #[test]
        fn test_decode_from_project_dir() {
            let tmp = tempfile::tempdir().unwrap();
            let dir = tmp.path().join("target/site/jacoco");
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("jacoco.xml"), REPORT).unwrap();

            let lines =
                decode_executed_lines(tmp.path(), "com.example.calc", "Calculator.java", "testAdd")
                    .unwrap();
            assert_eq!(lines, BTreeSet::from([8, 12]));
        }

        #[test]
        fn test_missing_report_is_per_run_error() {
            let tmp = tempfile::tempdir().unwrap();
            let err =
                decode_executed_lines(tmp.path(), "com.example", "A.java", "testAdd").unwrap_err();
            assert!(matches!(err, TarantulaError::ReportParse { .. }));
            assert!(err.is_per_run());
        }
    }
}
