//! Juliet test suite: an index CSV (`file`, `cwe`, `vul`) next to a tree of
//! source files.

use std::path::{Path, PathBuf};

use secvul_core::errors::DatasetError;

use crate::sample::{cwe_text, Benchmark, Entry, Sample};
use crate::selection::Selection;
use crate::table::{parse_cwe, parse_flag, read_code, Table};

const CWE_NAMES: &[(u32, &str)] = &[
    (20, "Improper Input Validation"),
    (22, "Path Traversal"),
    (77, "Command Injection"),
    (78, "OS Command Injection"),
    (79, "Cross Site Scripting"),
    (89, "SQL Injection"),
    (90, "LDAP Injection"),
    (94, "Improper Control of Generation of Code or Code Injection"),
    (119, "Improper Restriction of Operations within the Bounds of a Memory Buffer"),
    (121, "Stack Based Buffer Overflow"),
    (122, "Heap Based Buffer Overflow"),
    (125, "Out-of-bounds Read"),
    (190, "Integer Overflow"),
    (191, "Integer Underflow"),
    (269, "Improper Privilege Management"),
    (276, "Incorrect Default Permissions"),
    (287, "Improper Authentication"),
    (306, "Missing Authentication for Critical Function"),
    (327, "Cryptographic"),
    (328, "weak hash"),
    (330, "Insufficiently Random Values"),
    (352, "Cross-Site Request Forgery"),
    (362, "Race Condition or Concurrent Execution using Shared Resource with Improper Synchronization"),
    (369, "Divide By Zero"),
    (416, "Use After Free"),
    (434, "Unrestricted Upload of File with Dangerous Type"),
    (476, "NULL Pointer Dereference"),
    (501, "trust boundary violation"),
    (502, "Deserialization of Untrusted Data"),
    (606, "Unchecked Loop Condition"),
    (614, "Sensitive Cookie in HTTPS Session Without 'Secure' Attribute"),
    (643, "XPath Injection"),
    (685, "Function Call with Incorrect Number of Arguments"),
    (787, "Out-of-bounds Write"),
    (798, "Use of Hard-coded Credentials"),
    (862, "Missing Authorization"),
    (863, "Incorrect Authorization"),
    (918, "Server-Side Request Forgery (SSRF)"),
];

/// Display name for a CWE covered by the suite.
pub fn cwe_name(cwe: u32) -> Option<&'static str> {
    CWE_NAMES
        .iter()
        .find(|(id, _)| *id == cwe)
        .map(|(_, name)| *name)
}

/// Source lines of code: non-blank lines that are neither an `import`
/// nor a lone brace.
pub fn sloc(code: &str) -> usize {
    code.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("import ") && *l != "{" && *l != "}")
        .count()
}

#[derive(Debug, Clone)]
pub struct Juliet {
    name: String,
    samples: Vec<Sample>,
}

impl Juliet {
    /// Load from `index` with source files resolved under `code_root`.
    /// Samples under `min_sloc` source lines are dropped after selection.
    pub fn load(
        index: &Path,
        code_root: &Path,
        selection: &Selection,
        min_sloc: Option<usize>,
    ) -> Result<Self, DatasetError> {
        let table = Table::read(index, &["file", "cwe", "vul"])?;
        let entries = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Ok(Entry {
                    id: i.to_string(),
                    cwe: parse_cwe(table.cell(row, "cwe")),
                    vulnerable: parse_flag("vul", table.cell(row, "vul"))?,
                    payload: table.cell(row, "file").to_string(),
                })
            })
            .collect::<Result<Vec<_>, DatasetError>>()?;

        let mut samples = Vec::new();
        for entry in selection.apply(entries)? {
            let file = entry.payload;
            let code = read_code(&code_root.join(&file))?;
            if min_sloc.is_some_and(|min| sloc(&code) < min) {
                continue;
            }
            samples.push(Sample {
                id: entry.id,
                cwe_id: cwe_text(entry.cwe),
                vulnerable: entry.vulnerable,
                code,
                path: Some(file),
            });
        }

        Ok(Self {
            name: index
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "juliet".to_string()),
            samples,
        })
    }

    /// Conventional layout: `<data_dir>/juliet/<variant>.csv` with sources
    /// under `<data_dir>/juliet/<lang>-<version>/`.
    pub fn default_paths(data_dir: &Path, variant: &str) -> (PathBuf, PathBuf) {
        let root = data_dir.join("juliet");
        let code_dir = variant.strip_prefix("juliet-").unwrap_or(variant);
        (root.join(format!("{variant}.csv")), root.join(code_dir))
    }
}

impl Benchmark for Juliet {
    fn name(&self) -> &str {
        &self.name
    }

    fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sloc_skips_blank_import_and_brace_lines() {
        let code = "import java.io.*;\n\npublic class A\n{\n    void f() {\n    }\n}\n";
        assert_eq!(sloc(code), 2);
    }

    #[test]
    fn known_names() {
        assert_eq!(cwe_name(78), Some("OS Command Injection"));
        assert_eq!(cwe_name(1), None);
    }

    #[test]
    fn default_layout() {
        let (index, code) = Juliet::default_paths(Path::new("/d"), "juliet-java-1.3");
        assert_eq!(index, Path::new("/d/juliet/juliet-java-1.3.csv"));
        assert_eq!(code, Path::new("/d/juliet/java-1.3"));
    }
}
