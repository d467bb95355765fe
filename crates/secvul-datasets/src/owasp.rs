//! OWASP Benchmark: `expectedresults-1.2.csv` plus one Java file per test.

use std::path::{Path, PathBuf};

use secvul_core::errors::DatasetError;

use crate::sample::{cwe_text, Benchmark, Entry, Sample};
use crate::selection::Selection;
use crate::table::{parse_cwe, parse_flag, read_code, Table};

pub const EXPECTED_RESULTS: &str = "expectedresults-1.2.csv";

const TEST_NAME: &str = "# test name";
const REAL_VULNERABILITY: &str = "real vulnerability";

#[derive(Debug, Clone)]
pub struct Owasp {
    samples: Vec<Sample>,
}

impl Owasp {
    /// Load from a directory holding the expected results file and the
    /// `<test name>.java` sources. Test names are the sample ids.
    pub fn load(dir: &Path, selection: &Selection) -> Result<Self, DatasetError> {
        let table = Table::read(
            &dir.join(EXPECTED_RESULTS),
            &[TEST_NAME, "category", REAL_VULNERABILITY, "cwe"],
        )?;
        let entries = table
            .rows
            .iter()
            .map(|row| {
                Ok(Entry {
                    id: table.cell(row, TEST_NAME).trim().to_string(),
                    cwe: parse_cwe(table.cell(row, "cwe")),
                    vulnerable: parse_flag(REAL_VULNERABILITY, table.cell(row, REAL_VULNERABILITY))?,
                    payload: (),
                })
            })
            .collect::<Result<Vec<_>, DatasetError>>()?;

        let samples = selection
            .apply(entries)?
            .into_iter()
            .map(|e| {
                let file: PathBuf = dir.join(format!("{}.java", e.id));
                Ok(Sample {
                    code: read_code(&file)?,
                    id: e.id,
                    cwe_id: cwe_text(e.cwe),
                    vulnerable: e.vulnerable,
                    path: Some(file.display().to_string()),
                })
            })
            .collect::<Result<Vec<_>, DatasetError>>()?;

        Ok(Self { samples })
    }
}

impl Benchmark for Owasp {
    fn name(&self) -> &str {
        "owasp"
    }

    fn samples(&self) -> &[Sample] {
        &self.samples
    }
}
