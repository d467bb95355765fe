//! `secvul samples`

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use secvul_core::config::{CliOverrides, SecvulConfig};
use secvul_datasets::juliet::cwe_name;
use secvul_datasets::owasp::EXPECTED_RESULTS;
use secvul_datasets::{
    Benchmark, CveFixesCsv, CveFixesExport, Juliet, Owasp, Sample, SampleOrder, Selection,
};
use serde::Serialize;

use crate::args::{BenchmarkKind, Cli, SamplesArgs};

/// What gets printed per sample. Code is summarized, not dumped.
#[derive(Serialize)]
struct SampleLine<'a> {
    id: &'a str,
    cwe_id: &'a str,
    vulnerable: bool,
    path: Option<&'a str>,
    code_len: usize,
}

pub fn run(cli: &Cli, args: &SamplesArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let overrides = CliOverrides {
        data_dir: args.data_dir.clone(),
        ..Default::default()
    };
    let config = SecvulConfig::load(&cwd, cli.config.as_deref(), Some(&overrides))
        .context("failed to load configuration")?;
    let data_dir = config.datasets.effective_data_dir();

    let selection = Selection {
        indices: (!args.indices.is_empty()).then(|| args.indices.clone()),
        vulnerable: args.vul,
        top_cwe: args.top_cwe,
        order: args.sort.parse::<SampleOrder>()?,
        n_examples: args.n_examples,
    };

    let bench: Box<dyn Benchmark> = match args.benchmark {
        BenchmarkKind::Cvefixes => {
            let path = required_path(args, "cvefixes")?;
            Box::new(
                CveFixesCsv::load(&path, args.language.as_deref(), &selection)
                    .with_context(|| format!("cannot load {}", path.display()))?,
            )
        }
        BenchmarkKind::CvefixesExport => {
            let path = required_path(args, "cvefixes-export")?;
            Box::new(
                CveFixesExport::load(&path, &selection)
                    .with_context(|| format!("cannot load {}", path.display()))?,
            )
        }
        BenchmarkKind::Juliet => {
            let (default_index, default_code) = Juliet::default_paths(&data_dir, &args.variant);
            let index = args.path.clone().unwrap_or(default_index);
            let code_root = args.code_root.clone().unwrap_or(default_code);
            Box::new(
                Juliet::load(&index, &code_root, &selection, args.min_sloc)
                    .with_context(|| format!("cannot load {}", index.display()))?,
            )
        }
        BenchmarkKind::Owasp => {
            let dir = args
                .path
                .clone()
                .unwrap_or_else(|| data_dir.join("owasp_data"));
            Box::new(
                Owasp::load(&dir, &selection)
                    .with_context(|| format!("cannot load {}", dir.join(EXPECTED_RESULTS).display()))?,
            )
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for sample in bench.samples() {
        let line = SampleLine {
            id: &sample.id,
            cwe_id: &sample.cwe_id,
            vulnerable: sample.vulnerable,
            path: sample.path.as_deref(),
            code_len: sample.code.len(),
        };
        serde_json::to_writer(&mut out, &line)?;
        writeln!(out)?;
    }
    out.flush()?;

    log_summary(bench.name(), bench.samples());
    Ok(())
}

fn required_path(args: &SamplesArgs, benchmark: &str) -> Result<PathBuf> {
    args.path
        .clone()
        .with_context(|| format!("--path is required for {benchmark}"))
}

/// One log line per CWE: vulnerable and fixed counts.
fn log_summary(name: &str, samples: &[Sample]) {
    let mut per_cwe: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for sample in samples {
        let counts = per_cwe.entry(sample.cwe_id.as_str()).or_default();
        if sample.vulnerable {
            counts.0 += 1;
        } else {
            counts.1 += 1;
        }
    }
    for (cwe, (vulnerable, fixed)) in per_cwe {
        let label = cwe.parse().ok().and_then(cwe_name).unwrap_or("");
        tracing::info!(benchmark = name, cwe, cwe_name = label, vulnerable, fixed, "samples per CWE");
    }
    tracing::info!(benchmark = name, total = samples.len(), "samples selected");
}
