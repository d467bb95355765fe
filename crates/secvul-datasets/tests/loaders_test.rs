//! Benchmark loaders over small on-disk fixtures.

use std::fs;
use std::path::Path;

use secvul_core::errors::DatasetError;
use secvul_core::types::RevisionPair;
use secvul_datasets::{
    Benchmark, CveFixesCsv, CveFixesExport, Juliet, Owasp, SampleOrder, Selection,
};
use secvul_extract::{CsvSink, PairSink};

fn write(path: &Path, text: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

const CVEFIXES_CSV: &str = r#"code,vul,cwe_id,extra
"int f() { /* old */ return a[i]; }",1,CWE-125,x
"int f() { return i < n ? a[i] : 0; }",0,CWE-125,x
"void g() { run(cmd); } // todo",True,CWE-78,x
"void h() {}",False,NVD-CWE-Other,x
"#;

#[test]
fn cvefixes_csv_strips_comments_and_labels_rows() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("cvefixed_c_cpp_method.csv");
    write(&path, CVEFIXES_CSV);

    let bench = CveFixesCsv::load(&path, Some("C"), &Selection::default()).unwrap();
    assert_eq!(bench.name(), "cvefixed_c_cpp_method");
    assert_eq!(bench.len(), 4);

    let first = &bench.samples()[0];
    assert_eq!(first.id, "0");
    assert_eq!(first.cwe_id, "125");
    assert!(first.vulnerable);
    assert_eq!(first.code, "int f() {  return a[i]; }");
    assert_eq!(bench.samples()[2].code, "void g() { run(cmd); } ");
    assert_eq!(bench.samples()[3].cwe_id, "-1");
}

#[test]
fn cvefixes_csv_selection_filters_and_orders() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("methods.csv");
    write(&path, CVEFIXES_CSV);

    let selection = Selection {
        vulnerable: Some(true),
        top_cwe: Some(7),
        order: SampleOrder::Cwe,
        ..Default::default()
    };
    let bench = CveFixesCsv::load(&path, Some("C"), &selection).unwrap();
    let ids: Vec<&str> = bench.samples().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["2", "0"]);
}

#[test]
fn missing_column_is_reported() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    write(&path, "code,cwe_id\n\"x\",CWE-79\n");

    let err = CveFixesCsv::load(&path, None, &Selection::default()).unwrap_err();
    match err {
        DatasetError::MissingColumn { column, .. } => assert_eq!(column, "vul"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unreadable_label_is_reported() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    write(&path, "code,vul,cwe_id\n\"x\",perhaps,CWE-79\n");

    assert!(matches!(
        CveFixesCsv::load(&path, None, &Selection::default()),
        Err(DatasetError::InvalidValue { .. })
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    assert!(matches!(
        CveFixesCsv::load(&dir.path().join("absent.csv"), None, &Selection::default()),
        Err(DatasetError::Io { .. })
    ));
}

fn pair(id: &str, cwe: Option<&str>, before: &str, after: &str) -> RevisionPair {
    RevisionPair {
        cve_id: "CVE-2020-1".into(),
        cwe_id: cwe.map(str::to_string),
        file_change_id: format!("fc-{id}"),
        programming_language: Some("Python".into()),
        old_path: Some("pkg/io.py".into()),
        new_path: Some("pkg/io.py".into()),
        file_num_lines_added: Some(2),
        before_method_change_id: format!("{id}-b"),
        after_method_change_id: format!("{id}-a"),
        method_name: "read".into(),
        method_code_before: before.into(),
        method_code_after: after.into(),
        ..Default::default()
    }
}

#[test]
fn export_pairs_expand_into_labelled_samples() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("method_pairs.csv");
    let mut sink = CsvSink::create(&path).unwrap();
    sink.write_pair(&pair(
        "p1",
        Some("CWE-22"),
        "def read(p):\n    # trusts p\n    return open(p)",
        "def read(p):\n    return open(safe(p))",
    ))
    .unwrap();
    sink.write_pair(&pair("p2", None, "x = 1", "x = 2")).unwrap();
    sink.flush().unwrap();
    drop(sink);

    let bench = CveFixesExport::load(&path, &Selection::default()).unwrap();
    assert_eq!(bench.len(), 4);

    let samples = bench.samples();
    assert_eq!(samples[0].id, "0-b");
    assert!(samples[0].vulnerable);
    assert_eq!(samples[0].cwe_id, "22");
    assert_eq!(samples[0].code, "def read(p):\n    \n    return open(p)");
    assert_eq!(samples[0].path.as_deref(), Some("pkg/io.py"));
    assert_eq!(samples[1].id, "0-a");
    assert!(!samples[1].vulnerable);
    assert_eq!(samples[3].cwe_id, "-1");

    let fixed_only = Selection {
        vulnerable: Some(false),
        ..Default::default()
    };
    let bench = CveFixesExport::load(&path, &fixed_only).unwrap();
    assert!(bench.samples().iter().all(|s| !s.vulnerable));
    assert_eq!(bench.len(), 2);
}

#[test]
fn export_pair_listed_under_two_cwes_keeps_both_samples() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("method_pairs.csv");
    let mut sink = CsvSink::create(&path).unwrap();
    for cwe in ["CWE-22", "CWE-79"] {
        sink.write_pair(&pair("p1", Some(cwe), "open(p)", "open(safe(p))"))
            .unwrap();
    }
    sink.flush().unwrap();
    drop(sink);

    let bench = CveFixesExport::load(&path, &Selection::default()).unwrap();
    let labelled: Vec<(&str, &str)> = bench
        .samples()
        .iter()
        .map(|s| (s.id.as_str(), s.cwe_id.as_str()))
        .collect();
    assert_eq!(
        labelled,
        [("0-b", "22"), ("0-a", "22"), ("1-b", "79"), ("1-a", "79")]
    );

    let picked = Selection {
        indices: Some(vec!["0-b".into(), "1-b".into()]),
        ..Default::default()
    };
    let bench = CveFixesExport::load(&path, &picked).unwrap();
    let cwes: Vec<&str> = bench.samples().iter().map(|s| s.cwe_id.as_str()).collect();
    assert_eq!(cwes, ["22", "79"]);
}

fn juliet_fixture(root: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let (index, code_root) = Juliet::default_paths(root, "juliet-java-1.3");
    write(
        &index,
        "file,cwe,vul\n\
         CWE78/bad.java,CWE78,1\n\
         CWE78/good.java,CWE78,0\n\
         CWE476/tiny.java,CWE476,1\n\
         CWE606/loop.java,CWE606,1\n",
    );
    write(
        &code_root.join("CWE78/bad.java"),
        "import java.io.*;\nclass Bad\n{\n  void run(String c) throws Exception {\n    Runtime.getRuntime().exec(c);\n  }\n}\n",
    );
    write(
        &code_root.join("CWE78/good.java"),
        "class Good\n{\n  void run() {\n    log(\"ok\");\n  }\n}\n",
    );
    write(&code_root.join("CWE476/tiny.java"), "class T {}\n");
    write(&code_root.join("CWE606/loop.java"), "class L {\n  void f() { while (n) {} }\n}\n");
    (index, code_root)
}

#[test]
fn juliet_reads_code_for_selected_rows() {
    let dir = tempfile::TempDir::new().unwrap();
    let (index, code_root) = juliet_fixture(dir.path());

    let bench = Juliet::load(&index, &code_root, &Selection::default(), None).unwrap();
    assert_eq!(bench.name(), "juliet-java-1.3");
    assert_eq!(bench.len(), 4);
    assert_eq!(bench.samples()[0].cwe_id, "78");
    assert_eq!(bench.samples()[0].path.as_deref(), Some("CWE78/bad.java"));
    assert!(bench.samples()[0].code.contains("exec(c)"));
}

#[test]
fn juliet_min_sloc_and_top_cwe() {
    let dir = tempfile::TempDir::new().unwrap();
    let (index, code_root) = juliet_fixture(dir.path());

    let bench = Juliet::load(&index, &code_root, &Selection::default(), Some(3)).unwrap();
    let ids: Vec<&str> = bench.samples().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["0", "1"]);

    // 606 is not a Top 25 CWE.
    let top = Selection {
        top_cwe: Some(25),
        ..Default::default()
    };
    let bench = Juliet::load(&index, &code_root, &top, None).unwrap();
    assert!(bench.samples().iter().all(|s| s.cwe_id != "606"));
    assert_eq!(bench.len(), 3);
}

#[test]
fn juliet_missing_source_file_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let (index, code_root) = juliet_fixture(dir.path());
    fs::remove_file(code_root.join("CWE476/tiny.java")).unwrap();

    assert!(matches!(
        Juliet::load(&index, &code_root, &Selection::default(), None),
        Err(DatasetError::Io { .. })
    ));
}

#[test]
fn owasp_joins_expected_results_with_sources() {
    let dir = tempfile::TempDir::new().unwrap();
    write(
        &dir.path().join("expectedresults-1.2.csv"),
        "# test name, category, real vulnerability, cwe, Benchmark version: 1.2, 2016-06-1\n\
         BenchmarkTest00001,pathtraver,true,22\n\
         BenchmarkTest00002,sqli,false,89\n\
         BenchmarkTest00003,hash,true,328\n",
    );
    for n in 1..=3 {
        write(
            &dir.path().join(format!("BenchmarkTest0000{n}.java")),
            &format!("public class BenchmarkTest0000{n} {{}}\n"),
        );
    }

    let bench = Owasp::load(dir.path(), &Selection::default()).unwrap();
    assert_eq!(bench.name(), "owasp");
    assert_eq!(bench.len(), 3);
    assert_eq!(bench.samples()[0].id, "BenchmarkTest00001");
    assert_eq!(bench.samples()[0].cwe_id, "22");
    assert!(bench.samples()[0].vulnerable);
    assert!(!bench.samples()[1].vulnerable);

    let picked = Selection {
        indices: Some(vec!["BenchmarkTest00003".into()]),
        ..Default::default()
    };
    let bench = Owasp::load(dir.path(), &picked).unwrap();
    assert_eq!(bench.len(), 1);
    assert!(bench.samples()[0].code.contains("BenchmarkTest00003"));
}
