//! RevisionPair: one before/after method revision tied to a CVE.

use serde::{Deserialize, Serialize};

/// Output column order. Stable across releases; downstream tools index by name.
pub const COLUMNS: [&str; 28] = [
    "cve_id",
    "cwe_id",
    "cwe_name",
    "repo_url",
    "repo_name",
    "commit_hash",
    "author",
    "author_date",
    "commit_msg",
    "file_change_id",
    "filename",
    "old_path",
    "new_path",
    "change_type",
    "programming_language",
    "file_num_lines_added",
    "file_num_lines_deleted",
    "before_method_change_id",
    "after_method_change_id",
    "method_name",
    "method_signature",
    "method_parameters",
    "before_start_line",
    "before_end_line",
    "after_start_line",
    "after_end_line",
    "method_code_before",
    "method_code_after",
];

/// A method before and after a vulnerability-fixing commit.
///
/// Code bodies are kept verbatim. Normalization is only ever applied to a
/// copy for the cosmetic-change test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionPair {
    // Vulnerability
    pub cve_id: String,
    pub cwe_id: Option<String>,
    pub cwe_name: Option<String>,

    // Repository / commit
    pub repo_url: Option<String>,
    pub repo_name: Option<String>,
    pub commit_hash: Option<String>,
    pub author: Option<String>,
    pub author_date: Option<String>,
    pub commit_msg: Option<String>,

    // File change
    pub file_change_id: String,
    pub filename: Option<String>,
    pub old_path: Option<String>,
    pub new_path: Option<String>,
    pub change_type: Option<String>,
    pub programming_language: Option<String>,
    pub file_num_lines_added: Option<i64>,
    pub file_num_lines_deleted: Option<i64>,

    // Method identity
    pub before_method_change_id: String,
    pub after_method_change_id: String,
    pub method_name: String,
    pub method_signature: Option<String>,
    pub method_parameters: Option<String>,

    // Source spans
    pub before_start_line: Option<i64>,
    pub before_end_line: Option<i64>,
    pub after_start_line: Option<i64>,
    pub after_end_line: Option<i64>,

    // Code bodies
    pub method_code_before: String,
    pub method_code_after: String,
}

impl RevisionPair {
    /// Identity used to compare runs: file change, method name, signature.
    pub fn key(&self) -> (&str, &str, &str) {
        (
            &self.file_change_id,
            &self.method_name,
            self.method_signature.as_deref().unwrap_or(""),
        )
    }

    /// Field values in [`COLUMNS`] order. Nulls become empty strings.
    pub fn record(&self) -> Vec<String> {
        fn text(v: &Option<String>) -> String {
            v.clone().unwrap_or_default()
        }
        fn num(v: &Option<i64>) -> String {
            v.map(|n| n.to_string()).unwrap_or_default()
        }

        vec![
            self.cve_id.clone(),
            text(&self.cwe_id),
            text(&self.cwe_name),
            text(&self.repo_url),
            text(&self.repo_name),
            text(&self.commit_hash),
            text(&self.author),
            text(&self.author_date),
            text(&self.commit_msg),
            self.file_change_id.clone(),
            text(&self.filename),
            text(&self.old_path),
            text(&self.new_path),
            text(&self.change_type),
            text(&self.programming_language),
            num(&self.file_num_lines_added),
            num(&self.file_num_lines_deleted),
            self.before_method_change_id.clone(),
            self.after_method_change_id.clone(),
            self.method_name.clone(),
            text(&self.method_signature),
            text(&self.method_parameters),
            num(&self.before_start_line),
            num(&self.before_end_line),
            num(&self.after_start_line),
            num(&self.after_end_line),
            self.method_code_before.clone(),
            self.method_code_after.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> RevisionPair {
        RevisionPair {
            cve_id: "CVE-2021-0001".into(),
            cwe_id: None,
            cwe_name: None,
            repo_url: Some("https://github.com/acme/lib".into()),
            repo_name: None,
            commit_hash: Some("abc".into()),
            author: None,
            author_date: None,
            commit_msg: None,
            file_change_id: "fc1".into(),
            filename: Some("a.c".into()),
            old_path: None,
            new_path: None,
            change_type: None,
            programming_language: Some("C".into()),
            file_num_lines_added: Some(3),
            file_num_lines_deleted: None,
            before_method_change_id: "m1".into(),
            after_method_change_id: "m2".into(),
            method_name: "parse".into(),
            method_signature: None,
            method_parameters: None,
            before_start_line: Some(10),
            before_end_line: Some(12),
            after_start_line: None,
            after_end_line: None,
            method_code_before: "int parse(){ return 1; }".into(),
            method_code_after: "int parse(){ return 2; }".into(),
        }
    }

    #[test]
    fn record_matches_column_count_and_order() {
        let record = pair().record();
        assert_eq!(record.len(), COLUMNS.len());
        assert_eq!(record[0], "CVE-2021-0001");
        assert_eq!(record[1], "");
        assert_eq!(record[15], "3");
        assert_eq!(record[16], "");
        assert_eq!(record[19], "parse");
        assert_eq!(record[27], "int parse(){ return 2; }");
    }

    #[test]
    fn key_coalesces_missing_signature() {
        assert_eq!(pair().key(), ("fc1", "parse", ""));
    }
}
