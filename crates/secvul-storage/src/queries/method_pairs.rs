//! Query builder for before/after method revision pairs.
//!
//! A "before" row (`before_change = 'True'`) is joined to an "after" row
//! (`before_change = 'False'`) of the same file change, method name and
//! NULL-coalesced signature, then enriched with CVE, CWE, commit and
//! repository metadata. Every filter value is a bound parameter.
//!
//! No ORDER BY: output order is whatever the store produces.

use rusqlite::types::Value;
use secvul_core::errors::QueryError;
use secvul_core::types::{FilterSpec, PairingPolicy};

/// A built query: SQL text with `?` placeholders and its ordered parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PairQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Characters stripped when testing whether a code body is blank.
const BLANK: &str = "char(32, 9, 10, 13)";

/// Build the pair query for `filter`. Fails on malformed filter values
/// before anything is sent to the store.
pub fn build_pair_query(filter: &FilterSpec) -> Result<PairQuery, QueryError> {
    validate(filter)?;

    let mut clauses: Vec<String> = vec![
        "TRIM(b.before_change) = 'True'".to_string(),
        "TRIM(a.before_change) = 'False'".to_string(),
        format!("b.code IS NOT NULL AND TRIM(b.code, {BLANK}) <> ''"),
        format!("a.code IS NOT NULL AND TRIM(a.code, {BLANK}) <> ''"),
    ];
    let mut params: Vec<Value> = Vec::new();

    if filter.pairing == PairingPolicy::LowestId {
        clauses.push(lowest_id_clause("b", "True"));
        clauses.push(lowest_id_clause("a", "False"));
    }

    if !filter.languages.is_empty() {
        clauses.push(format!(
            "fc.programming_language IN ({})",
            placeholders(filter.languages.len())
        ));
        params.extend(filter.languages.iter().map(|l| Value::Text(l.trim().to_string())));
    }

    if !filter.cwe_ids.is_empty() {
        clauses.push(format!("cc.cwe_id IN ({})", placeholders(filter.cwe_ids.len())));
        for token in &filter.cwe_ids {
            params.push(Value::Text(normalize_cwe(token)?));
        }
    } else if !filter.include_unknown_cwe {
        clauses.push("cc.cwe_id IS NOT NULL".to_string());
    }

    if !filter.include_paths.is_empty() {
        let any = vec![
            "(COALESCE(instr(fc.old_path, ?), 0) > 0 OR COALESCE(instr(fc.new_path, ?), 0) > 0)";
            filter.include_paths.len()
        ]
        .join(" OR ");
        clauses.push(format!("({any})"));
        for s in &filter.include_paths {
            params.push(Value::Text(s.clone()));
            params.push(Value::Text(s.clone()));
        }
    }

    if !filter.exclude_paths.is_empty() {
        let none = vec![
            "(COALESCE(instr(fc.old_path, ?), 0) = 0 AND COALESCE(instr(fc.new_path, ?), 0) = 0)";
            filter.exclude_paths.len()
        ]
        .join(" AND ");
        clauses.push(format!("({none})"));
        for s in &filter.exclude_paths {
            params.push(Value::Text(s.clone()));
            params.push(Value::Text(s.clone()));
        }
    }

    let commit_msg = if filter.include_commit_msg {
        "cm.msg AS commit_msg"
    } else {
        "NULL AS commit_msg"
    };

    let mut sql = format!(
        "SELECT
  fx.cve_id                 AS cve_id,
  cc.cwe_id                 AS cwe_id,
  cw.cwe_name               AS cwe_name,
  fx.repo_url               AS repo_url,
  rp.repo_name              AS repo_name,
  cm.hash                   AS commit_hash,
  cm.author                 AS author,
  cm.author_date            AS author_date,
  {commit_msg},
  fc.file_change_id         AS file_change_id,
  fc.filename               AS filename,
  fc.old_path               AS old_path,
  fc.new_path               AS new_path,
  fc.change_type            AS change_type,
  fc.programming_language   AS programming_language,
  fc.num_lines_added        AS file_num_lines_added,
  fc.num_lines_deleted      AS file_num_lines_deleted,
  b.method_change_id        AS before_method_change_id,
  a.method_change_id        AS after_method_change_id,
  b.name                    AS method_name,
  COALESCE(b.signature, a.signature)   AS method_signature,
  COALESCE(b.parameters, a.parameters) AS method_parameters,
  b.start_line              AS before_start_line,
  b.end_line                AS before_end_line,
  a.start_line              AS after_start_line,
  a.end_line                AS after_end_line,
  b.code                    AS method_code_before,
  a.code                    AS method_code_after
FROM method_change b
JOIN method_change a
  ON a.file_change_id = b.file_change_id
 AND a.name = b.name
 AND COALESCE(a.signature, '') = COALESCE(b.signature, '')
JOIN file_change fc
  ON fc.file_change_id = b.file_change_id
JOIN fixes fx
  ON fx.hash = fc.hash
JOIN commits cm
  ON cm.hash = fx.hash AND cm.repo_url = fx.repo_url
LEFT JOIN repository rp
  ON rp.repo_url = fx.repo_url
LEFT JOIN cwe_classification cc
  ON cc.cve_id = fx.cve_id
LEFT JOIN cwe cw
  ON cw.cwe_id = cc.cwe_id
WHERE {}",
        clauses.join("\n  AND ")
    );

    if let Some(limit) = filter.scan_limit {
        sql.push_str("\nLIMIT ?");
        params.push(Value::Integer(limit as i64));
    }

    Ok(PairQuery { sql, params })
}

/// Keep a row only if no other row of its group with the same flag has a
/// smaller `method_change_id`.
fn lowest_id_clause(alias: &str, flag: &str) -> String {
    format!(
        "NOT EXISTS (SELECT 1 FROM method_change {alias}2
     WHERE {alias}2.file_change_id = {alias}.file_change_id
       AND {alias}2.name = {alias}.name
       AND COALESCE({alias}2.signature, '') = COALESCE({alias}.signature, '')
       AND TRIM({alias}2.before_change) = '{flag}'
       AND {alias}2.method_change_id < {alias}.method_change_id)"
    )
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// `79` becomes `CWE-79`; `CWE-79` and catalog tokens such as
/// `NVD-CWE-Other` pass through.
pub fn normalize_cwe(token: &str) -> Result<String, QueryError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(QueryError::EmptyValue { filter: "cwe" });
    }
    if token.chars().all(|c| c.is_ascii_digit()) {
        return Ok(format!("CWE-{token}"));
    }
    let well_formed = token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && token.chars().any(|c| c.is_ascii_alphabetic());
    if well_formed {
        Ok(token.to_string())
    } else {
        Err(QueryError::MalformedCwe {
            value: token.to_string(),
        })
    }
}

fn validate(filter: &FilterSpec) -> Result<(), QueryError> {
    let lists: [(&'static str, &Vec<String>); 4] = [
        ("language", &filter.languages),
        ("cwe", &filter.cwe_ids),
        ("include-path", &filter.include_paths),
        ("exclude-path", &filter.exclude_paths),
    ];
    for (name, values) in lists {
        if values.iter().any(|v| v.trim().is_empty()) {
            return Err(QueryError::EmptyValue { filter: name });
        }
    }

    if let Some(conflict) = filter
        .include_paths
        .iter()
        .find(|p| filter.exclude_paths.contains(*p))
    {
        return Err(QueryError::ConflictingPath {
            value: conflict.clone(),
        });
    }

    if let Some(limit) = filter.scan_limit {
        if limit == 0 || limit > i64::MAX as u64 {
            return Err(QueryError::InvalidBound {
                field: "scan_limit",
                message: format!("{limit} is out of range"),
            });
        }
    }
    if filter.row_cap == Some(0) {
        return Err(QueryError::InvalidBound {
            field: "row_cap",
            message: "must be greater than 0".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_placeholders(sql: &str) -> usize {
        sql.matches('?').count()
    }

    #[test]
    fn default_filter_requires_known_cwe_and_binds_nothing() {
        let q = build_pair_query(&FilterSpec::default()).unwrap();
        assert!(q.sql.contains("cc.cwe_id IS NOT NULL"));
        assert!(q.params.is_empty());
        assert!(!q.sql.contains("LIMIT"));
        assert!(!q.sql.contains("ORDER BY"));
    }

    #[test]
    fn include_unknown_drops_the_not_null_clause() {
        let filter = FilterSpec {
            include_unknown_cwe: true,
            ..Default::default()
        };
        let q = build_pair_query(&filter).unwrap();
        assert!(!q.sql.contains("cc.cwe_id IS NOT NULL"));
    }

    #[test]
    fn placeholder_count_matches_params() {
        let filter = FilterSpec {
            languages: vec!["C".into(), "C++".into()],
            cwe_ids: vec!["79".into(), "CWE-89".into(), "NVD-CWE-Other".into()],
            include_paths: vec!["src/".into()],
            exclude_paths: vec!["test".into(), "vendor".into()],
            scan_limit: Some(500),
            ..Default::default()
        };
        let q = build_pair_query(&filter).unwrap();
        assert_eq!(count_placeholders(&q.sql), q.params.len());
        assert_eq!(q.params.len(), 2 + 3 + 2 + 4 + 1);
        assert_eq!(q.params[2], Value::Text("CWE-79".into()));
        assert_eq!(q.params[3], Value::Text("CWE-89".into()));
        assert_eq!(q.params[4], Value::Text("NVD-CWE-Other".into()));
        assert_eq!(q.params.last(), Some(&Value::Integer(500)));
    }

    #[test]
    fn filter_values_are_never_interpolated() {
        let filter = FilterSpec {
            languages: vec!["C'; DROP TABLE fixes; --".into()],
            include_paths: vec!["%evil%".into()],
            ..Default::default()
        };
        let q = build_pair_query(&filter).unwrap();
        assert!(!q.sql.contains("DROP TABLE"));
        assert!(!q.sql.contains("%evil%"));
    }

    #[test]
    fn commit_message_suppression_keeps_the_column() {
        let filter = FilterSpec {
            include_commit_msg: false,
            ..Default::default()
        };
        let q = build_pair_query(&filter).unwrap();
        assert!(q.sql.contains("NULL AS commit_msg"));
        assert!(!q.sql.contains("cm.msg"));
    }

    #[test]
    fn lowest_id_policy_adds_group_guards() {
        let filter = FilterSpec {
            pairing: PairingPolicy::LowestId,
            ..Default::default()
        };
        let q = build_pair_query(&filter).unwrap();
        assert_eq!(q.sql.matches("NOT EXISTS").count(), 2);
    }

    #[test]
    fn blank_entries_are_rejected() {
        let filter = FilterSpec {
            languages: vec!["  ".into()],
            ..Default::default()
        };
        assert!(matches!(
            build_pair_query(&filter),
            Err(QueryError::EmptyValue { filter: "language" })
        ));
    }

    #[test]
    fn conflicting_paths_are_rejected() {
        let filter = FilterSpec {
            include_paths: vec!["src".into()],
            exclude_paths: vec!["src".into()],
            ..Default::default()
        };
        assert!(matches!(
            build_pair_query(&filter),
            Err(QueryError::ConflictingPath { .. })
        ));
    }

    #[test]
    fn cwe_tokens_normalize() {
        assert_eq!(normalize_cwe("79").unwrap(), "CWE-79");
        assert_eq!(normalize_cwe(" CWE-416 ").unwrap(), "CWE-416");
        assert_eq!(normalize_cwe("NVD-CWE-noinfo").unwrap(), "NVD-CWE-noinfo");
        assert!(normalize_cwe("79;--").is_err());
        assert!(normalize_cwe("").is_err());
    }
}
