use regex::Captures;

use crate::Rule;

/// `--output-type=csv|tsv` (and the `-o` short form) carried over from v0;
/// v1.1 only knows `table` and `json`. The separator the user wrote is kept.
pub fn rule_output_type_csv_tsv() -> Rule {
    rule! {
        name: "output-type-csv-tsv",
        pattern: r"(usacloud\s+.*)(--output-type|-o)(=|\s+)(csv|tsv)\b",
        reason: "the csv and tsv output formats were removed in v1; use json output and convert externally",
        url: "https://docs.usacloud.jp/usacloud/upgrade/v1_0_0/#output-type",
        replace: |caps: &Captures| -> String {
            format!("{}{}json", &caps[2], &caps[3])
        },
    }
}
