use regex::Captures;

use crate::Rule;

/// Whitespace around `=` in `--zone = all` was tolerated by v0 but rejects
/// in v1.1. Requires at least one space on either side of the `=` so the
/// already-normalized form does not re-match.
pub fn rule_zone_all_normalize() -> Rule {
    rule! {
        name: "zone-all-normalize",
        pattern: r"(usacloud\s+.*)--zone(\s+=\s*|=\s+)all\b",
        reason: "whitespace around '=' in the zone flag is no longer accepted in v1",
        url: "https://docs.usacloud.jp/usacloud/upgrade/v1_0_0/#zone",
        replace: |_caps: &Captures| -> String {
            "--zone=all".to_string()
        },
    }
}
