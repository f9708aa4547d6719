//! Fully removed features.
//!
//! These rules comment the whole line out rather than rewriting it: there is
//! nothing to rewrite to. The commented line keeps the original text so the
//! user can decide what to do with it. Because the result starts with `#`,
//! the engine's comment passthrough makes these rules self-idempotent.

use regex::Captures;

use crate::Rule;

pub fn rule_summary_removed() -> Rule {
    rule! {
        name: "summary-removed",
        pattern: r"^(\s*)(usacloud\s+summary\b.*)$",
        reason: "the summary command was removed in v1 with no replacement",
        url: "https://docs.usacloud.jp/usacloud/upgrade/v1_0_0/#summary",
        replace: |caps: &Captures| -> String {
            format!("# {}", &caps[2])
        },
    }
}

pub fn rule_object_storage_removed_object_storage() -> Rule {
    rule! {
        name: "object-storage-removed-object-storage",
        pattern: r"^(\s*)(usacloud\s+object-storage\b.*)$",
        reason: "the object-storage command was removed in v1; use the S3-compatible API or Terraform instead",
        url: "https://docs.usacloud.jp/usacloud/upgrade/v1_0_0/#object-storage",
        replace: |caps: &Captures| -> String {
            format!("# {}", &caps[2])
        },
    }
}

pub fn rule_object_storage_removed_ojs() -> Rule {
    rule! {
        name: "object-storage-removed-ojs",
        pattern: r"^(\s*)(usacloud\s+ojs\b.*)$",
        reason: "the object-storage command was removed in v1; use the S3-compatible API or Terraform instead",
        url: "https://docs.usacloud.jp/usacloud/upgrade/v1_0_0/#object-storage",
        replace: |caps: &Captures| -> String {
            format!("# {}", &caps[2])
        },
    }
}
