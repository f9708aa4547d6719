use regex::Captures;

use crate::Rule;

/// `--selector name=foo` becomes the bare positional `foo`. Only the three
/// selector keys v0 accepted are recognized; anything else is left for the
/// validator to flag.
pub fn rule_selector_to_arg() -> Rule {
    rule! {
        name: "selector-to-arg",
        pattern: r"(usacloud\s+.*)--selector[= ]+(name|id|tag)=(\S+)",
        reason: "the selector option was removed in v1; pass names, IDs, or tags as arguments",
        url: "https://docs.usacloud.jp/usacloud/upgrade/v1_0_0/#selector",
        replace: |caps: &Captures| -> String {
            caps[3].to_string()
        },
    }
}
