//! Resource renames.
//!
//! v1 renamed several top-level resources and dropped the `product-*`
//! aliases. Each rule matches the old token directly after the CLI verb, so
//! the same word elsewhere on the line (a server name, a quoted string) is
//! left alone.

use regex::Captures;

use crate::Rule;

pub fn rule_iso_image_to_cdrom() -> Rule {
    rule! {
        name: "iso-image-to-cdrom",
        pattern: r"(usacloud\s+)iso-image\b",
        reason: "the iso-image resource was renamed to cdrom in v1",
        url: "https://docs.usacloud.jp/usacloud/upgrade/v1_0_0/#cdrom",
        replace: |_caps: &Captures| -> String {
            "cdrom".to_string()
        },
    }
}

pub fn rule_startup_script_to_note() -> Rule {
    rule! {
        name: "startup-script-to-note",
        pattern: r"(usacloud\s+)startup-script\b",
        reason: "the startup-script resource was renamed to note in v1",
        url: "https://docs.usacloud.jp/usacloud/upgrade/v1_0_0/#note",
        replace: |_caps: &Captures| -> String {
            "note".to_string()
        },
    }
}

pub fn rule_ipv4_to_ipaddress() -> Rule {
    rule! {
        name: "ipv4-to-ipaddress",
        pattern: r"(usacloud\s+)ipv4\b",
        reason: "the ipv4 resource was renamed to ipaddress in v1",
        url: "https://docs.usacloud.jp/usacloud/upgrade/v1_0_0/#ipaddress",
        replace: |_caps: &Captures| -> String {
            "ipaddress".to_string()
        },
    }
}

pub fn rule_product_alias_product_disk() -> Rule {
    rule! {
        name: "product-alias-product-disk",
        pattern: r"(usacloud\s+)product-disk\b",
        reason: "product aliases were dropped in v1; product-disk is now disk-plan",
        url: "https://docs.usacloud.jp/usacloud/upgrade/v1_0_0/#plans",
        replace: |_caps: &Captures| -> String {
            "disk-plan".to_string()
        },
    }
}

pub fn rule_product_alias_product_internet() -> Rule {
    rule! {
        name: "product-alias-product-internet",
        pattern: r"(usacloud\s+)product-internet\b",
        reason: "product aliases were dropped in v1; product-internet is now internet-plan",
        url: "https://docs.usacloud.jp/usacloud/upgrade/v1_0_0/#plans",
        replace: |_caps: &Captures| -> String {
            "internet-plan".to_string()
        },
    }
}

pub fn rule_product_alias_product_server() -> Rule {
    rule! {
        name: "product-alias-product-server",
        pattern: r"(usacloud\s+)product-server\b",
        reason: "product aliases were dropped in v1; product-server is now server-plan",
        url: "https://docs.usacloud.jp/usacloud/upgrade/v1_0_0/#plans",
        replace: |_caps: &Captures| -> String {
            "server-plan".to_string()
        },
    }
}
