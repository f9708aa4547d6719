//! Static command catalogue for the v1.1 surface.
//!
//! Three tables, built once and immutable afterwards: the valid main
//! commands, the subcommands each main accepts, and the deprecated mains
//! with their replacement (when one exists). Deprecation takes precedence:
//! a name present in the deprecation table is deprecated even if it also
//! appears among the valid mains.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::DeprecationInfo;

const CRUD: &[&str] = &["list", "read", "create", "update", "delete"];

fn with_crud(extras: &[&'static str]) -> HashSet<&'static str> {
    CRUD.iter().chain(extras).copied().collect()
}

fn read_only() -> HashSet<&'static str> {
    ["list", "read"].into_iter().collect()
}

fn fixed(subs: &[&'static str]) -> HashSet<&'static str> {
    subs.iter().copied().collect()
}

/// Main command -> accepted subcommands.
static SUBCOMMANDS: Lazy<HashMap<&'static str, HashSet<&'static str>>> = Lazy::new(|| {
    HashMap::from([
        (
            "server",
            with_crud(&[
                "boot",
                "shutdown",
                "reset",
                "send-nmi",
                "plan-change",
                "wait-until-ready",
                "wait-until-shutdown",
                "ssh",
                "vnc",
                "rdp",
                "monitor-cpu",
            ]),
        ),
        (
            "disk",
            with_crud(&[
                "connect",
                "disconnect",
                "edit",
                "resize-partition",
                "wait-for-copy",
                "monitor",
            ]),
        ),
        ("archive", with_crud(&["upload", "download", "wait-for-copy", "share", "share-info"])),
        ("cdrom", with_crud(&["upload", "download"])),
        ("note", with_crud(&[])),
        ("switch", with_crud(&["connect-bridge", "disconnect-bridge"])),
        ("internet", with_crud(&["update-bandwidth", "monitor", "enable-ipv6", "disable-ipv6"])),
        ("bridge", with_crud(&[])),
        ("packet-filter", with_crud(&["rule-list", "rule-add", "rule-update", "rule-delete"])),
        (
            "load-balancer",
            with_crud(&["boot", "shutdown", "reset", "monitor", "vip-list", "vip-add", "vip-update", "vip-delete"]),
        ),
        (
            "vpc-router",
            with_crud(&["boot", "shutdown", "reset", "monitor", "logs", "dhcp-server-list", "firewall-list"]),
        ),
        (
            "database",
            with_crud(&["boot", "shutdown", "reset", "wait-until-ready", "monitor", "backup-list", "logs"]),
        ),
        ("nfs", with_crud(&["boot", "shutdown", "reset", "monitor"])),
        ("sim", with_crud(&["activate", "deactivate", "assign-ip", "clear-ip", "logs", "monitor"])),
        (
            "mobile-gateway",
            with_crud(&["boot", "shutdown", "reset", "logs", "dns-update", "sim-list", "sim-route-list"]),
        ),
        ("dns", with_crud(&["record-list", "record-add", "record-update", "record-delete"])),
        ("gslb", with_crud(&["server-list", "server-add", "server-update", "server-delete"])),
        ("simple-monitor", with_crud(&["health"])),
        ("auto-backup", with_crud(&[])),
        ("license", with_crud(&[])),
        ("license-info", read_only()),
        ("ssh-key", with_crud(&["generate"])),
        ("icon", with_crud(&[])),
        ("private-host", with_crud(&[])),
        ("local-router", with_crud(&["health", "monitor"])),
        ("proxy-lb", with_crud(&["certificate-info", "certificate-update", "monitor"])),
        ("enhanced-db", with_crud(&["set-password"])),
        ("container-registry", with_crud(&["user-list", "user-add", "user-update", "user-delete"])),
        ("certificate-authority", with_crud(&["issue", "revoke"])),
        ("esme", with_crud(&["send-sms", "logs"])),
        ("ipaddress", fixed(&["list", "read", "update", "ptr-add", "ptr-update", "ptr-delete"])),
        ("ipv6net", read_only()),
        ("ipv6addr", with_crud(&[])),
        ("subnet", read_only()),
        ("interface", with_crud(&[])),
        ("zone", read_only()),
        ("region", read_only()),
        ("bill", fixed(&["list", "read", "csv"])),
        ("coupon", read_only()),
        ("auth-status", fixed(&["show", "read"])),
        ("service-class", read_only()),
        ("disk-plan", read_only()),
        ("internet-plan", read_only()),
        ("server-plan", read_only()),
        ("private-host-plan", read_only()),
        ("self", fixed(&["read"])),
        ("webaccel", fixed(&["list", "read", "certificate-info", "certificate-update", "delete-cache"])),
        ("config", fixed(&["list", "show", "use", "create", "edit", "delete", "current"])),
        ("rest", fixed(&["get", "post", "put", "delete"])),
        ("completion", fixed(&["bash", "zsh", "fish"])),
        ("version", fixed(&[])),
    ])
});

/// Deprecated main -> replacement and note. The notes are embedded verbatim
/// in diagnostics when no replacement exists.
static DEPRECATED: Lazy<HashMap<&'static str, DeprecationInfo>> = Lazy::new(|| {
    HashMap::from([
        (
            "iso-image",
            DeprecationInfo { replacement: Some("cdrom"), note: "renamed to cdrom in v1" },
        ),
        (
            "startup-script",
            DeprecationInfo { replacement: Some("note"), note: "renamed to note in v1" },
        ),
        (
            "ipv4",
            DeprecationInfo { replacement: Some("ipaddress"), note: "renamed to ipaddress in v1" },
        ),
        (
            "product-disk",
            DeprecationInfo { replacement: Some("disk-plan"), note: "product aliases were dropped in v1" },
        ),
        (
            "product-internet",
            DeprecationInfo { replacement: Some("internet-plan"), note: "product aliases were dropped in v1" },
        ),
        (
            "product-server",
            DeprecationInfo { replacement: Some("server-plan"), note: "product aliases were dropped in v1" },
        ),
        (
            "product-license",
            DeprecationInfo { replacement: Some("license-info"), note: "product aliases were dropped in v1" },
        ),
        (
            "price",
            DeprecationInfo { replacement: Some("service-class"), note: "renamed to service-class in v1" },
        ),
        (
            "summary",
            DeprecationInfo {
                replacement: None,
                note: "the summary command was removed in v1 with no replacement",
            },
        ),
        (
            "object-storage",
            DeprecationInfo {
                replacement: None,
                note: "the object-storage command was removed in v1; use the S3-compatible API or Terraform instead",
            },
        ),
        (
            "ojs",
            DeprecationInfo {
                replacement: None,
                note: "the object-storage command was removed in v1; use the S3-compatible API or Terraform instead",
            },
        ),
    ])
});

pub fn is_valid_main(name: &str) -> bool {
    SUBCOMMANDS.contains_key(name)
}

/// `false` when `main` itself is unknown.
pub fn is_valid_sub(main: &str, sub: &str) -> bool {
    SUBCOMMANDS.get(main).is_some_and(|subs| subs.contains(sub))
}

pub fn deprecation_of(name: &str) -> Option<DeprecationInfo> {
    DEPRECATED.get(name).copied()
}

/// All known main names, for the suggestion engine.
pub fn main_names() -> impl Iterator<Item = &'static str> {
    SUBCOMMANDS.keys().copied()
}

/// Subcommands of `main`, for the suggestion engine.
pub fn sub_names(main: &str) -> impl Iterator<Item = &'static str> {
    SUBCOMMANDS.get(main).into_iter().flatten().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_lookups() {
        assert!(is_valid_main("server"));
        assert!(is_valid_main("cdrom"));
        assert!(!is_valid_main("serv"));
        assert!(!is_valid_main("Server"));

        assert!(is_valid_sub("server", "list"));
        assert!(is_valid_sub("server", "boot"));
        assert!(!is_valid_sub("server", "upload"));
        assert!(!is_valid_sub("nope", "list"));
    }

    #[test]
    fn subcommands_may_repeat_across_mains() {
        assert!(is_valid_sub("disk", "list"));
        assert!(is_valid_sub("note", "list"));
        assert!(is_valid_sub("archive", "wait-for-copy"));
        assert!(is_valid_sub("disk", "wait-for-copy"));
    }

    #[test]
    fn deprecations_carry_replacements() {
        let dep = deprecation_of("iso-image").unwrap();
        assert_eq!(dep.replacement, Some("cdrom"));

        let dep = deprecation_of("summary").unwrap();
        assert_eq!(dep.replacement, None);
        assert!(!dep.note.is_empty());

        assert!(deprecation_of("server").is_none());
    }

    #[test]
    fn every_replacement_is_a_valid_main() {
        for (name, dep) in DEPRECATED.iter() {
            if let Some(rep) = dep.replacement {
                assert!(is_valid_main(rep), "replacement {rep} of {name} is unknown");
            }
        }
    }

    #[test]
    fn main_names_iterates_the_whole_table() {
        let names: Vec<_> = main_names().collect();
        assert_eq!(names.len(), SUBCOMMANDS.len());
        assert!(names.contains(&"server"));
    }
}
