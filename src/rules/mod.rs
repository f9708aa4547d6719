//! Rewrite rule catalogue.
//!
//! Each submodule contributes the rules for one family of v0/v1.0 syntax.
//! [`get`] assembles them in pipeline order; that order is part of the
//! observable contract because change records are emitted in firing order and
//! a handful of patterns overlap (the whole-line removals must see the line
//! after flag rewrites, and zone normalization runs last of all). Do not
//! reorder for optimization.
//!
//! Every pattern anchors on the `usacloud` verb (or on the start of the line
//! for whole-line rules) so that unrelated text — strings, comments, other
//! commands — is never disturbed. Capture group 1 is always the preserved
//! context prefix; see [`crate::Rule`].

mod output;
mod removed;
mod resources;
mod selector;
mod zone;


use crate::Rule;

/// The full catalogue, in pipeline order.
pub fn get() -> Vec<Rule> {
    vec![
        output::rule_output_type_csv_tsv(),
        selector::rule_selector_to_arg(),
        resources::rule_iso_image_to_cdrom(),
        resources::rule_startup_script_to_note(),
        resources::rule_ipv4_to_ipaddress(),
        resources::rule_product_alias_product_disk(),
        resources::rule_product_alias_product_internet(),
        resources::rule_product_alias_product_server(),
        removed::rule_summary_removed(),
        removed::rule_object_storage_removed_object_storage(),
        removed::rule_object_storage_removed_ojs(),
        zone::rule_zone_all_normalize(),
    ]
}
