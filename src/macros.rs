#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        pattern: $pat:literal,
        reason: $reason:expr,
        url: $url:expr,
        replace: |$caps:ident : &$caps_ty:ty| -> String $body:block
        $(,)?
    ) => {{
        $crate::Rule {
            name: $name,
            pattern: $crate::regex!($pat),
            replacer: Box::new(move |$caps: &$caps_ty| -> String { $body }),
            reason: $reason,
            url: $url,
        }
    }};
}
