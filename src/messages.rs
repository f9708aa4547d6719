//! User-facing message catalogues.
//!
//! Every piece of prose the diagnostic formatter emits comes from one of the
//! two tables below, keyed by [`MessageKey`] and selected by [`Language`].
//! Templates use positional `{}` placeholders filled by [`Messages::format`].

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Message catalogue language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Japanese (default; the tool's home audience).
    #[default]
    Ja,
    En,
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ja" | "japanese" => Ok(Language::Ja),
            "en" | "english" => Ok(Language::En),
            other => Err(format!("unsupported language '{other}' (expected 'ja' or 'en')")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    UnknownMainCommand,
    UnknownSubcommand,
    CaseSensitiveCommand,
    DeprecatedWithReplacement,
    DeprecatedNoReplacement,
    UnterminatedQuote,
    SeverityError,
    SeverityWarning,
    SeverityInfo,
    LineHeading,
    DidYouMean,
    ReplacementHint,
    MigrationGuide,
}

/// All keys, used by tests to prove both catalogues are complete.
#[cfg(test)]
pub(crate) const ALL_KEYS: &[MessageKey] = &[
    MessageKey::UnknownMainCommand,
    MessageKey::UnknownSubcommand,
    MessageKey::CaseSensitiveCommand,
    MessageKey::DeprecatedWithReplacement,
    MessageKey::DeprecatedNoReplacement,
    MessageKey::UnterminatedQuote,
    MessageKey::SeverityError,
    MessageKey::SeverityWarning,
    MessageKey::SeverityInfo,
    MessageKey::LineHeading,
    MessageKey::DidYouMean,
    MessageKey::ReplacementHint,
    MessageKey::MigrationGuide,
];

static EN: Lazy<HashMap<MessageKey, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (MessageKey::UnknownMainCommand, "unknown command: {}"),
        (MessageKey::UnknownSubcommand, "unknown subcommand for {}: {}"),
        (MessageKey::CaseSensitiveCommand, "commands are case-sensitive: {} is not a known command"),
        (MessageKey::DeprecatedWithReplacement, "{} is deprecated; use {} instead"),
        (MessageKey::DeprecatedNoReplacement, "{} was removed: {}"),
        (MessageKey::UnterminatedQuote, "unterminated {} quote"),
        (MessageKey::SeverityError, "error"),
        (MessageKey::SeverityWarning, "warning"),
        (MessageKey::SeverityInfo, "info"),
        (MessageKey::LineHeading, "line {}: {}"),
        (MessageKey::DidYouMean, "did you mean {}?"),
        (MessageKey::ReplacementHint, "recommended replacement: {}"),
        (MessageKey::MigrationGuide, "see the migration guide: {}"),
    ])
});

static JA: Lazy<HashMap<MessageKey, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (MessageKey::UnknownMainCommand, "不明なコマンドです: {}"),
        (MessageKey::UnknownSubcommand, "{} に存在しないサブコマンドです: {}"),
        (MessageKey::CaseSensitiveCommand, "コマンドは大文字小文字を区別します: {} は不明なコマンドです"),
        (MessageKey::DeprecatedWithReplacement, "{} は廃止されました。代わりに {} を使用してください"),
        (MessageKey::DeprecatedNoReplacement, "{} は廃止されました: {}"),
        (MessageKey::UnterminatedQuote, "{} 引用符が閉じられていません"),
        (MessageKey::SeverityError, "エラー"),
        (MessageKey::SeverityWarning, "警告"),
        (MessageKey::SeverityInfo, "情報"),
        (MessageKey::LineHeading, "{}行目: {}"),
        (MessageKey::DidYouMean, "もしかして: {} ?"),
        (MessageKey::ReplacementHint, "推奨される代替コマンド: {}"),
        (MessageKey::MigrationGuide, "移行ガイドを参照してください: {}"),
    ])
});

/// A language-bound view over the catalogues.
#[derive(Debug, Clone, Copy, Default)]
pub struct Messages {
    lang: Language,
}

impl Messages {
    pub fn new(lang: Language) -> Self {
        Self { lang }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// Raw template for `key`.
    pub fn text(&self, key: MessageKey) -> &'static str {
        let table = match self.lang {
            Language::Ja => &*JA,
            Language::En => &*EN,
        };
        // Both tables cover ALL_KEYS (enforced by tests); EN is the fallback.
        table.get(&key).or_else(|| EN.get(&key)).copied().unwrap_or("")
    }

    /// Template for `key` with `{}` placeholders filled positionally.
    pub fn format(&self, key: MessageKey, args: &[&str]) -> String {
        fill(self.text(key), args)
    }
}

fn fill(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut parts = template.split("{}");
    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    for (idx, part) in parts.enumerate() {
        out.push_str(args.get(idx).copied().unwrap_or(""));
        out.push_str(part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogues_cover_every_key() {
        for key in ALL_KEYS {
            assert!(EN.contains_key(key), "en catalogue is missing {key:?}");
            assert!(JA.contains_key(key), "ja catalogue is missing {key:?}");
        }
        assert_eq!(EN.len(), ALL_KEYS.len());
        assert_eq!(JA.len(), ALL_KEYS.len());
    }

    #[test]
    fn format_fills_placeholders_in_order() {
        let m = Messages::new(Language::En);
        assert_eq!(
            m.format(MessageKey::UnknownSubcommand, &["server", "lst"]),
            "unknown subcommand for server: lst"
        );
    }

    #[test]
    fn format_tolerates_missing_arguments() {
        assert_eq!(fill("a {} b {}", &["x"]), "a x b ");
    }

    #[test]
    fn language_parses_from_str() {
        assert_eq!("ja".parse::<Language>().unwrap(), Language::Ja);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
    }
}
