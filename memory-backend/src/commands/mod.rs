//! Chat command handling for the memory bank
//!
//! Messages starting with `!save`, `!get`, `!delete` or `!list` are commands; anything else
//! is ordinary chat and parses to `None`.

mod delete;
mod get;
pub mod help;
mod list;
mod save;

use chrono::{DateTime, Utc};
use memory_bank_types::MemoryBank;

use crate::store::StoreError;

/// A parsed memory command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `!save <key> <value...> [#tag ...]`
    Save {
        key: String,
        value: String,
        tags: Vec<String>,
    },
    /// `!get <key>`
    Get { key: String },
    /// `!delete <key>`
    Delete { key: String },
    /// `!list [#tag]`
    List { tag: Option<String> },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Save { .. } => "save",
            Command::Get { .. } => "get",
            Command::Delete { .. } => "delete",
            Command::List { .. } => "list",
        }
    }
}

/// Result of applying a command to a bank
#[derive(Debug)]
pub struct Outcome {
    pub bank: MemoryBank,
    /// Reply shown to the user
    pub message: String,
    /// Commit message for the write; `None` when the bank is unchanged
    pub change: Option<String>,
}

impl Outcome {
    fn unchanged(bank: MemoryBank, message: String) -> Self {
        Self {
            bank,
            message,
            change: None,
        }
    }
}

/// Parse a command from a chat message
pub fn parse(text: &str) -> Option<Command> {
    let text = text.trim();
    let (keyword, rest) = split_first_token(text);

    let command = match keyword {
        "!save" => parse_save(rest),
        "!get" => single_token(rest).map(|key| Command::Get { key }),
        "!delete" => single_token(rest).map(|key| Command::Delete { key }),
        "!list" => parse_list(rest),
        _ => return None,
    };

    if command.is_none() {
        log::debug!("[Commands] '{}' with unusable arguments: {:?}", keyword, rest);
    }
    command
}

fn parse_save(rest: &str) -> Option<Command> {
    let (key, body) = split_first_token(rest);
    if key.is_empty() || body.is_empty() {
        return None;
    }

    let (value, tags) = split_tag_block(body);
    Some(Command::Save {
        key: key.to_string(),
        value: value.to_string(),
        tags,
    })
}

fn parse_list(rest: &str) -> Option<Command> {
    if rest.is_empty() {
        return Some(Command::List { tag: None });
    }
    let tag = single_token(rest)?.strip_prefix('#')?.to_string();
    if tag.is_empty() {
        return None;
    }
    Some(Command::List { tag: Some(tag) })
}

/// Split off the first whitespace-delimited token; the remainder has leading whitespace removed.
fn split_first_token(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(i) => (&text[..i], text[i..].trim_start()),
        None => (text, ""),
    }
}

fn single_token(rest: &str) -> Option<String> {
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return None;
    }
    Some(rest.to_string())
}

/// Whitespace-delimited tokens of `text` with their byte offsets
fn token_spans(text: &str) -> Vec<(usize, &str)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                spans.push((s, &text[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, &text[s..]));
    }
    spans
}

fn is_tag_token(token: &str) -> bool {
    token.len() > 1 && token.starts_with('#')
}

/// Separate a save body into its value and trailing tag block.
///
/// The tag block is the longest run of trailing `#`-tokens that still leaves at least one
/// token of value, so `#a #b` alone yields value `#a` and tags `[b]`. Hashes inside the
/// value (`C# rocks`, `issue#12 open`) stay in the value.
fn split_tag_block(body: &str) -> (&str, Vec<String>) {
    let spans = token_spans(body);
    let mut first_tag = spans.len();
    while first_tag > 1 && is_tag_token(spans[first_tag - 1].1) {
        first_tag -= 1;
    }

    if first_tag == spans.len() {
        return (body.trim_end(), Vec::new());
    }

    let value = body[..spans[first_tag].0].trim_end();
    let tags = spans[first_tag..]
        .iter()
        .flat_map(|(_, token)| token.split('#'))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    (value, tags)
}

/// Apply a command to a bank and describe the result
pub fn apply(bank: MemoryBank, command: Command) -> Result<Outcome, StoreError> {
    apply_at(bank, command, Utc::now())
}

pub fn apply_at(
    bank: MemoryBank,
    command: Command,
    now: DateTime<Utc>,
) -> Result<Outcome, StoreError> {
    match command {
        Command::Save { key, value, tags } => save::execute(bank, &key, &value, &tags, now),
        Command::Get { key } => Ok(get::execute(bank, &key)),
        Command::Delete { key } => Ok(delete::execute(bank, &key, now)),
        Command::List { tag } => Ok(list::execute(bank, tag.as_deref())),
    }
}

/// ` タグ: #a #b`, or nothing when there are no tags
fn tag_suffix(tags: &[String]) -> String {
    if tags.is_empty() {
        String::new()
    } else {
        format!(" タグ: {}", hashtags(tags))
    }
}

fn hashtags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

fn not_found_message(key: &str) -> String {
    format!("❓ 「{}」という記憶は見つかりませんでした", key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn save_cmd(key: &str, value: &str, tags: &[&str]) -> Command {
        Command::Save {
            key: key.to_string(),
            value: value.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_parse_save_with_tags() {
        assert_eq!(
            parse("!save coffee oat latte, no sugar #food #morning"),
            Some(save_cmd("coffee", "oat latte, no sugar", &["food", "morning"]))
        );
    }

    #[test]
    fn test_parse_save_without_tags() {
        assert_eq!(parse("!save foo bar"), Some(save_cmd("foo", "bar", &[])));
    }

    #[test]
    fn test_parse_save_keeps_inner_spacing() {
        assert_eq!(
            parse("  !save addr 1-2-3   Shibuya  #home \n"),
            Some(save_cmd("addr", "1-2-3   Shibuya", &["home"]))
        );
    }

    #[test]
    fn test_parse_save_hash_inside_value() {
        assert_eq!(
            parse("!save lang C# is fine #work"),
            Some(save_cmd("lang", "C# is fine", &["work"]))
        );
        assert_eq!(
            parse("!save bug issue#12 still open"),
            Some(save_cmd("bug", "issue#12 still open", &[]))
        );
    }

    #[test]
    fn test_parse_save_value_of_only_tags() {
        // At least one token always stays in the value
        assert_eq!(parse("!save k #a #b"), Some(save_cmd("k", "#a", &["b"])));
        assert_eq!(parse("!save k #a"), Some(save_cmd("k", "#a", &[])));
    }

    #[test]
    fn test_parse_save_joined_and_empty_tags() {
        assert_eq!(
            parse("!save k v #a#b ## #c"),
            Some(save_cmd("k", "v", &["a", "b", "c"]))
        );
    }

    #[test]
    fn test_parse_save_lone_hash_stays_in_value() {
        assert_eq!(parse("!save k v #"), Some(save_cmd("k", "v #", &[])));
    }

    #[test]
    fn test_parse_save_tag_block_must_be_trailing() {
        assert_eq!(
            parse("!save k v #a middle #b"),
            Some(save_cmd("k", "v #a middle", &["b"]))
        );
    }

    #[test]
    fn test_parse_save_missing_value() {
        assert!(parse("!save").is_none());
        assert!(parse("!save onlykey").is_none());
        assert!(parse("!save onlykey   ").is_none());
    }

    #[test]
    fn test_parse_get_and_delete() {
        assert_eq!(
            parse("!get coffee"),
            Some(Command::Get {
                key: "coffee".to_string()
            })
        );
        assert_eq!(
            parse("!delete coffee"),
            Some(Command::Delete {
                key: "coffee".to_string()
            })
        );
        assert!(parse("!get").is_none());
        assert!(parse("!get two keys").is_none());
        assert!(parse("!delete").is_none());
        assert!(parse("!delete a b").is_none());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse("!list"), Some(Command::List { tag: None }));
        assert_eq!(
            parse("!list #food"),
            Some(Command::List {
                tag: Some("food".to_string())
            })
        );
        assert!(parse("!list food").is_none());
        assert!(parse("!list #").is_none());
        assert!(parse("!list #a #b").is_none());
    }

    #[test]
    fn test_parse_not_a_command() {
        assert!(parse("not a command").is_none());
        assert!(parse("").is_none());
        assert!(parse("!remember this").is_none());
        assert!(parse("please !save k v").is_none());
    }

    #[test]
    fn test_parse_keyword_needs_boundary_and_case() {
        assert!(parse("!listing").is_none());
        assert!(parse("!saved k v").is_none());
        assert!(parse("!SAVE k v").is_none());
        assert!(parse("!Get k").is_none());
    }

    #[test]
    fn test_tag_suffix() {
        assert_eq!(tag_suffix(&[]), "");
        assert_eq!(
            tag_suffix(&["a".to_string(), "b".to_string()]),
            " タグ: #a #b"
        );
    }

    #[test]
    fn test_apply_round_trip() {
        let now = Utc.timestamp_opt(1_767_225_600, 0).unwrap();

        let outcome = apply_at(MemoryBank::default(), save_cmd("k", "v", &["t"]), now).unwrap();
        assert!(outcome.change.is_some());

        let outcome = apply_at(outcome.bank, Command::Get { key: "k".to_string() }, now).unwrap();
        assert!(outcome.change.is_none());
        assert_eq!(outcome.message, "📝 k: v タグ: #t");
    }

    #[test]
    fn test_apply_save_empty_key_fails() {
        let err = apply(MemoryBank::default(), save_cmd("", "v", &[])).unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
    }
}
