//! Scenario tests for the built-in command grammar.
//!
//! Each test feeds a complete chat message through the built-in registry and
//! checks the resulting request or error.

// Integration tests have relaxed clippy settings for test ergonomics.
// Production code (src/) must use strict zero-unwrap/panic patterns.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::too_many_lines,
    clippy::doc_markdown,
    clippy::missing_panics_doc
)]

use kube_bot_core::{
    loader::{self, args},
    AuthorFilter, BoundValue, ErrorKind, LogDirection, ParseError, Query, Registry, ResultFilter,
    Token,
};

fn registry() -> Registry {
    loader::load_builtins().expect("built-ins register")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// QUERY COMMANDS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn get_binds_two_part_query() {
    let registry = registry();
    let request = registry.parse("get pods/myapp").unwrap();

    assert_eq!(request.command(), "get");
    assert_eq!(request.subcommand(), None);
    let query = request.query(args::QUERY).unwrap();
    assert_eq!(query.kind(), "pods");
    assert_eq!(query.name(), "myapp");
    assert_eq!(query.revision(), None);
    assert_eq!(request.augments().len(), 1);
}

#[test]
fn command_name_is_case_insensitive() {
    let registry = registry();
    for message in ["get pods/a", "GET pods/a", "Get pods/a"] {
        let request = registry.parse(message).unwrap();
        assert_eq!(request.command(), "get", "{message}");
    }
}

#[test]
fn describe_rejects_query_without_slash() {
    let registry = registry();
    let err = registry.parse("describe podsmyapp").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidQuery);
    assert_eq!(err.token().map(Token::as_str), Some("podsmyapp"));
}

#[test]
fn get_rejects_empty_query_name() {
    let registry = registry();
    let err = registry.parse("get pods/").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidQuery);
    assert_eq!(err.position(), Some(1));
}

#[test]
fn get_without_query_is_missing_argument() {
    let registry = registry();
    let err = registry.parse("get").unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingArgument {
            command: "get".to_string(),
            argument: args::QUERY.to_string(),
            position: 1,
        }
    );
    assert_eq!(err.to_string(), "'get' is missing argument <query>");
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ROLLOUT / SCALE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn rollout_status_with_revision() {
    let registry = registry();
    let request = registry.parse("rollout status deployment/myapp/3").unwrap();

    assert_eq!(request.subcommand(), Some("status"));
    assert_eq!(
        request.query(args::QUERY),
        Some(&Query::parse("deployment/myapp/3").unwrap())
    );
    assert_eq!(request.query(args::QUERY).and_then(Query::revision), Some("3"));
}

#[test]
fn rollout_unknown_subcommand_lists_choices() {
    let registry = registry();
    let err = registry.parse("rollout restart deployment/a").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownSubcommand);
    assert_eq!(
        err.to_string(),
        "'rollout' needs one of status|pause|resume|history|undo, found 'restart'"
    );
}

#[test]
fn scale_binds_replica_count() {
    let registry = registry();
    let request = registry.parse("scale deployment/api 0").unwrap();
    assert_eq!(request.integer(args::REPLICAS), Some(0));
}

#[test]
fn scale_requires_numeric_replicas() {
    let registry = registry();
    let err = registry.parse("scale deployment/api many").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingArgument);
    assert_eq!(err.position(), Some(2));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LOGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn logs_with_direction_and_count() {
    let registry = registry();
    let request = registry.parse("logs deployment/myapp top 50").unwrap();
    assert_eq!(request.keyword::<LogDirection>(args::DIRECTION), Some(LogDirection::Top));
    assert_eq!(request.integer(args::LINES), Some(50));
}

#[test]
fn logs_applies_defaults() {
    let registry = registry();
    let request = registry.parse("logs deployment/myapp").unwrap();
    assert_eq!(
        request.get(args::DIRECTION),
        Some(&BoundValue::Keyword("bottom".to_string()))
    );
    assert_eq!(request.get(args::LINES), Some(&BoundValue::Integer(25)));
}

#[test]
fn logs_count_before_direction() {
    let registry = registry();
    let request = registry.parse("logs deployment/myapp 10 top").unwrap();
    assert_eq!(request.keyword::<LogDirection>(args::DIRECTION), Some(LogDirection::Top));
    assert_eq!(request.integer(args::LINES), Some(10));
}

#[test]
fn logs_zero_lines_is_unexpected() {
    let registry = registry();
    let err = registry.parse("logs deployment/myapp 0").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedArgument);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TRACK
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn track_full_message() {
    let registry = registry();
    let request = registry
        .parse("track acme/widgets #ops #oncall mine failure develop master")
        .unwrap();

    assert_eq!(request.text(args::REPO), Some("acme/widgets"));
    assert_eq!(request.list(args::CHANNELS), Some(&strings(&["ops", "oncall"])[..]));
    assert_eq!(
        request.keyword::<AuthorFilter>(args::AUTHOR_FILTER),
        Some(AuthorFilter::Mine)
    );
    assert_eq!(
        request.keyword::<ResultFilter>(args::RESULT_FILTER),
        Some(ResultFilter::Failure)
    );
    assert_eq!(request.list(args::BRANCHES), Some(&strings(&["develop", "master"])[..]));
}

#[test]
fn track_defaults() {
    let registry = registry();
    let request = registry.parse("track acme/widgets").unwrap();

    assert_eq!(request.augments().len(), 5);
    assert_eq!(request.list(args::CHANNELS), Some(&[][..]));
    assert_eq!(request.list(args::BRANCHES), Some(&[][..]));
    assert_eq!(
        request.keyword::<AuthorFilter>(args::AUTHOR_FILTER),
        Some(AuthorFilter::Mine)
    );
    assert_eq!(
        request.keyword::<ResultFilter>(args::RESULT_FILTER),
        Some(ResultFilter::All)
    );
}

#[test]
fn track_keywords_in_any_order() {
    let registry = registry();
    let request = registry.parse("track acme/widgets success anyones").unwrap();
    assert_eq!(
        request.keyword::<AuthorFilter>(args::AUTHOR_FILTER),
        Some(AuthorFilter::Anyones)
    );
    assert_eq!(
        request.keyword::<ResultFilter>(args::RESULT_FILTER),
        Some(ResultFilter::Success)
    );
}

#[test]
fn track_duplicate_author_filter() {
    let registry = registry();
    let err = registry.parse("track acme/widgets mine none").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateKeyword);
    assert_eq!(err.position(), Some(3));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// MISC
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn blank_messages_are_empty() {
    let registry = registry();
    for message in ["", "   ", "\t\n "] {
        assert_eq!(registry.parse(message).unwrap_err(), ParseError::EmptyMessage);
    }
}

#[test]
fn unknown_command_reports_token() {
    let registry = registry();
    let err = registry.parse("deploy pods/a").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownCommand);
    assert_eq!(err.position(), Some(0));
}

#[test]
fn help_and_version_ignore_trailing_words() {
    let registry = registry();
    assert!(registry.parse("help me please").is_ok());
    assert!(registry.parse("version --verbose").is_ok());
}

#[test]
fn config_key_is_optional() {
    let registry = registry();
    let bare = registry.parse("config").unwrap();
    assert_eq!(bare.get(args::KEY), Some(&BoundValue::Unset));

    let keyed = registry.parse("config bot.name").unwrap();
    assert_eq!(keyed.text(args::KEY), Some("bot.name"));
    assert_eq!(keyed.get(args::VALUE), Some(&BoundValue::Unset));
}

#[test]
fn request_serializes_to_json() {
    let registry = registry();
    let request = registry.parse("rollout undo deployment/api/2").unwrap();
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["command"], "rollout");
    assert_eq!(json["subcommand"], "undo");
    assert_eq!(json["augments"]["query"]["type"], "deployment");
    assert_eq!(json["augments"]["query"]["revision"], "2");
}
