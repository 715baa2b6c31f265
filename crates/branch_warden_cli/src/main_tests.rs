use super::*;

#[test]
fn test_cli_declaration_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_cli_parses_positional_arguments() {
    let cli = Cli::try_parse_from(["branch-warden", "octocat", "hello-world", "ghp_secret"])
        .expect("expected arguments to parse");

    assert_eq!(cli.owner.as_deref(), Some("octocat"));
    assert_eq!(cli.repo.as_deref(), Some("hello-world"));
    assert_eq!(cli.token.as_deref(), Some("ghp_secret"));
}

#[test]
fn test_cli_accepts_missing_arguments() {
    // Fewer than two positionals must still parse; main turns this into the
    // usage-and-exit-0 path rather than a parse error.
    let cli = Cli::try_parse_from(["branch-warden", "octocat"]).expect("expected parse to succeed");

    assert_eq!(cli.owner.as_deref(), Some("octocat"));
    assert!(cli.repo.is_none());
}

#[test]
fn test_resolve_token_prefers_argument() {
    let token = resolve_token(
        Some("ghp_argument".to_string()),
        Some("ghp_environment".to_string()),
    )
    .expect("expected a token");

    assert_eq!(token, "ghp_argument");
}

#[test]
fn test_resolve_token_falls_back_to_environment() {
    let token = resolve_token(None, Some("ghp_environment".to_string())).expect("expected a token");

    assert_eq!(token, "ghp_environment");
}

#[test]
fn test_resolve_token_treats_empty_argument_as_absent() {
    let token = resolve_token(Some(String::new()), Some("ghp_environment".to_string()))
        .expect("expected a token");

    assert_eq!(token, "ghp_environment");
}

#[test]
fn test_resolve_token_missing_everywhere() {
    let result = resolve_token(None, None);

    assert!(matches!(result, Err(Error::MissingToken)));
}
