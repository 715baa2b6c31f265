use super::*;
use serde_json::{from_str, json};

#[test]
fn test_repository_label_prefers_full_name() {
    let repo = Repository {
        name: "test-repo".to_string(),
        full_name: Some("test-owner/test-repo".to_string()),
        private: Some(false),
        default_branch: Some("main".to_string()),
    };

    assert_eq!(repo.label(), "test-owner/test-repo");
}

#[test]
fn test_repository_label_falls_back_to_name() {
    let repo = Repository {
        name: "test-repo".to_string(),
        full_name: None,
        private: None,
        default_branch: None,
    };

    assert_eq!(repo.label(), "test-repo");
}

#[test]
fn test_repository_from_octocrab_model() {
    // Convert through the octocrab model the REST layer hands us
    let octocrab_repo: octocrab::models::Repository = serde_json::from_value(json!({
        "id": 123456,
        "node_id": "MDEwOlJlcG9zaXRvcnkxMjM0NTY=",
        "name": "test-repo",
        "full_name": "test-owner/test-repo",
        "url": "https://api.github.com/repos/test-owner/test-repo",
        "private": true,
        "default_branch": "develop"
    }))
    .expect("Failed to deserialize octocrab repository");

    let repo = Repository::from(octocrab_repo);

    assert_eq!(repo.name, "test-repo");
    assert_eq!(repo.full_name.as_deref(), Some("test-owner/test-repo"));
    assert_eq!(repo.private, Some(true));
    assert_eq!(repo.default_branch.as_deref(), Some("develop"));
}

#[test]
fn test_branch_deserialization_ignores_extra_fields() {
    let branch: Branch = from_str(
        r#"{
            "name": "main",
            "protected": true,
            "commit": { "sha": "abc123", "url": "https://example.com" },
            "_links": {}
        }"#,
    )
    .expect("Failed to deserialize Branch");

    assert_eq!(branch.name, "main");
    assert_eq!(branch.protected, Some(true));
}

#[test]
fn test_branch_protection_review_count() {
    let protection: BranchProtection = from_str(
        r#"{
            "required_pull_request_reviews": {
                "required_approving_review_count": 2,
                "dismiss_stale_reviews": true,
                "require_code_owner_reviews": false
            },
            "enforce_admins": { "enabled": true }
        }"#,
    )
    .expect("Failed to deserialize BranchProtection");

    assert_eq!(protection.required_approving_reviews(), 2);
    assert!(protection.enforce_admins.map(|e| e.enabled).unwrap_or(false));
}

#[test]
fn test_branch_protection_without_review_requirement() {
    // GitHub omits the reviews section entirely when no review rule is set
    let protection: BranchProtection = from_str(r#"{ "enforce_admins": { "enabled": false } }"#)
        .expect("Failed to deserialize BranchProtection");

    assert_eq!(protection.required_approving_reviews(), 0);
}

#[test]
fn test_branch_protection_with_null_review_count() {
    let protection: BranchProtection = from_str(
        r#"{
            "required_pull_request_reviews": {
                "required_approving_review_count": null,
                "dismiss_stale_reviews": null,
                "require_code_owner_reviews": null
            }
        }"#,
    )
    .expect("Failed to deserialize BranchProtection");

    assert_eq!(protection.required_approving_reviews(), 0);
}
