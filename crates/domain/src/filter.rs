//! Inclusion rules applied to every fetch result.
//!
//! The upstream `since` filter matches on last-update time, so an old issue
//! that was merely edited or relabelled comes back too. Only items *created*
//! strictly after the watermark count as new.
//!
//! Selected items are returned oldest first so notifications read in the
//! order the items were created.

use crate::{Comment, Issue, Timestamp};

/// Maximum number of items requested per list call.
pub const PAGE_SIZE: u8 = 50;

/// Keeps genuine issues created strictly after `since`.
///
/// Pull requests returned by the issues endpoint are dropped.
pub fn select_new_issues(issues: Vec<Issue>, since: Timestamp) -> Vec<Issue> {
    let mut selected: Vec<Issue> = issues
        .into_iter()
        .filter(|issue| !issue.is_pull_request && issue.created_at > since)
        .collect();
    selected.sort_by_key(|issue| issue.created_at);
    selected
}

/// Keeps comments created strictly after `since`.
pub fn select_new_comments(comments: Vec<Comment>, since: Timestamp) -> Vec<Comment> {
    let mut selected: Vec<Comment> = comments
        .into_iter()
        .filter(|comment| comment.created_at > since)
        .collect();
    selected.sort_by_key(|comment| comment.created_at);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Author, CommentId, IssueId, IssueNumber, IssueState};

    fn ts(value: &str) -> Timestamp {
        Timestamp::parse_rfc3339(value).unwrap()
    }

    fn issue(number: u64, created_at: &str, is_pull_request: bool) -> Issue {
        Issue {
            id: IssueId::new(number * 10),
            number: IssueNumber::new(number),
            title: format!("Issue {number}"),
            body: None,
            state: IssueState::Open,
            created_at: ts(created_at),
            author: Author {
                login: "octocat".into(),
                avatar_url: String::new(),
            },
            html_url: format!("https://github.com/o/r/issues/{number}"),
            is_pull_request,
        }
    }

    fn comment(id: u64, created_at: &str) -> Comment {
        Comment {
            id: CommentId::new(id),
            body: "looks good".into(),
            created_at: ts(created_at),
            author: Author {
                login: "octocat".into(),
                avatar_url: String::new(),
            },
            html_url: format!("https://github.com/o/r/issues/1#issuecomment-{id}"),
            issue_url: "https://api.github.com/repos/o/r/issues/1".into(),
        }
    }

    #[test]
    fn issues_created_at_or_before_since_are_excluded() {
        let since = ts("2024-06-15T10:00:00Z");
        let kept = select_new_issues(
            vec![
                issue(4, "2024-06-15T10:00:10Z", false),
                issue(1, "2024-06-15T09:59:55Z", false),
                issue(2, "2024-06-15T10:00:00Z", false),
                issue(3, "2024-06-15T10:00:01Z", false),
            ],
            since,
        );
        let numbers: Vec<u64> = kept.iter().map(|i| i.number.as_u64()).collect();
        assert_eq!(numbers, vec![3, 4]);
        assert!(kept.iter().all(|i| i.created_at > since));
    }

    #[test]
    fn pull_requests_are_never_selected() {
        let since = ts("2024-06-15T10:00:00Z");
        let kept = select_new_issues(
            vec![
                issue(5, "2024-06-15T11:00:00Z", true),
                issue(6, "2024-06-15T11:00:00Z", false),
            ],
            since,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].number, IssueNumber::new(6));
    }

    #[test]
    fn comments_use_strict_creation_filter() {
        let since = ts("2024-06-15T10:00:00Z");
        let kept = select_new_comments(
            vec![
                comment(1, "2024-06-15T10:00:00Z"),
                comment(2, "2024-06-15T10:30:00Z"),
            ],
            since,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, CommentId::new(2));
    }
}
