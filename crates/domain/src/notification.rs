//! Notification formatting.
//!
//! Pure mapping from a fetched [`Issue`] or [`Comment`] (plus its translated
//! fragments) to a destination-neutral [`Notification`]. Destinations render
//! it into their own wire shape: the rich form keeps the structure (colour,
//! fields, author block), the plain-text form comes from
//! [`Notification::to_plain_text`].
//!
//! Titles are capped at [`TITLE_LIMIT`] characters and bodies at
//! [`BODY_LIMIT`]; anything longer is cut and suffixed with [`ELLIPSIS`].

use crate::{
    Author, Comment, Issue, IssueNumber, IssueState, ParentIssue, RepositoryId, Timestamp,
    Translation,
};

pub const TITLE_LIMIT: usize = 100;
pub const BODY_LIMIT: usize = 500;
pub const ELLIPSIS: &str = "...";

/// Rendered in place of an empty or absent issue body.
pub const NO_DESCRIPTION: &str = "No description provided.";

/// Title shown when a comment's parent issue could not be looked up.
pub const UNKNOWN_ISSUE_TITLE: &str = "(unknown issue)";

/// Cuts `text` to at most `limit` characters, appending [`ELLIPSIS`] when
/// anything was removed.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_owned(),
    }
}

/// Returns the body text when it carries any content.
pub fn non_empty_body(body: Option<&str>) -> Option<&str> {
    body.filter(|b| !b.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accent {
    IssueOpen,
    IssueClosed,
    Comment,
}

impl Accent {
    /// RGB colour as a packed integer.
    pub fn color(self) -> u32 {
        match self {
            Self::IssueOpen => 0x2E_CC_71,
            Self::IssueClosed => 0xE7_4C_3C,
            Self::Comment => 0x34_98_DB,
        }
    }

    /// Short label used where colour is unavailable.
    pub fn label(self) -> &'static str {
        match self {
            Self::IssueOpen => "[Open]",
            Self::IssueClosed => "[Closed]",
            Self::Comment => "[Comment]",
        }
    }
}

impl From<IssueState> for Accent {
    fn from(state: IssueState) -> Self {
        match state {
            IssueState::Open => Self::IssueOpen,
            IssueState::Closed => Self::IssueClosed,
        }
    }
}

/// A labelled value shown beneath the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
    /// Whether the destination may lay this field out side by side with others.
    pub inline: bool,
}

impl Field {
    fn inline(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_owned(),
            value: value.into(),
            inline: true,
        }
    }

    fn block(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_owned(),
            value: value.into(),
            inline: false,
        }
    }
}

/// One formatted notification, independent of destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub url: String,
    pub description: String,
    pub accent: Accent,
    pub author: Author,
    /// Ordered; translated-text fields, when present, come last.
    pub fields: Vec<Field>,
    pub timestamp: Timestamp,
    pub footer: String,
}

/// Translated fragments of an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueTranslations {
    pub title: Translation,
    pub body: Translation,
}

/// Translated fragments of a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentTranslations {
    pub body: Translation,
    pub parent_title: Translation,
}

fn footer(repo: &RepositoryId) -> String {
    format!("GitHub \u{2022} {repo}")
}

fn push_translation(fields: &mut Vec<Field>, name: &str, translation: &Translation, limit: usize) {
    if let Some(text) = translation.as_text() {
        fields.push(Field::block(name, truncate(text, limit)));
    }
}

/// Builds the notification for a newly created issue.
pub fn format_issue(
    repo: &RepositoryId,
    issue: &Issue,
    translations: &IssueTranslations,
) -> Notification {
    let description = match non_empty_body(issue.body.as_deref()) {
        Some(body) => truncate(body, BODY_LIMIT),
        None => NO_DESCRIPTION.to_owned(),
    };

    let mut fields = vec![
        Field::inline("Repository", repo.as_str()),
        Field::inline("Author", issue.author.login.as_str()),
        Field::inline("State", issue.state.label()),
    ];
    push_translation(&mut fields, "Title (translated)", &translations.title, TITLE_LIMIT);
    push_translation(&mut fields, "Body (translated)", &translations.body, BODY_LIMIT);

    Notification {
        title: format!(
            "New issue #{}: {}",
            issue.number,
            truncate(&issue.title, TITLE_LIMIT)
        ),
        url: issue.html_url.clone(),
        description,
        accent: issue.state.into(),
        author: issue.author.clone(),
        fields,
        timestamp: issue.created_at,
        footer: footer(repo),
    }
}

/// Builds the notification for a newly posted comment.
///
/// `parent` is `None` when the parent-issue lookup failed; the issue number
/// then falls back to the one encoded in the comment's issue URL.
pub fn format_comment(
    repo: &RepositoryId,
    comment: &Comment,
    parent: Option<&ParentIssue>,
    translations: &CommentTranslations,
) -> Notification {
    let number = parent
        .map(|p| p.number)
        .or_else(|| comment.parent_number());
    let issue_ref = number.map_or_else(|| "#?".to_owned(), |n: IssueNumber| format!("#{n}"));
    let parent_title = parent.map_or(UNKNOWN_ISSUE_TITLE, |p| p.title.as_str());

    let mut fields = vec![
        Field::inline("Repository", repo.as_str()),
        Field::inline("Author", comment.author.login.as_str()),
        Field::inline("Issue", issue_ref.clone()),
    ];
    push_translation(&mut fields, "Comment (translated)", &translations.body, BODY_LIMIT);
    push_translation(
        &mut fields,
        "Issue title (translated)",
        &translations.parent_title,
        TITLE_LIMIT,
    );

    Notification {
        title: format!(
            "New comment on {}: {}",
            issue_ref,
            truncate(parent_title, TITLE_LIMIT)
        ),
        url: comment.html_url.clone(),
        description: match non_empty_body(Some(comment.body.as_str())) {
            Some(body) => truncate(body, BODY_LIMIT),
            None => NO_DESCRIPTION.to_owned(),
        },
        accent: Accent::Comment,
        author: comment.author.clone(),
        fields,
        timestamp: comment.created_at,
        footer: footer(repo),
    }
}

impl Notification {
    /// Renders the plain-text form used by text-only destinations.
    pub fn to_plain_text(&self) -> String {
        let mut text = format!(
            "{} {}\n{}\nby @{}\n\n{}",
            self.accent.label(),
            self.title,
            self.url,
            self.author.login,
            self.description
        );
        let translated: Vec<&Field> = self.fields.iter().filter(|f| !f.inline).collect();
        if !translated.is_empty() {
            text.push('\n');
            for field in translated {
                text.push_str(&format!("\n{}: {}", field.name, field.value));
            }
        }
        text.push_str(&format!("\n\n{}", self.footer));
        text
    }
}
