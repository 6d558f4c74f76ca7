//! Projects v2 queries and conversion of project items into cards.
//!
//! # Overview
//!
//! - [`list_projects`]: the projects of a user or organization
//! - [`fetch_project`]: a project's identity and `Status` field
//! - [`fetch_items`]: every item of a project, paged
//! - [`item_to_card`]: one item as a board [`Card`]
//!
//! Owner lookups try the user first and fall back to the organization.

use cardstack_protocol::{Card, CardId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::client::GitHubClient;
use crate::error::{Error, Result};
use crate::status::status_to_column;

/// Items requested per page.
pub const PAGE_SIZE: u32 = 100;

/// A project as listed for an owner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectSummary {
    /// Project number, unique per owner.
    pub number: u64,
    /// Project title.
    pub title: String,
    /// Web address.
    pub url: String,
    /// Whether the project is closed.
    #[serde(default)]
    pub closed: bool,
}

/// One option of the `Status` single-select field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusOption {
    /// Option node id.
    pub id: String,
    /// Display name, e.g. `In Progress`.
    pub name: String,
}

/// The `Status` single-select field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusField {
    /// Field node id.
    pub id: String,
    /// Available options.
    pub options: Vec<StatusOption>,
}

impl StatusField {
    /// Finds an option by name, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardstack_github::project::{StatusField, StatusOption};
    ///
    /// let field = StatusField {
    ///     id: "F".into(),
    ///     options: vec![StatusOption { id: "O1".into(), name: "In Progress".into() }],
    /// };
    /// assert_eq!(field.option("in progress").map(|o| o.id.as_str()), Some("O1"));
    /// assert!(field.option("Done").is_none());
    /// ```
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&StatusOption> {
        self.options
            .iter()
            .find(|o| o.name.eq_ignore_ascii_case(name))
    }
}

/// A project's identity and `Status` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    /// Project node id, used by every mutation.
    pub id: String,
    /// Project title.
    pub title: String,
    /// Short description, if set.
    #[serde(default)]
    pub short_description: Option<String>,
    /// Web address.
    pub url: String,
    /// The `Status` field, if the project has a single-select one.
    #[serde(default, rename = "field", deserialize_with = "status_field")]
    pub status: Option<StatusField>,
}

/// `field(name: "Status")` yields `{}` when the field is not single-select.
fn status_field<'de, D>(deserializer: D) -> std::result::Result<Option<StatusField>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Raw {
        id: Option<String>,
        options: Option<Vec<StatusOption>>,
    }

    let raw: Option<Raw> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|r| {
        Some(StatusField {
            id: r.id?,
            options: r.options?,
        })
    }))
}

/// Kind of content behind a project item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// A draft issue living only in the project.
    DraftIssue,
    /// A repository issue.
    Issue,
    /// A repository pull request.
    PullRequest,
}

impl ContentKind {
    fn from_typename(name: &str) -> Option<Self> {
        match name {
            "DraftIssue" => Some(Self::DraftIssue),
            "Issue" => Some(Self::Issue),
            "PullRequest" => Some(Self::PullRequest),
            _ => None,
        }
    }
}

/// The content node behind a project item, needed to edit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRef {
    /// What kind of node it is.
    pub kind: ContentKind,
    /// The node id.
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct Logins {
    nodes: Vec<Login>,
}

#[derive(Debug, Deserialize)]
struct Login {
    login: String,
}

#[derive(Debug, Deserialize)]
struct Labels {
    nodes: Vec<LabelName>,
}

#[derive(Debug, Deserialize)]
struct LabelName {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ItemContent {
    #[serde(rename = "__typename")]
    kind: Option<String>,
    id: Option<String>,
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
    url: Option<String>,
    labels: Option<Labels>,
    assignees: Option<Logins>,
}

#[derive(Debug, Deserialize)]
struct NamedValue {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DateValue {
    date: Option<NaiveDate>,
}

/// A project item as returned by [`fetch_items`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    status: Option<NamedValue>,
    #[serde(default)]
    target: Option<DateValue>,
    #[serde(default)]
    content: Option<ItemContent>,
}

impl ProjectItem {
    /// Returns the item node id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the item's content node, if it is an editable kind.
    #[must_use]
    pub fn content_ref(&self) -> Option<ContentRef> {
        let content = self.content.as_ref()?;
        Some(ContentRef {
            kind: ContentKind::from_typename(content.kind.as_deref()?)?,
            id: content.id.clone()?,
        })
    }
}

/// Converts a project item into a card.
///
/// The item id becomes the card id. Items whose content is redacted
/// (no title) are skipped.
#[must_use]
pub fn item_to_card(item: &ProjectItem) -> Option<Card> {
    let content = item.content.as_ref()?;
    let title = content.title.as_deref()?;
    let status = item.status.as_ref().and_then(|s| s.name.as_deref());

    let mut card = Card::with_id(
        CardId::new(item.id.as_str()),
        title,
        status_to_column(status),
        item.created_at,
    )
    .with_description(content.body.clone().unwrap_or_default());
    card.modified_at = item.updated_at;

    if let Some(labels) = &content.labels {
        card = card.with_tags(labels.nodes.iter().map(|l| l.name.clone()));
    }
    if let Some(login) = content.assignees.as_ref().and_then(|a| a.nodes.first()) {
        card = card.with_assignee(login.login.clone());
    }
    if let Some(due) = item.target.as_ref().and_then(|t| t.date) {
        card = card.with_due_date(due);
    }
    if let Some(url) = &content.url {
        card = card.with_url(url.clone());
    }
    Some(card)
}

const OWNER_KINDS: [&str; 2] = ["user", "organization"];

#[derive(Debug, Deserialize)]
struct Owner<T> {
    #[serde(rename = "projectV2", alias = "projectsV2")]
    inner: Option<T>,
}

#[derive(Debug, Deserialize)]
struct Nodes<T> {
    nodes: Vec<Option<T>>,
}

/// Runs `query` once with `user` and once with `organization` in place of
/// `OWNER`, returning the first non-null answer.
async fn query_owner<T>(
    client: &GitHubClient,
    query: &str,
    variables: serde_json::Value,
) -> Result<Option<T>>
where
    T: serde::de::DeserializeOwned,
{
    let mut last_error = None;
    for kind in OWNER_KINDS {
        let query = query.replace("OWNER", kind);
        let data: Result<std::collections::HashMap<String, Option<Owner<T>>>> =
            client.graphql(&query, variables.clone()).await;
        match data {
            Ok(mut data) => {
                if let Some(found) = data.remove(kind).flatten().and_then(|o| o.inner) {
                    return Ok(Some(found));
                }
            }
            Err(e) => {
                debug!(kind, error = %e, "owner lookup failed");
                last_error = Some(e);
            }
        }
    }
    match last_error {
        Some(Error::Api(e)) => Err(Error::Api(e)),
        _ => Ok(None),
    }
}

const LIST_PROJECTS: &str = r#"
query($owner: String!) {
  OWNER(login: $owner) {
    projectsV2(first: 100) {
      nodes { number title url closed }
    }
  }
}"#;

/// Lists the projects of a user or organization.
///
/// # Errors
///
/// Returns an error if the API call fails.
#[instrument(skip(client))]
pub async fn list_projects(client: &GitHubClient, owner: &str) -> Result<Vec<ProjectSummary>> {
    let found: Option<Nodes<ProjectSummary>> =
        query_owner(client, LIST_PROJECTS, json!({ "owner": owner })).await?;
    let projects: Vec<_> = found
        .map(|n| n.nodes.into_iter().flatten().collect())
        .unwrap_or_default();
    debug!(count = projects.len(), "listed projects");
    Ok(projects)
}

const FETCH_PROJECT: &str = r#"
query($owner: String!, $number: Int!) {
  OWNER(login: $owner) {
    projectV2(number: $number) {
      id
      title
      shortDescription
      url
      field(name: "Status") {
        ... on ProjectV2SingleSelectField { id options { id name } }
      }
    }
  }
}"#;

/// Fetches a project's identity and `Status` field.
///
/// # Errors
///
/// Returns [`Error::ProjectNotFound`] if neither a user nor an organization
/// named `owner` has project `number`.
#[instrument(skip(client))]
pub async fn fetch_project(client: &GitHubClient, owner: &str, number: u64) -> Result<ProjectInfo> {
    query_owner(
        client,
        FETCH_PROJECT,
        json!({ "owner": owner, "number": number }),
    )
    .await?
    .ok_or_else(|| Error::ProjectNotFound {
        owner: owner.to_string(),
        number,
    })
}

const FETCH_ITEMS: &str = r#"
query($id: ID!, $first: Int!, $after: String) {
  node(id: $id) {
    ... on ProjectV2 {
      items(first: $first, after: $after) {
        pageInfo { hasNextPage endCursor }
        nodes {
          id
          createdAt
          updatedAt
          status: fieldValueByName(name: "Status") {
            ... on ProjectV2ItemFieldSingleSelectValue { name }
          }
          target: fieldValueByName(name: "Target Date") {
            ... on ProjectV2ItemFieldDateValue { date }
          }
          content {
            __typename
            ... on DraftIssue {
              id title body
              assignees(first: 1) { nodes { login } }
            }
            ... on Issue {
              id title body url
              labels(first: 20) { nodes { name } }
              assignees(first: 1) { nodes { login } }
            }
            ... on PullRequest {
              id title body url
              labels(first: 20) { nodes { name } }
              assignees(first: 1) { nodes { login } }
            }
          }
        }
      }
    }
  }
}"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemPage {
    page_info: PageInfo,
    nodes: Vec<Option<ProjectItem>>,
}

#[derive(Debug, Deserialize)]
struct ItemsNode {
    items: Option<ItemPage>,
}

#[derive(Debug, Deserialize)]
struct ItemsData {
    node: Option<ItemsNode>,
}

/// Fetches every item of a project, [`PAGE_SIZE`] at a time.
///
/// # Errors
///
/// Returns an error if any page fails to load.
#[instrument(skip(client))]
pub async fn fetch_items(client: &GitHubClient, project_id: &str) -> Result<Vec<ProjectItem>> {
    let mut items = Vec::new();
    let mut after: Option<String> = None;
    loop {
        let data: ItemsData = client
            .graphql(
                FETCH_ITEMS,
                json!({ "id": project_id, "first": PAGE_SIZE, "after": after }),
            )
            .await?;
        let Some(page) = data.node.and_then(|n| n.items) else {
            break;
        };
        items.extend(page.nodes.into_iter().flatten());
        match page.page_info {
            PageInfo {
                has_next_page: true,
                end_cursor: Some(cursor),
            } => after = Some(cursor),
            _ => break,
        }
    }
    debug!(count = items.len(), "fetched project items");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(json: serde_json::Value) -> ProjectItem {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn issue_item_becomes_full_card() {
        let item = item(json!({
            "id": "PVTI_1",
            "createdAt": "2025-01-01T10:00:00Z",
            "updatedAt": "2025-01-03T10:00:00Z",
            "status": { "name": "In Review" },
            "target": { "date": "2025-02-01" },
            "content": {
                "__typename": "Issue",
                "id": "I_1",
                "title": "Crash on start",
                "body": "Stack trace attached",
                "url": "https://github.com/acme/api/issues/1",
                "labels": { "nodes": [{ "name": "bug" }, { "name": "p1" }] },
                "assignees": { "nodes": [{ "login": "octo" }, { "login": "cat" }] }
            }
        }));

        let card = item_to_card(&item).unwrap();
        assert_eq!(card.id.as_str(), "PVTI_1");
        assert_eq!(card.column, "REVIEW");
        assert_eq!(card.tags, vec!["bug", "p1"]);
        assert_eq!(card.assignee.as_deref(), Some("octo"));
        assert_eq!(card.due_date.map(|d| d.to_string()).as_deref(), Some("2025-02-01"));
        assert_eq!(card.url.as_deref(), Some("https://github.com/acme/api/issues/1"));
        assert!(card.modified_at > card.created_at);
        assert_eq!(
            item.content_ref(),
            Some(ContentRef {
                kind: ContentKind::Issue,
                id: "I_1".into()
            })
        );
    }

    #[test]
    fn draft_without_status_lands_in_backlog() {
        let item = item(json!({
            "id": "PVTI_2",
            "createdAt": "2025-01-01T10:00:00Z",
            "updatedAt": "2025-01-01T10:00:00Z",
            "status": {},
            "target": null,
            "content": { "__typename": "DraftIssue", "id": "DI_2", "title": "Idea", "body": "" }
        }));

        let card = item_to_card(&item).unwrap();
        assert_eq!(card.column, "BACKLOG");
        assert!(card.url.is_none());
        assert!(card.tags.is_empty());
        assert_eq!(item.content_ref().map(|c| c.kind), Some(ContentKind::DraftIssue));
    }

    #[test]
    fn redacted_item_is_skipped() {
        let item = item(json!({
            "id": "PVTI_3",
            "createdAt": "2025-01-01T10:00:00Z",
            "updatedAt": "2025-01-01T10:00:00Z",
            "content": null
        }));
        assert!(item_to_card(&item).is_none());
        assert!(item.content_ref().is_none());
    }

    #[test]
    fn project_info_without_single_select_status() {
        let info: ProjectInfo = serde_json::from_value(json!({
            "id": "PVT_1",
            "title": "Roadmap",
            "shortDescription": null,
            "url": "https://github.com/users/acme/projects/1",
            "field": {}
        }))
        .unwrap();
        assert!(info.status.is_none());
    }

    #[test]
    fn project_info_with_status_options() {
        let info: ProjectInfo = serde_json::from_value(json!({
            "id": "PVT_1",
            "title": "Roadmap",
            "shortDescription": "Next quarter",
            "url": "https://github.com/users/acme/projects/1",
            "field": { "id": "F_1", "options": [{ "id": "O_1", "name": "Todo" }] }
        }))
        .unwrap();
        let status = info.status.unwrap();
        assert_eq!(status.option("TODO").map(|o| o.id.as_str()), Some("O_1"));
    }

    #[test]
    fn owner_wrapper_accepts_both_field_names() {
        let single: Owner<u32> = serde_json::from_value(json!({ "projectV2": 1 })).unwrap();
        let list: Owner<u32> = serde_json::from_value(json!({ "projectsV2": 2 })).unwrap();
        assert_eq!((single.inner, list.inner), (Some(1), Some(2)));
    }
}
