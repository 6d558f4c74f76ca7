//! The GitHub Projects v2 [`Backend`].
//!
//! Every change is pushed to GitHub as it happens, so
//! [`save_board`](Backend::save_board) has nothing to do.

use std::collections::HashMap;

use async_trait::async_trait;
use cardstack_protocol::{Backend, BackendError, Board, Card, CardId, DEFAULT_COLUMNS};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::client::GitHubClient;
use crate::error::{Error, Result};
use crate::project::{
    ContentKind, ContentRef, ProjectInfo, fetch_items, fetch_project, item_to_card,
};
use crate::status::column_to_status;

const SET_STATUS: &str = r#"
mutation($project: ID!, $item: ID!, $field: ID!, $option: String!) {
  updateProjectV2ItemFieldValue(input: {
    projectId: $project, itemId: $item, fieldId: $field,
    value: { singleSelectOptionId: $option }
  }) { projectV2Item { id } }
}"#;

const ADD_DRAFT: &str = r#"
mutation($project: ID!, $title: String!, $body: String) {
  addProjectV2DraftIssue(input: { projectId: $project, title: $title, body: $body }) {
    projectItem { id content { ... on DraftIssue { id } } }
  }
}"#;

const UPDATE_DRAFT: &str = r#"
mutation($id: ID!, $title: String!, $body: String) {
  updateProjectV2DraftIssue(input: { draftIssueId: $id, title: $title, body: $body }) {
    draftIssue { id }
  }
}"#;

const UPDATE_ISSUE: &str = r#"
mutation($id: ID!, $title: String!, $body: String) {
  updateIssue(input: { id: $id, title: $title, body: $body }) { issue { id } }
}"#;

const UPDATE_PULL_REQUEST: &str = r#"
mutation($id: ID!, $title: String!, $body: String) {
  updatePullRequest(input: { pullRequestId: $id, title: $title, body: $body }) {
    pullRequest { id }
  }
}"#;

const DELETE_ITEM: &str = r#"
mutation($project: ID!, $item: ID!) {
  deleteProjectV2Item(input: { projectId: $project, itemId: $item }) { deletedItemId }
}"#;

#[derive(Debug, Deserialize)]
struct NodeId {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddedItem {
    id: String,
    content: Option<NodeId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddDraftPayload {
    project_item: AddedItem,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddDraftData {
    add_project_v2_draft_issue: AddDraftPayload,
}

/// What the backend remembers about the remote project between calls.
#[derive(Debug, Default)]
struct Remote {
    project: Option<ProjectInfo>,
    contents: HashMap<CardId, ContentRef>,
}

/// A board backed by a GitHub Projects v2 project.
///
/// Columns are the fixed default set; a card's column is its item's
/// `Status` value.
///
/// # Examples
///
/// ```no_run
/// use cardstack_github::{GitHubBackend, GitHubClient};
/// use cardstack_protocol::Backend;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GitHubClient::new(None).await?;
/// let backend = GitHubBackend::new(client, "acme", 3);
/// let board = backend.load_board().await?;
/// println!("{} cards", board.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GitHubBackend {
    client: GitHubClient,
    owner: String,
    number: u64,
    remote: RwLock<Remote>,
}

impl GitHubBackend {
    /// Creates a backend for project `number` of `owner`.
    #[must_use]
    pub fn new(client: GitHubClient, owner: impl Into<String>, number: u64) -> Self {
        Self {
            client,
            owner: owner.into(),
            number,
            remote: RwLock::new(Remote::default()),
        }
    }

    /// Returns the cached project, fetching it on first use.
    async fn project(&self) -> Result<ProjectInfo> {
        if let Some(project) = &self.remote.read().await.project {
            return Ok(project.clone());
        }
        let project = fetch_project(&self.client, &self.owner, self.number).await?;
        self.remote.write().await.project = Some(project.clone());
        Ok(project)
    }

    #[instrument(skip(self))]
    async fn load(&self) -> Result<Board> {
        let project = fetch_project(&self.client, &self.owner, self.number).await?;
        let items = fetch_items(&self.client, &project.id).await?;

        let contents: HashMap<_, _> = items
            .iter()
            .filter_map(|item| Some((CardId::new(item.id()), item.content_ref()?)))
            .collect();
        let cards: Vec<Card> = items.iter().filter_map(item_to_card).collect();

        let mut board = Board::from_cards(project.title.clone(), DEFAULT_COLUMNS, cards)?;
        board.description = project.short_description.clone().unwrap_or_default();
        board.url = Some(project.url.clone());

        let mut remote = self.remote.write().await;
        remote.project = Some(project);
        remote.contents = contents;
        info!(cards = board.len(), "loaded GitHub project");
        Ok(board)
    }

    #[instrument(skip(self))]
    async fn set_status(&self, item_id: &str, column: &str) -> Result<()> {
        let project = self.project().await?;
        let field = project.status.as_ref().ok_or(Error::NoStatusField)?;
        let status = column_to_status(column);
        let option = field.option(status).ok_or_else(|| Error::UnknownStatus {
            column: column.to_string(),
            status: status.to_string(),
        })?;

        let _: serde_json::Value = self
            .client
            .graphql(
                SET_STATUS,
                json!({
                    "project": project.id,
                    "item": item_id,
                    "field": field.id,
                    "option": option.id,
                }),
            )
            .await?;
        debug!(status, "updated item status");
        Ok(())
    }

    async fn create(&self, card: &Card) -> Result<CardId> {
        let project = self.project().await?;
        let data: AddDraftData = self
            .client
            .graphql(
                ADD_DRAFT,
                json!({ "project": project.id, "title": card.title, "body": card.description }),
            )
            .await?;
        let added = data.add_project_v2_draft_issue.project_item;
        let id = CardId::new(added.id);

        if let Some(content) = added.content {
            self.remote.write().await.contents.insert(
                id.clone(),
                ContentRef {
                    kind: ContentKind::DraftIssue,
                    id: content.id,
                },
            );
        }
        self.set_status(id.as_str(), &card.column).await?;
        info!(card = %id, "created draft issue");
        Ok(id)
    }

    async fn update(&self, card: &Card) -> Result<()> {
        let content = self
            .remote
            .read()
            .await
            .contents
            .get(&card.id)
            .cloned()
            .ok_or_else(|| Error::UnknownItem(card.id.to_string()))?;
        let mutation = match content.kind {
            ContentKind::DraftIssue => UPDATE_DRAFT,
            ContentKind::Issue => UPDATE_ISSUE,
            ContentKind::PullRequest => UPDATE_PULL_REQUEST,
        };
        let _: serde_json::Value = self
            .client
            .graphql(
                mutation,
                json!({ "id": content.id, "title": card.title, "body": card.description }),
            )
            .await?;
        debug!(card = %card.id, kind = ?content.kind, "updated item content");
        Ok(())
    }

    async fn delete(&self, card_id: &CardId) -> Result<()> {
        let project = self.project().await?;
        let _: serde_json::Value = self
            .client
            .graphql(
                DELETE_ITEM,
                json!({ "project": project.id, "item": card_id.as_str() }),
            )
            .await?;
        self.remote.write().await.contents.remove(card_id);
        info!(card = %card_id, "deleted project item");
        Ok(())
    }
}

#[async_trait]
impl Backend for GitHubBackend {
    fn describe(&self) -> String {
        format!("GitHub project {}/{}", self.owner, self.number)
    }

    fn is_remote(&self) -> bool {
        true
    }

    async fn load_board(&self) -> std::result::Result<Board, BackendError> {
        self.load().await.map_err(BackendError::load)
    }

    async fn save_board(&self, _board: &Board) -> std::result::Result<(), BackendError> {
        Ok(())
    }

    async fn move_card(
        &self,
        card_id: &CardId,
        column: &str,
    ) -> std::result::Result<(), BackendError> {
        self.set_status(card_id.as_str(), column)
            .await
            .map_err(BackendError::remote)
    }

    async fn create_card(&self, card: &Card) -> std::result::Result<Option<CardId>, BackendError> {
        self.create(card).await.map(Some).map_err(BackendError::remote)
    }

    async fn update_card(&self, card: &Card) -> std::result::Result<(), BackendError> {
        self.update(card).await.map_err(BackendError::remote)
    }

    async fn delete_card(&self, card_id: &CardId) -> std::result::Result<(), BackendError> {
        self.delete(card_id).await.map_err(BackendError::remote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn backend() -> GitHubBackend {
        GitHubBackend::new(GitHubClient::new(None).await.unwrap(), "acme", 3)
    }

    #[tokio::test]
    async fn describes_project_and_is_remote() {
        let backend = backend().await;
        assert_eq!(backend.describe(), "GitHub project acme/3");
        assert!(backend.is_remote());
    }

    #[tokio::test]
    async fn save_is_a_no_op() {
        let backend = backend().await;
        let board = Board::with_default_columns("Remote");
        assert!(backend.save_board(&board).await.is_ok());
    }

    #[tokio::test]
    async fn update_of_unknown_item_fails_without_network() {
        let backend = backend().await;
        let card = Card::new("Never loaded", "TODO");

        let err = backend.update_card(&card).await.unwrap_err();
        assert!(matches!(err, BackendError::Remote(_)));
        assert!(err.to_string().contains("not a project item"));
    }

    #[test]
    fn add_draft_response_decodes() {
        let data: AddDraftData = serde_json::from_value(json!({
            "addProjectV2DraftIssue": {
                "projectItem": { "id": "PVTI_9", "content": { "id": "DI_9" } }
            }
        }))
        .unwrap();
        let item = data.add_project_v2_draft_issue.project_item;
        assert_eq!(item.id, "PVTI_9");
        assert_eq!(item.content.map(|c| c.id).as_deref(), Some("DI_9"));
    }
}
