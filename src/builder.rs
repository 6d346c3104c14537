//! Depth-first reconstruction of a Drive folder tree.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::client::{DriveListing, DriveScope, ListRequest};
use crate::error::{DriveError, Result};
use crate::models::FileMetadata;
use crate::retry::{RetryPolicy, LISTING_RETRY, NAME_LOOKUP_RETRY};
use crate::tree::{Node, NodeId, Tree, ZERO_TIMESTAMP};

/// Objects requested per `files.list` page.
pub const PAGE_SIZE: u32 = 100;

/// Fields requested for every listed child.
pub const CHILD_FIELDS: &str =
    "nextPageToken, files(id, name, mimeType, parents, createdTime, modifiedTime)";

/// Walks a folder and everything below it, one remote call at a time.
pub struct TreeBuilder<'a, L> {
    client: &'a L,
    scope: DriveScope,
    cancel: CancellationToken,
    name_retry: RetryPolicy,
    list_retry: RetryPolicy,
    page_size: u32,
}

impl<'a, L: DriveListing> TreeBuilder<'a, L> {
    pub fn new(client: &'a L, scope: DriveScope, cancel: CancellationToken) -> Self {
        Self {
            client,
            scope,
            cancel,
            name_retry: NAME_LOOKUP_RETRY,
            list_retry: LISTING_RETRY,
            page_size: PAGE_SIZE,
        }
    }

    pub fn with_name_retry(mut self, policy: RetryPolicy) -> Self {
        self.name_retry = policy;
        self
    }

    pub fn with_list_retry(mut self, policy: RetryPolicy) -> Self {
        self.list_retry = policy;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Build the tree rooted at `root_folder_id`.
    ///
    /// Any unrecovered failure aborts the walk and the partial tree is
    /// dropped. Folders are expanded in pre-order: a folder's subtree is
    /// fully listed before its next sibling folder.
    pub async fn build(&self, root_folder_id: &str) -> Result<Tree> {
        let client = self.client;
        let scope = &self.scope;
        let name = self
            .name_retry
            .execute(&self.cancel, move || client.fetch_name(root_folder_id, scope))
            .await?;

        // Only the name is fetched for the root, so its times are synthesized.
        let now = OffsetDateTime::now_utc();
        let mut tree = Tree::new(Node::new(root_folder_id, name, true, now, now));

        let mut pending: Vec<(String, NodeId)> = vec![(root_folder_id.to_string(), tree.root())];
        while let Some((folder_id, parent)) = pending.pop() {
            let files = self.list_all_children(&folder_id).await?;
            debug!(folder = %folder_id, children = files.len(), "listed folder");

            let mut subfolders = Vec::new();
            for file in &files {
                let child = tree.add_child(parent, node_from_file(file))?;
                if file.is_folder() {
                    subfolders.push((file.id.clone(), child));
                }
            }
            // Reversed so the first subfolder is expanded next.
            pending.extend(subfolders.into_iter().rev());
        }

        info!(
            root = %root_folder_id,
            nodes = tree.len(),
            files = tree.file_count(),
            "built drive tree"
        );
        Ok(tree)
    }

    /// Collect every page of children of `parent_id`.
    async fn list_all_children(&self, parent_id: &str) -> Result<Vec<FileMetadata>> {
        let query = format!("'{}' in parents and trashed=false", parent_id);
        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            if self.cancel.is_cancelled() {
                return Err(DriveError::Cancelled);
            }

            let request = ListRequest {
                query: &query,
                fields: CHILD_FIELDS,
                page_token: page_token.as_deref(),
                page_size: self.page_size,
            };
            let client = self.client;
            let scope = &self.scope;
            let request = &request;
            let page = self
                .list_retry
                .execute(&self.cancel, move || client.list_children(scope, request))
                .await
                .inspect_err(|err| match err {
                    DriveError::Cancelled => debug!(folder = %parent_id, "listing cancelled"),
                    _ => error!(folder = %parent_id, error = %err, "unable to retrieve files"),
                })?;

            let next = page.next_page().map(str::to_string);
            files.extend(page.files);
            match next {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(files)
    }
}

/// Build the tree under `root_folder_id` with the default retry policies.
pub async fn build_tree<L: DriveListing>(
    client: &L,
    scope: DriveScope,
    root_folder_id: &str,
    cancel: CancellationToken,
) -> Result<Tree> {
    TreeBuilder::new(client, scope, cancel)
        .build(root_folder_id)
        .await
}

/// Convert a listed object into a tree node, classifying it by MIME type.
pub fn node_from_file(file: &FileMetadata) -> Node {
    Node::new(
        file.id.as_str(),
        file.name.as_str(),
        file.is_folder(),
        parse_timestamp(file.created_time.as_deref(), &file.id),
        parse_timestamp(file.modified_time.as_deref(), &file.id),
    )
}

/// Parse an RFC 3339 timestamp. Missing or malformed values become
/// [`ZERO_TIMESTAMP`]; malformed ones are logged.
fn parse_timestamp(raw: Option<&str>, file_id: &str) -> OffsetDateTime {
    let Some(raw) = raw else {
        return ZERO_TIMESTAMP;
    };
    OffsetDateTime::parse(raw, &Rfc3339).unwrap_or_else(|err| {
        warn!(file = %file_id, value = %raw, error = %err, "unparseable timestamp");
        ZERO_TIMESTAMP
    })
}
