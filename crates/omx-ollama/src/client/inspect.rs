//! Per-server listing and model inspection.

use futures_util::stream::{self, StreamExt};
use omx_core::{RawModelItem, context_in_thousands, format_size};
use tracing::{debug, info, warn};

use super::OllamaClient;
use crate::error::OllamaResult;
use crate::http::HttpBackend;
use crate::models::{ShowRequest, ShowResponse, TagModel, TagsResponse};
use crate::url::{show_url, tags_url};

impl<B: HttpBackend> OllamaClient<B> {
    /// List every model on `server` with its details.
    ///
    /// A failing `/api/tags` fails the server. A failing `/api/show` only
    /// degrades that one model to an entry with no capabilities and an
    /// `error`. Models come back in `/api/tags` order.
    pub(crate) async fn list_server(&self, server: &str) -> OllamaResult<Vec<RawModelItem>> {
        info!(server = %server, "Fetching models");
        let tags: TagsResponse = self.backend.get_json(&tags_url(server)?).await?;
        debug!(server = %server, count = tags.models.len(), "Listed tags");

        let items: Vec<RawModelItem> = stream::iter(tags.models)
            .map(|tag| self.inspect(server, tag))
            .buffered(self.workers.max(1))
            .collect()
            .await;

        info!(server = %server, count = items.len(), "Found models");
        Ok(items)
    }

    async fn inspect(&self, server: &str, tag: TagModel) -> RawModelItem {
        let mut item = base_item(server, &tag);
        match self.show(server, &tag.name).await {
            Ok(show) => apply_details(&mut item, show),
            Err(e) => {
                warn!(server = %server, model = %tag.name, error = %e, "Failed to inspect model");
                item.error = Some(e.to_string());
            }
        }
        item
    }

    async fn show(&self, server: &str, model: &str) -> OllamaResult<ShowResponse> {
        self.backend
            .post_json(&show_url(server)?, &ShowRequest { model })
            .await
    }
}

/// Fields known from `/api/tags` alone.
fn base_item(server: &str, tag: &TagModel) -> RawModelItem {
    let size = tag.size.unwrap_or(0);
    RawModelItem {
        name: tag.name.clone(),
        server: Some(server.to_string()),
        size: Some(size),
        size_formatted: Some(format_size(size)),
        modified_at: tag.modified_at.clone(),
        digest: tag.short_digest(),
        ..RawModelItem::default()
    }
}

fn apply_details(item: &mut RawModelItem, show: ShowResponse) {
    let context_length = show.context_length();
    item.capabilities = show.capabilities;
    item.parameters = show.details.parameter_size;
    item.quantization = show.details.quantization_level;
    item.family = show.details.family;
    item.format = show.details.format;
    item.parent_model = show.details.parent_model;
    item.context_length = context_length;
    item.max_context = context_length.map(context_in_thousands);
}
