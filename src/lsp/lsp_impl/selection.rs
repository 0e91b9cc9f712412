//! Custom `selection/expand` and `selection/shrink` requests.

use tower_lsp_server::jsonrpc::Result;
use tower_lsp_server::ls_types::Range;

use crate::lsp::protocol::{SelectionParams, to_jsonrpc_error};
use crate::selection::{expand_selection, shrink_selection};

use super::{Hirogeru, uri_to_url};

impl Hirogeru {
    /// Handle `selection/expand`: the next larger syntactic range, or null
    /// when the whole document is already selected.
    pub async fn expand_selection(&self, params: SelectionParams) -> Result<Option<Range>> {
        let lsp_uri = params.text_document.uri;
        let Ok(uri) = uri_to_url(&lsp_uri) else {
            log::warn!("Invalid URI in selection/expand: {}", lsp_uri.as_str());
            return Ok(None);
        };

        let settings = self.settings_manager.load_settings();
        let expanded = expand_selection(&self.documents, &settings.sibling_groups, &uri, params.range)
            .map_err(|err| {
                log::debug!(target: "hirogeru::selection", "selection/expand for {} failed: {}", uri, err);
                to_jsonrpc_error(err)
            })?;

        if let Some(next) = expanded {
            self.history.record(&uri, params.range, next);
        }
        Ok(expanded)
    }

    /// Handle `selection/shrink`: the range the current selection was
    /// expanded from, or null when there is no recorded step to undo.
    pub async fn shrink_selection(&self, params: SelectionParams) -> Result<Option<Range>> {
        let lsp_uri = params.text_document.uri;
        let Ok(uri) = uri_to_url(&lsp_uri) else {
            log::warn!("Invalid URI in selection/shrink: {}", lsp_uri.as_str());
            return Ok(None);
        };

        Ok(shrink_selection(&self.history, &uri, params.range))
    }
}
