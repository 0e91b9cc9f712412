//! Selection range method for Hirogeru.

use tower_lsp_server::jsonrpc::Result;
use tower_lsp_server::ls_types::*;

use crate::lsp::protocol::to_jsonrpc_error;
use crate::selection::selection_ranges;

use super::super::{Hirogeru, uri_to_url};

impl Hirogeru {
    pub(crate) async fn selection_range_impl(
        &self,
        params: SelectionRangeParams,
    ) -> Result<Option<Vec<SelectionRange>>> {
        let lsp_uri = params.text_document.uri;
        let Ok(uri) = uri_to_url(&lsp_uri) else {
            log::warn!("Invalid URI in selectionRange: {}", lsp_uri.as_str());
            return Ok(None);
        };

        let settings = self.settings_manager.load_settings();
        let ranges = selection_ranges(
            &self.documents,
            &settings.sibling_groups,
            &uri,
            &params.positions,
        )
        .map_err(|err| {
            log::debug!(target: "hirogeru::selection", "selectionRange for {} failed: {}", uri, err);
            to_jsonrpc_error(err)
        })?;

        Ok(Some(ranges))
    }
}
