mod client;
mod lsp_impl;
pub mod protocol;
mod settings;
mod settings_manager;
mod text_sync;

pub use lsp_impl::Hirogeru;
pub use protocol::{EXPAND_SELECTION_METHOD, SHRINK_SELECTION_METHOD, SelectionParams};
pub use settings::{SettingsEvent, SettingsEventKind, SettingsLoadOutcome, load_settings};

use std::path::PathBuf;
use tower_lsp_server::{ClientSocket, LspService};

/// Build the LSP service with the custom selection methods registered.
pub fn build_service(user_config: Option<PathBuf>) -> (LspService<Hirogeru>, ClientSocket) {
    LspService::build(move |client| Hirogeru::with_user_config(client, user_config))
        .custom_method(EXPAND_SELECTION_METHOD, Hirogeru::expand_selection)
        .custom_method(SHRINK_SELECTION_METHOD, Hirogeru::shrink_selection)
        .finish()
}
