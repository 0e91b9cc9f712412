use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tower_lsp_server::jsonrpc::Result;
use tower_lsp_server::ls_types::*;
use tower_lsp_server::{Client, LanguageServer};
use tree_sitter::Tree;
use url::Url;

use crate::config::WorkspaceSettings;
use crate::document::{DocumentStore, parse_document};
use crate::error::LockResultExt;
use crate::language::{FiletypeResolver, LanguageRegistry, ParserFactory};
use crate::selection::SelectionHistory;
use crate::text::TextDocument;

use super::client::ClientNotifier;
use super::settings::{SettingsEvent, load_settings};
use super::settings_manager::SettingsManager;
use super::text_sync::apply_content_changes_with_edits;

mod selection;
mod text_document;

/// Timeout for spawn_blocking parse operations to prevent hangs on pathological inputs.
const PARSE_TIMEOUT: Duration = Duration::from_secs(10);

/// Convert an `ls_types::Uri` into the `url::Url` used as document key.
pub(crate) fn uri_to_url(uri: &Uri) -> std::result::Result<Url, url::ParseError> {
    Url::parse(uri.as_str())
}

pub struct Hirogeru {
    client: Client,
    documents: DocumentStore,
    history: SelectionHistory,
    registry: LanguageRegistry,
    parser_factory: ParserFactory,
    filetypes: FiletypeResolver,
    settings_manager: SettingsManager,
    /// Settings events from `initialize`, reported once the client is ready
    pending_events: Mutex<Vec<SettingsEvent>>,
}

impl std::fmt::Debug for Hirogeru {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hirogeru")
            .field("client", &self.client)
            .field("languages", &self.registry.language_ids())
            .field("settings_manager", &self.settings_manager)
            .finish_non_exhaustive()
    }
}

impl Hirogeru {
    pub fn new(client: Client) -> Self {
        Self::with_user_config(client, None)
    }

    /// Create a server that reads `user_config` instead of the XDG user config.
    pub fn with_user_config(client: Client, user_config: Option<PathBuf>) -> Self {
        let registry = LanguageRegistry::with_bundled();
        let parser_factory = ParserFactory::new(registry.clone());
        let settings_manager = SettingsManager::new(user_config);
        let filetypes = FiletypeResolver::new();
        filetypes.build_from_settings(&settings_manager.load_settings());

        Self {
            client,
            documents: DocumentStore::new(),
            history: SelectionHistory::new(),
            registry,
            parser_factory,
            filetypes,
            settings_manager,
            pending_events: Mutex::new(Vec::new()),
        }
    }

    fn notifier(&self) -> ClientNotifier {
        ClientNotifier::new(self.client.clone())
    }

    fn apply_settings(&self, settings: WorkspaceSettings) {
        self.filetypes.build_from_settings(&settings);
        self.documents
            .set_allow_error_trees(settings.allow_error_trees);
        self.settings_manager.apply_settings(settings);
    }

    /// Parse the current text of `uri` and store the result.
    ///
    /// Runs off the async runtime with a timeout. Failures leave the document
    /// without a tree so requests report it as unparseable.
    async fn parse_document(
        &self,
        uri: &Url,
        language_id: &str,
        text: Arc<TextDocument>,
        old_tree: Option<Tree>,
    ) {
        let revision = text.revision();
        let factory = self.parser_factory.clone();
        let kinds = self.settings_manager.load_settings().kind_map(language_id);
        let language = language_id.to_string();

        let result = tokio::time::timeout(
            PARSE_TIMEOUT,
            tokio::task::spawn_blocking(move || {
                parse_document(&factory, &language, &kinds, &text, old_tree.as_ref())
            }),
        )
        .await;

        let failure = match result {
            Ok(Ok(Ok(parsed))) => {
                self.documents.set_parsed(uri, parsed);
                return;
            }
            Ok(Ok(Err(err))) => err.to_string(),
            Ok(Err(join_err)) => format!("parse task panicked: {}", join_err),
            Err(_elapsed) => format!("parse timed out after {:?}", PARSE_TIMEOUT),
        };

        log::warn!(
            target: "hirogeru::parse",
            "Failed to parse {} ({}) at revision {}: {}",
            uri,
            language_id,
            revision,
            failure
        );
        self.documents.clear_trees(uri, revision);
        self.notifier()
            .log_warning(format!("Failed to parse {}: {}", uri, failure))
            .await;
    }

    /// Resolve the language of a document from its path, then its languageId.
    fn language_for(&self, uri: &Url, language_id: Option<&str>) -> Option<String> {
        self.filetypes.resolve(uri.path(), language_id)
    }

    fn root_path_from(params: &InitializeParams) -> Option<PathBuf> {
        if let Some(folder) = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
        {
            return folder.uri.to_file_path().map(|path| path.into_owned());
        }

        #[allow(deprecated)]
        let root_uri = params.root_uri.as_ref();
        root_uri
            .and_then(|uri| uri.to_file_path())
            .map(|path| path.into_owned())
            .or_else(|| std::env::current_dir().ok())
    }
}

impl LanguageServer for Hirogeru {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let root_path = Self::root_path_from(&params);
        self.settings_manager.set_root_path(root_path.clone());

        let outcome = load_settings(
            self.settings_manager
                .user_config_override()
                .map(PathBuf::as_path),
            root_path.as_deref(),
            params.initialization_options,
        );
        for event in &outcome.events {
            log::info!(target: "hirogeru::config", "{}", event.message);
        }
        self.apply_settings(outcome.settings);
        *self
            .pending_events
            .lock()
            .recover_poison("initialize::pending_events") = outcome.events;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),
                selection_range_provider: Some(SelectionRangeProviderCapability::Simple(true)),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: "hirogeru".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            ..InitializeResult::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let events = std::mem::take(
            &mut *self
                .pending_events
                .lock()
                .recover_poison("initialized::pending_events"),
        );
        if let Some(root) = self.settings_manager.root_path().as_deref() {
            log::info!(target: "hirogeru::config", "Workspace root: {}", root.display());
        }
        let notifier = self.notifier();
        notifier.log_settings_events(&events).await;
        notifier
            .log_info(format!(
                "hirogeru {} ready ({})",
                env!("CARGO_PKG_VERSION"),
                self.registry.language_ids().join(", ")
            ))
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let lsp_uri = params.text_document.uri;
        let Ok(uri) = uri_to_url(&lsp_uri) else {
            log::warn!("Invalid URI in didOpen: {}", lsp_uri.as_str());
            return;
        };
        let revision = params.text_document.version;
        let language = self.language_for(&uri, Some(&params.text_document.language_id));

        self.documents.insert(
            uri.clone(),
            params.text_document.text,
            revision,
            language.clone(),
        );
        self.history.clear(&uri);

        let Some(language) = language.filter(|lang| self.registry.contains(lang)) else {
            log::info!(
                target: "hirogeru::parse",
                "No bundled grammar for {} (languageId {})",
                uri,
                params.text_document.language_id
            );
            return;
        };

        let Some(text) = self.documents.get(&uri).map(|doc| doc.text().clone()) else {
            return;
        };
        self.parse_document(&uri, &language, text, None).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let lsp_uri = params.text_document.uri;
        let Ok(uri) = uri_to_url(&lsp_uri) else {
            log::warn!("Invalid URI in didChange: {}", lsp_uri.as_str());
            return;
        };
        let revision = params.text_document.version;

        let Some((old_text, language)) = self.documents.get(&uri).map(|doc| {
            (
                doc.text().text().to_string(),
                doc.language_id().map(str::to_string),
            )
        }) else {
            log::warn!("didChange for unopened document {}", uri);
            return;
        };

        let (text, edits) = apply_content_changes_with_edits(&old_text, params.content_changes);
        let old_tree = if edits.is_empty() {
            None
        } else {
            self.documents.get_edited_tree(&uri, &edits)
        };

        self.documents.update_text(&uri, text, revision);
        self.history.clear(&uri);

        let Some(language) = language.filter(|lang| self.registry.contains(lang)) else {
            return;
        };
        let Some(text) = self.documents.get(&uri).map(|doc| doc.text().clone()) else {
            return;
        };
        self.parse_document(&uri, &language, text, old_tree).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let lsp_uri = params.text_document.uri;
        let Ok(uri) = uri_to_url(&lsp_uri) else {
            log::warn!("Invalid URI in didClose: {}", lsp_uri.as_str());
            return;
        };
        self.documents.remove(&uri);
        self.history.clear(&uri);
    }

    async fn selection_range(
        &self,
        params: SelectionRangeParams,
    ) -> Result<Option<Vec<SelectionRange>>> {
        self.selection_range_impl(params).await
    }
}
