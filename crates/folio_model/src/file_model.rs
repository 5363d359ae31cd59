//! The file model aggregate: one source document's state across pipeline stages.

use crate::error::{ModelError, ObserverError};
use crate::event::{Dispatch, IdentityChanged, ObserverId, Observers, UidsChanged};
use crate::metadata::Metadata;
use folio_common::{normalize_key, ContentHash};
use folio_source::{DocumentType, LinkSourceInfo, PathIdentity, UidDefinition};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Link targets mapped to every place in the document that references them,
/// in first-seen order.
pub type LinkSourceMap = BTreeMap<String, Vec<LinkSourceInfo>>;

/// The state record for one source document.
///
/// `C` is the parsed content payload; this type never inspects it.
///
/// The [`key`](Self::key) is fixed at construction from the original relative
/// path and survives any later relocation. Identity and exported uids change
/// only through [`set_base_dir`](Self::set_base_dir),
/// [`set_file`](Self::set_file), [`set_identity`](Self::set_identity) and
/// [`set_uids`](Self::set_uids), which notify observers after the new value is
/// in place. All other derived data is replaced with plain setters and no
/// notification; keeping the link sets and link-source maps consistent is the
/// link extractor's job.
#[derive(Debug)]
pub struct FileModel<C> {
    identity: PathIdentity,
    original_identity: PathIdentity,
    key: String,
    content: C,
    uids: Vec<UidDefinition>,
    linked_files: BTreeSet<String>,
    linked_uids: BTreeSet<String>,
    uid_link_sources: LinkSourceMap,
    file_link_sources: LinkSourceMap,
    manifest_metadata: Metadata,
    build_metadata: Metadata,
    fragment_model: Option<Box<FileModel<C>>>,
    local_path_from_root: Option<String>,
    document_type_name: Option<String>,
    identity_changed: Observers<C, IdentityChanged>,
    uids_changed: Observers<C, UidsChanged>,
}

/// Builder for a [`FileModel`] whose original identity or key differ from
/// the defaults.
#[derive(Debug)]
pub struct FileModelBuilder<C> {
    identity: PathIdentity,
    content: C,
    original_identity: Option<PathIdentity>,
    key: Option<String>,
}

impl<C> FileModelBuilder<C> {
    /// Sets the identity the document was originally loaded with.
    ///
    /// Defaults to the current identity.
    pub fn original_identity(mut self, original: PathIdentity) -> Self {
        self.original_identity = Some(original);
        self
    }

    /// Sets an explicit key, used verbatim.
    ///
    /// Defaults to the original relative path prefixed with `~/`.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Builds the model. Fails only if an explicit key is empty.
    pub fn build(self) -> Result<FileModel<C>, ModelError> {
        let original_identity = self
            .original_identity
            .unwrap_or_else(|| self.identity.clone());
        let key = match self.key {
            Some(key) if key.is_empty() => {
                return Err(ModelError::EmptyKey {
                    file: original_identity.file().to_string(),
                })
            }
            Some(key) => key,
            None => normalize_key(original_identity.file()),
        };
        Ok(FileModel::from_parts(
            self.identity,
            original_identity,
            key,
            self.content,
        ))
    }
}

impl<C> FileModel<C> {
    /// Creates a model whose original identity is `identity` and whose key is
    /// derived from its relative path.
    pub fn new(identity: PathIdentity, content: C) -> Self {
        let key = normalize_key(identity.file());
        let original_identity = identity.clone();
        Self::from_parts(identity, original_identity, key, content)
    }

    fn from_parts(
        identity: PathIdentity,
        original_identity: PathIdentity,
        key: String,
        content: C,
    ) -> Self {
        Self {
            identity,
            original_identity,
            key,
            content,
            uids: Vec::new(),
            linked_files: BTreeSet::new(),
            linked_uids: BTreeSet::new(),
            uid_link_sources: LinkSourceMap::new(),
            file_link_sources: LinkSourceMap::new(),
            manifest_metadata: Metadata::new(),
            build_metadata: Metadata::new(),
            fragment_model: None,
            local_path_from_root: None,
            document_type_name: None,
            identity_changed: Observers::new(),
            uids_changed: Observers::new(),
        }
    }

    /// Starts building a model with a custom original identity or key.
    pub fn builder(identity: PathIdentity, content: C) -> FileModelBuilder<C> {
        FileModelBuilder {
            identity,
            content,
            original_identity: None,
            key: None,
        }
    }

    // ---------------------------------------------------------------------
    // Identity
    // ---------------------------------------------------------------------

    /// The canonical, relocation-independent key (always `~/`-prefixed unless
    /// supplied explicitly).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The current identity.
    pub fn identity(&self) -> &PathIdentity {
        &self.identity
    }

    /// The identity captured at construction.
    pub fn original_identity(&self) -> &PathIdentity {
        &self.original_identity
    }

    /// The current base directory.
    pub fn base_dir(&self) -> &str {
        self.identity.base_dir()
    }

    /// The current relative path.
    pub fn file(&self) -> &str {
        self.identity.file()
    }

    /// The document type of the current identity.
    pub fn doc_type(&self) -> DocumentType {
        self.identity.doc_type()
    }

    /// Moves the document to a new base directory.
    ///
    /// Does nothing if `base_dir` equals the current one. Otherwise fires one
    /// [`IdentityChanged`] after the new identity is in place.
    pub fn set_base_dir(&mut self, base_dir: &str) -> Dispatch {
        if base_dir == self.identity.base_dir() {
            return Dispatch::default();
        }
        self.identity = self.identity.with_base_dir(base_dir);
        self.fire_identity_changed()
    }

    /// Moves the document to a new relative path. Same contract as
    /// [`set_base_dir`](Self::set_base_dir).
    pub fn set_file(&mut self, file: &str) -> Dispatch {
        if file == self.identity.file() {
            return Dispatch::default();
        }
        self.identity = self.identity.with_file(file);
        self.fire_identity_changed()
    }

    /// Replaces the whole identity, firing at most one [`IdentityChanged`].
    pub fn set_identity(&mut self, identity: PathIdentity) -> Dispatch {
        if identity == self.identity {
            return Dispatch::default();
        }
        self.identity = identity;
        self.fire_identity_changed()
    }

    fn fire_identity_changed(&self) -> Dispatch {
        tracing::debug!(
            key = %self.key,
            base_dir = %self.identity.base_dir(),
            file = %self.identity.file(),
            "document identity changed"
        );
        self.identity_changed.notify(self, &IdentityChanged)
    }

    // ---------------------------------------------------------------------
    // Exported uids
    // ---------------------------------------------------------------------

    /// The uids this document exports, in declaration order.
    pub fn uids(&self) -> &[UidDefinition] {
        &self.uids
    }

    /// Replaces the exported uids and fires one [`UidsChanged`].
    ///
    /// The event fires on every successful call, even when `uids` equals the
    /// current value. A set containing the same uid twice is rejected and the
    /// model is left unchanged.
    pub fn set_uids(&mut self, uids: Vec<UidDefinition>) -> Result<Dispatch, ModelError> {
        if let Some(uid) = first_duplicate(&uids) {
            return Err(ModelError::DuplicateUid {
                key: self.key.clone(),
                uid: uid.to_string(),
            });
        }

        let original = std::mem::replace(&mut self.uids, uids);
        let event = UidsChanged {
            property: "uids",
            original,
            current: self.uids.clone(),
        };
        tracing::debug!(
            key = %self.key,
            before = event.original.len(),
            after = event.current.len(),
            "exported uids replaced"
        );
        Ok(self.uids_changed.notify(self, &event))
    }

    // ---------------------------------------------------------------------
    // Observers
    // ---------------------------------------------------------------------

    /// Subscribes to base-directory and relative-path changes.
    pub fn on_identity_changed<F>(&mut self, callback: F) -> ObserverId
    where
        F: Fn(&FileModel<C>, &IdentityChanged) -> Result<(), ObserverError>
            + Send
            + Sync
            + 'static,
    {
        self.identity_changed.subscribe(callback)
    }

    /// Unsubscribes an identity observer. Returns `false` if it was not registered.
    pub fn off_identity_changed(&mut self, id: ObserverId) -> bool {
        self.identity_changed.unsubscribe(id)
    }

    /// Subscribes to exported-uid replacement.
    pub fn on_uids_changed<F>(&mut self, callback: F) -> ObserverId
    where
        F: Fn(&FileModel<C>, &UidsChanged) -> Result<(), ObserverError> + Send + Sync + 'static,
    {
        self.uids_changed.subscribe(callback)
    }

    /// Unsubscribes a uid observer. Returns `false` if it was not registered.
    pub fn off_uids_changed(&mut self, id: ObserverId) -> bool {
        self.uids_changed.unsubscribe(id)
    }

    /// Drops every registered observer of both kinds.
    pub fn clear_observers(&mut self) {
        self.identity_changed.clear();
        self.uids_changed.clear();
    }

    // ---------------------------------------------------------------------
    // Content and derived data
    // ---------------------------------------------------------------------

    /// The parsed content payload.
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Mutable access to the content payload.
    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// Replaces the content payload, returning the previous one.
    pub fn set_content(&mut self, content: C) -> C {
        std::mem::replace(&mut self.content, content)
    }

    /// Keys of the files this document links to.
    pub fn linked_files(&self) -> &BTreeSet<String> {
        &self.linked_files
    }

    /// Replaces the linked file keys.
    pub fn set_linked_files(&mut self, files: BTreeSet<String>) {
        self.linked_files = files;
    }

    /// Uids this document references.
    pub fn linked_uids(&self) -> &BTreeSet<String> {
        &self.linked_uids
    }

    /// Replaces the referenced uids.
    pub fn set_linked_uids(&mut self, uids: BTreeSet<String>) {
        self.linked_uids = uids;
    }

    /// Where each referenced uid occurs in this document.
    pub fn uid_link_sources(&self) -> &LinkSourceMap {
        &self.uid_link_sources
    }

    /// Replaces the uid link sources.
    pub fn set_uid_link_sources(&mut self, sources: LinkSourceMap) {
        self.uid_link_sources = sources;
    }

    /// Where each linked file occurs in this document.
    pub fn file_link_sources(&self) -> &LinkSourceMap {
        &self.file_link_sources
    }

    /// Replaces the file link sources.
    pub fn set_file_link_sources(&mut self, sources: LinkSourceMap) {
        self.file_link_sources = sources;
    }

    /// Annotations destined for the build manifest.
    pub fn manifest_metadata(&self) -> &Metadata {
        &self.manifest_metadata
    }

    /// Mutable access to the manifest annotations.
    pub fn manifest_metadata_mut(&mut self) -> &mut Metadata {
        &mut self.manifest_metadata
    }

    /// Annotations private to the build stages.
    pub fn build_metadata(&self) -> &Metadata {
        &self.build_metadata
    }

    /// Mutable access to the build annotations.
    pub fn build_metadata_mut(&mut self) -> &mut Metadata {
        &mut self.build_metadata
    }

    /// The fragment sub-document owned by this model, if any.
    pub fn fragment_model(&self) -> Option<&FileModel<C>> {
        self.fragment_model.as_deref()
    }

    /// Mutable access to the fragment sub-document.
    pub fn fragment_model_mut(&mut self) -> Option<&mut FileModel<C>> {
        self.fragment_model.as_deref_mut()
    }

    /// Replaces the fragment sub-document, returning the previous one.
    pub fn set_fragment_model(&mut self, fragment: Option<FileModel<C>>) -> Option<FileModel<C>> {
        std::mem::replace(&mut self.fragment_model, fragment.map(Box::new)).map(|b| *b)
    }

    /// Detaches and returns the fragment sub-document.
    pub fn take_fragment_model(&mut self) -> Option<FileModel<C>> {
        self.fragment_model.take().map(|b| *b)
    }

    /// Path of the source file relative to the project root, when a loader
    /// records one separately from the identity.
    pub fn local_path_from_root(&self) -> Option<&str> {
        self.local_path_from_root.as_deref()
    }

    /// Sets the project-root-relative source path.
    pub fn set_local_path_from_root(&mut self, path: Option<String>) {
        self.local_path_from_root = path;
    }

    /// Free-form document type name assigned by the processor that handled
    /// this document (e.g. `"Conceptual"`, `"ManagedReference"`).
    pub fn document_type_name(&self) -> Option<&str> {
        self.document_type_name.as_deref()
    }

    /// Sets the processor-assigned document type name.
    pub fn set_document_type_name(&mut self, name: Option<String>) {
        self.document_type_name = name;
    }

    /// Hash of the document's link shape: key, exported uids, linked files and
    /// linked uids.
    ///
    /// Equal fingerprints across two builds mean no cross-reference edges
    /// into or out of this document changed. Content and positions are not
    /// included.
    pub fn fingerprint(&self) -> ContentHash {
        let mut exported: Vec<&str> = self.uids.iter().map(UidDefinition::uid).collect();
        exported.sort_unstable();

        let parts = std::iter::once(self.key.as_str())
            .chain(std::iter::once("\0uids"))
            .chain(exported)
            .chain(std::iter::once("\0files"))
            .chain(self.linked_files.iter().map(String::as_str))
            .chain(std::iter::once("\0xrefs"))
            .chain(self.linked_uids.iter().map(String::as_str));
        ContentHash::from_parts(parts)
    }
}

/// Returns the first uid that appears more than once.
fn first_duplicate(uids: &[UidDefinition]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(uids.len());
    uids.iter().map(UidDefinition::uid).find(|uid| !seen.insert(*uid))
}
