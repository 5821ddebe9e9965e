//! ViewModel for the proposal PDF options configurator
//!
//! Owns the options session (explicit state + injected localStorage store),
//! the loaded proposal snapshot, UI state, and commands.

use super::model;
use super::storage::LocalStorage;
use crate::app::replace_template_query;
use crate::shared::export::download_bytes;
use contracts::domain::a001_proposal::aggregate::{ImageTarget, Proposal};
use contracts::shared::pdf_options::{
    PdfOptionsIntent, PdfOptionsSession, PdfOptionsStore, PdfTemplate, ProposalPdfOptions,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct PdfOptionsVm {
    pub proposal_id: i64,
    pub session: RwSignal<PdfOptionsSession<LocalStorage>>,
    pub proposal: RwSignal<Option<Proposal>>,

    // === UI State ===
    pub loading: RwSignal<bool>,
    pub uploading: RwSignal<bool>,
    pub generating: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl PdfOptionsVm {
    pub fn new(proposal_id: i64, template: PdfTemplate) -> Self {
        let session = PdfOptionsSession::open(
            PdfOptionsStore::new(LocalStorage),
            proposal_id,
            template,
        );
        Self {
            proposal_id,
            session: RwSignal::new(session),
            proposal: RwSignal::new(None),
            loading: RwSignal::new(false),
            uploading: RwSignal::new(false),
            generating: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    // === Derived signals ===

    pub fn options(&self) -> Signal<ProposalPdfOptions> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.options().clone()))
    }

    pub fn template(&self) -> Signal<PdfTemplate> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.template()))
    }

    pub fn is_busy(&self) -> Signal<bool> {
        let (loading, uploading, generating) = (self.loading, self.uploading, self.generating);
        Signal::derive(move || loading.get() || uploading.get() || generating.get())
    }

    // === Commands ===

    pub fn dispatch(&self, intent: PdfOptionsIntent) {
        self.session.maybe_update(|s| s.dispatch(intent));
    }

    pub fn switch_template(&self, template: PdfTemplate) {
        let proposal = self.proposal;
        self.session.maybe_update(|s| {
            if !s.switch_template(template) {
                return false;
            }
            if let Some(p) = proposal.get_untracked() {
                s.apply_proposal(&p);
            }
            true
        });
        replace_template_query(template);
    }

    /// Reset the active template to defaults
    pub fn reset_template(&self) {
        self.session.update(|s| s.clear());
        self.reconcile();
    }

    /// Drop saved options of every template of this proposal
    pub fn reset_all(&self) {
        self.session.update(|s| s.clear_all());
        self.reconcile();
    }

    fn reconcile(&self) {
        if let Some(p) = self.proposal.get_untracked() {
            self.session.maybe_update(|s| s.apply_proposal(&p));
        }
    }

    // === Data loading ===

    pub fn load(&self) {
        let this = *self;
        this.loading.set(true);
        this.error.set(None);

        spawn_local(async move {
            match model::fetch_proposal(this.proposal_id).await {
                Ok(proposal) => {
                    this.proposal.set(Some(proposal));
                    this.reconcile();
                }
                Err(e) => {
                    log::error!("Failed to load proposal {}: {}", this.proposal_id, e);
                    this.error.set(Some(e));
                }
            }
            this.loading.set(false);
        });
    }

    pub fn upload_image(&self, target: ImageTarget, file: web_sys::File) {
        let this = *self;
        this.uploading.set(true);
        this.error.set(None);

        spawn_local(async move {
            match model::upload_image(this.proposal_id, target, file).await {
                Ok(image) => {
                    let mut attached = false;
                    this.proposal.update(|p| {
                        if let Some(p) = p {
                            attached = p.attach_image(target, image);
                        }
                    });
                    if !attached {
                        log::warn!("Uploaded image target {:?} is not in the proposal", target);
                    }
                    this.reconcile();
                }
                Err(e) => this.error.set(Some(e)),
            }
            this.uploading.set(false);
        });
    }

    /// Upload into the custom section `section_id` of the active template
    pub fn upload_section_image(&self, section_id: String, file: web_sys::File) {
        let this = *self;
        let template = this.session.with_untracked(|s| s.template());
        this.uploading.set(true);
        this.error.set(None);

        spawn_local(async move {
            match model::upload_section_image(file).await {
                Ok(image) => this
                    .session
                    .maybe_update(|s| s.add_section_image(template, &section_id, image)),
                Err(e) => this.error.set(Some(e)),
            }
            this.uploading.set(false);
        });
    }

    pub fn generate(&self) {
        let this = *self;
        let request = this.session.with_untracked(|s| s.generation_request());
        this.generating.set(true);
        this.error.set(None);

        spawn_local(async move {
            let result = match model::generate_pdf(&request).await {
                Ok(bytes) => {
                    let filename = request.file_name(chrono::Local::now().date_naive());
                    download_bytes(&bytes, &filename, "application/pdf")
                }
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                log::error!("PDF generation failed: {}", e);
                this.error.set(Some(e));
            }
            this.generating.set(false);
        });
    }
}
