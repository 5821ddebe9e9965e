//! Рабочая сессия конфигуратора PDF.
//!
//! The session is the single owner of the in-memory options for the active
//! (proposal, template) pair. Every change goes through the reducer and is
//! written through to the store right away.

use super::options::{defaults_for, ProposalPdfOptions, SectionImage};
use super::reconcile::reconcile;
use super::request::PdfGenerationRequest;
use super::rules::{reduce_observed, LogObserver, PdfOptionsIntent, RuleObserver};
use super::storage::{KeyValueStore, PdfOptionsStore};
use super::template::PdfTemplate;
use crate::domain::a001_proposal::aggregate::Proposal;

pub struct PdfOptionsSession<S: KeyValueStore> {
    store: PdfOptionsStore<S>,
    proposal_id: i64,
    template: PdfTemplate,
    options: ProposalPdfOptions,
}

impl<S: KeyValueStore> PdfOptionsSession<S> {
    /// Load the stored options of the pair, or the template defaults
    pub fn open(store: PdfOptionsStore<S>, proposal_id: i64, template: PdfTemplate) -> Self {
        let options = store.load(proposal_id, template, defaults_for(template));
        Self {
            store,
            proposal_id,
            template,
            options,
        }
    }

    pub fn proposal_id(&self) -> i64 {
        self.proposal_id
    }

    pub fn template(&self) -> PdfTemplate {
        self.template
    }

    pub fn options(&self) -> &ProposalPdfOptions {
        &self.options
    }

    pub fn store(&self) -> &PdfOptionsStore<S> {
        &self.store
    }

    /// Make `template` active. Switching to the active template keeps the
    /// in-memory options untouched. Returns whether the template changed.
    pub fn switch_template(&mut self, template: PdfTemplate) -> bool {
        if template == self.template {
            return false;
        }
        log::debug!(
            "PDF template for proposal {}: {} -> {}",
            self.proposal_id,
            self.template.as_str(),
            template.as_str()
        );
        self.options = self
            .store
            .load(self.proposal_id, template, defaults_for(template));
        self.template = template;
        true
    }

    /// Initialize selections for items not seen before. Returns whether the
    /// options changed.
    pub fn apply_proposal(&mut self, proposal: &Proposal) -> bool {
        if proposal.proposal_id != self.proposal_id {
            log::warn!(
                "Ignoring data of proposal {} in the PDF session of proposal {}",
                proposal.proposal_id,
                self.proposal_id
            );
            return false;
        }
        let next = reconcile(&self.options, self.template, proposal);
        self.replace(next)
    }

    pub fn dispatch(&mut self, intent: PdfOptionsIntent) -> bool {
        self.dispatch_observed(intent, &LogObserver)
    }

    pub fn dispatch_observed(
        &mut self,
        intent: PdfOptionsIntent,
        observer: &dyn RuleObserver,
    ) -> bool {
        let next = reduce_observed(&self.options, intent, observer);
        self.replace(next)
    }

    /// Attach an image to the custom section `section_id` of `template`.
    ///
    /// Uploads finish asynchronously, so the section is found by id at the
    /// time the image arrives. Dropped when the template is no longer active
    /// or the section was removed meanwhile.
    pub fn add_section_image(
        &mut self,
        template: PdfTemplate,
        section_id: &str,
        image: SectionImage,
    ) -> bool {
        if template != self.template {
            log::warn!(
                "Dropping image {} for section {}: template {} is no longer active",
                image.filename,
                section_id,
                template.as_str()
            );
            return false;
        }
        let Some(index) = self
            .options
            .custom_sections
            .iter()
            .position(|s| s.id == section_id)
        else {
            log::warn!(
                "Dropping image {}: custom section {} was removed",
                image.filename,
                section_id
            );
            return false;
        };
        self.dispatch(PdfOptionsIntent::AddCustomSectionImage { index, image })
    }

    /// Reset the active template to its defaults and drop its stored entry
    pub fn clear(&mut self) {
        self.store.clear(self.proposal_id, self.template);
        self.options = defaults_for(self.template);
    }

    /// Drop the stored entries of every template of this proposal
    pub fn clear_all(&mut self) {
        self.store.clear_all(self.proposal_id);
        self.options = defaults_for(self.template);
    }

    pub fn generation_request(&self) -> PdfGenerationRequest {
        PdfGenerationRequest::new(self.proposal_id, self.template, &self.options)
    }

    fn replace(&mut self, next: ProposalPdfOptions) -> bool {
        if next == self.options {
            return false;
        }
        self.options = next;
        self.store
            .save(self.proposal_id, self.template, &self.options);
        true
    }
}
