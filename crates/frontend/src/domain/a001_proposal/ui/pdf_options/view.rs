use super::custom_sections::CustomSectionsEditor;
use super::fields::{FieldSelection, SectionVisibilityToggles};
use super::images::{
    CleanProposalImages, PiecesAndMaterialsImages, PrettyProductImages, ProductSummaryImages,
};
use super::view_model::PdfOptionsVm;
use contracts::shared::pdf_options::{PdfOptionsIntent, PdfTemplate};
use leptos::prelude::*;
use thaw::*;

/// Страница настроек PDF: `/proposals/{id}/pdf?template=pretty_proposal`
#[component]
pub fn ProposalPdfPage(proposal_id: i64, template: Option<PdfTemplate>) -> impl IntoView {
    view! {
        <div class="page">
            <PdfOptionsConfigurator
                proposal_id=proposal_id
                template=template.unwrap_or(PdfTemplate::PrettyProposal)
            />
        </div>
    }
}

#[component]
pub fn PdfOptionsConfigurator(proposal_id: i64, template: PdfTemplate) -> impl IntoView {
    let vm = PdfOptionsVm::new(proposal_id, template);
    vm.load();

    let options = vm.options();
    let current_template = vm.template();
    let is_busy = vm.is_busy();

    view! {
        <div class="details-container pdf-options">
            <div class="details-header">
                <h2>
                    {move || {
                        vm.proposal
                            .with(|p| p.as_ref().map(|p| p.name.clone()))
                            .unwrap_or_else(|| format!("Proposal {}", proposal_id))
                    }}
                </h2>
                <div class="details-header__actions">
                    <select
                        class="form__select"
                        on:change=move |ev| {
                            if let Some(t) = PdfTemplate::parse(&event_target_value(&ev)) {
                                vm.switch_template(t);
                            }
                        }
                    >
                        {PdfTemplate::all()
                            .into_iter()
                            .map(|t| {
                                view! {
                                    <option
                                        value=t.as_str()
                                        prop:selected=move || current_template.get() == t
                                    >
                                        {t.display_name()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=is_busy
                        on_click=move |_| vm.generate()
                    >
                        {move || if vm.generating.get() { "Generating..." } else { "Generate PDF" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.reset_template()>
                        "Reset template"
                    </Button>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.reset_all()>
                        "Reset all templates"
                    </Button>
                </div>
            </div>

            {move || {
                vm.error
                    .get()
                    .map(|e| {
                        view! {
                            <div class="warning-box" style="background: var(--color-error-50); border-color: var(--color-error-100);">
                                <span class="warning-box__icon" style="color: var(--color-error);">"⚠"</span>
                                <span class="warning-box__text" style="color: var(--color-error);">{e}</span>
                            </div>
                        }
                    })
            }}

            <Show when=move || vm.loading.get()>
                <div class="pdf-loading">"Loading proposal..."</div>
            </Show>

            <div class="details-section">
                <label class="pdf-flag">
                    <input
                        type="checkbox"
                        prop:checked=move || options.with(|o| o.show_customer_info)
                        on:change=move |ev| {
                            vm.dispatch(PdfOptionsIntent::SetShowCustomerInfo {
                                show: event_target_checked(&ev),
                            });
                        }
                    />
                    " Show customer information"
                </label>
            </div>

            {move || match current_template.get() {
                PdfTemplate::CleanProposal => view! { <CleanProposalImages vm=vm /> }.into_any(),
                PdfTemplate::ProductSummary => view! { <ProductSummaryImages vm=vm /> }.into_any(),
                PdfTemplate::PrettyProposal => {
                    view! {
                        <SectionVisibilityToggles vm=vm />
                        <Show when=move || options.with(|o| o.show_product_images)>
                            <PrettyProductImages vm=vm />
                        </Show>
                        <FieldSelection vm=vm />
                        <PiecesAndMaterialsImages vm=vm />
                        <CustomSectionsEditor vm=vm />
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
