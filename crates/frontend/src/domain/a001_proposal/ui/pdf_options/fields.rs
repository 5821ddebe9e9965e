//! Section visibility and info-field selection (pretty proposal)

use super::view_model::PdfOptionsVm;
use contracts::shared::pdf_options::{
    catalog_for, FieldSection, PdfOptionsIntent, SectionVisibility,
};
use leptos::prelude::*;

#[component]
pub fn SectionVisibilityToggles(vm: PdfOptionsVm) -> impl IntoView {
    let options = vm.options();
    view! {
        <div class="details-section">
            <h4 class="details-section__title">"Sections"</h4>
            <div class="details-flags">
                {SectionVisibility::all()
                    .into_iter()
                    .map(|section| {
                        view! {
                            <label class="pdf-flag">
                                <input
                                    type="checkbox"
                                    prop:checked=move || options.with(|o| o.is_visible(section))
                                    on:change=move |ev| {
                                        vm.dispatch(PdfOptionsIntent::SetSectionVisibility {
                                            section,
                                            visible: event_target_checked(&ev),
                                        });
                                    }
                                />
                                {format!(" {}", section.label())}
                            </label>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn FieldSelection(vm: PdfOptionsVm) -> impl IntoView {
    let options = vm.options();
    view! {
        <div class="details-section">
            <h4 class="details-section__title">"Information fields"</h4>
            <div class="details-grid--3col">
                {FieldSection::all()
                    .into_iter()
                    .map(|section| {
                        view! {
                            <Show when=move || {
                                options.with(|o| o.is_field_section_shown(section))
                            }>
                                <div class="form__group">
                                    <label class="form__label">{section.display_name()}</label>
                                    {catalog_for(section)
                                        .iter()
                                        .map(|field| {
                                            let key = field.key;
                                            view! {
                                                <label class="pdf-flag">
                                                    <input
                                                        type="checkbox"
                                                        prop:checked=move || {
                                                            options.with(|o| {
                                                                o.selected_fields(section)
                                                                    .iter()
                                                                    .any(|k| k == key)
                                                            })
                                                        }
                                                        on:change=move |_| {
                                                            vm.dispatch(PdfOptionsIntent::ToggleField {
                                                                section,
                                                                key: key.to_string(),
                                                            });
                                                        }
                                                    />
                                                    {format!(" {}", field.label)}
                                                </label>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            </Show>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
