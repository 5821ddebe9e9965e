use super::view_model::PdfOptionsVm;
use contracts::shared::pdf_options::constants::MAX_CUSTOM_SECTION_IMAGES;
use contracts::shared::pdf_options::PdfOptionsIntent;
use leptos::prelude::*;
use thaw::*;

/// Пользовательские секции: заголовок и до двух изображений
#[component]
pub fn CustomSectionsEditor(vm: PdfOptionsVm) -> impl IntoView {
    let options = vm.options();
    let drag_from = RwSignal::new(None::<usize>);

    view! {
        <div class="details-section">
            <h4 class="details-section__title">"Custom sections"</h4>
            {move || {
                options
                    .with(|o| o.custom_sections.clone())
                    .into_iter()
                    .enumerate()
                    .map(|(index, section)| {
                        let image_count = section.images.len();
                        let section_id = StoredValue::new(section.id.clone());
                        let images = section
                            .images
                            .into_iter()
                            .enumerate()
                            .map(|(image_index, image)| {
                                view! {
                                    <div class="pdf-image-tile">
                                        <img class="pdf-image-tile__img" src=image.url alt=image.filename.clone() />
                                        <div class="pdf-image-tile__caption">{image.filename}</div>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| {
                                                vm.dispatch(PdfOptionsIntent::RemoveCustomSectionImage {
                                                    index,
                                                    image_index,
                                                });
                                            }
                                        >
                                            "Remove"
                                        </Button>
                                    </div>
                                }
                            })
                            .collect_view();

                        view! {
                            <div
                                class="pdf-custom-section"
                                draggable="true"
                                on:dragstart=move |_| drag_from.set(Some(index))
                                on:dragover=move |ev| ev.prevent_default()
                                on:drop=move |ev| {
                                    ev.prevent_default();
                                    if let Some(from) = drag_from.get_untracked() {
                                        vm.dispatch(PdfOptionsIntent::MoveCustomSection { from, to: index });
                                    }
                                    drag_from.set(None);
                                }
                            >
                                <div class="pdf-item__header">
                                    <input
                                        type="text"
                                        class="form__input"
                                        placeholder="Section title"
                                        prop:value=section.title
                                        on:change=move |ev| {
                                            vm.dispatch(PdfOptionsIntent::UpdateCustomSectionTitle {
                                                index,
                                                title: event_target_value(&ev),
                                            });
                                        }
                                    />
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
                                        on_click=move |_| {
                                            vm.dispatch(PdfOptionsIntent::RemoveCustomSection { index });
                                        }
                                    >
                                        "Delete section"
                                    </Button>
                                </div>
                                <div class="pdf-image-grid">{images}</div>
                                <Show when=move || image_count < MAX_CUSTOM_SECTION_IMAGES>
                                    <label class="pdf-upload">
                                        "Add image"
                                        <input
                                            type="file"
                                            accept="image/*"
                                            style="display: none;"
                                            prop:disabled=move || vm.uploading.get()
                                            on:change=move |ev| {
                                                let input: web_sys::HtmlInputElement = event_target(&ev);
                                                if let Some(file) = input.files().and_then(|files| files.get(0)) {
                                                    vm.upload_section_image(section_id.get_value(), file);
                                                }
                                                input.set_value("");
                                            }
                                        />
                                    </label>
                                </Show>
                            </div>
                        }
                    })
                    .collect_view()
            }}
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| vm.dispatch(PdfOptionsIntent::add_custom_section())
            >
                "Add section"
            </Button>
        </div>
    }
}
