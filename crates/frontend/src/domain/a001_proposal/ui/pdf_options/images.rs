//! Image selection panels, one per template

use super::view_model::PdfOptionsVm;
use contracts::domain::a001_proposal::aggregate::{ImageTarget, ProposalImage, ProposalItem};
use contracts::shared::pdf_options::projection::{
    can_toggle_secondary, is_image_selected, is_primary, secondary_label,
    secondary_slots_remaining,
};
use contracts::shared::pdf_options::{
    DescriptionCategory, DescriptionKey, ImageSetKind, ImageSize, PdfOptionsIntent,
    ProductImageMode,
};
use leptos::prelude::*;

/// Thumbnail with caption
#[component]
fn ImageThumb(image: ProposalImage, children: Children) -> impl IntoView {
    let caption = image.description.clone().unwrap_or_default();
    view! {
        <div class="pdf-image-tile">
            <img class="pdf-image-tile__img" src=image.image_url.clone() alt=caption.clone() />
            <div class="pdf-image-tile__caption">
                {caption}
                {image.is_uploaded.then(|| view! { <span class="badge">"uploaded"</span> })}
            </div>
            <div class="pdf-image-tile__controls">{children()}</div>
        </div>
    }
}

/// File input that uploads into `target`
#[component]
fn UploadButton(vm: PdfOptionsVm, target: ImageTarget) -> impl IntoView {
    view! {
        <label class="pdf-upload">
            "Upload image"
            <input
                type="file"
                accept="image/*"
                style="display: none;"
                prop:disabled=move || vm.uploading.get()
                on:change=move |ev| {
                    let input: web_sys::HtmlInputElement = event_target(&ev);
                    if let Some(file) = input.files().and_then(|files| files.get(0)) {
                        vm.upload_image(target, file);
                    }
                    input.set_value("");
                }
            />
        </label>
    }
}

/// Checkbox grid over one of the unbounded image sets
#[component]
fn ImageSetGrid(
    vm: PdfOptionsVm,
    set: ImageSetKind,
    owner_id: i64,
    images: Vec<ProposalImage>,
    category: DescriptionCategory,
) -> impl IntoView {
    let options = vm.options();
    if images.is_empty() {
        return view! { <div class="pdf-empty">"No images"</div> }.into_any();
    }

    images
        .into_iter()
        .map(|image| {
            let image_id = image.image_id.clone();
            let checked_id = image_id.clone();
            let desc_key = DescriptionKey::image(category, image_id.clone());
            let desc_key_read = desc_key.clone();
            view! {
                <ImageThumb image=image>
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || {
                                options.with(|o| is_image_selected(o, set, owner_id, &checked_id))
                            }
                            on:change=move |ev| {
                                vm.dispatch(PdfOptionsIntent::ToggleImageInSet {
                                    set,
                                    owner_id,
                                    image_id: image_id.clone(),
                                    included: event_target_checked(&ev),
                                });
                            }
                        />
                        " Include"
                    </label>
                    <input
                        type="text"
                        class="form__input"
                        placeholder="Custom description"
                        prop:value=move || {
                            options.with(|o| {
                                o.custom_descriptions.get(&desc_key_read).unwrap_or_default().to_string()
                            })
                        }
                        on:change=move |ev| {
                            vm.dispatch(PdfOptionsIntent::SetCustomDescription {
                                key: desc_key.clone(),
                                text: event_target_value(&ev),
                            });
                        }
                    />
                </ImageThumb>
            }
        })
        .collect_view()
        .into_any()
}

fn items(vm: PdfOptionsVm) -> Vec<ProposalItem> {
    vm.proposal.with(|p| p.as_ref().map(|p| p.items.clone()).unwrap_or_default())
}

/// Template A: every item image can be switched on or off
#[component]
pub fn CleanProposalImages(vm: PdfOptionsVm) -> impl IntoView {
    let options = vm.options();
    view! {
        <div class="details-section">
            <h4 class="details-section__title">"Images"</h4>
            <div class="form__group">
                <label class="form__label">"Image size"</label>
                <select
                    class="form__select"
                    on:change=move |ev| {
                        let size = match event_target_value(&ev).as_str() {
                            "small" => ImageSize::Small,
                            _ => ImageSize::Large,
                        };
                        vm.dispatch(PdfOptionsIntent::SetImageSize { size });
                    }
                >
                    <option value="large" prop:selected=move || options.with(|o| o.image_size == ImageSize::Large)>
                        "Large"
                    </option>
                    <option value="small" prop:selected=move || options.with(|o| o.image_size == ImageSize::Small)>
                        "Small"
                    </option>
                </select>
            </div>
            {move || {
                items(vm)
                    .into_iter()
                    .map(|item| {
                        let item_id = item.proposal_item_id;
                        view! {
                            <div class="pdf-item">
                                <div class="pdf-item__header">
                                    <strong>{item.name.clone()}</strong>
                                    <UploadButton vm=vm target=ImageTarget::Item(item_id) />
                                </div>
                                <div class="pdf-image-grid">
                                    <ImageSetGrid
                                        vm=vm
                                        set=ImageSetKind::Item
                                        owner_id=item_id
                                        images=item.all_images.clone()
                                        category=DescriptionCategory::Product
                                    />
                                </div>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

/// Template B: one image per item plus additional information
#[component]
pub fn ProductSummaryImages(vm: PdfOptionsVm) -> impl IntoView {
    let options = vm.options();
    view! {
        <div class="details-section">
            <h4 class="details-section__title">"Product images"</h4>
            {move || {
                items(vm)
                    .into_iter()
                    .map(|item| {
                        let item_id = item.proposal_item_id;
                        let radio_name = format!("summary-image-{}", item_id);
                        let tiles = item
                            .all_images
                            .clone()
                            .into_iter()
                            .map(|image| {
                                let image_id = image.image_id.clone();
                                let checked_id = image_id.clone();
                                let radio_name = radio_name.clone();
                                view! {
                                    <ImageThumb image=image>
                                        <label>
                                            <input
                                                type="radio"
                                                name=radio_name.clone()
                                                prop:checked=move || {
                                                    options.with(|o| {
                                                        o.selected_product_summary_images.get(&item_id)
                                                            == Some(&checked_id)
                                                    })
                                                }
                                                on:change=move |_| {
                                                    vm.dispatch(PdfOptionsIntent::SelectSummaryImage {
                                                        item_id,
                                                        image_id: image_id.clone(),
                                                    });
                                                }
                                            />
                                            " Use in summary"
                                        </label>
                                    </ImageThumb>
                                }
                            })
                            .collect_view();
                        view! {
                            <div class="pdf-item">
                                <div class="pdf-item__header">
                                    <strong>{item.name.clone()}</strong>
                                    <UploadButton vm=vm target=ImageTarget::Item(item_id) />
                                </div>
                                <div class="pdf-image-grid">{tiles}</div>
                            </div>
                        }
                    })
                    .collect_view()
            }}
            <div class="form__group">
                <label class="form__label">"Additional information"</label>
                <textarea
                    class="form__textarea"
                    rows=4
                    prop:value=move || options.with(|o| o.additional_information.clone())
                    on:change=move |ev| {
                        vm.dispatch(PdfOptionsIntent::SetAdditionalInformation {
                            text: event_target_value(&ev),
                        });
                    }
                ></textarea>
            </div>
        </div>
    }
}

/// Template C: primary + up to three secondary images per item, or any images
#[component]
pub fn PrettyProductImages(vm: PdfOptionsVm) -> impl IntoView {
    let options = vm.options();
    let drag_from = RwSignal::new(None::<(i64, usize)>);
    let mode = Memo::new(move |_| options.with(|o| o.product_image_mode));

    view! {
        <div class="details-section">
            <h4 class="details-section__title">"Product images"</h4>
            <div class="form__group">
                <label class="form__label">"Selection mode"</label>
                <select
                    class="form__select"
                    on:change=move |ev| {
                        let mode = match event_target_value(&ev).as_str() {
                            "multi_select" => ProductImageMode::MultiSelect,
                            _ => ProductImageMode::PrimarySecondary,
                        };
                        vm.dispatch(PdfOptionsIntent::SetProductImageMode { mode });
                    }
                >
                    <option
                        value="primary_secondary"
                        prop:selected=move || mode.get() == ProductImageMode::PrimarySecondary
                    >
                        "Primary + secondary"
                    </option>
                    <option
                        value="multi_select"
                        prop:selected=move || mode.get() == ProductImageMode::MultiSelect
                    >
                        "Any images"
                    </option>
                </select>
            </div>
            {move || {
                let multi_select = mode.get() == ProductImageMode::MultiSelect;
                items(vm)
                    .into_iter()
                    .map(|item| {
                        let item_id = item.proposal_item_id;
                        if multi_select {
                            return view! {
                                <div class="pdf-item">
                                    <div class="pdf-item__header">
                                        <strong>{item.name.clone()}</strong>
                                        <UploadButton vm=vm target=ImageTarget::Item(item_id) />
                                    </div>
                                    <div class="pdf-image-grid">
                                        <ImageSetGrid
                                            vm=vm
                                            set=ImageSetKind::Product
                                            owner_id=item_id
                                            images=item.all_images.clone()
                                            category=DescriptionCategory::Product
                                        />
                                    </div>
                                </div>
                            }
                            .into_any();
                        }

                        let radio_name = format!("primary-image-{}", item_id);
                        let tiles = item
                            .all_images
                            .clone()
                            .into_iter()
                            .map(|image| {
                                let image_id = StoredValue::new(image.image_id.clone());
                                let radio_name = radio_name.clone();
                                view! {
                                    <ImageThumb image=image>
                                        <label>
                                            <input
                                                type="radio"
                                                name=radio_name.clone()
                                                prop:checked=move || {
                                                    options.with(|o| is_primary(o, item_id, &image_id.get_value()))
                                                }
                                                on:change=move |_| {
                                                    vm.dispatch(PdfOptionsIntent::SetPrimaryImage {
                                                        item_id,
                                                        image_id: image_id.get_value(),
                                                    });
                                                }
                                            />
                                            " Primary"
                                        </label>
                                        <label>
                                            <input
                                                type="checkbox"
                                                prop:checked=move || {
                                                    options.with(|o| {
                                                        secondary_label(o, item_id, &image_id.get_value()).is_some()
                                                    })
                                                }
                                                prop:disabled=move || {
                                                    !options.with(|o| can_toggle_secondary(o, item_id, &image_id.get_value()))
                                                }
                                                on:change=move |ev| {
                                                    vm.dispatch(PdfOptionsIntent::ToggleSecondaryImage {
                                                        item_id,
                                                        image_id: image_id.get_value(),
                                                        included: event_target_checked(&ev),
                                                    });
                                                }
                                            />
                                            {move || {
                                                options
                                                    .with(|o| secondary_label(o, item_id, &image_id.get_value()))
                                                    .map(|label| format!(" {}", label))
                                                    .unwrap_or_else(|| " Secondary".to_string())
                                            }}
                                        </label>
                                    </ImageThumb>
                                }
                            })
                            .collect_view();

                        let item_desc = DescriptionKey::item(item_id);
                        let item_desc_read = item_desc.clone();

                        view! {
                            <div class="pdf-item">
                                <div class="pdf-item__header">
                                    <strong>{item.name.clone()}</strong>
                                    <span class="pdf-item__hint">
                                        {move || {
                                            format!(
                                                "{} secondary slots left",
                                                options.with(|o| secondary_slots_remaining(o, item_id)),
                                            )
                                        }}
                                    </span>
                                    <UploadButton vm=vm target=ImageTarget::Item(item_id) />
                                </div>
                                <div class="pdf-image-grid">{tiles}</div>
                                <SecondaryOrder vm=vm item_id=item_id drag_from=drag_from />
                                <textarea
                                    class="form__textarea"
                                    rows=2
                                    placeholder="Item description for the PDF"
                                    prop:value=move || {
                                        options.with(|o| {
                                            o.custom_descriptions.get(&item_desc_read).unwrap_or_default().to_string()
                                        })
                                    }
                                    on:change=move |ev| {
                                        vm.dispatch(PdfOptionsIntent::SetCustomDescription {
                                            key: item_desc.clone(),
                                            text: event_target_value(&ev),
                                        });
                                    }
                                ></textarea>
                            </div>
                        }
                        .into_any()
                    })
                    .collect_view()
            }}
        </div>
    }
}

/// Draggable list of the secondary images of one item
#[component]
fn SecondaryOrder(
    vm: PdfOptionsVm,
    item_id: i64,
    drag_from: RwSignal<Option<(i64, usize)>>,
) -> impl IntoView {
    let options = vm.options();
    view! {
        <ol class="pdf-secondary-order">
            {move || {
                let secondary = options.with(|o| {
                    o.product_image_slots
                        .get(&item_id)
                        .map(|s| s.secondary.clone())
                        .unwrap_or_default()
                });
                secondary
                    .into_iter()
                    .enumerate()
                    .map(|(index, image_id)| {
                        view! {
                            <li
                                draggable="true"
                                on:dragstart=move |_| drag_from.set(Some((item_id, index)))
                                on:dragover=move |ev| ev.prevent_default()
                                on:drop=move |ev| {
                                    ev.prevent_default();
                                    if let Some((from_item, from)) = drag_from.get_untracked() {
                                        if from_item == item_id {
                                            vm.dispatch(PdfOptionsIntent::MoveSecondaryImage {
                                                item_id,
                                                from,
                                                to: index,
                                            });
                                        }
                                    }
                                    drag_from.set(None);
                                }
                            >
                                {image_id}
                            </li>
                        }
                    })
                    .collect_view()
            }}
        </ol>
    }
}

/// Template C: piece and material image sets
#[component]
pub fn PiecesAndMaterialsImages(vm: PdfOptionsVm) -> impl IntoView {
    let options = vm.options();
    view! {
        <Show when=move || options.with(|o| o.show_pieces && o.show_piece_images)>
            <div class="details-section">
                <h4 class="details-section__title">"Piece images"</h4>
                {move || {
                    vm.proposal
                        .with(|p| p.as_ref().map(|p| p.pieces().cloned().collect::<Vec<_>>()))
                        .unwrap_or_default()
                        .into_iter()
                        .map(|piece| {
                            view! {
                                <div class="pdf-item">
                                    <div class="pdf-item__header">
                                        <strong>{piece.name.clone()}</strong>
                                        <UploadButton vm=vm target=ImageTarget::Piece(piece.piece_id) />
                                    </div>
                                    <div class="pdf-image-grid">
                                        <ImageSetGrid
                                            vm=vm
                                            set=ImageSetKind::Piece
                                            owner_id=piece.piece_id
                                            images=piece.images.clone()
                                            category=DescriptionCategory::Piece
                                        />
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </Show>
        <Show when=move || options.with(|o| o.show_materials && o.show_material_images)>
            <div class="details-section">
                <h4 class="details-section__title">"Material images"</h4>
                {move || {
                    vm.proposal
                        .with(|p| p.as_ref().map(|p| p.materials().cloned().collect::<Vec<_>>()))
                        .unwrap_or_default()
                        .into_iter()
                        .map(|material| {
                            view! {
                                <div class="pdf-item">
                                    <div class="pdf-item__header">
                                        <strong>{material.name.clone()}</strong>
                                        <UploadButton vm=vm target=ImageTarget::Material(material.material_id) />
                                    </div>
                                    <div class="pdf-image-grid">
                                        <ImageSetGrid
                                            vm=vm
                                            set=ImageSetKind::Material
                                            owner_id=material.material_id
                                            images=material.images.clone()
                                            category=DescriptionCategory::Material
                                        />
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </Show>
    }
}
