use crate::domain::a001_proposal::ui::pdf_options::ProposalPdfPage;
use contracts::shared::pdf_options::PdfTemplate;
use leptos::prelude::*;
use serde::Deserialize;

/// Параметры адреса `/proposals/{id}/pdf?template=...`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfRoute {
    pub proposal_id: i64,
    pub template: Option<PdfTemplate>,
}

#[derive(Deserialize, Default)]
struct PdfQuery {
    template: Option<String>,
}

impl PdfRoute {
    pub fn parse(pathname: &str, search: &str) -> Option<Self> {
        let segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();
        let proposal_id = match segments.as_slice() {
            ["proposals", id, "pdf"] => id.parse().ok()?,
            _ => return None,
        };
        let query: PdfQuery =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        Some(Self {
            proposal_id,
            template: query.template.as_deref().and_then(PdfTemplate::parse),
        })
    }

    fn current() -> Option<Self> {
        let location = web_sys::window()?.location();
        let pathname = location.pathname().ok()?;
        let search = location.search().unwrap_or_default();
        Self::parse(&pathname, &search)
    }
}

/// Keep `?template=` in the address bar in sync with the selected template
pub fn replace_template_query(template: PdfTemplate) {
    let query = serde_qs::to_string(&std::collections::HashMap::from([(
        "template",
        template.as_str(),
    )]))
    .unwrap_or_default();
    let new_url = format!("?{}", query);

    let Some(w) = web_sys::window() else { return };
    if w.location().search().ok().as_deref() == Some(new_url.as_str()) {
        return;
    }
    if let Ok(history) = w.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url));
    }
}

#[component]
pub fn App() -> impl IntoView {
    match PdfRoute::current() {
        Some(route) => view! {
            <ProposalPdfPage proposal_id=route.proposal_id template=route.template />
        }
        .into_any(),
        None => view! {
            <div class="page">
                <h2>"Page not found"</h2>
                <p>"Open /proposals/{id}/pdf to configure a proposal PDF."</p>
            </div>
        }
        .into_any(),
    }
}
