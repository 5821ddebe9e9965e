use crate::shared::api_utils::api_url;
use contracts::domain::a001_proposal::aggregate::{ImageTarget, Proposal, ProposalImage};
use contracts::shared::pdf_options::{PdfGenerationRequest, SectionImage};
use gloo_net::http::{Request, Response};
use serde::Deserialize;

/// Получить предложение со всеми позициями и изображениями
pub async fn fetch_proposal(proposal_id: i64) -> Result<Proposal, String> {
    let url = api_url(&format!("/api/proposals/{}", proposal_id));
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if response.status() == 404 {
        return Err(format!("Proposal {} not found", proposal_id));
    }
    ensure_ok(&response).await?;

    response
        .json::<Proposal>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Загрузить изображение для позиции, детали или материала
pub async fn upload_image(
    proposal_id: i64,
    target: ImageTarget,
    file: web_sys::File,
) -> Result<ProposalImage, String> {
    let form = file_form(&file)?;
    let url = api_url(&format!(
        "/api/proposals/{}/{}/images",
        proposal_id,
        target.as_path()
    ));

    let response = Request::post(&url)
        .body(form)
        .map_err(|e| format!("Failed to build request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Upload failed: {}", e))?;
    ensure_ok(&response).await?;

    response
        .json::<ProposalImage>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Загрузить изображение для пользовательской секции
pub async fn upload_section_image(file: web_sys::File) -> Result<SectionImage, String> {
    #[derive(Deserialize)]
    struct UploadResponse {
        url: String,
        filename: Option<String>,
    }

    let form = file_form(&file)?;
    let response = Request::post(&api_url("/api/uploads"))
        .body(form)
        .map_err(|e| format!("Failed to build request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Upload failed: {}", e))?;
    ensure_ok(&response).await?;

    let data: UploadResponse = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(SectionImage {
        url: data.url,
        description: String::new(),
        filename: data.filename.unwrap_or_else(|| file.name()),
    })
}

/// Сгенерировать PDF, возвращает байты документа
pub async fn generate_pdf(request: &PdfGenerationRequest) -> Result<Vec<u8>, String> {
    let url = api_url(&format!(
        "/api/proposals/{}/pdf/{}",
        request.proposal_id,
        request.template.as_str()
    ));

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    ensure_ok(&response).await?;

    response
        .binary()
        .await
        .map_err(|e| format!("Failed to read document: {}", e))
}

fn file_form(file: &web_sys::File) -> Result<web_sys::FormData, String> {
    let form = web_sys::FormData::new().map_err(|e| format!("{e:?}"))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| format!("{e:?}"))?;
    Ok(form)
}

async fn ensure_ok(response: &Response) -> Result<(), String> {
    if response.ok() {
        return Ok(());
    }

    #[derive(Deserialize)]
    struct ErrorResponse {
        error: Option<String>,
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    if let Ok(ErrorResponse { error: Some(msg) }) = serde_json::from_str::<ErrorResponse>(&text) {
        return Err(format!("HTTP {}: {}", status, msg));
    }
    Err(format!("HTTP error: {}", status))
}
