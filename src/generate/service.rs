use std::{path::Path, sync::Arc};

use crate::{
    app::{models::api_error::ApiError, util::time::current_timestamp},
    AppState,
};

use super::{
    dtos::generate_image_dto::GenerateImageDto,
    enums::generation_stage::GenerationStage,
    errors::GenerateApiError,
    models::{
        generation_info::GenerationInfo, generation_result::GenerationResult,
        resolved_parameters::ResolvedParameters,
    },
    util::disk,
};

/// Translates the prompt, merges it with the stored config, generates and
/// saves the images. Nothing is returned unless every stage succeeds.
pub async fn generate_image(
    dto: &GenerateImageDto,
    state: &Arc<AppState>,
) -> Result<GenerationResult, ApiError> {
    let mut stage = GenerationStage::Received;

    match run(dto, state, &mut stage).await {
        Ok(result) => Ok(result),
        Err(e) => {
            tracing::error!("image generation failed while {}: {}", stage.value(), e);
            advance(&mut stage, GenerationStage::Failed);
            Err(e)
        }
    }
}

async fn run(
    dto: &GenerateImageDto,
    state: &Arc<AppState>,
    stage: &mut GenerationStage,
) -> Result<GenerationResult, ApiError> {
    if dto.japanese_prompt.trim().is_empty() {
        return Err(GenerateApiError::PromptRequired.value());
    }

    advance(stage, GenerationStage::Translating);
    let model = dto
        .translate_model
        .as_deref()
        .unwrap_or(&state.envy.translate_model);
    let translated_prompt = state.ollama.translate(&dto.japanese_prompt, model).await?;
    tracing::info!("translated prompt: {}", translated_prompt);

    advance(stage, GenerationStage::ParametersMerged);
    let config = state.config.get().await;
    let params = ResolvedParameters::resolve(dto, &translated_prompt, &config);
    let input_spec = params.to_input_spec();
    tracing::debug!(?input_spec, "merged generation parameters");

    advance(stage, GenerationStage::BackendCalled);
    let response = state.forge.generate(&input_spec).await?;
    tracing::info!("backend returned {} image(s)", response.images.len());

    advance(stage, GenerationStage::Persisting);
    let saved_files = disk::save_images(&response.images, Path::new(&state.envy.save_dir)).await?;

    advance(stage, GenerationStage::Completed);

    Ok(GenerationResult {
        translated_prompt: translated_prompt.to_string(),
        images: response.images,
        saved_files,
        parameters: response.parameters,
        info: response.info,
        generation_info: GenerationInfo {
            original_prompt: dto.japanese_prompt.to_string(),
            translated_prompt,
            final_prompt: params.prompt,
            final_negative_prompt: params.negative_prompt,
            timestamp: current_timestamp(),
        },
    })
}

fn advance(stage: &mut GenerationStage, next: GenerationStage) {
    if stage.is_terminal() {
        tracing::warn!("generation already {}, ignoring {}", stage.value(), next.value());
        return;
    }

    tracing::debug!("generation {} -> {}", stage.value(), next.value());
    *stage = next;
}
