pub mod sd_model_response;
pub mod sd_module_response;
pub mod txt2img_response;
