pub mod generation_info;
pub mod generation_result;
pub mod resolved_parameters;
