pub mod input_spec;
pub mod session_store;
pub mod translate_response;
