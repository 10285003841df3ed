pub mod degradable;
pub mod input_spec;
