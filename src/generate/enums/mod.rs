pub mod generation_stage;
