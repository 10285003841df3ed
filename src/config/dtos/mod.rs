pub mod edit_config_dto;
