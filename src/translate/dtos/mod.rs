pub mod translate_dto;
