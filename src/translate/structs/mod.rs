pub mod ollama_generate_response;
