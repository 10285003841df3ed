/// Request value first, config default otherwise.
pub fn resolve<T>(request: Option<T>, config: T) -> T {
    request.unwrap_or(config)
}

/// Like [`resolve`] for optional selections: blank strings count as unset on
/// both levels, and the result may be unset.
pub fn resolve_override(request: Option<&str>, config: Option<&str>) -> Option<String> {
    request
        .filter(|v| !v.trim().is_empty())
        .or_else(|| config.filter(|v| !v.trim().is_empty()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wins_over_config() {
        assert_eq!(resolve(Some(768), 512), 768);
        assert_eq!(resolve(None, 512), 512);
    }

    #[test]
    fn override_priority() {
        assert_eq!(
            resolve_override(Some("request.safetensors"), Some("config.safetensors")).as_deref(),
            Some("request.safetensors")
        );
        assert_eq!(
            resolve_override(Some(" "), Some("config.safetensors")).as_deref(),
            Some("config.safetensors")
        );
        assert_eq!(resolve_override(None, Some("")), None);
        assert_eq!(resolve_override(None, None), None);
    }
}
