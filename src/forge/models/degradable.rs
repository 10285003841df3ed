use serde::Serialize;

/// Result of a best-effort call: the data, plus whether it had to be replaced
/// by an empty fallback because the backend call failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Degradable<T> {
    pub data: T,
    pub degraded: bool,
}

impl<T: Default> Degradable<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data,
            degraded: false,
        }
    }

    pub fn degraded() -> Self {
        Self {
            data: T::default(),
            degraded: true,
        }
    }
}
