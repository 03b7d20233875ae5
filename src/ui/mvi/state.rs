/// Marker trait for UI state objects.
///
/// States are plain data: cloned to derive the next state, compared to detect
/// changes, and `Default` is the freshly mounted view.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// Sequence number of the latest load a view has issued.
///
/// A load result is applied only when it answers the latest request; older
/// in-flight responses are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSeq(u64);

impl LoadSeq {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// True when `seq` answers this (latest) request.
    pub fn accepts(self, seq: u64) -> bool {
        self.0 == seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_sequence_is_accepted() {
        let first = LoadSeq::default().next();
        let second = first.next();
        assert!(second.accepts(second.value()));
        assert!(!second.accepts(first.value()));
    }
}
