//! Non-blocking notifications shown after form submissions.

/// Most toasts kept on screen at once; older ones are dismissed.
pub const TOAST_LIMIT: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Toast {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Toast {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

#[derive(Debug, Default)]
pub struct Toaster {
    visible: Vec<Toast>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest first.
    pub fn show(&mut self, toast: Toast) {
        self.visible.insert(0, toast);
        self.visible.truncate(TOAST_LIMIT);
    }

    pub fn visible(&self) -> &[Toast] {
        &self.visible
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.visible.first()
    }

    pub fn dismiss_all(&mut self) {
        self.visible.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_replaces_older() {
        let mut toaster = Toaster::new();
        toaster.show(Toast::success("One", "first"));
        toaster.show(Toast::error("Two", "second"));
        assert_eq!(toaster.visible().len(), 1);
        let latest = toaster.latest().unwrap();
        assert_eq!(latest.title, "Two");
        assert_eq!(latest.variant, ToastVariant::Destructive);

        toaster.dismiss_all();
        assert!(toaster.latest().is_none());
    }
}
