//! Loading indicator for terminal UI

/// Simple ASCII loading indicator with rotating animation
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    message: String,
    frame: usize,
    frames: Vec<&'static str>,
}

impl LoadingIndicator {
    /// Creates a new loading indicator with the specified message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            frame: 0,
            frames: vec!["|", "/", "-", "\\"],
        }
    }

    /// Gets the current animation frame character
    pub fn current_frame(&self) -> &str {
        self.frames[self.frame]
    }

    /// Gets the loading message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Frame and message, e.g. `| Loading leagues...`
    pub fn label(&self) -> String {
        format!("{} {}", self.current_frame(), self.message)
    }

    /// Advances to the next animation frame
    pub fn next_frame(&mut self) {
        self.frame = (self.frame + 1) % self.frames.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_cycle() {
        let mut indicator = LoadingIndicator::new("Loading badge...");
        assert_eq!(indicator.label(), "| Loading badge...");
        indicator.next_frame();
        assert_eq!(indicator.current_frame(), "/");
        indicator.next_frame();
        indicator.next_frame();
        indicator.next_frame();
        assert_eq!(indicator.current_frame(), "|");
        assert_eq!(indicator.message(), "Loading badge...");
    }
}
