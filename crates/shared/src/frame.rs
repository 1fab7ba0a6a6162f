//! Outbound frame documents.
//!
//! A frame is a tiny HTML page whose `<head>` carries `fc:frame` meta tags:
//! the image to show, where the next button press is posted, and up to four
//! button labels.

use std::fmt::Write as _;

/// Most buttons the frame protocol accepts.
pub const MAX_FRAME_BUTTONS: usize = 4;

/// Protocol version announced by every document.
const FRAME_VERSION: &str = "vNext";

/// A single frame button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameButton {
    pub label: String,
}

impl FrameButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// A renderable frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameDocument {
    post_url: String,
    image: String,
    buttons: Vec<FrameButton>,
}

impl FrameDocument {
    pub fn new(post_url: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            post_url: post_url.into(),
            image: image.into(),
            buttons: Vec::new(),
        }
    }

    /// Append a button. Buttons past [`MAX_FRAME_BUTTONS`] are dropped.
    pub fn with_button(mut self, label: impl Into<String>) -> Self {
        if self.buttons.len() >= MAX_FRAME_BUTTONS {
            tracing::warn!(
                max = MAX_FRAME_BUTTONS,
                "Frame button limit reached, dropping extra button"
            );
            return self;
        }
        self.buttons.push(FrameButton::new(label));
        self
    }

    pub fn post_url(&self) -> &str {
        &self.post_url
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn buttons(&self) -> &[FrameButton] {
        &self.buttons
    }

    /// Render the document as HTML.
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(512 + self.image.len() * 2);
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        push_meta(&mut html, "fc:frame", FRAME_VERSION);
        push_meta(&mut html, "fc:frame:post_url", &self.post_url);
        push_meta(&mut html, "fc:frame:image", &self.image);
        push_meta(&mut html, "og:image", &self.image);
        for (i, button) in self.buttons.iter().enumerate() {
            push_meta(&mut html, &format!("fc:frame:button:{}", i + 1), &button.label);
        }
        html.push_str("</head>\n</html>\n");
        html
    }
}

fn push_meta(html: &mut String, property: &str, content: &str) {
    // Writing into a String cannot fail.
    let _ = writeln!(
        html,
        "    <meta property=\"{}\" content=\"{}\" />",
        escape_attribute(property),
        escape_attribute(content)
    );
}

/// Escape a value for use inside a double-quoted HTML attribute.
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
