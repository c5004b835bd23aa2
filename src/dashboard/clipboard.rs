//! Clipboard sink backed by the egui platform integration

use crate::delivery::ClipboardWriter;
use crate::error::SinkError;

/// Writes through `egui::Context`; the text reaches the OS clipboard at the
/// end of the frame
pub struct EguiClipboard<'a>(pub &'a egui::Context);

impl ClipboardWriter for EguiClipboard<'_> {
    fn write_text(&mut self, text: &str) -> Result<(), SinkError> {
        self.0.output_mut(|output| output.copied_text = text.to_string());
        Ok(())
    }
}
