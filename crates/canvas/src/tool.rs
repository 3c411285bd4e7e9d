/// Active canvas tool, chosen from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    Pan,
    Pencil,
    Line,
}

impl Tool {
    pub fn is_drawing(self) -> bool {
        matches!(self, Tool::Pencil | Tool::Line)
    }
}

/// Pointer button reported with a press. The secondary button always pans,
/// whichever tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}
