#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    SaveFailed,
    ExportFailed,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::SaveFailed => "Your last change could not be saved.",
            ViewError::ExportFailed => "The report could not be saved.",
        }
    }
}
