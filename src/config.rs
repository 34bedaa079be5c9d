use std::path::PathBuf;

/// Pointer width of the target the generated tables are compiled for
pub const DEFAULT_POINTER_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Used for byte-size accounting of the slice table and font record
    pub pointer_size: usize,

    /// Whether texture pages are packed and embedded in the artifact
    pub export_pages: bool,

    /// Directory page file names are resolved against. Defaults to the
    /// directory containing the font descriptor.
    pub page_dir: Option<PathBuf>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pointer_size: DEFAULT_POINTER_SIZE,
            export_pages: true,
            page_dir: None,
        }
    }
}
