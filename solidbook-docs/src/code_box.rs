//! Code box adapter: turns an extracted snippet into a viewer configuration.

use indexmap::IndexMap;
use solidbook_core::viewer::{
    ENTRY_POINT, EditorOptions, FileDescriptor, ProviderOptions, ViewerConfiguration,
    ViewerOptions,
};

use crate::extract::ExtractedCodeBlock;

/// Builds a single-file, read-only configuration for `block`.
///
/// The file is keyed by the block's file name, or by `""` when the fence had
/// no marker.
#[must_use]
pub fn from_block(block: &ExtractedCodeBlock, options: &ViewerOptions) -> ViewerConfiguration {
    let mut files = IndexMap::with_capacity(2);
    files.insert(
        block.file_name.clone(),
        FileDescriptor::read_only_snippet(block.code.clone()),
    );
    from_files(files, options)
}

/// Builds a configuration from caller-supplied files.
///
/// The entry-point override is merged last and replaces any caller entry at
/// [`ENTRY_POINT`]. Tabs are shown iff some other key is non-empty.
#[must_use]
pub fn from_files(
    mut files: IndexMap<String, FileDescriptor>,
    options: &ViewerOptions,
) -> ViewerConfiguration {
    files.insert(ENTRY_POINT.to_string(), FileDescriptor::hidden());
    let show_tabs = shows_tabs(files.keys().map(String::as_str));

    ViewerConfiguration {
        template: options.template.clone(),
        theme: options.theme.clone(),
        files,
        options: ProviderOptions {
            classes: options.classes.clone(),
        },
        editor: EditorOptions {
            show_tabs,
            show_line_numbers: options.show_line_numbers,
        },
    }
}

/// Tab visibility: true iff some key other than [`ENTRY_POINT`] is non-empty.
#[must_use]
pub fn shows_tabs<'a>(mut keys: impl Iterator<Item = &'a str>) -> bool {
    keys.any(|key| key != ENTRY_POINT && !key.is_empty())
}
