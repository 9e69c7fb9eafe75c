// Module declarations for `core`: the parts of the tool that deal with the
// workspace on disk rather than with text.
//
// `config` module:
// The `WrapConfig` structure (file list, category rules, anchor and wrapper
// settings), the `ConfigProvider` trait and the `ConfigManager` that loads,
// saves, edits and exports it.
pub mod config;
// `engine` module: runs the classifier and injector over the file list.
pub mod engine;
pub mod error;
// `workspace` module: finds the directory relative paths are resolved against.
pub mod workspace;
