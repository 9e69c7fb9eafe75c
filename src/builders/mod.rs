// This file is the module declaration file for the `builders` module.
// It declares and makes public all the sub-modules within `src/builders`,
// which hold the text-level logic of the tool.

// `classifier` module:
// Maps a file path to a `Category` through an ordered list of path-segment
// rules (`CategoryRule`), falling back to a default category.
pub mod classifier;

// `importer` module:
// Reads newline-delimited list files so their entries can be merged into the
// configured file list.
pub mod importer;

// `injector` module:
// The idempotency check (`WrapMarker`), the wrapper element (`WrapTemplate`)
// and `Injector::process`, which splices the wrapper around the located region.
pub mod injector;

// `locator` module:
// Finds the last anchor in a text and the balancing closing delimiter that
// ends its region, without parsing the surrounding language.
pub mod locator;

// `reporter` module:
// Collects per-file results into a `RunReport` and prints it.
pub mod reporter;

// `validator` module:
// Checks a configuration for problems before it is used.
pub mod validator;
