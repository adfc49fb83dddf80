// Library surface for the CLI binary and integration tests.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod assessor;
pub mod model;
pub mod phonetics;
pub mod trainer;
pub mod util;
