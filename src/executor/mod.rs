mod builtins;
mod job;
mod launcher;
mod path_resolver;
mod pipeline;
mod redirect;

pub use builtins::{BuiltinCommand, BuiltinManager, BuiltinOutcome};
pub use job::{FinishedJob, Job, JobState, JobTable};
pub use launcher::{ProcessGroup, ProcessLauncher};
pub use path_resolver::PathResolver;
pub use pipeline::PipelineRunner;
pub use redirect::{open_input, open_output};
