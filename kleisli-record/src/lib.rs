pub mod record;

pub use record::{report_json, serialize_json, Recorder, Trace, TraceAction};
